//! Uniform sampling helpers
//!
//! Every series in this crate is evaluated over a uniformly spaced domain.
//! `linspace` follows the usual inclusive convention: both endpoints are
//! sampled and a single sample sits at `start`.

use ndarray::Array1;

use crate::error::{ensure_count, ensure_finite, Result};

/// Inclusive uniform grid with `n` samples
pub fn linspace(start: f64, end: f64, n: usize) -> Result<Array1<f64>> {
    ensure_finite("start", start)?;
    ensure_finite("end", end)?;
    ensure_count("num_points", n)?;

    if n == 1 {
        return Ok(Array1::from_elem(1, start));
    }

    let step = (end - start) / (n - 1) as f64;
    let mut grid = Array1::from_iter((0..n).map(|i| start + step * i as f64));
    // Pin the last sample to `end` exactly
    grid[n - 1] = end;
    Ok(grid)
}

/// (x, y) pairs for plotting; stops at the shorter array
pub fn zip_points(x: &Array1<f64>, y: &Array1<f64>) -> Vec<(f64, f64)> {
    x.iter().zip(y.iter()).map(|(&a, &b)| (a, b)).collect()
}
