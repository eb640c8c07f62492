//! Grayscale heatmaps for scalar fields
//!
//! Values are mapped linearly from a fixed `(lo, hi)` range to 0..=255, so
//! images of different runs share one scale. Row 0 of the field is drawn at
//! the bottom, matching a y-up extent.

use image::{GrayImage, Luma};
use ndarray::Array2;
use std::path::Path;
use tracing::info;

use crate::error::{Result, SimError};

/// Map a field onto 8-bit gray levels
pub fn render_grayscale(field: &Array2<f64>, range: (f64, f64)) -> Result<GrayImage> {
    let (lo, hi) = range;
    if !(lo.is_finite() && hi.is_finite() && hi > lo) {
        return Err(SimError::invalid("range", hi - lo, "must be a finite increasing interval"));
    }

    let (rows, cols) = field.dim();
    let mut img = GrayImage::new(cols as u32, rows as u32);

    for ((row, col), &value) in field.indexed_iter() {
        let level = if value.is_finite() {
            ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let y = (rows - 1 - row) as u32;
        img.put_pixel(col as u32, y, Luma([(level * 255.0).round() as u8]));
    }

    Ok(img)
}

/// Render and write a grayscale PNG
pub fn save_heatmap(field: &Array2<f64>, range: (f64, f64), path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    render_grayscale(field, range)?.save(path)?;

    let (rows, cols) = field.dim();
    info!(path = %path.display(), rows, cols, "heatmap saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_fixed_range_mapping() {
        let field = array![[0.0, 2.0], [4.0, 9.0]];
        let img = render_grayscale(&field, (0.0, 4.0)).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        // Row 0 is drawn at the bottom
        assert_eq!(img.get_pixel(0, 1)[0], 0);
        assert_eq!(img.get_pixel(1, 1)[0], 128);
        assert_eq!(img.get_pixel(0, 0)[0], 255);
        // Out-of-range values saturate
        assert_eq!(img.get_pixel(1, 0)[0], 255);
    }

    #[test]
    fn test_empty_range_rejected() {
        let field = array![[1.0]];
        assert!(render_grayscale(&field, (1.0, 1.0)).is_err());
    }
}
