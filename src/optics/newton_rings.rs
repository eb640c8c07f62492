//! Newton's Rings: Thin-Film Interference Under a Plano-Convex Lens
//!
//! A lens of curvature radius R resting on a flat plate leaves an air gap
//!
//!   d(r) = R − √(R² − r²)
//!
//! at radial distance r. Reflected intensity follows
//!
//!   I(r) = 4·sin²(2π·d/λ)
//!
//! so I ∈ [0, 4] and the rings are periodic in d/λ.
//!
//! ## Aperture
//!
//! For r > R the square root is undefined. `ApertureHandling::Reject`
//! surfaces a `DomainError`; `ApertureHandling::Clamp` treats such points as
//! sitting on the lens rim.

use ndarray::{Array1, Array2, Zip};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use crate::constants::HE_NE_WAVELENGTH;
use crate::error::{ensure_count, ensure_finite, ensure_positive, Result, SimError};
use crate::sampling::linspace;

/// Display range for intensity rendering
pub const INTENSITY_RANGE: (f64, f64) = (0.0, 4.0);

/// Points outside the lens aperture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApertureHandling {
    /// Fail with `DomainError`
    #[default]
    Reject,
    /// Clamp r into [0, R]
    Clamp,
}

/// Newton's-rings parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonRingsConfig {
    /// Light wavelength λ (m)
    pub wavelength: f64,
    /// Lens curvature radius R (m)
    pub lens_radius: f64,
    /// Grid spans [−half_width, half_width] on both axes (m)
    pub half_width: f64,
    /// Samples per axis
    pub resolution: usize,
    pub aperture: ApertureHandling,
}

impl Default for NewtonRingsConfig {
    fn default() -> Self {
        Self {
            wavelength: HE_NE_WAVELENGTH,
            lens_radius: 0.1,
            half_width: 1e-3,
            resolution: 1000,
            aperture: ApertureHandling::Reject,
        }
    }
}

/// Square sampling grid with radial distances
#[derive(Debug, Clone)]
pub struct Grid {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
    /// √(x² + y²)
    pub r: Array2<f64>,
    pub half_width: f64,
}

/// Build the meshgrid over [−half_width, half_width]²
///
/// Rows follow y, columns follow x.
pub fn generate_grid(half_width: f64, resolution: usize) -> Result<Grid> {
    ensure_positive("half_width", half_width)?;
    ensure_count("resolution", resolution)?;

    let axis: Array1<f64> = linspace(-half_width, half_width, resolution)?;
    let x = Array2::from_shape_fn((resolution, resolution), |(_, j)| axis[j]);
    let y = Array2::from_shape_fn((resolution, resolution), |(i, _)| axis[i]);
    let r = Zip::from(&x).and(&y).map_collect(|&xi, &yi| xi.hypot(yi));

    Ok(Grid { x, y, r, half_width })
}

/// Air-gap thickness d(r) = R − √(R² − r²)
pub fn air_gap_thickness(r: f64, lens_radius: f64) -> Result<f64> {
    ensure_finite("r", r)?;
    if r.abs() > lens_radius {
        return Err(SimError::DomainError {
            parameter: "r",
            value: r,
            limit: lens_radius,
        });
    }
    Ok(lens_radius - (lens_radius * lens_radius - r * r).sqrt())
}

/// I = 4·sin²(2π·d/λ)
#[inline]
pub fn intensity_from_thickness(d: f64, wavelength: f64) -> f64 {
    4.0 * (2.0 * PI * d / wavelength).sin().powi(2)
}

/// Intensity field over an array of radial distances
pub fn calculate_intensity(
    r: &Array2<f64>,
    wavelength: f64,
    lens_radius: f64,
    aperture: ApertureHandling,
) -> Result<Array2<f64>> {
    ensure_positive("wavelength", wavelength)?;
    ensure_positive("lens_radius", lens_radius)?;

    let mut intensity = Array2::zeros(r.raw_dim());
    for (out, &ri) in intensity.iter_mut().zip(r.iter()) {
        let radius = match aperture {
            ApertureHandling::Reject => ri,
            ApertureHandling::Clamp => {
                ensure_finite("r", ri)?;
                ri.abs().clamp(0.0, lens_radius)
            }
        };
        let d = air_gap_thickness(radius, lens_radius)?;
        *out = intensity_from_thickness(d, wavelength);
    }

    Ok(intensity)
}

/// Intensity field with its spatial extent
#[derive(Debug, Clone, Serialize)]
pub struct IntensityField {
    pub intensity: Array2<f64>,
    pub half_width: f64,
}

impl IntensityField {
    /// (x_min, x_max, y_min, y_max)
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        (-self.half_width, self.half_width, -self.half_width, self.half_width)
    }
}

/// Grid + intensity in one call
pub fn simulate_newton_rings(config: &NewtonRingsConfig) -> Result<IntensityField> {
    let grid = generate_grid(config.half_width, config.resolution)?;
    let intensity = calculate_intensity(&grid.r, config.wavelength, config.lens_radius, config.aperture)?;

    debug!(
        wavelength = config.wavelength,
        lens_radius = config.lens_radius,
        resolution = config.resolution,
        "newton rings intensity computed"
    );

    Ok(IntensityField {
        intensity,
        half_width: grid.half_width,
    })
}

/// Radius of the m-th dark ring, r_m ≈ √(m·λ·R)
///
/// Dark rings sit where d = m·λ/2, with d ≈ r²/(2R) for r ≪ R.
pub fn dark_ring_radius(order: u32, wavelength: f64, lens_radius: f64) -> f64 {
    (order as f64 * wavelength * lens_radius).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_center_is_dark() {
        let d = air_gap_thickness(0.0, 0.1).unwrap();
        assert_eq!(d, 0.0);
        assert_eq!(intensity_from_thickness(d, HE_NE_WAVELENGTH), 0.0);
    }

    #[test]
    fn test_intensity_periodic_in_wavelength() {
        let lambda = HE_NE_WAVELENGTH;
        for &d in &[1e-8, 3.3e-7, 2.1e-6, 5e-6] {
            let a = intensity_from_thickness(d, lambda);
            let b = intensity_from_thickness(d + lambda, lambda);
            assert!((a - b).abs() < 1e-6, "d = {}: {} vs {}", d, a, b);
        }
    }

    #[test]
    fn test_outside_aperture_rejected() {
        let r = array![[0.0, 0.05], [0.2, 0.01]];
        let err = calculate_intensity(&r, HE_NE_WAVELENGTH, 0.1, ApertureHandling::Reject).unwrap_err();
        assert!(matches!(err, SimError::DomainError { parameter: "r", .. }));
    }

    #[test]
    fn test_outside_aperture_clamped() {
        let r = array![[0.2, 0.1]];
        let field = calculate_intensity(&r, HE_NE_WAVELENGTH, 0.1, ApertureHandling::Clamp).unwrap();
        // Clamped point equals the rim
        assert_eq!(field[[0, 0]], field[[0, 1]]);
    }

    #[test]
    fn test_invalid_wavelength() {
        let r = array![[0.0]];
        assert!(matches!(
            calculate_intensity(&r, 0.0, 0.1, ApertureHandling::Reject),
            Err(SimError::InvalidArgument { parameter: "wavelength", .. })
        ));
    }

    #[test]
    fn test_field_range_and_shape() {
        let config = NewtonRingsConfig {
            resolution: 101,
            ..NewtonRingsConfig::default()
        };
        let field = simulate_newton_rings(&config).unwrap();
        assert_eq!(field.intensity.dim(), (101, 101));
        assert!(field.intensity.iter().all(|&i| (0.0..=4.0).contains(&i)));
        // Odd resolution puts a sample on the optical axis
        assert!(field.intensity[[50, 50]].abs() < 1e-20);
    }

    #[test]
    fn test_dark_ring_radius() {
        let r1 = dark_ring_radius(1, HE_NE_WAVELENGTH, 0.1);
        let d = air_gap_thickness(r1, 0.1).unwrap();
        assert!(intensity_from_thickness(d, HE_NE_WAVELENGTH) < 1e-3);
    }
}
