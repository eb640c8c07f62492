//! Optics Module
//!
//! - **Newton's rings**: air-gap interference under a plano-convex lens

mod newton_rings;

pub use newton_rings::{
    air_gap_thickness, calculate_intensity, dark_ring_radius, generate_grid,
    intensity_from_thickness, simulate_newton_rings, ApertureHandling, Grid, IntensityField,
    NewtonRingsConfig, INTENSITY_RANGE,
};
