//! Thermal Radiation Module
//!
//! - **Wien's law**: displacement constant from the Planck maximum and the
//!   wavelength → temperature mapping

mod wien;

pub use wien::{
    calculate_temperature, find_root, solve_wien_constant, wien_curves, wien_equation,
    wien_equation_derivative, RootOptions, WienCurves, WienSolution, DEFAULT_INITIAL_GUESS,
    SOLAR_PEAK_WAVELENGTH,
};
