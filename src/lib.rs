//! # Classical Physics Simulations
//!
//! Five small, independent simulations of textbook phenomena, each with a
//! library entry point and a binary that renders its result.
//!
//! ## Simulations
//!
//! 1. **Beats**: superposition of two sinusoids of nearby frequency,
//!    beat frequency |f₁ − f₂|, with frequency-difference and
//!    amplitude-ratio sweeps
//!
//! 2. **Newton's rings**: thin-film interference in the air gap under a
//!    plano-convex lens,
//!
//!      d(r) = R − √(R² − r²),   I = 4·sin²(2π·d/λ)
//!
//! 3. **Spring-mass oscillator**: x'' = −x over one period, explicit Euler
//!    against an adaptive RK45/Radau reference, showing
//!    Euler's monotone energy growth
//!
//! 4. **Standing waves**: A·sin(kx − ωt) + A·sin(kx + ωt) animated frame by
//!    frame through a pure state update
//!
//! 5. **Wien's displacement law**: Newton solve of 5e^{−x} + x − 5 = 0,
//!    b = hc/(k_B·x), T = b/λ_max
//!
//! ## Design
//!
//! Every simulation is a function of its configuration. There is no global
//! state: the Wien constant is returned by the solver and passed on
//! explicitly, and animation state is owned by its driver. Failures come
//! back as [`SimError`]; the library never substitutes defaults.
//!
//! ## Outputs
//!
//! - PNG line charts and heatmaps (`render`)
//! - Animated GIF (`render::GifSink`)
//! - JSON series (`export`)

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod integrate;
pub mod optics;
pub mod oscillator;
pub mod render;
pub mod sampling;
pub mod thermal;
pub mod waves;

pub use config::SimConfig;
pub use error::{Result, SimError};
pub use sampling::{linspace, zip_points};

// Re-exports from waves
pub use waves::{
    // Beats
    simulate_beat_frequency,
    BeatConfig,
    BeatResult,
    // Standing waves
    AnimationState,
    FrameSink,
    StandingWaveAnimation,
    StandingWaveParams,
};

// Re-exports from optics
pub use optics::{simulate_newton_rings, IntensityField, NewtonRingsConfig};

// Re-exports from oscillator
pub use oscillator::{solve_ode_adaptive, solve_ode_euler, ComparisonViews, Trajectory};

// Re-exports from integrate
pub use integrate::{solve_ivp, AdaptiveOptions, OdeSystem};

// Re-exports from thermal
pub use thermal::{calculate_temperature, solve_wien_constant, WienSolution};
