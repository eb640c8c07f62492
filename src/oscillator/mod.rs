//! Oscillator Module
//!
//! - **Spring-mass**: x'' = −x integrated by explicit Euler and by the
//!   adaptive reference solver, compared in four views

mod spring;

pub use spring::{
    solve_ode_adaptive, solve_ode_euler, total_energy, ComparisonView, ComparisonViews,
    SolverKind, SpringConfig, SpringMass, Trajectory, ViewSeries, INITIAL_STATE, PERIOD,
};
