//! Integration Module: Numerical Solvers for First-Order Systems
//!
//! - **Explicit Euler**: fixed step, first order, for comparison runs
//! - **Adaptive**: `ivp`'s RK45 with automatic switching to Radau IIA on
//!   stiff stretches; used as the reference solution

mod adaptive;
mod euler;
mod traits;

pub use adaptive::{solve_ivp, AdaptiveOptions, Method, Solution, SolverStats};
pub use euler::ExplicitEuler;
pub use traits::{FnSystem, OdeSystem};
