//! Wien's Displacement Law
//!
//! Maximizing Planck's law over wavelength reduces to the transcendental
//! equation
//!
//!   5e^{−x} + x − 5 = 0,   x = hc / (λ_max·k_B·T)
//!
//! whose non-trivial root x ≈ 4.965114 gives the displacement constant
//!
//!   b = hc / (k_B·x) ≈ 2.8978 × 10⁻³ m·K,   λ_max·T = b
//!
//! The constant is returned by `solve_wien_constant` and passed explicitly
//! to `calculate_temperature`; nothing is precomputed or cached.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::second_radiation_constant;
use crate::error::{ensure_count, ensure_finite, ensure_positive, Result, SimError};
use crate::sampling::linspace;

/// Default initial guess
pub const DEFAULT_INITIAL_GUESS: f64 = 5.0;

/// Peak wavelength of sunlight used for the solar-surface estimate (m)
pub const SOLAR_PEAK_WAVELENGTH: f64 = 502e-9;

/// Roots closer to zero than this are the trivial solution
const TRIVIAL_ROOT_BOUND: f64 = 1e-6;

/// f(x) = 5e^{−x} + x − 5
#[inline]
pub fn wien_equation(x: f64) -> f64 {
    5.0 * (-x).exp() + x - 5.0
}

/// f'(x) = 1 − 5e^{−x}
#[inline]
pub fn wien_equation_derivative(x: f64) -> f64 {
    1.0 - 5.0 * (-x).exp()
}

/// Root-finder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RootOptions {
    /// Maximum Newton iterations
    pub max_iterations: usize,
    /// Relative step tolerance
    pub xtol: f64,
    /// |f'| below this counts as a stationary point
    pub min_derivative: f64,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            xtol: 1.49012e-8,
            min_derivative: 1e-12,
        }
    }
}

/// Result of the Wien solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WienSolution {
    /// Root x of 5e^{−x} + x − 5 = 0
    pub root: f64,
    /// Displacement constant b (m·K)
    pub constant: f64,
    /// Newton iterations used
    pub iterations: usize,
}

impl WienSolution {
    /// Blackbody temperature for a peak wavelength, using this constant
    pub fn temperature(&self, wavelength: f64) -> Result<f64> {
        calculate_temperature(wavelength, self.constant)
    }
}

/// Damped Newton iteration on the Wien equation
///
/// A full Newton step is halved until |f| decreases (at most 30 halvings),
/// which keeps guesses on the steep e^{−x} side from overshooting.
pub fn find_root(x0: f64, options: &RootOptions) -> Result<(f64, usize)> {
    ensure_finite("x0", x0)?;

    let mut x = x0;
    let mut fx = wien_equation(x);

    for iteration in 1..=options.max_iterations {
        let dfx = wien_equation_derivative(x);
        if !dfx.is_finite() || dfx.abs() < options.min_derivative {
            return Err(SimError::ConvergenceError {
                last_iterate: x,
                iterations: iteration - 1,
                residual: fx.abs(),
            });
        }

        let step = fx / dfx;
        let mut lambda = 1.0;
        let mut candidate = x - step;
        let mut f_candidate = wien_equation(candidate);
        let mut halvings = 0;
        while !(f_candidate.is_finite() && f_candidate.abs() < fx.abs()) && halvings < 30 {
            lambda *= 0.5;
            candidate = x - lambda * step;
            f_candidate = wien_equation(candidate);
            halvings += 1;
        }

        if !candidate.is_finite() || !f_candidate.is_finite() {
            return Err(SimError::ConvergenceError {
                last_iterate: x,
                iterations: iteration,
                residual: fx.abs(),
            });
        }

        let dx = (candidate - x).abs();
        x = candidate;
        fx = f_candidate;
        trace!(iteration, x, residual = fx, "newton step");

        if dx <= options.xtol * x.abs().max(options.xtol) || fx == 0.0 {
            return Ok((x, iteration));
        }
    }

    Err(SimError::ConvergenceError {
        last_iterate: x,
        iterations: options.max_iterations,
        residual: fx.abs(),
    })
}

/// Solve for the root and derive b = hc / (k_B·x)
pub fn solve_wien_constant(x0: f64, options: &RootOptions) -> Result<WienSolution> {
    let (root, iterations) = find_root(x0, options)?;
    let constant = second_radiation_constant() / root;

    // x = 0 also satisfies the equation but has no physical meaning
    if root.abs() < TRIVIAL_ROOT_BOUND || !constant.is_finite() || constant <= 0.0 {
        return Err(SimError::NumericalFailure {
            context: "wien displacement constant",
            t: root,
            reason: format!("root x = {root:e} gives a non-physical constant"),
        });
    }

    debug!(x0, root, constant, iterations, "wien constant solved");

    Ok(WienSolution {
        root,
        constant,
        iterations,
    })
}

/// T = b / λ
pub fn calculate_temperature(wavelength: f64, constant: f64) -> Result<f64> {
    ensure_positive("wavelength", wavelength)?;
    ensure_positive("constant", constant)?;
    Ok(constant / wavelength)
}

/// Both sides of 5e^{−x} = 5 − x, for the graphical solution
#[derive(Debug, Clone, Serialize)]
pub struct WienCurves {
    pub x: Array1<f64>,
    /// y = 5e^{−x}
    pub exponential: Array1<f64>,
    /// y = 5 − x
    pub linear: Array1<f64>,
}

/// Sample both curves over `range`
pub fn wien_curves(range: (f64, f64), samples: usize) -> Result<WienCurves> {
    ensure_count("samples", samples)?;
    let x = linspace(range.0, range.1, samples)?;
    let exponential = x.mapv(|xi| 5.0 * (-xi).exp());
    let linear = x.mapv(|xi| 5.0 - xi);
    Ok(WienCurves { x, exponential, linear })
}
