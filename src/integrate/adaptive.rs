//! Adaptive Integrator with Automatic Stiffness Switching
//!
//! The steppers come from the `ivp` crate:
//!
//! - **RK45** (Dormand–Prince 5(4)): explicit, used while the problem is
//!   non-stiff
//! - **Radau** (implicit Radau IIA): used once stiffness is detected
//!
//! This module owns the switching policy. Integration runs window by
//! window, one window per output interval, so every requested time is a
//! window end and is hit exactly.
//!
//! ## Switching
//!
//! ```text
//!            h̄·‖J‖∞ > 1.5 on N windows
//!   RK45 ─────────────────────────────► Radau
//!     ▲                                   │
//!     └───────────────────────────────────┘
//!            h̄·‖J‖∞ < 1 on N windows
//! ```
//!
//! h̄ is the mean accepted step of the window and J the finite-difference
//! Jacobian at its end. RK45's real stability interval ends near 3.3, so an
//! explicit run whose mean step sits above half of it is stability-limited
//! rather than accuracy-limited.
//!
//! ## Failure
//!
//! A stepper error, a window that stops short of its end, a non-finite state
//! or a step budget overrun all surface as `SimError::NumericalFailure` with
//! the time reached.

use ivp::prelude::{solve_ivp as integrate_window, Method as Stepper, Options, IVP};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::traits::OdeSystem;
use crate::error::{ensure_positive, Result, SimError};

/// h̄·‖J‖∞ above this marks an explicit window as stiff
const STIFF_THRESHOLD: f64 = 1.5;

/// h̄·‖J‖∞ below this marks an implicit window as non-stiff
const NONSTIFF_THRESHOLD: f64 = 1.0;

/// Explicit windows shorter than this many steps are accuracy-limited
const MIN_DETECTION_STEPS: usize = 10;

/// Solver tolerances and limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveOptions {
    /// Relative tolerance
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
    /// Total step attempts allowed (accepted + rejected)
    pub max_steps: usize,
    /// Consecutive windows needed before switching method
    pub switch_after: usize,
}

impl Default for AdaptiveOptions {
    fn default() -> Self {
        Self {
            rtol: 1.49012e-8,
            atol: 1.49012e-8,
            max_steps: 100_000,
            switch_after: 15,
        }
    }
}

impl AdaptiveOptions {
    fn validate(&self) -> Result<()> {
        ensure_positive("rtol", self.rtol)?;
        ensure_positive("atol", self.atol)?;
        if self.switch_after == 0 {
            return Err(SimError::invalid("switch_after", 0.0, "must be at least 1"));
        }
        Ok(())
    }
}

/// Integration method currently in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Method {
    /// Explicit Dormand–Prince 5(4)
    DormandPrince,
    /// Implicit Radau IIA
    Radau,
}

impl Method {
    fn stepper(self) -> Stepper {
        match self {
            Self::DormandPrince => Stepper::DOPRI5,
            Self::Radau => Stepper::RADAU,
        }
    }
}

/// Work counters
#[derive(Debug, Clone, Default, Serialize)]
pub struct SolverStats {
    pub accepted: usize,
    pub rejected: usize,
    pub rhs_evals: usize,
    /// Finite-difference Jacobians taken for stiffness detection
    pub jacobian_evals: usize,
    pub method_switches: usize,
}

impl SolverStats {
    pub fn attempts(&self) -> usize {
        self.accepted + self.rejected
    }
}

/// States at the requested output times
#[derive(Debug, Clone)]
pub struct Solution {
    /// Output times (copy of the request)
    pub t: Array1<f64>,
    /// Row i is y(t[i])
    pub y: Array2<f64>,
    pub stats: SolverStats,
    /// Method in use when integration ended
    pub final_method: Method,
}

/// Presents an `OdeSystem` to the `ivp` steppers
struct Rhs<'a, S> {
    system: &'a S,
}

impl<S: OdeSystem> IVP for Rhs<'_, S> {
    fn ode(&self, x: f64, y: &[f64], dydx: &mut [f64]) {
        let state = Array1::from(y.to_vec());
        let derivative = self.system.eval(x, &state);
        for (out, &value) in dydx.iter_mut().zip(derivative.iter()) {
            *out = value;
        }
    }
}

/// One finished window
struct Window {
    t_end: f64,
    y_end: Array1<f64>,
    accepted: usize,
}

/// Max absolute row sum
fn infinity_norm(a: &Array2<f64>) -> f64 {
    a.rows()
        .into_iter()
        .map(|row| row.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

fn run_window<S: OdeSystem>(
    system: &S,
    method: Method,
    t0: f64,
    t1: f64,
    y0: &Array1<f64>,
    options: &AdaptiveOptions,
    stats: &mut SolverStats,
) -> Result<Window> {
    let settings = Options::builder()
        .method(method.stepper())
        .rtol(options.rtol)
        .atol(options.atol)
        .build();
    let start = y0.to_vec();

    let sol = integrate_window(&Rhs { system }, t0, t1, &start, settings).map_err(|err| {
        SimError::NumericalFailure {
            context: "adaptive solver",
            t: t0,
            reason: format!("{method:?} stepper failed: {err:?}"),
        }
    })?;

    stats.accepted += sol.naccpt as usize;
    stats.rejected += sol.nrejct as usize;
    stats.rhs_evals += sol.nfev as usize;

    let (Some(&t_end), Some(y_end)) = (sol.t.last(), sol.y.last()) else {
        return Err(SimError::NumericalFailure {
            context: "adaptive solver",
            t: t0,
            reason: format!("{method:?} stepper returned no states"),
        });
    };
    let y_end = Array1::from_iter(y_end.iter().copied());

    let tolerance = 1e-12 * t1.abs().max(1.0);
    if (t_end - t1).abs() > tolerance {
        return Err(SimError::NumericalFailure {
            context: "adaptive solver",
            t: t_end,
            reason: format!("{method:?} stepper stopped short of t = {t1} ({:?})", sol.status),
        });
    }
    if !y_end.iter().all(|v| v.is_finite()) {
        return Err(SimError::NumericalFailure {
            context: "adaptive solver",
            t: t_end,
            reason: "non-finite state".to_string(),
        });
    }

    Ok(Window {
        t_end: t1,
        y_end,
        accepted: sol.naccpt as usize,
    })
}

/// Integrate `system` from y(t_eval[0]) = y0, reporting y at every t_eval
///
/// `t_eval` must be finite and non-decreasing.
pub fn solve_ivp<S: OdeSystem>(
    system: &S,
    y0: &Array1<f64>,
    t_eval: &Array1<f64>,
    options: &AdaptiveOptions,
) -> Result<Solution> {
    options.validate()?;

    let n = system.dimension();
    if y0.len() != n {
        return Err(SimError::invalid("y0", y0.len() as f64, "length must match system dimension"));
    }
    if t_eval.is_empty() {
        return Err(SimError::invalid("t_eval", 0.0, "at least one output time required"));
    }
    for (i, &ti) in t_eval.iter().enumerate() {
        if !ti.is_finite() {
            return Err(SimError::invalid("t_eval", ti, "must be finite"));
        }
        if i > 0 && ti < t_eval[i - 1] {
            return Err(SimError::invalid("t_eval", ti, "must be non-decreasing"));
        }
    }
    if !y0.iter().all(|v| v.is_finite()) {
        return Err(SimError::invalid("y0", f64::NAN, "initial state must be finite"));
    }

    let mut stats = SolverStats::default();
    let mut ys = Array2::zeros((t_eval.len(), n));
    ys.row_mut(0).assign(y0);

    let mut t = t_eval[0];
    let mut y = y0.clone();
    let mut method = Method::DormandPrince;
    let mut run = 0usize;

    for (out, &t_target) in t_eval.iter().enumerate().skip(1) {
        if t_target > t {
            let window = run_window(system, method, t, t_target, &y, options, &mut stats)?;

            if stats.attempts() > options.max_steps {
                return Err(SimError::NumericalFailure {
                    context: "adaptive solver",
                    t: window.t_end,
                    reason: format!("step budget of {} exhausted", options.max_steps),
                });
            }

            let f_end = system.eval(window.t_end, &window.y_end);
            let jac = system.jacobian(window.t_end, &window.y_end, &f_end);
            stats.rhs_evals += n + 1;
            stats.jacobian_evals += 1;

            let mean_step = (t_target - t) / window.accepted.max(1) as f64;
            let stiffness = mean_step * infinity_norm(&jac);
            trace!(t = window.t_end, ?method, mean_step, stiffness, "window finished");

            let flips = match method {
                Method::DormandPrince => stiffness > STIFF_THRESHOLD && window.accepted >= MIN_DETECTION_STEPS,
                Method::Radau => stiffness < NONSTIFF_THRESHOLD,
            };
            run = if flips { run + 1 } else { 0 };

            if run >= options.switch_after {
                method = match method {
                    Method::DormandPrince => Method::Radau,
                    Method::Radau => Method::DormandPrince,
                };
                run = 0;
                stats.method_switches += 1;
                debug!(t = window.t_end, stiffness, ?method, "switching method");
            }

            t = window.t_end;
            y = window.y_end;
        }

        ys.row_mut(out).assign(&y);
    }

    debug!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        rhs_evals = stats.rhs_evals,
        switches = stats.method_switches,
        "integration complete"
    );

    Ok(Solution {
        t: t_eval.clone(),
        y: ys,
        stats,
        final_method: method,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrate::traits::FnSystem;
    use ndarray::array;

    fn oscillator() -> FnSystem<impl Fn(f64, &Array1<f64>, &mut Array1<f64>)> {
        FnSystem::new(2, |_t, y: &Array1<f64>, dydt: &mut Array1<f64>| {
            dydt[0] = y[1];
            dydt[1] = -y[0];
        })
    }

    #[test]
    fn test_harmonic_oscillator_accuracy() {
        let system = oscillator();
        let t_eval = Array1::linspace(0.0, 2.0 * std::f64::consts::PI, 21);
        let sol = solve_ivp(&system, &array![0.0, 1.0], &t_eval, &AdaptiveOptions::default()).unwrap();

        for (i, &t) in sol.t.iter().enumerate() {
            assert!((sol.y[[i, 0]] - t.sin()).abs() < 1e-6, "x({}) = {}", t, sol.y[[i, 0]]);
            assert!((sol.y[[i, 1]] - t.cos()).abs() < 1e-6);
        }
        assert_eq!(sol.stats.method_switches, 0);
        assert_eq!(sol.final_method, Method::DormandPrince);
    }

    #[test]
    fn test_stiff_problem_switches_to_radau() {
        // y' = -1e4(y - cos t) - sin t, exact solution y = cos t
        let system = FnSystem::new(1, |t, y: &Array1<f64>, dydt: &mut Array1<f64>| {
            dydt[0] = -1e4 * (y[0] - t.cos()) - t.sin();
        });
        let options = AdaptiveOptions {
            rtol: 1e-6,
            atol: 1e-8,
            ..AdaptiveOptions::default()
        };
        let t_eval = Array1::linspace(0.0, 1.0, 41);
        let sol = solve_ivp(&system, &array![1.0], &t_eval, &options).unwrap();

        assert!(sol.stats.method_switches >= 1, "stats: {:?}", sol.stats);
        assert_eq!(sol.final_method, Method::Radau);
        assert!((sol.y[[40, 0]] - 1.0_f64.cos()).abs() < 1e-4, "y(1) = {}", sol.y[[40, 0]]);
    }

    #[test]
    fn test_blowup_reports_numerical_failure() {
        // y' = y², y(0) = 1 blows up at t = 1
        let system = FnSystem::new(1, |_t, y: &Array1<f64>, dydt: &mut Array1<f64>| {
            dydt[0] = y[0] * y[0];
        });
        let t_eval = Array1::linspace(0.0, 2.0, 201);
        let err = solve_ivp(&system, &array![1.0], &t_eval, &AdaptiveOptions::default()).unwrap_err();

        match err {
            SimError::NumericalFailure { t, .. } => {
                assert!(t > 0.9 && t < 1.0 + 1e-6, "failed at t = {}", t)
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_step_budget() {
        let system = oscillator();
        let options = AdaptiveOptions {
            max_steps: 3,
            ..AdaptiveOptions::default()
        };
        let err = solve_ivp(&system, &array![0.0, 1.0], &array![0.0, 100.0], &options).unwrap_err();
        assert!(matches!(err, SimError::NumericalFailure { .. }));
    }

    #[test]
    fn test_rejects_decreasing_times() {
        let system = oscillator();
        let err = solve_ivp(&system, &array![0.0, 1.0], &array![0.0, 1.0, 0.5], &AdaptiveOptions::default());
        assert!(matches!(err, Err(SimError::InvalidArgument { parameter: "t_eval", .. })));
    }

    #[test]
    fn test_single_output_time() {
        let system = oscillator();
        let sol = solve_ivp(&system, &array![0.0, 1.0], &array![0.0], &AdaptiveOptions::default()).unwrap();
        assert_eq!(sol.y.row(0).to_vec(), vec![0.0, 1.0]);
        assert_eq!(sol.stats.accepted, 0);
    }

    #[test]
    fn test_repeated_output_time() {
        let system = oscillator();
        let sol = solve_ivp(&system, &array![0.0, 1.0], &array![0.0, 0.5, 0.5], &AdaptiveOptions::default()).unwrap();
        assert_eq!(sol.y.row(1), sol.y.row(2));
    }
}
