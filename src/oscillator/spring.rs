//! Spring-Mass Oscillator: Explicit Euler vs Adaptive Reference
//!
//! With k/m = 1 the block obeys
//!
//!   x'' = −x   ⇔   dx/dt = v,  dv/dt = −x
//!
//! and from x(0) = 0, v(0) = 1 the exact motion is x = sin t, v = cos t with
//! constant energy E = ½(x² + v²) = ½. Both solvers cover exactly one
//! natural period, t ∈ [0, 2π].
//!
//! ## Energy Behavior
//!
//! - **Explicit Euler**: E grows by a factor (1 + h²) every step
//! - **Adaptive**: E stays at ½ to within the solver tolerance

use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use crate::error::{ensure_count, Result};
use crate::integrate::{solve_ivp, AdaptiveOptions, ExplicitEuler, OdeSystem, SolverStats};
use crate::sampling::{linspace, zip_points};

/// Simulated interval: one natural period
pub const PERIOD: f64 = 2.0 * PI;

/// Initial state (x, v)
pub const INITIAL_STATE: [f64; 2] = [0.0, 1.0];

/// The k/m = 1 spring-mass system
#[derive(Debug, Clone, Copy, Default)]
pub struct SpringMass;

impl OdeSystem for SpringMass {
    fn dimension(&self) -> usize {
        2
    }

    fn derivatives(&self, _t: f64, y: &Array1<f64>, dydt: &mut Array1<f64>) {
        dydt[0] = y[1];
        dydt[1] = -y[0];
    }
}

/// E = ½(x² + v²)
#[inline]
pub fn total_energy(x: f64, v: f64) -> f64 {
    0.5 * (x * x + v * v)
}

/// Which solver produced a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolverKind {
    ExplicitEuler,
    Adaptive,
}

impl SolverKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ExplicitEuler => "Euler Method",
            Self::Adaptive => "Adaptive (RK45/Radau)",
        }
    }
}

/// Aligned (time, position, velocity) samples
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    pub solver: SolverKind,
    pub time: Array1<f64>,
    pub position: Array1<f64>,
    pub velocity: Array1<f64>,
    /// Work counters for the adaptive run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SolverStats>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// E(t) at every sample
    pub fn energy(&self) -> Array1<f64> {
        Zip::from(&self.position)
            .and(&self.velocity)
            .map_collect(|&x, &v| total_energy(x, v))
    }

    /// Largest |E(t) − E(0)| / E(0)
    pub fn max_relative_energy_error(&self) -> f64 {
        let energy = self.energy();
        let e0 = energy[0];
        energy.iter().map(|e| ((e - e0) / e0).abs()).fold(0.0, f64::max)
    }
}

/// Spring solver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Euler step count
    pub euler_steps: usize,
    /// Adaptive output sample count (intervals)
    pub adaptive_samples: usize,
    pub adaptive: AdaptiveOptions,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            euler_steps: 100,
            adaptive_samples: 1000,
            adaptive: AdaptiveOptions::default(),
        }
    }
}

/// Explicit Euler with h = 2π/N
///
/// Returns N + 1 samples at t_i = i·h, initial condition included.
pub fn solve_ode_euler(step_num: usize) -> Result<Trajectory> {
    ensure_count("step_num", step_num)?;

    let h = PERIOD / step_num as f64;
    let stepper = ExplicitEuler::new(&SpringMass, 0.0, Array1::from(INITIAL_STATE.to_vec()), h);
    let (time, states) = stepper.trajectory(step_num);

    debug!(step_num, h, "euler trajectory computed");

    Ok(Trajectory {
        solver: SolverKind::ExplicitEuler,
        time,
        position: states.column(0).to_owned(),
        velocity: states.column(1).to_owned(),
        stats: None,
    })
}

/// Adaptive solution reported on linspace(0, 2π, N + 1)
pub fn solve_ode_adaptive(step_num: usize, options: &AdaptiveOptions) -> Result<Trajectory> {
    ensure_count("step_num", step_num)?;

    let t_eval = linspace(0.0, PERIOD, step_num + 1)?;
    let y0 = Array1::from(INITIAL_STATE.to_vec());
    let solution = solve_ivp(&SpringMass, &y0, &t_eval, options)?;

    debug!(
        step_num,
        accepted = solution.stats.accepted,
        rejected = solution.stats.rejected,
        "adaptive trajectory computed"
    );

    Ok(Trajectory {
        solver: SolverKind::Adaptive,
        time: solution.t,
        position: solution.y.column(0).to_owned(),
        velocity: solution.y.column(1).to_owned(),
        stats: Some(solution.stats),
    })
}

/// One curve of a comparison panel
#[derive(Debug, Clone, Serialize)]
pub struct ViewSeries {
    pub solver: SolverKind,
    pub points: Vec<(f64, f64)>,
}

/// A comparison panel: the same quantity for both solvers
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonView {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Fixed y-range, when the panel zooms in
    pub y_range: Option<(f64, f64)>,
    pub series: [ViewSeries; 2],
}

/// The four aligned views of an Euler/reference comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonViews {
    pub position: ComparisonView,
    pub velocity: ComparisonView,
    pub phase_space: ComparisonView,
    pub energy: ComparisonView,
}

fn view(
    title: &'static str,
    x_label: &'static str,
    y_label: &'static str,
    y_range: Option<(f64, f64)>,
    trajectories: [&Trajectory; 2],
    extract: impl Fn(&Trajectory) -> Vec<(f64, f64)>,
) -> ComparisonView {
    ComparisonView {
        title,
        x_label,
        y_label,
        y_range,
        series: trajectories.map(|tr| ViewSeries {
            solver: tr.solver,
            points: extract(tr),
        }),
    }
}

impl ComparisonViews {
    pub fn new(euler: &Trajectory, reference: &Trajectory) -> Self {
        let both = [euler, reference];

        Self {
            position: view("Position vs Time", "Time (s)", "Position (m)", None, both, |tr| {
                zip_points(&tr.time, &tr.position)
            }),
            velocity: view("Velocity vs Time", "Time (s)", "Velocity (m/s)", None, both, |tr| {
                zip_points(&tr.time, &tr.velocity)
            }),
            phase_space: view(
                "Phase Space Trajectory",
                "Position (m)",
                "Velocity (m/s)",
                None,
                both,
                |tr| zip_points(&tr.position, &tr.velocity),
            ),
            // Zoomed to make the Euler drift visible
            energy: view(
                "Energy Conservation",
                "Time (s)",
                "Total Energy (J)",
                Some((0.4, 0.6)),
                both,
                |tr| zip_points(&tr.time, &tr.energy()),
            ),
        }
    }

    /// Panels in 2×2 reading order
    pub fn panels(&self) -> [&ComparisonView; 4] {
        [&self.position, &self.velocity, &self.phase_space, &self.energy]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_euler_initial_condition_and_length() {
        let tr = solve_ode_euler(100).unwrap();
        assert_eq!(tr.len(), 101);
        assert_eq!(tr.position[0], 0.0);
        assert_eq!(tr.velocity[0], 1.0);
        assert!((tr.time[100] - PERIOD).abs() < 1e-12);
    }

    #[test]
    fn test_euler_matches_recurrence() {
        let n = 10;
        let h = PERIOD / n as f64;
        let tr = solve_ode_euler(n).unwrap();
        let (mut x, mut v) = (0.0, 1.0);
        for i in 0..n {
            let (xn, vn) = (x + v * h, v - x * h);
            x = xn;
            v = vn;
            assert_eq!(tr.position[i + 1], x);
            assert_eq!(tr.velocity[i + 1], v);
        }
    }

    #[test]
    fn test_euler_energy_strictly_increasing() {
        for n in [10, 37, 100, 1000] {
            let energy = solve_ode_euler(n).unwrap().energy();
            for w in energy.to_vec().windows(2) {
                assert!(w[1] > w[0], "N = {}: energy did not increase", n);
            }
            // Closed form: E_N = ½(1 + h²)^N
            let h = PERIOD / n as f64;
            let expected = 0.5 * (1.0 + h * h).powi(n as i32);
            assert!((energy[n] - expected).abs() < 1e-9 * expected);
        }
    }

    #[test]
    fn test_adaptive_conserves_energy() {
        let tr = solve_ode_adaptive(1000, &AdaptiveOptions::default()).unwrap();
        assert_eq!(tr.len(), 1001);
        assert_eq!(tr.position[0], 0.0);
        assert_eq!(tr.velocity[0], 1.0);
        assert!(tr.max_relative_energy_error() < 0.01);
        // Back to the start after one period
        assert!(tr.position[1000].abs() < 1e-6);
        assert!((tr.velocity[1000] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert!(matches!(solve_ode_euler(0), Err(SimError::InvalidArgument { .. })));
        assert!(matches!(
            solve_ode_adaptive(0, &AdaptiveOptions::default()),
            Err(SimError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_comparison_views_aligned() {
        let euler = solve_ode_euler(50).unwrap();
        let reference = solve_ode_adaptive(200, &AdaptiveOptions::default()).unwrap();
        let views = ComparisonViews::new(&euler, &reference);

        for panel in views.panels() {
            assert_eq!(panel.series[0].points.len(), 51);
            assert_eq!(panel.series[1].points.len(), 201);
            assert_eq!(panel.series[0].solver, SolverKind::ExplicitEuler);
        }
        assert_eq!(views.energy.y_range, Some((0.4, 0.6)));
        assert_eq!(views.phase_space.series[1].points[0], (0.0, 1.0));
    }
}
