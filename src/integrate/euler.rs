//! Explicit (forward) Euler integration
//!
//!   y(t + h) = y(t) + h·f(t, y(t))
//!
//! First order and not symplectic: on a harmonic oscillator every step
//! multiplies the energy by (1 + h²), so the drift is monotone upward. The
//! stepper is kept for comparison runs, not as a reference.

use ndarray::{Array1, Array2};

use super::traits::OdeSystem;

/// Fixed-step forward Euler stepper
pub struct ExplicitEuler<'a, S: OdeSystem> {
    system: &'a S,
    /// Step size h
    dt: f64,
    /// Current time
    time: f64,
    /// Current state
    state: Array1<f64>,
    /// Derivative scratch buffer
    dydt: Array1<f64>,
}

impl<'a, S: OdeSystem> ExplicitEuler<'a, S> {
    pub fn new(system: &'a S, t0: f64, y0: Array1<f64>, dt: f64) -> Self {
        let n = system.dimension();
        Self {
            system,
            dt,
            time: t0,
            state: y0,
            dydt: Array1::zeros(n),
        }
    }

    /// Advance by one step
    pub fn step(&mut self) {
        self.system.derivatives(self.time, &self.state, &mut self.dydt);
        self.state.scaled_add(self.dt, &self.dydt);
        self.time += self.dt;
    }

    /// Run multiple steps
    pub fn run(&mut self, n_steps: usize) {
        for _ in 0..n_steps {
            self.step();
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn state(&self) -> &Array1<f64> {
        &self.state
    }

    /// Run `n_steps` and record every state, initial condition included
    ///
    /// Row i of the returned matrix is y(t0 + i·h); times are computed as
    /// i·h rather than accumulated so they stay uniform.
    pub fn trajectory(mut self, n_steps: usize) -> (Array1<f64>, Array2<f64>) {
        let t0 = self.time;
        let n = self.system.dimension();
        let mut times = Array1::zeros(n_steps + 1);
        let mut states = Array2::zeros((n_steps + 1, n));

        times[0] = t0;
        states.row_mut(0).assign(&self.state);

        for i in 1..=n_steps {
            self.step();
            times[i] = t0 + i as f64 * self.dt;
            states.row_mut(i).assign(&self.state);
        }

        (times, states)
    }
}
