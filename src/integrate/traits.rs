//! ODE System Traits: Standardized API for the Integrators
//!
//! Every model integrated by this crate is written as a first-order system
//!
//!   dy/dt = f(t, y),  y ∈ ℝⁿ
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      OdeSystem Trait                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + dimension()         - Length of the state vector         │
//! │  + derivatives()       - Right-hand side f(t, y)            │
//! │  + jacobian()          - ∂f/∂y (finite differences default) │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use ndarray::{Array1, Array2};

/// First-order system dy/dt = f(t, y)
pub trait OdeSystem {
    /// Dimension of the state vector
    fn dimension(&self) -> usize;

    /// Evaluate f(t, y) into `dydt`
    fn derivatives(&self, t: f64, y: &Array1<f64>, dydt: &mut Array1<f64>);

    /// Allocating form of `derivatives`
    fn eval(&self, t: f64, y: &Array1<f64>) -> Array1<f64> {
        let mut dydt = Array1::zeros(self.dimension());
        self.derivatives(t, y, &mut dydt);
        dydt
    }

    /// Jacobian ∂f/∂y
    ///
    /// Forward differences with a step scaled to each component. Systems
    /// with a cheap analytic Jacobian should override this.
    fn jacobian(&self, t: f64, y: &Array1<f64>, f0: &Array1<f64>) -> Array2<f64> {
        let n = self.dimension();
        let mut jac = Array2::zeros((n, n));
        let mut perturbed = y.clone();

        for j in 0..n {
            let delta = f64::EPSILON.sqrt() * y[j].abs().max(1.0);
            perturbed[j] = y[j] + delta;
            let f1 = self.eval(t, &perturbed);
            for i in 0..n {
                jac[[i, j]] = (f1[i] - f0[i]) / delta;
            }
            perturbed[j] = y[j];
        }

        jac
    }
}

/// Closure adapter for ad-hoc systems
pub struct FnSystem<F> {
    dimension: usize,
    rhs: F,
}

impl<F> FnSystem<F>
where
    F: Fn(f64, &Array1<f64>, &mut Array1<f64>),
{
    pub fn new(dimension: usize, rhs: F) -> Self {
        Self { dimension, rhs }
    }
}

impl<F> OdeSystem for FnSystem<F>
where
    F: Fn(f64, &Array1<f64>, &mut Array1<f64>),
{
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn derivatives(&self, t: f64, y: &Array1<f64>, dydt: &mut Array1<f64>) {
        (self.rhs)(t, y, dydt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_finite_difference_jacobian() {
        // f = (y1, -4 y0): J = [[0, 1], [-4, 0]]
        let system = FnSystem::new(2, |_t, y: &Array1<f64>, dydt: &mut Array1<f64>| {
            dydt[0] = y[1];
            dydt[1] = -4.0 * y[0];
        });
        let y = array![0.3, -1.2];
        let f0 = system.eval(0.0, &y);
        let jac = system.jacobian(0.0, &y, &f0);

        assert!((jac[[0, 0]]).abs() < 1e-6);
        assert!((jac[[0, 1]] - 1.0).abs() < 1e-6);
        assert!((jac[[1, 0]] + 4.0).abs() < 1e-6);
        assert!((jac[[1, 1]]).abs() < 1e-6);
    }
}
