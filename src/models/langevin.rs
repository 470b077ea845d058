// src/models/langevin.rs
//! Overdamped Langevin dynamics
//!
//! For a target density `p`, the SDE
//! ```text
//! dX_t = (σ² / 2) ∇ log p(X_t) dt + σ dW_t
//! ```
//! leaves `p` invariant, so long rollouts from any starting distribution
//! approach `p` (asymptotically; not exactly at finite step size).
//!
//! With `p = N(0, σ²/(2θ) I)` the score is `-(2θ/σ²) x` and the drift
//! reduces to `-θ x`: the Ornstein-Uhlenbeck process.

use super::model::{ODEModel, SDEModel};
use crate::distributions::density::Density;
use crate::error::{validation::*, SdeResult};
use ndarray::Array2;

#[derive(Debug, Clone)]
pub struct LangevinSDE<D: Density> {
    sigma: f64,
    density: D,
}

impl<D: Density> LangevinSDE<D> {
    pub fn new(sigma: f64, density: D) -> SdeResult<Self> {
        validate_non_negative("sigma", sigma)?;
        if sigma == 0.0 {
            tracing::warn!("Langevin SDE with sigma = 0 has zero drift and diffusion");
        }
        Ok(LangevinSDE { sigma, density })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn density(&self) -> &D {
        &self.density
    }
}

impl<D: Density> ODEModel for LangevinSDE<D> {
    fn drift(&self, xt: &Array2<f64>, _t: f64) -> SdeResult<Array2<f64>> {
        let score = self.density.score(xt)?;
        Ok(score * (self.sigma * self.sigma / 2.0))
    }
}

impl<D: Density> SDEModel for LangevinSDE<D> {
    fn diffusion(&self, xt: &Array2<f64>, _t: f64) -> SdeResult<Array2<f64>> {
        Ok(Array2::from_elem(xt.raw_dim(), self.sigma))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::gaussian::Gaussian;
    use crate::error::SdeError;
    use ndarray::{array, Array1};

    #[test]
    fn test_drift_scales_score() {
        let target = Gaussian::isotropic(array![1.0, -1.0], 4.0).unwrap();
        let sde = LangevinSDE::new(2.0, &target).unwrap();
        let xt = array![[3.0, 1.0]];

        // score = -(x - μ) / 4 = [-0.5, -0.5]; σ²/2 = 2
        let drift = sde.drift(&xt, 0.0).unwrap();
        assert!((drift[[0, 0]] + 1.0).abs() < 1e-12);
        assert!((drift[[0, 1]] + 1.0).abs() < 1e-12);
        assert_eq!(sde.diffusion(&xt, 0.0).unwrap(), array![[2.0, 2.0]]);
    }

    #[test]
    fn test_drift_propagates_dimension_errors() {
        let target = Gaussian::standard(2).unwrap();
        let sde = LangevinSDE::new(1.0, target).unwrap();
        let wrong = Array2::<f64>::zeros((3, 5));
        assert!(matches!(
            sde.drift(&wrong, 0.0),
            Err(SdeError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_sigma() {
        let target = Gaussian::new(Array1::zeros(1), array![[1.0]]).unwrap();
        assert!(LangevinSDE::new(-1.0, &target).is_err());

        let sde = LangevinSDE::new(0.0, &target).unwrap();
        assert_eq!(sde.sigma(), 0.0);
        assert_eq!(sde.density().dim(), 1);
    }
}
