// src/models/brownian.rs
use super::model::{ODEModel, SDEModel};
use crate::error::{validation::*, SdeResult};
use ndarray::Array2;

/// Scaled Brownian motion `dX_t = σ dW_t`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrownianMotion {
    sigma: f64,
}

impl BrownianMotion {
    pub fn new(sigma: f64) -> SdeResult<Self> {
        validate_non_negative("sigma", sigma)?;
        Ok(BrownianMotion { sigma })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl ODEModel for BrownianMotion {
    fn drift(&self, xt: &Array2<f64>, _t: f64) -> SdeResult<Array2<f64>> {
        Ok(Array2::zeros(xt.raw_dim()))
    }
}

impl SDEModel for BrownianMotion {
    fn diffusion(&self, xt: &Array2<f64>, _t: f64) -> SdeResult<Array2<f64>> {
        Ok(Array2::from_elem(xt.raw_dim(), self.sigma))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_coefficients_broadcast_to_state_shape() {
        let bm = BrownianMotion::new(0.1).unwrap();
        let xt = array![[1.0, -2.0, 3.0], [0.5, 0.0, 7.0]];

        let drift = bm.drift(&xt, 0.3).unwrap();
        let diffusion = bm.diffusion(&xt, 0.3).unwrap();

        assert_eq!(drift.dim(), (2, 3));
        assert!(drift.iter().all(|&v| v == 0.0));
        assert_eq!(diffusion, Array2::from_elem((2, 3), 0.1));
    }

    #[test]
    fn test_rejects_negative_sigma() {
        assert!(BrownianMotion::new(-0.1).is_err());
        assert!(BrownianMotion::new(f64::NAN).is_err());
        assert_eq!(BrownianMotion::new(0.0).unwrap().sigma(), 0.0);
    }
}
