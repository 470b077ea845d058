// src/solvers/euler_maruyama.rs
//! Euler-Maruyama Scheme for SDE Integration
//!
//! # Mathematical Framework
//!
//! For a general SDE:
//! ```text
//! dX_t = a(X_t, t) dt + b(X_t, t) dW_t
//! ```
//!
//! The Euler-Maruyama scheme provides the discretization:
//! ```text
//! X_{n+1} = X_n + a(X_n, t_n) Δt + b(X_n, t_n) √Δt Z_n
//! ```
//!
//! Where:
//! - `a(x,t)` is the drift coefficient
//! - `b(x,t)` is the diffusion coefficient, applied per component
//! - `Z_n ~ N(0, I)` is drawn fresh every step with the state's shape
//!
//! # Convergence Properties
//!
//! - **Strong convergence**: Order 0.5 in step size
//! - **Weak convergence**: Order 1.0 in step size
//! - **Stability**: Conditionally stable; nothing is clamped
//!
//! The Euler part `X_n + a Δt` is evaluated first and the noise added after,
//! so with `b ≡ 0` the result is identical to [`EulerSimulator`](super::euler::EulerSimulator).

use super::simulator::{validate_coefficient, validate_step, Simulator};
use crate::error::SdeResult;
use crate::models::model::SDEModel;
use crate::rng;
use ndarray::Array2;
use rand::Rng;

/// Euler-Maruyama numerical scheme for SDE integration
#[derive(Debug, Clone)]
pub struct EulerMaruyamaSimulator<M: SDEModel> {
    pub sde: M,
}

impl<M: SDEModel> EulerMaruyamaSimulator<M> {
    pub fn new(sde: M) -> Self {
        EulerMaruyamaSimulator { sde }
    }
}

impl<M: SDEModel> Simulator for EulerMaruyamaSimulator<M> {
    /// Single Euler-Maruyama step
    ///
    /// 1. Compute drift `a(X_n, t_n)` and diffusion `b(X_n, t_n)`
    /// 2. Generate normal draws `Z ~ N(0, I)` shaped like the state
    /// 3. Update: `X_{n+1} = (X_n + a Δt) + b √Δt Z`
    fn step<R: Rng + ?Sized>(
        &self,
        xt: &Array2<f64>,
        t: f64,
        dt: f64,
        rng: &mut R,
    ) -> SdeResult<Array2<f64>> {
        validate_step(dt)?;
        let drift = self.sde.drift(xt, t)?;
        validate_coefficient("drift", xt, &drift)?;
        let diffusion = self.sde.diffusion(xt, t)?;
        validate_coefficient("diffusion", xt, &diffusion)?;

        let noise = rng::standard_normal_array(xt.dim(), rng);
        let deterministic = xt + &(drift * dt);
        Ok(deterministic + &(diffusion * &noise * dt.sqrt()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdeError;
    use crate::models::brownian::BrownianMotion;
    use crate::models::model::ODEModel;
    use crate::models::ou_process::OUProcess;
    use crate::schedule::Timesteps;
    use ndarray::array;

    /// Brownian motion whose diffusion has the wrong number of columns
    struct BadDiffusion;

    impl ODEModel for BadDiffusion {
        fn drift(&self, xt: &Array2<f64>, _t: f64) -> SdeResult<Array2<f64>> {
            Ok(Array2::zeros(xt.raw_dim()))
        }
    }

    impl SDEModel for BadDiffusion {
        fn diffusion(&self, xt: &Array2<f64>, _t: f64) -> SdeResult<Array2<f64>> {
            Ok(Array2::ones((xt.nrows(), xt.ncols() + 1)))
        }
    }

    #[test]
    fn test_zero_sigma_brownian_motion_stays_put() {
        let sim = EulerMaruyamaSimulator::new(BrownianMotion::new(0.0).unwrap());
        let x0 = array![[1.5, -2.0], [0.0, 3.0]];
        let ts = Timesteps::linspace(0.0, 1.0, 50).unwrap();
        let mut rng = rng::seed_rng_from_u64(3);
        assert_eq!(sim.simulate(&x0, &ts, &mut rng).unwrap(), x0);
    }

    #[test]
    fn test_single_step_increment_variance() {
        // one step of BM: x1 - x0 ~ N(0, σ² dt)
        let sim = EulerMaruyamaSimulator::new(BrownianMotion::new(2.0).unwrap());
        let x0 = Array2::zeros((40_000, 1));
        let mut rng = rng::seed_rng_from_u64(17);
        let x1 = sim.step(&x0, 0.0, 0.25, &mut rng).unwrap();
        let var = x1.mapv(|v| v * v).mean().unwrap();
        assert!((var - 1.0).abs() < 0.03, "increment variance {}", var);
    }

    #[test]
    fn test_same_seed_same_path() {
        let sim = EulerMaruyamaSimulator::new(OUProcess::new(0.5, 1.0).unwrap());
        let x0 = array![[1.0], [2.0]];
        let ts = Timesteps::linspace(0.0, 2.0, 100).unwrap();
        let a = sim.simulate(&x0, &ts, &mut rng::seed_rng_from_u64(9)).unwrap();
        let b = sim.simulate(&x0, &ts, &mut rng::seed_rng_from_u64(9)).unwrap();
        let c = sim.simulate(&x0, &ts, &mut rng::seed_rng_from_u64(10)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_diffusion_shape_mismatch_fails() {
        let sim = EulerMaruyamaSimulator::new(BadDiffusion);
        let mut rng = rng::seed_rng_from_u64(0);
        let result = sim.step(&array![[0.0, 0.0]], 0.0, 0.1, &mut rng);
        assert!(matches!(result, Err(SdeError::ShapeMismatch { .. })));
    }
}
