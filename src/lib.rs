//! # langevin-sde: Batched ODE/SDE Simulation and Langevin Sampling
//!
//! A Rust library for simulating trajectories of ordinary and stochastic
//! differential equations over batches of points, and for watching how a
//! distribution of points evolves under them. The headline use is Langevin
//! dynamics, which turns the score of any target density into an SDE whose
//! long-run distribution is that density.
//!
//! ## Key Features
//!
//! - **Generic integrators**: Euler (ODE) and Euler-Maruyama (SDE) over any vector field
//! - **Dynamics**: Brownian motion, Ornstein-Uhlenbeck, Langevin
//! - **Densities**: multivariate Gaussian and Gaussian mixtures with closed-form scores
//! - **Reproducible randomness**: every stochastic call takes an explicit generator
//! - **Parallel ensembles**: independent runs on Rayon with per-run seeded streams
//!
//! ## Quick Start
//!
//! ```rust
//! use langevin_sde::distributions::density::Sampleable;
//! use langevin_sde::distributions::gaussian::Gaussian;
//! use langevin_sde::distributions::mixture::GaussianMixture;
//! use langevin_sde::models::langevin::LangevinSDE;
//! use langevin_sde::rng;
//! use langevin_sde::schedule::Timesteps;
//! use langevin_sde::solvers::euler_maruyama::EulerMaruyamaSimulator;
//! use langevin_sde::solvers::simulator::Simulator;
//! use ndarray::{Array1, Array2};
//!
//! let target = GaussianMixture::symmetric_2d(5, 1.0, 8.0).expect("valid mixture");
//! let source = Gaussian::new(Array1::zeros(2), Array2::eye(2) * 20.0).expect("valid Gaussian");
//! let simulator = EulerMaruyamaSimulator::new(LangevinSDE::new(0.6, &target).expect("valid sigma"));
//!
//! let mut rng = rng::seed_rng_from_u64(42);
//! let x0 = source.sample(100, &mut rng).expect("samples");
//! let ts = Timesteps::linspace(0.0, 5.0, 200).expect("valid schedule");
//! let trajectory = simulator.simulate_with_trajectory(&x0, &ts, &mut rng).expect("rollout");
//! assert_eq!(trajectory.len(), 200);
//! ```
//!
//! ## Mathematical Foundation
//!
//! For a target density `p` and noise level `σ`, the Langevin SDE
//! `dX_t = (σ²/2) ∇ log p(X_t) dt + σ dW_t` has `p` as its stationary
//! distribution. Discretizing with Euler-Maruyama gives a sampler whose bias
//! vanishes as the step size shrinks.

// Module declarations
pub mod analytics;
pub mod distributions;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod rng;
pub mod schedule;
pub mod solvers;
pub mod trajectory;

// Re-export commonly used types for convenience
pub use error::{SdeError, SdeResult};
pub use schedule::Timesteps;
pub use trajectory::Trajectory;
