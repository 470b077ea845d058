// src/distributions/gaussian.rs
//! Multivariate Normal Distribution
//!
//! # Mathematical Framework
//!
//! For mean `μ ∈ ℝ^d` and symmetric positive-definite covariance `Σ = L Lᵀ`:
//! ```text
//! log p(x) = -½ [d ln 2π + ln det Σ + (x - μ)ᵀ Σ⁻¹ (x - μ)]
//! ∇ log p(x) = -Σ⁻¹ (x - μ)
//! x = μ + L z,  z ~ N(0, I)
//! ```
//! `ln det Σ = 2 Σ_i ln L_ii`. The Cholesky factor, precision matrix and
//! normalizing constant are computed once at construction.

use super::density::{quadratic_form, Density, Sampleable};
use crate::error::{validation::*, SdeError, SdeResult};
use crate::rng;
use nalgebra::{Cholesky, DMatrix};
use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut1};
use rand::Rng;
use std::f64::consts::PI;

/// Relative asymmetry tolerated (and symmetrized) in a covariance matrix
const SYMMETRY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct Gaussian {
    mean: Array1<f64>,
    cov: Array2<f64>,
    /// Lower Cholesky factor of `cov`
    chol: Array2<f64>,
    precision: Array2<f64>,
    /// `-½ (d ln 2π + ln det Σ)`
    log_norm: f64,
}

impl Gaussian {
    pub fn new(mean: Array1<f64>, cov: Array2<f64>) -> SdeResult<Self> {
        let d = mean.len();
        if d == 0 {
            return Err(SdeError::ShapeMismatch {
                context: "Gaussian mean".to_string(),
                expected: vec![1],
                found: vec![0],
            });
        }
        validate_shape("Gaussian covariance", &[d, d], cov.shape())?;
        for (i, &m) in mean.iter().enumerate() {
            validate_finite(&format!("mean[{}]", i), m)?;
        }
        for &c in cov.iter() {
            validate_finite("covariance entry", c)?;
        }

        let cov = symmetrized(cov)?;
        let factor = Cholesky::new(to_dmatrix(&cov)).ok_or_else(|| SdeError::NonPositiveDefinite {
            context: format!("Gaussian covariance of dimension {}", d),
        })?;

        let l = factor.l();
        let log_det = 2.0 * l.diagonal().iter().map(|v| v.ln()).sum::<f64>();
        let precision = from_dmatrix(&factor.inverse());

        Ok(Gaussian {
            mean,
            cov,
            chol: from_dmatrix(&l),
            precision,
            log_norm: -0.5 * (d as f64 * (2.0 * PI).ln() + log_det),
        })
    }

    /// `N(mean, variance · I)`
    pub fn isotropic(mean: Array1<f64>, variance: f64) -> SdeResult<Self> {
        validate_positive("variance", variance)?;
        let d = mean.len();
        Self::new(mean, Array2::eye(d) * variance)
    }

    /// `N(0, I_dim)`
    pub fn standard(dim: usize) -> SdeResult<Self> {
        Self::isotropic(Array1::zeros(dim), 1.0)
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn covariance(&self) -> &Array2<f64> {
        &self.cov
    }

    pub fn precision(&self) -> &Array2<f64> {
        &self.precision
    }

    fn centered(&self, x: &Array2<f64>) -> Array2<f64> {
        x - &self.mean
    }

    /// `μ + L z` written into `out`
    pub(crate) fn transform_into(&self, z: ArrayView1<f64>, mut out: ArrayViewMut1<f64>) {
        out.assign(&(self.chol.dot(&z) + &self.mean));
    }
}

impl Density for Gaussian {
    fn dim(&self) -> usize {
        self.mean.len()
    }

    fn log_density(&self, x: &Array2<f64>) -> SdeResult<Array1<f64>> {
        validate_dim("Gaussian log_density", self.dim(), x.shape())?;
        let quad = quadratic_form(&self.centered(x), &self.precision);
        Ok(quad.mapv(|q| self.log_norm - 0.5 * q))
    }

    fn score(&self, x: &Array2<f64>) -> SdeResult<Array2<f64>> {
        validate_dim("Gaussian score", self.dim(), x.shape())?;
        // precision is symmetric, so row-vector form is (x - μ) P
        Ok(-self.centered(x).dot(&self.precision))
    }
}

impl Sampleable for Gaussian {
    fn sample<R: Rng + ?Sized>(&self, num_samples: usize, rng: &mut R) -> SdeResult<Array2<f64>> {
        validate_count("num_samples", num_samples)?;
        let z = rng::standard_normal_array((num_samples, self.dim()), rng);
        Ok(z.dot(&self.chol.t()) + &self.mean)
    }
}

fn symmetrized(cov: Array2<f64>) -> SdeResult<Array2<f64>> {
    let scale = cov.iter().fold(0.0f64, |m, v| m.max(v.abs())).max(f64::MIN_POSITIVE);
    let asymmetry = (&cov - &cov.t()).iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if asymmetry == 0.0 {
        return Ok(cov);
    }
    if asymmetry > SYMMETRY_TOLERANCE * scale {
        return Err(SdeError::InvalidParameters {
            parameter: "covariance".to_string(),
            value: asymmetry,
            constraint: "must be symmetric".to_string(),
        });
    }
    tracing::warn!(asymmetry, "symmetrizing nearly symmetric covariance");
    Ok((&cov + &cov.t()) * 0.5)
}

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}
