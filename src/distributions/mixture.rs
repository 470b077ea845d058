// src/distributions/mixture.rs
//! Gaussian Mixture Model
//!
//! # Mathematical Framework
//!
//! With normalized weights `w_k` and components `N_k = N(μ_k, Σ_k)`:
//! ```text
//! log p(x)   = logsumexp_k [ln w_k + log N_k(x)]
//! ∇ log p(x) = Σ_k γ_k(x) ∇ log N_k(x),   γ_k(x) = softmax_k [ln w_k + log N_k(x)]
//! ```
//! Sampling picks a component with probability `w_k`, then samples it exactly.

use super::density::{Density, Sampleable};
use super::gaussian::Gaussian;
use crate::error::{validation::*, SdeError, SdeResult};
use crate::math_utils::{log_sum_exp_rows, softmax_rows};
use crate::rng;
use ndarray::{s, Array1, Array2, Array3, Axis};
use rand::distributions::{Distribution, Uniform, WeightedIndex};
use rand::Rng;
use std::f64::consts::PI;

#[derive(Debug, Clone)]
pub struct GaussianMixture {
    components: Vec<Gaussian>,
    /// Normalized to sum to one
    weights: Array1<f64>,
    log_weights: Array1<f64>,
    selector: WeightedIndex<f64>,
}

impl GaussianMixture {
    /// `means`: `(nmodes, dim)`, `covs`: `(nmodes, dim, dim)`, `weights`: `(nmodes)`.
    ///
    /// Weights must be finite and strictly positive; they are normalized here.
    pub fn new(means: Array2<f64>, covs: Array3<f64>, weights: Array1<f64>) -> SdeResult<Self> {
        let (nmodes, dim) = means.dim();
        if nmodes == 0 {
            return Err(SdeError::InvalidConfiguration {
                field: "nmodes".to_string(),
                reason: "a mixture needs at least one component".to_string(),
            });
        }
        validate_shape("mixture covariances", &[nmodes, dim, dim], covs.shape())?;
        validate_shape("mixture weights", &[nmodes], weights.shape())?;
        for (k, &w) in weights.iter().enumerate() {
            validate_positive(&format!("weights[{}]", k), w)?;
        }

        let components = means
            .outer_iter()
            .zip(covs.outer_iter())
            .map(|(mean, cov)| Gaussian::new(mean.to_owned(), cov.to_owned()))
            .collect::<SdeResult<Vec<_>>>()?;

        // rescale by the largest weight first so the sum cannot overflow
        let largest = weights.fold(0.0f64, |m, &w| m.max(w));
        let weights = weights / largest;
        let total = weights.sum();
        let weights = weights / total;
        let log_weights = weights.mapv(f64::ln);
        let selector = WeightedIndex::new(weights.iter()).map_err(|e| SdeError::InvalidParameters {
            parameter: "weights".to_string(),
            value: total,
            constraint: e.to_string(),
        })?;

        Ok(GaussianMixture {
            components,
            weights,
            log_weights,
            selector,
        })
    }

    /// Random 2-D mixture: means uniform in `[-scale/2, scale/2]²`, covariance `std² I`,
    /// equal weights. Deterministic for a given `seed`.
    pub fn random_2d(nmodes: usize, std: f64, scale: f64, seed: u64) -> SdeResult<Self> {
        Self::random(nmodes, 2, std, scale, seed)
    }

    /// Random mixture in `dim` dimensions, see [`GaussianMixture::random_2d`]
    pub fn random(nmodes: usize, dim: usize, std: f64, scale: f64, seed: u64) -> SdeResult<Self> {
        validate_positive("std", std)?;
        validate_positive("scale", scale)?;
        let mut rng = rng::seed_rng_from_u64(seed);
        let unit = Uniform::new(0.0, 1.0);
        let means = Array2::from_shape_simple_fn((nmodes, dim), || (unit.sample(&mut rng) - 0.5) * scale);
        Self::new(means, isotropic_covs(nmodes, dim, std), Array1::ones(nmodes))
    }

    /// Modes evenly spaced on a circle of radius `scale`, covariance `std² I`, equal weights
    pub fn symmetric_2d(nmodes: usize, std: f64, scale: f64) -> SdeResult<Self> {
        validate_positive("std", std)?;
        validate_positive("scale", scale)?;
        let mut means = Array2::zeros((nmodes, 2));
        for (k, mut mean) in means.outer_iter_mut().enumerate() {
            let angle = 2.0 * PI * k as f64 / nmodes as f64;
            mean[0] = angle.cos() * scale;
            mean[1] = angle.sin() * scale;
        }
        Self::new(means, isotropic_covs(nmodes, 2, std), Array1::from_elem(nmodes, 1.0 / nmodes as f64))
    }

    pub fn nmodes(&self) -> usize {
        self.components.len()
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn components(&self) -> &[Gaussian] {
        &self.components
    }

    /// `ln w_k + log N_k(x_i)`, shape `(batch_size, nmodes)`
    fn joint_log_densities(&self, x: &Array2<f64>) -> SdeResult<Array2<f64>> {
        let mut joint = Array2::zeros((x.nrows(), self.nmodes()));
        for (k, component) in self.components.iter().enumerate() {
            let lp = component.log_density(x)? + self.log_weights[k];
            joint.column_mut(k).assign(&lp);
        }
        Ok(joint)
    }
}

impl Density for GaussianMixture {
    fn dim(&self) -> usize {
        self.components[0].dim()
    }

    fn log_density(&self, x: &Array2<f64>) -> SdeResult<Array1<f64>> {
        validate_dim("mixture log_density", self.dim(), x.shape())?;
        Ok(log_sum_exp_rows(&self.joint_log_densities(x)?))
    }

    fn score(&self, x: &Array2<f64>) -> SdeResult<Array2<f64>> {
        validate_dim("mixture score", self.dim(), x.shape())?;
        let responsibilities = softmax_rows(&self.joint_log_densities(x)?);
        let mut score = Array2::zeros(x.raw_dim());
        for (k, component) in self.components.iter().enumerate() {
            let gamma = responsibilities.column(k).insert_axis(Axis(1));
            score = score + component.score(x)? * &gamma;
        }
        Ok(score)
    }
}

impl Sampleable for GaussianMixture {
    fn sample<R: Rng + ?Sized>(&self, num_samples: usize, rng: &mut R) -> SdeResult<Array2<f64>> {
        validate_count("num_samples", num_samples)?;
        let dim = self.dim();
        let mut samples = Array2::zeros((num_samples, dim));
        for mut row in samples.outer_iter_mut() {
            let k = self.selector.sample(rng);
            let z = rng::standard_normal_array((1, dim), rng);
            self.components[k].transform_into(z.slice(s![0, ..]), row.view_mut());
        }
        Ok(samples)
    }
}

fn isotropic_covs(nmodes: usize, dim: usize, std: f64) -> Array3<f64> {
    let mut covs = Array3::zeros((nmodes, dim, dim));
    for mut cov in covs.outer_iter_mut() {
        cov.diag_mut().fill(std * std);
    }
    covs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::density::numerical_score;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn two_modes() -> GaussianMixture {
        let means = array![[-2.0, 0.0], [3.0, 1.0]];
        let mut covs = Array3::zeros((2, 2, 2));
        covs.slice_mut(s![0, .., ..]).assign(&array![[1.0, 0.3], [0.3, 0.5]]);
        covs.slice_mut(s![1, .., ..]).assign(&array![[2.0, 0.0], [0.0, 2.0]]);
        GaussianMixture::new(means, covs, array![1.0, 3.0]).unwrap()
    }

    #[test]
    fn test_weights_are_normalized() {
        let gmm = two_modes();
        assert_abs_diff_eq!(gmm.weights()[0], 0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(gmm.weights()[1], 0.75, epsilon = 1e-15);
    }

    #[test]
    fn test_huge_weights_normalize_without_overflow() {
        let means = array![[0.0, 0.0], [1.0, 1.0]];
        let covs = isotropic_covs(2, 2, 1.0);
        let gmm = GaussianMixture::new(means, covs, array![1e308, 1e308]).unwrap();
        assert_abs_diff_eq!(gmm.weights()[0], 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(gmm.weights()[1], 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_log_density_is_log_of_weighted_sum() {
        let gmm = two_modes();
        let x = array![[0.0, 0.0], [-2.0, 0.5], [3.0, 1.0]];
        let lp = gmm.log_density(&x).unwrap();
        let lp0 = gmm.components()[0].log_density(&x).unwrap();
        let lp1 = gmm.components()[1].log_density(&x).unwrap();
        for i in 0..3 {
            let naive = (0.25 * lp0[i].exp() + 0.75 * lp1[i].exp()).ln();
            assert_abs_diff_eq!(lp[i], naive, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_log_density_far_from_all_modes_is_finite() {
        let gmm = two_modes();
        let lp = gmm.log_density(&array![[400.0, -400.0]]).unwrap();
        assert!(lp[0].is_finite());
        assert!(lp[0] < -1e4);
    }

    #[test]
    fn test_closed_form_score_matches_numerical() {
        let gmm = two_modes();
        let x = array![[0.0, 0.0], [0.5, 0.5], [-4.0, 2.0], [6.0, -1.0]];
        let exact = gmm.score(&x).unwrap();
        let approx = numerical_score(&gmm, &x).unwrap();
        for (a, b) in exact.iter().zip(approx.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_sample_mode_frequencies() {
        let gmm = two_modes();
        let mut rng = rng::seed_rng_from_u64(5);
        let samples = gmm.sample(20_000, &mut rng).unwrap();
        // P(x₀ > 0.5) = 0.25 · P(N(-2, 1) > 0.5) + 0.75 · P(N(3, 2) > 0.5) ≈ 0.7227
        let right = samples.column(0).iter().filter(|&&v| v > 0.5).count() as f64 / 20_000.0;
        assert_abs_diff_eq!(right, 0.7227, epsilon = 0.02);
    }

    #[test]
    fn test_symmetric_2d_layout() {
        let gmm = GaussianMixture::symmetric_2d(4, 1.0, 8.0).unwrap();
        let means: Vec<&Array1<f64>> = gmm.components().iter().map(|c| c.mean()).collect();
        assert_abs_diff_eq!(means[0][0], 8.0, epsilon = 1e-12);
        assert_abs_diff_eq!(means[1][1], 8.0, epsilon = 1e-12);
        assert_abs_diff_eq!(means[2][0], -8.0, epsilon = 1e-12);
        assert_abs_diff_eq!(means[3][1], -8.0, epsilon = 1e-12);
        assert_eq!(gmm.components()[0].covariance(), &array![[1.0, 0.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_random_2d_is_deterministic_and_bounded() {
        let a = GaussianMixture::random_2d(5, 0.75, 15.0, 3).unwrap();
        let b = GaussianMixture::random_2d(5, 0.75, 15.0, 3).unwrap();
        let c = GaussianMixture::random_2d(5, 0.75, 15.0, 4).unwrap();
        for (ca, cb) in a.components().iter().zip(b.components()) {
            assert_eq!(ca.mean(), cb.mean());
            assert!(ca.mean().iter().all(|v| v.abs() <= 7.5));
        }
        assert_ne!(a.components()[0].mean(), c.components()[0].mean());
        assert_eq!(a.dim(), 2);
        assert_eq!(a.nmodes(), 5);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let means = array![[0.0, 0.0], [1.0, 1.0]];
        let covs = isotropic_covs(2, 2, 1.0);

        let zero_weight = GaussianMixture::new(means.clone(), covs.clone(), array![1.0, 0.0]);
        assert!(matches!(zero_weight, Err(SdeError::InvalidParameters { .. })));

        let negative = GaussianMixture::new(means.clone(), covs.clone(), array![1.0, -1.0]);
        assert!(negative.is_err());

        let count_mismatch = GaussianMixture::new(means.clone(), covs.clone(), array![1.0, 1.0, 1.0]);
        assert!(matches!(count_mismatch, Err(SdeError::ShapeMismatch { .. })));

        let cov_mismatch = GaussianMixture::new(means.clone(), isotropic_covs(3, 2, 1.0), array![1.0, 1.0]);
        assert!(matches!(cov_mismatch, Err(SdeError::ShapeMismatch { .. })));

        let mut bad_covs = covs.clone();
        bad_covs[[1, 0, 0]] = -1.0;
        let not_pd = GaussianMixture::new(means, bad_covs, array![1.0, 1.0]);
        assert!(matches!(not_pd, Err(SdeError::NonPositiveDefinite { .. })));

        assert!(GaussianMixture::symmetric_2d(0, 1.0, 1.0).is_err());
    }
}
