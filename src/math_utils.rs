// src/math_utils.rs
use ndarray::{Array1, Array2, Axis};

/// Row-wise `log Σ_k exp(a[i, k])`, shifted by the row maximum for stability
pub fn log_sum_exp_rows(a: &Array2<f64>) -> Array1<f64> {
    a.map_axis(Axis(1), |row| {
        let max = row.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        if !max.is_finite() {
            // all -inf (or a +inf entry): the shift would produce NaN
            return max;
        }
        max + row.iter().map(|&v| (v - max).exp()).sum::<f64>().ln()
    })
}

/// Row-wise softmax, computed from the log-sum-exp normalizer
pub fn softmax_rows(a: &Array2<f64>) -> Array2<f64> {
    let lse = log_sum_exp_rows(a);
    let mut out = a.clone();
    for (mut row, &norm) in out.axis_iter_mut(Axis(0)).zip(lse.iter()) {
        row.mapv_inplace(|v| (v - norm).exp());
    }
    out
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_log_sum_exp_matches_naive() {
        let a = array![[0.0, 1.0, 2.0], [-3.0, -1.0, 0.5]];
        let lse = log_sum_exp_rows(&a);
        for (i, row) in a.outer_iter().enumerate() {
            let naive = row.iter().map(|v| v.exp()).sum::<f64>().ln();
            assert_abs_diff_eq!(lse[i], naive, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_log_sum_exp_is_stable_for_large_magnitudes() {
        let a = array![[-1000.0, -1000.0], [1000.0, 1000.0]];
        let lse = log_sum_exp_rows(&a);
        assert_abs_diff_eq!(lse[0], -1000.0 + 2f64.ln(), epsilon = 1e-9);
        assert_abs_diff_eq!(lse[1], 1000.0 + 2f64.ln(), epsilon = 1e-9);
    }

    #[test]
    fn test_softmax_rows_sum_to_one() {
        let a = array![[0.3, -2.0, 5.0], [-700.0, -710.0, -705.0]];
        let p = softmax_rows(&a);
        for row in p.outer_iter() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-12);
            assert!(row.iter().all(|&v| v >= 0.0));
        }
    }
}
