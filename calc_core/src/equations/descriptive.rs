//! # Descriptive Statistics
//!
//! Estimators over a small in-memory sample. Functions return `None` where the
//! estimator is undefined for the given data (empty sample, non-positive value
//! in a geometric mean, zero spread in a correlation) instead of NaN.
//!
//! ## Notation
//!
//! - `n` = Sample size
//! - `x̄` = Arithmetic mean
//! - `Sxx = Σ(x − x̄)²`, `Syy = Σ(y − ȳ)²`, `Sxy = Σ(x − x̄)(y − ȳ)`
//!
//! ## Quartile Convention
//!
//! Quantiles use linear interpolation between order statistics at position
//! `p·(n − 1)` of the sorted sample (Hyndman–Fan type 7, the spreadsheet
//! `QUARTILE.INC` rule). Q2 always equals the median.

/// Sorted copy of `values` (total order, so NaN never panics)
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

// =============================================================================
// CENTRAL TENDENCY
// =============================================================================

/// Arithmetic mean x̄ = Σx / n
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Geometric mean (Πx)^(1/n), computed in log space. Requires every x > 0.
pub fn geometric_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() || values.iter().any(|&v| v <= 0.0) {
        return None;
    }
    let log_mean = values.iter().map(|v| v.ln()).sum::<f64>() / values.len() as f64;
    Some(log_mean.exp())
}

/// Harmonic mean n / Σ(1/x). Requires every x > 0.
pub fn harmonic_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() || values.iter().any(|&v| v <= 0.0) {
        return None;
    }
    let reciprocal_sum: f64 = values.iter().map(|v| 1.0 / v).sum();
    Some(values.len() as f64 / reciprocal_sum)
}

/// Weighted mean Σ(w·x) / Σw. Requires equal lengths and Σw > 0.
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> Option<f64> {
    if values.is_empty() || values.len() != weights.len() {
        return None;
    }
    let weight_sum: f64 = weights.iter().sum();
    if weight_sum <= 0.0 {
        return None;
    }
    let weighted: f64 = values.iter().zip(weights).map(|(x, w)| x * w).sum();
    Some(weighted / weight_sum)
}

/// Median of already-sorted data; averages the two middle values for even n.
pub fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some(0.5 * (sorted[n / 2 - 1] + sorted[n / 2])),
    }
}

/// Quantile `p ∈ [0, 1]` of already-sorted data by linear interpolation at
/// position `p·(n − 1)`.
pub fn quantile_of_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let position = p * (n - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Distinct values of sorted data with their occurrence counts
fn frequencies(sorted: &[f64]) -> Vec<(f64, usize)> {
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for &value in sorted {
        match runs.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => runs.push((value, 1)),
        }
    }
    runs
}

/// Most frequent values and their shared count.
///
/// Returns `None` when there is no mode: every distinct value occurs equally
/// often (this covers all-distinct and all-identical data).
pub fn modes(values: &[f64]) -> Option<(Vec<f64>, usize)> {
    let runs = frequencies(&sorted(values));
    let highest = runs.iter().map(|&(_, count)| count).max()?;
    if runs.iter().all(|&(_, count)| count == highest) {
        return None;
    }
    let modes = runs
        .into_iter()
        .filter(|&(_, count)| count == highest)
        .map(|(value, _)| value)
        .collect();
    Some((modes, highest))
}

// =============================================================================
// DISPERSION
// =============================================================================

/// Sum of squared deviations from the mean, Σ(x − x̄)²
fn sum_of_squares(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    Some(values.iter().map(|x| (x - mean).powi(2)).sum())
}

/// Population variance σ² = Σ(x − x̄)² / n. Requires n ≥ 1.
pub fn population_variance(values: &[f64]) -> Option<f64> {
    Some(sum_of_squares(values)? / values.len() as f64)
}

/// Sample variance s² = Σ(x − x̄)² / (n − 1). Requires n ≥ 2.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(sum_of_squares(values)? / (values.len() - 1) as f64)
}

// =============================================================================
// PAIRED DATA
// =============================================================================

/// Centered sums of a paired sample, shared by correlation and regression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairedSums {
    pub n: usize,
    pub mean_x: f64,
    pub mean_y: f64,
    pub sxx: f64,
    pub syy: f64,
    pub sxy: f64,
}

impl PairedSums {
    /// Pearson r = Sxy / √(Sxx·Syy). `None` if either variable is constant.
    pub fn pearson(&self) -> Option<f64> {
        let denominator = (self.sxx * self.syy).sqrt();
        if denominator == 0.0 {
            return None;
        }
        Some((self.sxy / denominator).clamp(-1.0, 1.0))
    }

    /// Least-squares slope b = Sxy / Sxx
    pub fn slope(&self) -> Option<f64> {
        if self.sxx == 0.0 {
            return None;
        }
        Some(self.sxy / self.sxx)
    }

    /// Least-squares intercept a = ȳ − b·x̄
    pub fn intercept(&self) -> Option<f64> {
        Some(self.mean_y - self.slope()? * self.mean_x)
    }

    /// Sample covariance Sxy / (n − 1). Requires n ≥ 2.
    pub fn sample_covariance(&self) -> Option<f64> {
        if self.n < 2 {
            return None;
        }
        Some(self.sxy / (self.n - 1) as f64)
    }
}

/// Centered sums for equal-length, non-empty `x` and `y`
pub fn paired_sums(x: &[f64], y: &[f64]) -> Option<PairedSums> {
    if x.len() != y.len() {
        return None;
    }
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;
    let (sxx, syy, sxy) = x.iter().zip(y).fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), (xi, yi)| {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        (sxx + dx * dx, syy + dy * dy, sxy + dx * dy)
    });
    Some(PairedSums {
        n: x.len(),
        mean_x,
        mean_y,
        sxx,
        syy,
        sxy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [f64; 8] = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    #[test]
    fn test_means() {
        assert_eq!(mean(&DATA), Some(5.0));
        assert_eq!(mean(&[]), None);

        let g = geometric_mean(&[1.0, 2.0, 4.0]).unwrap();
        assert!((g - 2.0).abs() < 1e-12);
        assert_eq!(geometric_mean(&[1.0, 0.0]), None);

        let h = harmonic_mean(&[1.0, 2.0, 4.0]).unwrap();
        assert!((h - 12.0 / 7.0).abs() < 1e-12);
        assert_eq!(harmonic_mean(&[1.0, -2.0]), None);

        assert_eq!(weighted_mean(&[80.0, 90.0], &[1.0, 3.0]), Some(87.5));
        assert_eq!(weighted_mean(&[80.0, 90.0], &[0.0, 0.0]), None);
        assert_eq!(weighted_mean(&[80.0, 90.0], &[1.0]), None);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median_of_sorted(&[1.0, 3.0, 5.0]), Some(3.0));
        assert_eq!(median_of_sorted(&[1.0, 3.0, 5.0, 7.0]), Some(4.0));
        assert_eq!(median_of_sorted(&[]), None);
    }

    #[test]
    fn test_quantiles_linear_interpolation() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        // positions 1.75, 3.5, 5.25
        assert_eq!(quantile_of_sorted(&data, 0.25), Some(2.75));
        assert_eq!(quantile_of_sorted(&data, 0.5), Some(4.5));
        assert_eq!(quantile_of_sorted(&data, 0.75), Some(6.25));
        assert_eq!(quantile_of_sorted(&data, 0.0), Some(1.0));
        assert_eq!(quantile_of_sorted(&data, 1.0), Some(8.0));
        assert_eq!(quantile_of_sorted(&[42.0], 0.25), Some(42.0));
    }

    #[test]
    fn test_modes() {
        assert_eq!(modes(&DATA), Some((vec![4.0], 3)));
        assert_eq!(modes(&[1.0, 1.0, 2.0, 2.0, 3.0]), Some((vec![1.0, 2.0], 2)));
        assert_eq!(modes(&[1.0, 2.0, 3.0]), None);
        assert_eq!(modes(&[7.0, 7.0, 7.0]), None);
        assert_eq!(modes(&[1.0, 1.0, 2.0, 2.0]), None);
        assert_eq!(modes(&[]), None);
    }

    #[test]
    fn test_variance() {
        assert_eq!(population_variance(&DATA), Some(4.0));
        let s2 = sample_variance(&DATA).unwrap();
        assert!((s2 - 32.0 / 7.0).abs() < 1e-12);
        assert_eq!(sample_variance(&[3.0]), None);
        assert_eq!(population_variance(&[3.0]), Some(0.0));
    }

    #[test]
    fn test_paired_sums_perfect_line() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [3.0, 5.0, 7.0, 9.0, 11.0];
        let sums = paired_sums(&x, &y).unwrap();
        assert!((sums.pearson().unwrap() - 1.0).abs() < 1e-12);
        assert!((sums.slope().unwrap() - 2.0).abs() < 1e-12);
        assert!((sums.intercept().unwrap() - 1.0).abs() < 1e-12);
        assert!((sums.sample_covariance().unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_paired_sums_constant_variable() {
        let sums = paired_sums(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap();
        assert_eq!(sums.pearson(), None);
        assert!(paired_sums(&[1.0, 2.0], &[1.0]).is_none());
    }
}
