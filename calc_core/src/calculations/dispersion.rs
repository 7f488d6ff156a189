//! # Dispersion
//!
//! Spread of a dataset: population and sample variance and standard
//! deviation, quartiles with the interquartile range, Tukey fences and the
//! values outside them.
//!
//! A single value has a population spread of zero; the sample estimators
//! need two values and are `None` below that.
//!
//! Quartiles interpolate linearly at position `p·(n − 1)` of the sorted data
//! (see [`descriptive::quantile_of_sorted`]).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{Calculator, dispersion::DispersionInput};
//!
//! let input = DispersionInput {
//!     dataset: Some(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]),
//! };
//!
//! let result = input.calculate().unwrap();
//! assert_eq!(result.population_std_dev, 2.0);
//! assert_eq!(result.sample_variance, Some(4.5714));
//! assert_eq!(result.q1, 4.0);
//! assert_eq!(result.q3, 5.5);
//! assert_eq!(result.outliers, vec![9.0]);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::equations::descriptive;
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::validation::{ValidationResult, Validator, MAX_DATASET_LEN};

/// Tukey's fence multiplier on the IQR
const TUKEY_K: f64 = 1.5;

/// Input for dispersion statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispersionInput {
    pub dataset: Option<Vec<f64>>,
}

/// Dispersion results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionResult {
    pub count: usize,
    pub mean: f64,
    pub population_variance: f64,
    pub population_std_dev: f64,
    pub sample_variance: Option<f64>,
    pub sample_std_dev: Option<f64>,
    /// Standard error of the mean, s / √n
    pub standard_error: Option<f64>,
    /// Sample standard deviation as a percentage of |mean|; `None` when the mean is zero
    pub coefficient_of_variation: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Values outside the fences, ascending
    pub outliers: Vec<f64>,
}

impl Calculator for DispersionInput {
    type Output = DispersionResult;
    const NAME: &'static str = "dispersion";
    const FAMILY: PrecisionFamily = PrecisionFamily::Statistics;

    fn validate(&self) -> ValidationResult {
        Validator::new()
            .dataset("dataset", self.dataset.as_deref(), |d| {
                d.required().max_len(MAX_DATASET_LEN)
            })
            .finish()
    }

    fn compute(&self, precision: Precision) -> Option<DispersionResult> {
        let values = self.dataset.as_deref()?;
        let sorted = descriptive::sorted(values);
        let n = values.len() as f64;

        let mean = descriptive::mean(values)?;
        let population_variance = descriptive::population_variance(values)?;
        let sample_variance = descriptive::sample_variance(values);
        let sample_std_dev = sample_variance.map(f64::sqrt);

        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let q1 = descriptive::quantile_of_sorted(&sorted, 0.25)?;
        let median = descriptive::median_of_sorted(&sorted)?;
        let q3 = descriptive::quantile_of_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let lower_fence = q1 - TUKEY_K * iqr;
        let upper_fence = q3 + TUKEY_K * iqr;

        // Absent stays absent; a present but non-finite value fails the whole result
        let rounded = |value: Option<f64>| match value {
            Some(v) => precision.finite(v).map(Some),
            None => Some(None),
        };
        let coefficient_of_variation = match sample_std_dev {
            Some(s) if mean != 0.0 => Some(s / mean.abs() * 100.0),
            _ => None,
        };

        Some(DispersionResult {
            count: values.len(),
            mean: precision.finite(mean)?,
            population_variance: precision.finite(population_variance)?,
            population_std_dev: precision.finite(population_variance.sqrt())?,
            sample_variance: rounded(sample_variance)?,
            sample_std_dev: rounded(sample_std_dev)?,
            standard_error: rounded(sample_std_dev.map(|s| s / n.sqrt()))?,
            coefficient_of_variation: rounded(coefficient_of_variation)?,
            min,
            max,
            range: precision.finite(max - min)?,
            q1: precision.finite(q1)?,
            median: precision.finite(median)?,
            q3: precision.finite(q3)?,
            iqr: precision.finite(iqr)?,
            lower_fence: precision.finite(lower_fence)?,
            upper_fence: precision.finite(upper_fence)?,
            outliers: sorted
                .iter()
                .copied()
                .filter(|&v| v < lower_fence || v > upper_fence)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;

    fn input(data: &[f64]) -> DispersionInput {
        DispersionInput {
            dataset: Some(data.to_vec()),
        }
    }

    #[test]
    fn test_textbook_dataset() {
        let result = input(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).calculate().unwrap();
        assert_eq!(result.mean, 5.0);
        assert_eq!(result.population_variance, 4.0);
        assert_eq!(result.sample_variance, Some(4.5714));
        assert_eq!(result.sample_std_dev, Some(2.1381));
        assert_eq!(result.standard_error, Some(0.7559));
        assert_eq!(result.coefficient_of_variation, Some(42.7618));
        assert_eq!(result.iqr, 1.5);
        assert_eq!(result.lower_fence, 1.75);
        assert_eq!(result.upper_fence, 7.75);
        assert_eq!(result.range, 7.0);
    }

    #[test]
    fn test_median_matches_middle_quartile() {
        let result = input(&[7.0, 1.0, 3.0, 9.0, 5.0]).calculate().unwrap();
        assert_eq!(result.median, 5.0);
        assert_eq!(result.q1, 3.0);
        assert_eq!(result.q3, 7.0);
        assert!(result.outliers.is_empty());
    }

    #[test]
    fn test_constant_data_has_zero_spread() {
        let result = input(&[3.0, 3.0, 3.0]).calculate().unwrap();
        assert_eq!(result.sample_std_dev, Some(0.0));
        assert_eq!(result.iqr, 0.0);
        assert_eq!(result.coefficient_of_variation, Some(0.0));
        assert!(result.outliers.is_empty());
    }

    #[test]
    fn test_zero_mean_has_no_cv() {
        let result = input(&[-1.0, 1.0]).calculate().unwrap();
        assert_eq!(result.coefficient_of_variation, None);
    }

    #[test]
    fn test_single_value_has_population_spread_only() {
        let result = input(&[5.0]).calculate().unwrap();
        assert_eq!(result.population_variance, 0.0);
        assert_eq!(result.population_std_dev, 0.0);
        assert_eq!(result.sample_variance, None);
        assert_eq!(result.sample_std_dev, None);
        assert_eq!(result.standard_error, None);
        assert_eq!(result.coefficient_of_variation, None);
        assert_eq!((result.q1, result.median, result.q3), (5.0, 5.0, 5.0));
    }

    #[test]
    fn test_empty_dataset_is_missing() {
        let result = input(&[]).validate();
        assert_eq!(
            result.error_for("dataset").unwrap().kind,
            ErrorKind::MissingRequiredField
        );
    }

    #[test]
    fn test_non_finite_value_reported_with_position() {
        let result = input(&[1.0, f64::INFINITY, 2.0]).validate();
        let error = result.error_for("dataset").unwrap();
        assert_eq!(error.kind, ErrorKind::InvalidFormat);
        assert!(error.message.contains("position 2"));
    }
}
