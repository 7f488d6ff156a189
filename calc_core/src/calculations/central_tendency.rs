//! # Central Tendency
//!
//! Arithmetic, geometric, harmonic and (optionally) weighted means, the
//! median, and the mode of a dataset.
//!
//! Geometric and harmonic means are only defined for strictly positive data;
//! for other datasets they are reported as `null` rather than rejected.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{Calculator, central_tendency::{CentralTendencyInput, ModeKind}};
//!
//! let input = CentralTendencyInput {
//!     dataset: Some(vec![3.0, 7.0, 7.0, 2.0, 9.0]),
//!     weights: None,
//! };
//!
//! let result = input.calculate().unwrap();
//! assert_eq!(result.mean, 5.6);
//! assert_eq!(result.median, 7.0);
//! assert_eq!(result.modes, vec![7.0]);
//! assert_eq!(result.mode_kind, ModeKind::Unimodal);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::equations::descriptive;
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::validation::{ErrorKind, FieldError, ValidationResult, Validator, MAX_DATASET_LEN};

/// Input for central tendency.
///
/// ## JSON Example
///
/// ```json
/// { "dataset": [80, 90, 70], "weights": [0.2, 0.5, 0.3] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CentralTendencyInput {
    pub dataset: Option<Vec<f64>>,
    /// Optional weights, one per value
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
}

/// How many modes a dataset has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeKind {
    /// Every distinct value occurs equally often
    NoMode,
    Unimodal,
    Bimodal,
    Multimodal,
}

impl ModeKind {
    pub fn from_count(modes: usize) -> Self {
        match modes {
            0 => ModeKind::NoMode,
            1 => ModeKind::Unimodal,
            2 => ModeKind::Bimodal,
            _ => ModeKind::Multimodal,
        }
    }
}

/// Central tendency results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralTendencyResult {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub geometric_mean: Option<f64>,
    pub harmonic_mean: Option<f64>,
    pub weighted_mean: Option<f64>,
    /// Most frequent values in ascending order; empty when there is no mode
    pub modes: Vec<f64>,
    pub mode_frequency: Option<usize>,
    pub mode_kind: ModeKind,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl CentralTendencyInput {
    /// Weights, treating an empty list as absent
    fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref().filter(|w| !w.is_empty())
    }
}

impl Calculator for CentralTendencyInput {
    type Output = CentralTendencyResult;
    const NAME: &'static str = "central-tendency";
    const FAMILY: PrecisionFamily = PrecisionFamily::Statistics;

    fn validate(&self) -> ValidationResult {
        let dataset = self.dataset.as_deref();
        let mut validator = Validator::new().dataset("dataset", dataset, |d| d.required().max_len(MAX_DATASET_LEN));

        if let Some(weights) = self.weights() {
            let expected = dataset.map_or(0, <[f64]>::len);
            validator = validator
                .dataset("weights", Some(weights), |w| {
                    w.rule(
                        |w| dataset.is_none() || w.len() == expected,
                        ErrorKind::DomainPreconditionViolated,
                        format!("Expected {expected} weights, one per value"),
                    )
                    .rule(
                        |w| w.iter().all(|&x| x >= 0.0),
                        ErrorKind::OutOfRange,
                        "Weights must not be negative",
                    )
                })
                .check(!all_zero(weights), || {
                    FieldError::precondition("weights", "Weights must not all be zero")
                });
        }

        validator.finish()
    }

    fn compute(&self, precision: Precision) -> Option<CentralTendencyResult> {
        let values = self.dataset.as_deref()?;
        let sorted = descriptive::sorted(values);
        let min = *sorted.first()?;
        let max = *sorted.last()?;

        let (modes, mode_frequency) = match descriptive::modes(values) {
            Some((modes, frequency)) => (modes, Some(frequency)),
            None => (Vec::new(), None),
        };

        let weighted_mean = match self.weights() {
            Some(weights) => Some(precision.finite(descriptive::weighted_mean(values, weights)?)?),
            None => None,
        };

        Some(CentralTendencyResult {
            count: values.len(),
            sum: precision.finite(values.iter().sum())?,
            mean: precision.finite(descriptive::mean(values)?)?,
            median: precision.finite(descriptive::median_of_sorted(&sorted)?)?,
            geometric_mean: descriptive::geometric_mean(values).and_then(|g| precision.finite(g)),
            harmonic_mean: descriptive::harmonic_mean(values).and_then(|h| precision.finite(h)),
            weighted_mean,
            mode_kind: ModeKind::from_count(modes.len()),
            modes: modes.into_iter().map(|m| precision.apply(m)).collect(),
            mode_frequency,
            min,
            max,
            range: precision.finite(max - min)?,
        })
    }
}

fn all_zero(weights: &[f64]) -> bool {
    !weights.is_empty() && weights.iter().all(|&w| w == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn input(data: &[f64]) -> CentralTendencyInput {
        CentralTendencyInput {
            dataset: Some(data.to_vec()),
            weights: None,
        }
    }

    #[test]
    fn test_basic_statistics() {
        let result = input(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).calculate().unwrap();
        assert_eq!(result.count, 8);
        assert_eq!(result.sum, 40.0);
        assert_eq!(result.mean, 5.0);
        assert_eq!(result.median, 4.5);
        assert_eq!(result.modes, vec![4.0]);
        assert_eq!(result.mode_frequency, Some(3));
        assert_eq!(result.min, 2.0);
        assert_eq!(result.max, 9.0);
        assert_eq!(result.range, 7.0);
    }

    #[rstest]
    #[case(&[1.0, 2.0, 3.0, 4.0], ModeKind::NoMode, 0)]
    #[case(&[5.0, 5.0, 5.0], ModeKind::NoMode, 0)]
    #[case(&[1.0, 2.0, 2.0, 3.0], ModeKind::Unimodal, 1)]
    #[case(&[1.0, 1.0, 2.0, 2.0, 3.0], ModeKind::Bimodal, 2)]
    #[case(&[1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0], ModeKind::Multimodal, 3)]
    fn test_mode_classification(#[case] data: &[f64], #[case] kind: ModeKind, #[case] count: usize) {
        let result = input(data).calculate().unwrap();
        assert_eq!(result.mode_kind, kind);
        assert_eq!(result.modes.len(), count);
        assert_eq!(result.mode_frequency.is_some(), count > 0);
    }

    #[test]
    fn test_positive_only_means() {
        let result = input(&[1.0, 2.0, 4.0]).calculate().unwrap();
        assert_eq!(result.geometric_mean, Some(2.0));
        assert_eq!(result.harmonic_mean, Some(1.7143));

        let with_zero = input(&[0.0, 2.0, 4.0]).calculate().unwrap();
        assert_eq!(with_zero.geometric_mean, None);
        assert_eq!(with_zero.harmonic_mean, None);
    }

    #[test]
    fn test_weighted_mean() {
        let result = CentralTendencyInput {
            dataset: Some(vec![80.0, 90.0, 70.0]),
            weights: Some(vec![0.2, 0.5, 0.3]),
        }
        .calculate()
        .unwrap();
        assert_eq!(result.weighted_mean, Some(82.0));
    }

    #[test]
    fn test_weight_validation() {
        let mismatched = CentralTendencyInput {
            dataset: Some(vec![1.0, 2.0]),
            weights: Some(vec![1.0]),
        }
        .validate();
        assert_eq!(
            mismatched.error_for("weights").unwrap().kind,
            ErrorKind::DomainPreconditionViolated
        );

        let negative = CentralTendencyInput {
            dataset: Some(vec![1.0, 2.0]),
            weights: Some(vec![1.0, -1.0]),
        }
        .validate();
        assert_eq!(negative.error_for("weights").unwrap().kind, ErrorKind::OutOfRange);

        let zeros = CentralTendencyInput {
            dataset: Some(vec![1.0, 2.0]),
            weights: Some(vec![0.0, 0.0]),
        }
        .validate();
        assert_eq!(zeros.errors.len(), 1);
        assert_eq!(
            zeros.error_for("weights").unwrap().kind,
            ErrorKind::DomainPreconditionViolated
        );
    }

    #[test]
    fn test_empty_and_oversized_datasets() {
        let empty = input(&[]).validate();
        assert_eq!(empty.error_for("dataset").unwrap().kind, ErrorKind::MissingRequiredField);

        let missing = CentralTendencyInput::default().validate();
        assert_eq!(missing.error_for("dataset").unwrap().kind, ErrorKind::MissingRequiredField);

        let huge = input(&vec![1.0; MAX_DATASET_LEN + 1]).validate();
        assert_eq!(huge.error_for("dataset").unwrap().kind, ErrorKind::OutOfRange);
    }

    #[test]
    fn test_single_value() {
        let result = input(&[42.0]).calculate().unwrap();
        assert_eq!(result.mean, 42.0);
        assert_eq!(result.median, 42.0);
        assert_eq!(result.mode_kind, ModeKind::NoMode);
        assert_eq!(result.range, 0.0);
    }
}
