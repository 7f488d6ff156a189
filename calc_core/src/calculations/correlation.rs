//! # Correlation & Linear Regression
//!
//! Pearson correlation of paired data with the least-squares line
//! `ŷ = intercept + slope·x` and a two-tailed significance test.
//!
//! ## Formulas
//!
//! - r = Sxy / √(Sxx·Syy)
//! - t = r·√((n − 2) / (1 − r²)), df = n − 2
//! - p = two-tailed Student's t probability of |t|
//!
//! When |r| rounds to 1 the t statistic is unbounded; it is reported as
//! `null` with a p-value of 0.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{Calculator, correlation::{CorrelationInput, CorrelationStrength}};
//!
//! let input = CorrelationInput {
//!     x_values: Some(vec![1.0, 2.0, 3.0, 4.0, 5.0]),
//!     y_values: Some(vec![2.0, 4.0, 6.0, 8.0, 10.0]),
//! };
//!
//! let result = input.calculate().unwrap();
//! assert_eq!(result.pearson_r, 1.0);
//! assert_eq!(result.slope, 2.0);
//! assert_eq!(result.strength, CorrelationStrength::PerfectPositive);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::equations::{descriptive, distribution};
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::validation::{DatasetCheck, ErrorKind, FieldError, ValidationResult, Validator, MAX_DATASET_LEN};

/// Significance level for the `significant` flag
pub const ALPHA: f64 = 0.05;

/// Minimum number of pairs
pub const MIN_PAIRS: usize = 3;

/// Input for correlation: paired x and y samples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrelationInput {
    pub x_values: Option<Vec<f64>>,
    pub y_values: Option<Vec<f64>>,
}

/// Strength and direction of a linear relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationStrength {
    PerfectPositive,
    StrongPositive,
    ModeratePositive,
    WeakPositive,
    Negligible,
    WeakNegative,
    ModerateNegative,
    StrongNegative,
    PerfectNegative,
}

impl CorrelationStrength {
    /// Classify a correlation coefficient.
    ///
    /// | |r|            | Band       |
    /// |----------------|------------|
    /// | ≥ 0.9999       | perfect    |
    /// | ≥ 0.7          | strong     |
    /// | ≥ 0.4          | moderate   |
    /// | ≥ 0.2          | weak       |
    /// | < 0.2          | negligible |
    pub fn classify(r: f64) -> Self {
        use CorrelationStrength::*;
        let magnitude = r.abs();
        let positive = r > 0.0;
        match magnitude {
            m if m >= 0.9999 => if positive { PerfectPositive } else { PerfectNegative },
            m if m >= 0.7 => if positive { StrongPositive } else { StrongNegative },
            m if m >= 0.4 => if positive { ModeratePositive } else { ModerateNegative },
            m if m >= 0.2 => if positive { WeakPositive } else { WeakNegative },
            _ => Negligible,
        }
    }
}

/// Correlation and regression results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub n: usize,
    pub pearson_r: f64,
    pub r_squared: f64,
    pub slope: f64,
    pub intercept: f64,
    /// Sample covariance
    pub covariance: f64,
    pub t_statistic: Option<f64>,
    pub degrees_of_freedom: usize,
    pub p_value: f64,
    /// p < 0.05
    pub significant: bool,
    pub strength: CorrelationStrength,
}

impl Calculator for CorrelationInput {
    type Output = CorrelationResult;
    const NAME: &'static str = "correlation";
    const FAMILY: PrecisionFamily = PrecisionFamily::Statistics;

    fn validate(&self) -> ValidationResult {
        let x = self.x_values.as_deref();
        let y = self.y_values.as_deref();
        let validator = Validator::new()
            .dataset("x_values", x, sample_rules)
            .dataset("y_values", y, sample_rules);

        // Pairing and variance checks only make sense once both samples are usable
        let (x, y) = match (x, y) {
            (Some(x), Some(y)) if !validator.has_error("x_values") && !validator.has_error("y_values") => (x, y),
            _ => return validator.finish(),
        };

        validator
            .check(x.len() == y.len(), || {
                FieldError::precondition(
                    "y_values",
                    format!("Expected {} y values to pair with the x values, got {}", x.len(), y.len()),
                )
            })
            .check(!is_constant(x), || {
                FieldError::new("x_values", ErrorKind::DomainPreconditionViolated, "All x values are identical")
            })
            .check(!is_constant(y), || {
                FieldError::new("y_values", ErrorKind::DomainPreconditionViolated, "All y values are identical")
            })
            .finish()
    }

    fn compute(&self, precision: Precision) -> Option<CorrelationResult> {
        let sums = descriptive::paired_sums(self.x_values.as_deref()?, self.y_values.as_deref()?)?;
        let r = sums.pearson()?;
        let df = sums.n - 2;

        let one_minus_r2 = 1.0 - r * r;
        let t_statistic = if one_minus_r2 <= f64::EPSILON {
            None
        } else {
            Some(r * (df as f64 / one_minus_r2).sqrt())
        };
        let p_value = match t_statistic {
            Some(t) => distribution::student_t_two_tailed(t, df as f64),
            None => 0.0,
        };

        Some(CorrelationResult {
            n: sums.n,
            pearson_r: precision.finite(r)?,
            r_squared: precision.finite(r * r)?,
            slope: precision.finite(sums.slope()?)?,
            intercept: precision.finite(sums.intercept()?)?,
            covariance: precision.finite(sums.sample_covariance()?)?,
            t_statistic: match t_statistic {
                Some(t) => Some(precision.finite(t)?),
                None => None,
            },
            degrees_of_freedom: df,
            p_value: precision.finite(p_value)?,
            significant: p_value < ALPHA,
            strength: CorrelationStrength::classify(r),
        })
    }
}

fn sample_rules(check: DatasetCheck<'_>) -> DatasetCheck<'_> {
    check.required().min_len(MIN_PAIRS).max_len(MAX_DATASET_LEN)
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
