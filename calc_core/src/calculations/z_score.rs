//! # Z-Score & Normal Probability
//!
//! Converts a raw value to a z-score (or a z-score back to a value) and
//! reports where it sits in the standard normal distribution.
//!
//! ## Formulas
//!
//! - z = (x − μ) / σ
//! - x = μ + z·σ
//! - percentile = Φ(z) × 100
//! - confidence level = 1 − two-tailed p
//!
//! Φ uses the Abramowitz–Stegun erf approximation, good to about 1.5×10⁻⁷.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{Calculator, z_score::{ZScoreInput, ZScoreMode}};
//!
//! let input = ZScoreInput {
//!     mode: ZScoreMode::ValueToZ,
//!     value: Some(85.0),
//!     mean: Some(70.0),
//!     standard_deviation: Some(10.0),
//!     z_score: None,
//! };
//!
//! let result = input.calculate().unwrap();
//! assert_eq!(result.z_score, 1.5);
//! assert_eq!(result.percentile, 93.3193);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::equations::distribution;
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::validation::{ValidationResult, Validator};

/// Largest |z| accepted as input
pub const MAX_ABS_Z: f64 = 100.0;

/// Largest |x|, |μ| or σ accepted
const MAX_MAGNITUDE: f64 = 1e12;

/// z = (x − μ) / σ. `None` unless σ > 0 and the result is finite.
///
/// ```rust
/// use calc_core::calculations::z_score::{value_from_z_score, z_score};
///
/// let z = z_score(130.0, 100.0, 15.0).unwrap();
/// assert_eq!(z, 2.0);
/// assert_eq!(value_from_z_score(z, 100.0, 15.0), Some(130.0));
/// ```
pub fn z_score(value: f64, mean: f64, standard_deviation: f64) -> Option<f64> {
    if standard_deviation <= 0.0 {
        return None;
    }
    Some((value - mean) / standard_deviation).filter(|z| z.is_finite())
}

/// x = μ + z·σ. `None` unless σ > 0 and the result is finite.
pub fn value_from_z_score(z: f64, mean: f64, standard_deviation: f64) -> Option<f64> {
    if standard_deviation <= 0.0 {
        return None;
    }
    Some(mean + z * standard_deviation).filter(|x| x.is_finite())
}

/// Direction of the calculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZScoreMode {
    /// Raw value → z-score
    #[default]
    ValueToZ,
    /// z-score → raw value
    ZToValue,
}

/// How far from the mean a z-score lies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZScoreBand {
    WithinOneSd,
    WithinTwoSd,
    WithinThreeSd,
    BeyondThreeSd,
}

impl ZScoreBand {
    pub fn classify(z: f64) -> Self {
        match z.abs() {
            a if a <= 1.0 => ZScoreBand::WithinOneSd,
            a if a <= 2.0 => ZScoreBand::WithinTwoSd,
            a if a <= 3.0 => ZScoreBand::WithinThreeSd,
            _ => ZScoreBand::BeyondThreeSd,
        }
    }
}

/// Input for z-score calculations.
///
/// `value` is required for [`ZScoreMode::ValueToZ`], `z_score` for
/// [`ZScoreMode::ZToValue`]; the other is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZScoreInput {
    #[serde(default)]
    pub mode: ZScoreMode,
    pub value: Option<f64>,
    pub mean: Option<f64>,
    pub standard_deviation: Option<f64>,
    pub z_score: Option<f64>,
}

/// Z-score results with normal-distribution probabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreResult {
    pub mode: ZScoreMode,
    pub value: f64,
    pub z_score: f64,
    /// Φ(z) × 100
    pub percentile: f64,
    /// P(Z ≤ z)
    pub p_value_left: f64,
    /// P(Z ≥ z)
    pub p_value_right: f64,
    /// P(|Z| ≥ |z|)
    pub p_value_two_tailed: f64,
    /// 1 − two-tailed p
    pub confidence_level: f64,
    pub band: ZScoreBand,
}

impl Calculator for ZScoreInput {
    type Output = ZScoreResult;
    const NAME: &'static str = "z-score";
    const FAMILY: PrecisionFamily = PrecisionFamily::Statistics;

    fn validate(&self) -> ValidationResult {
        let validator = Validator::new();
        let validator = match self.mode {
            ZScoreMode::ValueToZ => {
                validator.number("value", self.value, |n| n.required().magnitude_at_most(MAX_MAGNITUDE))
            }
            ZScoreMode::ZToValue => {
                validator.number("z_score", self.z_score, |n| n.required().magnitude_at_most(MAX_ABS_Z))
            }
        };
        validator
            .number("mean", self.mean, |n| n.required().magnitude_at_most(MAX_MAGNITUDE))
            .number("standard_deviation", self.standard_deviation, |n| {
                n.required().non_negative().nonzero().at_most(MAX_MAGNITUDE)
            })
            .finish()
    }

    fn compute(&self, precision: Precision) -> Option<ZScoreResult> {
        let mean = self.mean?;
        let sd = self.standard_deviation?;
        let (value, z) = match self.mode {
            ZScoreMode::ValueToZ => {
                let value = self.value?;
                (value, z_score(value, mean, sd)?)
            }
            ZScoreMode::ZToValue => {
                let z = self.z_score?;
                (value_from_z_score(z, mean, sd)?, z)
            }
        };

        let tails = distribution::tail_probabilities(z);
        // Probabilities keep two extra places so small tails stay visible
        let probability = precision.extended(2);

        Some(ZScoreResult {
            mode: self.mode,
            value: precision.finite(value)?,
            z_score: precision.finite(z)?,
            percentile: precision.finite(tails.left * 100.0)?,
            p_value_left: probability.finite(tails.left)?,
            p_value_right: probability.finite(tails.right)?,
            p_value_two_tailed: probability.finite(tails.two_tailed)?,
            confidence_level: probability.finite(1.0 - tails.two_tailed)?,
            band: ZScoreBand::classify(z),
        })
    }
}
