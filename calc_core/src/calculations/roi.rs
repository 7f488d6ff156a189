//! # Return on Investment
//!
//! ROI = (final − initial) / initial × 100
//!
//! Annualized return is the CAGR for holding periods of a year or more and a
//! simple pro-rata `roi / years` for shorter periods, where compounding would
//! inflate the figure. A final value of zero is a complete loss (−100 %).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{Calculator, roi::{PerformanceBand, RoiInput}};
//!
//! let input = RoiInput {
//!     initial_investment: Some(10_000.0),
//!     final_value: Some(12_500.0),
//!     years: Some(1.0),
//! };
//!
//! let result = input.calculate().unwrap();
//! assert_eq!(result.roi_percent, 25.0);
//! assert_eq!(result.annualized_return, Some(25.0));
//! assert_eq!(result.performance, PerformanceBand::ExcellentReturn);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::equations::finance;
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::validation::{ValidationResult, Validator};

/// Longest holding period, in years
pub const MAX_YEARS: f64 = 100.0;

const MAX_AMOUNT: f64 = 1e12;

/// Qualitative rating of a total return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerformanceBand {
    SignificantLoss,
    ModerateLoss,
    MinorLoss,
    LowReturn,
    GoodReturn,
    ExcellentReturn,
    Exceptional,
}

impl PerformanceBand {
    /// Classify an ROI percentage.
    ///
    /// | ROI %        | Band             |
    /// |--------------|------------------|
    /// | < −20        | significant-loss |
    /// | −20 to < −5  | moderate-loss    |
    /// | −5 to < 0    | minor-loss       |
    /// | 0 to < 10    | low-return       |
    /// | 10 to < 25   | good-return      |
    /// | 25 to < 50   | excellent-return |
    /// | ≥ 50         | exceptional      |
    pub fn classify(roi_percent: f64) -> Self {
        match roi_percent {
            r if r < -20.0 => PerformanceBand::SignificantLoss,
            r if r < -5.0 => PerformanceBand::ModerateLoss,
            r if r < 0.0 => PerformanceBand::MinorLoss,
            r if r < 10.0 => PerformanceBand::LowReturn,
            r if r < 25.0 => PerformanceBand::GoodReturn,
            r if r < 50.0 => PerformanceBand::ExcellentReturn,
            _ => PerformanceBand::Exceptional,
        }
    }
}

/// Input for ROI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoiInput {
    pub initial_investment: Option<f64>,
    pub final_value: Option<f64>,
    /// Holding period; without it no annualized figure is reported
    #[serde(default)]
    pub years: Option<f64>,
}

/// ROI results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub initial_investment: f64,
    pub final_value: f64,
    pub net_profit: f64,
    pub roi_percent: f64,
    /// Annualized return in percent
    pub annualized_return: Option<f64>,
    /// final / initial
    pub return_multiple: f64,
    pub performance: PerformanceBand,
}

/// Annualized return in percent for a holding period of `years`
pub fn annualized_return(initial: f64, final_value: f64, years: f64) -> f64 {
    if final_value == 0.0 {
        -100.0
    } else if years >= 1.0 {
        finance::cagr_percent(initial, final_value, years)
    } else {
        finance::roi_percent(initial, final_value) / years
    }
}

impl Calculator for RoiInput {
    type Output = RoiResult;
    const NAME: &'static str = "roi";
    const FAMILY: PrecisionFamily = PrecisionFamily::Money;

    fn validate(&self) -> ValidationResult {
        Validator::new()
            .number("initial_investment", self.initial_investment, |n| {
                n.required().non_negative().nonzero().at_most(MAX_AMOUNT)
            })
            .number("final_value", self.final_value, |n| {
                n.required().non_negative().at_most(MAX_AMOUNT)
            })
            .number("years", self.years, |n| n.positive().at_most(MAX_YEARS))
            .finish()
    }

    fn compute(&self, precision: Precision) -> Option<RoiResult> {
        let initial = self.initial_investment?;
        let final_value = self.final_value?;
        let roi = finance::roi_percent(initial, final_value);

        let annualized = match self.years {
            Some(years) => Some(precision.finite(annualized_return(initial, final_value, years))?),
            None => None,
        };

        Some(RoiResult {
            initial_investment: initial,
            final_value,
            net_profit: precision.finite(final_value - initial)?,
            roi_percent: precision.finite(roi)?,
            annualized_return: annualized,
            return_multiple: Precision::STATISTICS.finite(final_value / initial)?,
            performance: PerformanceBand::classify(roi),
        })
    }
}
