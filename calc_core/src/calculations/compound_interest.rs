//! # Compound Interest
//!
//! Projects a principal with optional periodic contributions and reports a
//! year-by-year breakdown.
//!
//! ## Formula
//!
//! A = P(1 + r/n)^(nt) + PMT·((1 + i)^(mt) − 1) / i, where i = (1 + r/n)^(n/m) − 1
//!
//! Contributions are made at the end of each contribution period. When no
//! contribution frequency is given, contributions follow the compounding
//! frequency. A fractional final year is projected with the same closed form,
//! so the last breakdown row covers only the remaining part of a year.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{Calculator, compound_interest::{CompoundInterestInput, CompoundingFrequency}};
//!
//! let input = CompoundInterestInput {
//!     principal: Some(1000.0),
//!     annual_rate: Some(5.0),
//!     years: Some(10.0),
//!     compounding_frequency: Some(CompoundingFrequency::Annually),
//!     contribution_amount: None,
//!     contribution_frequency: None,
//! };
//!
//! let result = input.calculate().unwrap();
//! assert_eq!(result.final_balance, 1628.89);
//! assert_eq!(result.yearly_breakdown.len(), 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::equations::finance;
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::validation::{FieldError, ValidationResult, Validator};

/// Longest projection, in years
pub const MAX_YEARS: f64 = 100.0;

/// Highest nominal annual rate, in percent
pub const MAX_RATE_PERCENT: f64 = 100.0;

/// Largest principal or contribution
const MAX_AMOUNT: f64 = 1e12;

/// How often interest is compounded or contributions are made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundingFrequency {
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
    Weekly,
    Daily,
}

impl CompoundingFrequency {
    pub const ALL: [CompoundingFrequency; 6] = [
        CompoundingFrequency::Annually,
        CompoundingFrequency::SemiAnnually,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Weekly,
        CompoundingFrequency::Daily,
    ];

    /// Periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Weekly => 52,
            CompoundingFrequency::Daily => 365,
        }
    }
}

/// Input for a compound interest projection.
///
/// ## JSON Example
///
/// ```json
/// {
///   "principal": 5000,
///   "annual_rate": 6.5,
///   "years": 20,
///   "compounding_frequency": "monthly",
///   "contribution_amount": 200,
///   "contribution_frequency": "monthly"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub principal: Option<f64>,
    /// Nominal annual rate in percent (5 = 5 %)
    pub annual_rate: Option<f64>,
    pub years: Option<f64>,
    pub compounding_frequency: Option<CompoundingFrequency>,
    /// Amount added each contribution period
    #[serde(default)]
    pub contribution_amount: Option<f64>,
    /// Defaults to the compounding frequency
    #[serde(default)]
    pub contribution_frequency: Option<CompoundingFrequency>,
}

/// One row of the yearly breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyBalance {
    pub year: u32,
    pub starting_balance: f64,
    pub contributions: f64,
    pub interest_earned: f64,
    pub ending_balance: f64,
}

/// Compound interest results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    pub final_balance: f64,
    pub principal: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    /// Effective annual rate in percent
    pub effective_annual_rate: f64,
    pub compounding_periods_per_year: u32,
    pub contribution_periods_per_year: u32,
    pub yearly_breakdown: Vec<YearlyBalance>,
}

impl Calculator for CompoundInterestInput {
    type Output = CompoundInterestResult;
    const NAME: &'static str = "compound-interest";
    const FAMILY: PrecisionFamily = PrecisionFamily::Money;

    fn validate(&self) -> ValidationResult {
        Validator::new()
            .number("principal", self.principal, |n| {
                n.required().non_negative().nonzero().at_most(MAX_AMOUNT)
            })
            .number("annual_rate", self.annual_rate, |n| {
                n.required().non_negative().at_most(MAX_RATE_PERCENT)
            })
            .number("years", self.years, |n| n.required().positive().at_most(MAX_YEARS))
            .check(self.compounding_frequency.is_some(), || {
                FieldError::missing("compounding_frequency")
            })
            .number("contribution_amount", self.contribution_amount, |n| {
                n.non_negative().at_most(MAX_AMOUNT)
            })
            .finish()
    }

    fn compute(&self, precision: Precision) -> Option<CompoundInterestResult> {
        let principal = self.principal?;
        let rate = self.annual_rate? / 100.0;
        let years = self.years?;
        let compounding = self.compounding_frequency?;
        let contributing = self.contribution_frequency.unwrap_or(compounding);
        let payment = self.contribution_amount.unwrap_or(0.0);

        let n = compounding.periods_per_year() as f64;
        let m = contributing.periods_per_year() as f64;
        let balance_at = |t: f64| finance::future_value(principal, rate, n, t, payment, m);

        let mut yearly_breakdown = Vec::new();
        let mut starting = principal;
        let mut year = 1u32;
        loop {
            let start_time = (year - 1) as f64;
            if start_time >= years {
                break;
            }
            let end_time = (year as f64).min(years);
            let ending = balance_at(end_time);
            let contributions = payment * m * (end_time - start_time);

            yearly_breakdown.push(YearlyBalance {
                year,
                starting_balance: precision.finite(starting)?,
                contributions: precision.finite(contributions)?,
                interest_earned: precision.finite(ending - starting - contributions)?,
                ending_balance: precision.finite(ending)?,
            });
            starting = ending;
            year += 1;
        }

        let final_balance = starting;
        let total_contributions = payment * m * years;

        Some(CompoundInterestResult {
            final_balance: precision.finite(final_balance)?,
            principal: precision.finite(principal)?,
            total_contributions: precision.finite(total_contributions)?,
            total_interest: precision.finite(final_balance - principal - total_contributions)?,
            effective_annual_rate: precision.finite(finance::effective_annual_rate(rate, n) * 100.0)?,
            compounding_periods_per_year: compounding.periods_per_year(),
            contribution_periods_per_year: contributing.periods_per_year(),
            yearly_breakdown,
        })
    }
}
