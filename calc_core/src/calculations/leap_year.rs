//! # Leap Year
//!
//! Gregorian rule: a year is a leap year if it is divisible by 4 and not by
//! 100, unless it is also divisible by 400. Years are proleptic Gregorian.

use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::equations::calendar;
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::validation::{ValidationResult, Validator};

pub const MIN_YEAR: i64 = 1;
pub const MAX_YEAR: i64 = 9999;

/// Which part of the Gregorian rule decided the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeapRule {
    /// Century year divisible by 400: leap
    DivisibleBy400,
    /// Century year not divisible by 400: common
    DivisibleBy100,
    /// Divisible by 4 but not a century: leap
    DivisibleBy4,
    /// Not divisible by 4: common
    NotDivisibleBy4,
}

impl LeapRule {
    pub fn for_year(year: i64) -> Self {
        if year % 400 == 0 {
            LeapRule::DivisibleBy400
        } else if year % 100 == 0 {
            LeapRule::DivisibleBy100
        } else if year % 4 == 0 {
            LeapRule::DivisibleBy4
        } else {
            LeapRule::NotDivisibleBy4
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeapYearInput {
    pub year: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeapYearResult {
    pub year: i64,
    pub is_leap_year: bool,
    pub rule: LeapRule,
    pub days_in_year: u32,
    pub days_in_february: u32,
    /// Nearest leap year before `year`, if one exists in range
    pub previous_leap_year: Option<i64>,
    /// Nearest leap year after `year`, if one exists in range
    pub next_leap_year: Option<i64>,
}

impl Calculator for LeapYearInput {
    type Output = LeapYearResult;
    const NAME: &'static str = "leap-year";
    const FAMILY: PrecisionFamily = PrecisionFamily::Time;

    fn validate(&self) -> ValidationResult {
        Validator::new()
            .number("year", self.year, |n| {
                n.required()
                    .whole()
                    .at_least(MIN_YEAR as f64)
                    .at_most(MAX_YEAR as f64)
            })
            .finish()
    }

    fn compute(&self, _precision: Precision) -> Option<LeapYearResult> {
        let year = self.year? as i64;
        Some(LeapYearResult {
            year,
            is_leap_year: calendar::is_leap_year(year),
            rule: LeapRule::for_year(year),
            days_in_year: calendar::days_in_year(year),
            days_in_february: calendar::days_in_month(year, 2),
            previous_leap_year: (MIN_YEAR..year).rev().find(|&y| calendar::is_leap_year(y)),
            next_leap_year: (year + 1..=MAX_YEAR).find(|&y| calendar::is_leap_year(y)),
        })
    }
}
