//! # Date Difference
//!
//! Days between two dates, also broken down into weeks and into calendar
//! years, months and days, with a count of weekdays (Monday–Friday).
//!
//! Dates may be given in either order; the span is always measured from the
//! earlier to the later date and `reversed` records that they were swapped.
//! By default the end date itself is not counted; `include_end_date` adds it.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::equations::calendar;
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::validation::{parse_date, ValidationResult, Validator};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateDifferenceInput {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub include_end_date: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateDifferenceResult {
    /// Earlier of the two dates
    pub start_date: NaiveDate,
    /// Later of the two dates
    pub end_date: NaiveDate,
    /// The input dates were given latest first
    pub reversed: bool,
    pub total_days: i64,
    pub weeks: i64,
    /// Days left over after whole weeks
    pub remaining_days: i64,
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub weekdays: i64,
    pub weekend_days: i64,
}

impl Calculator for DateDifferenceInput {
    type Output = DateDifferenceResult;
    const NAME: &'static str = "date-difference";
    const FAMILY: PrecisionFamily = PrecisionFamily::Time;

    fn validate(&self) -> ValidationResult {
        Validator::new()
            .text("start_date", self.start_date.as_deref(), |t| t.required().parses(parse_date))
            .text("end_date", self.end_date.as_deref(), |t| t.required().parses(parse_date))
            .finish()
    }

    fn compute(&self, _precision: Precision) -> Option<DateDifferenceResult> {
        let first = parse_date("start_date", self.start_date.as_deref()?).ok()?;
        let second = parse_date("end_date", self.end_date.as_deref()?).ok()?;
        let (start, end, reversed) = if second < first {
            (second, first, true)
        } else {
            (first, second, false)
        };

        // Counting the end date extends the half-open range by one day
        let stop = if self.include_end_date {
            end.checked_add_signed(Duration::days(1))?
        } else {
            end
        };
        let total_days = (stop - start).num_days();
        let weekdays = calendar::weekdays_between(start, stop);
        let (years, months, days) = calendar::years_months_days(start, stop)?;

        Some(DateDifferenceResult {
            start_date: start,
            end_date: end,
            reversed,
            total_days,
            weeks: total_days / 7,
            remaining_days: total_days % 7,
            years,
            months,
            days,
            weekdays,
            weekend_days: total_days - weekdays,
        })
    }
}
