//! # Time Duration
//!
//! Span between two 24-hour clock times, optionally less an unpaid break.
//! An end time earlier than the start time, or an explicit
//! `crosses_midnight`, places the end on the following day.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{Calculator, time_duration::TimeDurationInput};
//!
//! let input = TimeDurationInput {
//!     start_time: Some("22:00".to_string()),
//!     end_time: Some("06:30".to_string()),
//!     crosses_midnight: false,
//!     break_minutes: Some(30.0),
//! };
//!
//! let result = input.calculate().unwrap();
//! assert_eq!(result.total_minutes, 510);
//! assert_eq!(result.net_minutes, 480);
//! assert_eq!(result.decimal_hours, 8.0);
//! assert!(result.crosses_midnight);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::equations::calendar::{self, MINUTES_PER_DAY};
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::validation::{parse_clock_time, FieldError, ValidationResult, Validator};

/// Input: two `HH:MM` clock times
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeDurationInput {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Force the end time onto the next day even when it is not earlier
    #[serde(default)]
    pub crosses_midnight: bool,
    /// Unpaid break subtracted from the span
    #[serde(default)]
    pub break_minutes: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeDurationResult {
    pub start_time: String,
    pub end_time: String,
    /// Whether the span ran past midnight
    pub crosses_midnight: bool,
    /// Span before the break
    pub total_minutes: u32,
    pub break_minutes: u32,
    pub net_minutes: u32,
    /// Whole hours of the net span
    pub hours: u32,
    /// Remaining minutes of the net span
    pub minutes: u32,
    pub decimal_hours: f64,
    /// e.g. `8h 05m`
    pub formatted: String,
}

fn clock_label(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

impl TimeDurationInput {
    fn clock_minutes(&self) -> Option<(u32, u32)> {
        let start = parse_clock_time("start_time", self.start_time.as_deref()?).ok()?;
        let end = parse_clock_time("end_time", self.end_time.as_deref()?).ok()?;
        Some((start, end))
    }
}

impl Calculator for TimeDurationInput {
    type Output = TimeDurationResult;
    const NAME: &'static str = "time-duration";
    const FAMILY: PrecisionFamily = PrecisionFamily::Time;

    fn validate(&self) -> ValidationResult {
        let validator = Validator::new()
            .text("start_time", self.start_time.as_deref(), |t| t.required().parses(parse_clock_time))
            .text("end_time", self.end_time.as_deref(), |t| t.required().parses(parse_clock_time))
            .number("break_minutes", self.break_minutes, |n| {
                n.non_negative().whole().at_most(MINUTES_PER_DAY as f64)
            });

        match (self.clock_minutes(), self.break_minutes) {
            (Some((start, end)), Some(pause)) => {
                let span = calendar::clock_span_minutes(start, end, self.crosses_midnight);
                validator
                    .check(pause <= span as f64, || {
                        FieldError::precondition("break_minutes", "Break is longer than the time span")
                    })
                    .finish()
            }
            _ => validator.finish(),
        }
    }

    fn compute(&self, precision: Precision) -> Option<TimeDurationResult> {
        let (start, end) = self.clock_minutes()?;
        let total = calendar::clock_span_minutes(start, end, self.crosses_midnight);
        let pause = self.break_minutes.unwrap_or(0.0) as u32;
        let net = total.checked_sub(pause)?;

        Some(TimeDurationResult {
            start_time: clock_label(start),
            end_time: clock_label(end),
            crosses_midnight: self.crosses_midnight || end < start,
            total_minutes: total,
            break_minutes: pause,
            net_minutes: net,
            hours: net / 60,
            minutes: net % 60,
            decimal_hours: precision.finite(net as f64 / 60.0)?,
            formatted: format!("{}h {:02}m", net / 60, net % 60),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;
    use rstest::rstest;

    fn input(start: &str, end: &str, crosses_midnight: bool) -> TimeDurationInput {
        TimeDurationInput {
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            crosses_midnight,
            break_minutes: None,
        }
    }

    #[rstest]
    #[case("09:00", "17:30", false, 510, false)]
    #[case("9:15", "9:45", false, 30, false)]
    #[case("22:00", "06:00", false, 480, true)]
    #[case("08:00", "08:00", false, 0, false)]
    #[case("08:00", "08:00", true, 1440, true)]
    #[case("08:00", "09:00", true, 1500, true)]
    fn test_spans(
        #[case] start: &str,
        #[case] end: &str,
        #[case] crosses: bool,
        #[case] minutes: u32,
        #[case] crossed: bool,
    ) {
        let result = input(start, end, crosses).calculate().unwrap();
        assert_eq!(result.total_minutes, minutes);
        assert_eq!(result.net_minutes, minutes);
        assert_eq!(result.crosses_midnight, crossed);
    }

    #[test]
    fn test_formatting() {
        let result = input("9:05", "17:10", false).calculate().unwrap();
        assert_eq!(result.start_time, "09:05");
        assert_eq!(result.hours, 8);
        assert_eq!(result.minutes, 5);
        assert_eq!(result.formatted, "8h 05m");
        assert_eq!(result.decimal_hours, 8.08);
    }

    #[test]
    fn test_break_longer_than_span() {
        let mut short = input("12:00", "12:20", false);
        short.break_minutes = Some(30.0);
        let result = short.validate();
        assert_eq!(
            result.error_for("break_minutes").unwrap().kind,
            ErrorKind::DomainPreconditionViolated
        );
    }

    #[test]
    fn test_invalid_times() {
        let result = input("25:00", "7:5", false).validate();
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.error_for("start_time").unwrap().kind, ErrorKind::OutOfRange);
        assert_eq!(result.error_for("end_time").unwrap().kind, ErrorKind::InvalidFormat);
    }
}
