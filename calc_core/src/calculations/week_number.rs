//! # ISO Week Number
//!
//! ISO 8601 week date of a calendar date. Weeks run Monday to Sunday and
//! belong to the year of their Thursday, so dates near New Year can carry the
//! neighbouring ISO year.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{Calculator, week_number::WeekNumberInput};
//!
//! let input = WeekNumberInput { date: Some("2023-01-01".to_string()) };
//!
//! let result = input.calculate().unwrap();
//! assert_eq!(result.iso_year, 2022);
//! assert_eq!(result.week_number, 52);
//! assert_eq!(result.iso_week_date, "2022-W52-7");
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::equations::calendar;
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::validation::{parse_date, ValidationResult, Validator};

/// Input: a date as `YYYY-MM-DD`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekNumberInput {
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekNumberResult {
    pub date: NaiveDate,
    pub iso_year: i32,
    /// 1–53
    pub week_number: u32,
    /// ISO weekday, Monday = 1 … Sunday = 7
    pub weekday: u32,
    pub weekday_name: String,
    pub day_of_year: u32,
    /// Monday of the week
    pub week_start: NaiveDate,
    /// Sunday of the week
    pub week_end: NaiveDate,
    /// ISO weeks in `iso_year` (52 or 53)
    pub weeks_in_year: u32,
    /// e.g. `2024-W07-3`
    pub iso_week_date: String,
}

impl Calculator for WeekNumberInput {
    type Output = WeekNumberResult;
    const NAME: &'static str = "week-number";
    const FAMILY: PrecisionFamily = PrecisionFamily::Time;

    fn validate(&self) -> ValidationResult {
        Validator::new()
            .text("date", self.date.as_deref(), |t| t.required().parses(parse_date))
            .finish()
    }

    fn compute(&self, _precision: Precision) -> Option<WeekNumberResult> {
        let date = parse_date("date", self.date.as_deref()?).ok()?;
        let (iso_year, week_number) = calendar::iso_week(date)?;
        let (week_start, week_end) = calendar::week_bounds(date)?;
        let weekday = date.weekday().number_from_monday();

        Some(WeekNumberResult {
            date,
            iso_year,
            week_number,
            weekday,
            weekday_name: date.format("%A").to_string(),
            day_of_year: date.ordinal(),
            week_start,
            week_end,
            weeks_in_year: calendar::iso_weeks_in_year(iso_year)?,
            iso_week_date: format!("{iso_year:04}-W{week_number:02}-{weekday}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;
    use rstest::rstest;

    fn week(date: &str) -> WeekNumberResult {
        WeekNumberInput {
            date: Some(date.to_string()),
        }
        .calculate()
        .unwrap()
    }

    #[rstest]
    #[case("2023-01-01", 2022, 52)]
    #[case("2023-01-02", 2023, 1)]
    #[case("2021-01-03", 2020, 53)]
    #[case("2024-12-30", 2025, 1)]
    #[case("2026-12-31", 2026, 53)]
    #[case("2024-06-13", 2024, 24)]
    fn test_iso_weeks(#[case] date: &str, #[case] iso_year: i32, #[case] week_number: u32) {
        let result = week(date);
        assert_eq!((result.iso_year, result.week_number), (iso_year, week_number));
        assert!((1..=53).contains(&result.week_number));
    }

    #[test]
    fn test_extras() {
        let result = week("2023-01-01");
        assert_eq!(result.weekday, 7);
        assert_eq!(result.weekday_name, "Sunday");
        assert_eq!(result.day_of_year, 1);
        assert_eq!(result.week_start, NaiveDate::from_ymd_opt(2022, 12, 26).unwrap());
        assert_eq!(result.week_end, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(result.weeks_in_year, 52);
    }

    #[test]
    fn test_serialized_dates_are_iso() {
        let json = serde_json::to_value(week("2024-02-14")).unwrap();
        assert_eq!(json["week_start"], "2024-02-12");
        assert_eq!(json["iso_week_date"], "2024-W07-3");
    }

    #[test]
    fn test_invalid_dates() {
        for text in ["2023-13-01", "2023-02-30", "14/02/2024", "yesterday"] {
            let result = WeekNumberInput {
                date: Some(text.to_string()),
            }
            .validate();
            assert_eq!(result.error_for("date").unwrap().kind, ErrorKind::InvalidFormat, "{text}");
        }
        let blank = WeekNumberInput {
            date: Some("  ".to_string()),
        }
        .validate();
        assert_eq!(blank.error_for("date").unwrap().kind, ErrorKind::MissingRequiredField);
    }
}
