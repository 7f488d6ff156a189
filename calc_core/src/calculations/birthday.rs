//! # Age & Birthday
//!
//! Age on a reference date, the next birthday and upcoming milestone
//! birthdays. The reference date is part of the input so results never
//! depend on the system clock.
//!
//! Someone born on February 29 celebrates on February 28 in common years.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{Calculator, birthday::BirthdayInput};
//!
//! let input = BirthdayInput {
//!     birth_date: Some("1990-05-15".to_string()),
//!     reference_date: Some("2024-05-01".to_string()),
//! };
//!
//! let result = input.calculate().unwrap();
//! assert_eq!(result.age_years, 33);
//! assert_eq!(result.days_until_next_birthday, 14);
//! assert_eq!(result.milestones[0].age, 40);
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::equations::calendar;
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::validation::{parse_date, FieldError, ValidationResult, Validator};

/// Birthdays worth calling out
pub const MILESTONE_AGES: [u32; 18] = [1, 5, 10, 13, 16, 18, 21, 25, 30, 40, 50, 60, 65, 70, 75, 80, 90, 100];

/// Oldest age accepted
pub const MAX_AGE_YEARS: u32 = 150;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BirthdayInput {
    pub birth_date: Option<String>,
    /// The "today" the age is measured on
    pub reference_date: Option<String>,
}

/// An upcoming milestone birthday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub age: u32,
    pub date: NaiveDate,
    pub days_until: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthdayResult {
    pub birth_date: NaiveDate,
    pub reference_date: NaiveDate,
    /// Completed years
    pub age_years: u32,
    /// Months past the last birthday
    pub age_months: u32,
    /// Days past the last monthly anniversary
    pub age_days: u32,
    pub total_months: u32,
    pub total_weeks: i64,
    pub total_days: i64,
    pub birth_weekday: String,
    pub is_birthday_today: bool,
    /// Today when `is_birthday_today`
    pub next_birthday: NaiveDate,
    pub next_birthday_weekday: String,
    pub next_birthday_age: u32,
    pub days_until_next_birthday: i64,
    /// Milestones still ahead, soonest first
    pub milestones: Vec<Milestone>,
}

impl BirthdayInput {
    fn dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        let birth = parse_date("birth_date", self.birth_date.as_deref()?).ok()?;
        let reference = parse_date("reference_date", self.reference_date.as_deref()?).ok()?;
        Some((birth, reference))
    }
}

impl Calculator for BirthdayInput {
    type Output = BirthdayResult;
    const NAME: &'static str = "birthday";
    const FAMILY: PrecisionFamily = PrecisionFamily::Time;

    fn validate(&self) -> ValidationResult {
        let validator = Validator::new()
            .text("birth_date", self.birth_date.as_deref(), |t| t.required().parses(parse_date))
            .text("reference_date", self.reference_date.as_deref(), |t| {
                t.required().parses(parse_date)
            });

        let Some((birth, reference)) = self.dates() else {
            return validator.finish();
        };
        let age = calendar::completed_years(birth, reference).unwrap_or(0);
        validator
            .check(birth <= reference, || {
                FieldError::precondition("birth_date", "Birth date is after the reference date")
            })
            .check(age <= MAX_AGE_YEARS as i32, || {
                FieldError::out_of_range("birth_date", format!("Age must not exceed {MAX_AGE_YEARS} years"))
            })
            .finish()
    }

    fn compute(&self, _precision: Precision) -> Option<BirthdayResult> {
        let (birth, reference) = self.dates()?;
        let years = u32::try_from(calendar::completed_years(birth, reference)?).ok()?;
        let (whole_years, months, days) = calendar::years_months_days(birth, reference)?;
        // A February 29 birthday observed on February 28 is one calendar year ahead
        let (months, days) = if whole_years == years { (months, days) } else { (0, 0) };
        let total_days = (reference - birth).num_days();

        let next_birthday = calendar::next_anniversary(birth, reference)?;
        let next_birthday_age = u32::try_from(next_birthday.year() - birth.year()).ok()?;

        let milestones = MILESTONE_AGES
            .iter()
            .filter(|&&age| age > years)
            .map(|&age| {
                let date = calendar::anniversary_in_year(birth.month(), birth.day(), birth.year() + age as i32)?;
                Some(Milestone {
                    age,
                    date,
                    days_until: (date - reference).num_days(),
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(BirthdayResult {
            birth_date: birth,
            reference_date: reference,
            age_years: years,
            age_months: months,
            age_days: days,
            total_months: years * 12 + months,
            total_weeks: total_days / 7,
            total_days,
            birth_weekday: birth.format("%A").to_string(),
            is_birthday_today: next_birthday == reference,
            next_birthday,
            next_birthday_weekday: next_birthday.format("%A").to_string(),
            next_birthday_age,
            days_until_next_birthday: (next_birthday - reference).num_days(),
            milestones,
        })
    }
}
