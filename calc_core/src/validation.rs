//! # Input Validation
//!
//! Validation never stops at the first problem. A [`Validator`] is a consuming
//! builder: each check takes the validator by value and hands it back, and
//! [`Validator::finish`] turns the collected errors into a [`ValidationResult`]
//! so a form can highlight every bad field at once.
//!
//! Each field reports at most one error: the first rule it fails. Checks on a
//! field that already failed are skipped.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::validation::{ErrorKind, Validator};
//!
//! let principal: Option<f64> = Some(-100.0);
//! let years: Option<f64> = None;
//!
//! let result = Validator::new()
//!     .number("principal", principal, |n| n.required().non_negative().nonzero())
//!     .number("years", years, |n| n.required().positive())
//!     .finish();
//!
//! assert!(!result.valid);
//! assert_eq!(result.errors.len(), 2);
//! assert_eq!(result.errors[0].kind, ErrorKind::OutOfRange);
//! assert_eq!(result.errors[1].kind, ErrorKind::MissingRequiredField);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Category of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Field was not supplied (or was blank)
    MissingRequiredField,
    /// Negative where disallowed, or beyond a domain ceiling
    OutOfRange,
    /// Malformed text or a non-finite number
    InvalidFormat,
    /// Value is well-formed but makes the calculation undefined
    /// (zero standard deviation, zero investment, unknown unit)
    DomainPreconditionViolated,
}

impl ErrorKind {
    /// Tag used in serialized output
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingRequiredField => "missing-required-field",
            ErrorKind::OutOfRange => "out-of-range",
            ErrorKind::InvalidFormat => "invalid-format",
            ErrorKind::DomainPreconditionViolated => "domain-precondition-violated",
        }
    }
}

/// A single violated constraint, keyed by input field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        FieldError::new(field, ErrorKind::MissingRequiredField, "This field is required")
    }

    pub fn out_of_range(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError::new(field, ErrorKind::OutOfRange, message)
    }

    pub fn invalid_format(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError::new(field, ErrorKind::InvalidFormat, message)
    }

    pub fn precondition(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError::new(field, ErrorKind::DomainPreconditionViolated, message)
    }
}

/// Outcome of validating one calculator input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "valid": false,
///   "errors": [
///     { "field": "initial_investment", "kind": "out-of-range", "message": "Value must be greater than zero" },
///     { "field": "years", "kind": "out-of-range", "message": "Value must be at most 100" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    /// A passing result with no errors
    pub fn ok() -> Self {
        ValidationResult {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// The error recorded for `field`, if any
    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Convert into a `CalcResult`, failing with the full report
    pub fn into_result(self) -> CalcResult<()> {
        if self.valid {
            Ok(())
        } else {
            Err(CalcError::Validation(self))
        }
    }
}

/// Accumulates field errors across every check of an input.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Validator::default()
    }

    /// Record an error unless its field already has one.
    pub fn push(mut self, error: FieldError) -> Self {
        if !self.has_error(&error.field) {
            self.errors.push(error);
        }
        self
    }

    /// Record the error produced by `make` when `condition` is false.
    pub fn check(self, condition: bool, make: impl FnOnce() -> FieldError) -> Self {
        if condition {
            self
        } else {
            self.push(make())
        }
    }

    /// Run number rules against an optional numeric field.
    pub fn number<'a>(
        self,
        field: &'a str,
        value: Option<f64>,
        rules: impl FnOnce(NumberCheck<'a>) -> NumberCheck<'a>,
    ) -> Self {
        if self.has_error(field) {
            return self;
        }
        match rules(NumberCheck::new(field, value)).error {
            Some(error) => self.push(error),
            None => self,
        }
    }

    /// Run text rules against an optional string field.
    pub fn text<'a>(
        self,
        field: &'a str,
        value: Option<&'a str>,
        rules: impl FnOnce(TextCheck<'a>) -> TextCheck<'a>,
    ) -> Self {
        if self.has_error(field) {
            return self;
        }
        match rules(TextCheck::new(field, value)).error {
            Some(error) => self.push(error),
            None => self,
        }
    }

    /// Run dataset rules against an optional list of numbers.
    pub fn dataset<'a>(
        self,
        field: &'a str,
        value: Option<&'a [f64]>,
        rules: impl FnOnce(DatasetCheck<'a>) -> DatasetCheck<'a>,
    ) -> Self {
        if self.has_error(field) {
            return self;
        }
        match rules(DatasetCheck::new(field, value)).error {
            Some(error) => self.push(error),
            None => self,
        }
    }

    /// Whether `field` already failed a check
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn finish(self) -> ValidationResult {
        ValidationResult {
            valid: self.errors.is_empty(),
            errors: self.errors,
        }
    }
}

/// Rule chain for one numeric field. Non-finite values fail as `invalid-format`
/// before any other rule runs; absent values only fail `required`.
#[derive(Debug, Clone)]
pub struct NumberCheck<'a> {
    field: &'a str,
    value: Option<f64>,
    error: Option<FieldError>,
}

impl<'a> NumberCheck<'a> {
    fn new(field: &'a str, value: Option<f64>) -> Self {
        let error = match value {
            Some(v) if !v.is_finite() => Some(FieldError::invalid_format(field, "Value must be a finite number")),
            _ => None,
        };
        NumberCheck { field, value, error }
    }

    /// Apply an arbitrary rule to a present, finite value.
    pub fn rule(mut self, pass: impl FnOnce(f64) -> bool, kind: ErrorKind, message: impl Into<String>) -> Self {
        if self.error.is_none() {
            if let Some(v) = self.value {
                if !pass(v) {
                    self.error = Some(FieldError::new(self.field, kind, message));
                }
            }
        }
        self
    }

    pub fn required(mut self) -> Self {
        if self.error.is_none() && self.value.is_none() {
            self.error = Some(FieldError::missing(self.field));
        }
        self
    }

    pub fn non_negative(self) -> Self {
        self.rule(|v| v >= 0.0, ErrorKind::OutOfRange, "Value must not be negative")
    }

    pub fn positive(self) -> Self {
        self.rule(|v| v > 0.0, ErrorKind::OutOfRange, "Value must be greater than zero")
    }

    /// Zero makes the downstream formula undefined
    pub fn nonzero(self) -> Self {
        self.rule(|v| v != 0.0, ErrorKind::DomainPreconditionViolated, "Value must not be zero")
    }

    pub fn at_least(self, min: f64) -> Self {
        self.rule(|v| v >= min, ErrorKind::OutOfRange, format!("Value must be at least {min}"))
    }

    pub fn at_most(self, max: f64) -> Self {
        self.rule(|v| v <= max, ErrorKind::OutOfRange, format!("Value must be at most {max}"))
    }

    pub fn magnitude_at_most(self, max: f64) -> Self {
        self.rule(
            |v| v.abs() <= max,
            ErrorKind::OutOfRange,
            format!("Magnitude must not exceed {max}"),
        )
    }

    pub fn whole(self) -> Self {
        self.rule(|v| v.fract() == 0.0, ErrorKind::InvalidFormat, "Value must be a whole number")
    }
}

/// Rule chain for one text field. Blank text counts as missing.
#[derive(Debug, Clone)]
pub struct TextCheck<'a> {
    field: &'a str,
    value: Option<&'a str>,
    error: Option<FieldError>,
}

impl<'a> TextCheck<'a> {
    fn new(field: &'a str, value: Option<&'a str>) -> Self {
        TextCheck {
            field,
            value: value.map(str::trim).filter(|s| !s.is_empty()),
            error: None,
        }
    }

    pub fn required(mut self) -> Self {
        if self.error.is_none() && self.value.is_none() {
            self.error = Some(FieldError::missing(self.field));
        }
        self
    }

    /// Apply a parser; its error (re-keyed to this field) fails the check.
    pub fn parses<T>(mut self, parse: impl FnOnce(&str, &str) -> Result<T, FieldError>) -> Self {
        if self.error.is_none() {
            if let Some(text) = self.value {
                if let Err(error) = parse(self.field, text) {
                    self.error = Some(error);
                }
            }
        }
        self
    }

    pub fn rule(mut self, pass: impl FnOnce(&str) -> bool, kind: ErrorKind, message: impl Into<String>) -> Self {
        if self.error.is_none() {
            if let Some(text) = self.value {
                if !pass(text) {
                    self.error = Some(FieldError::new(self.field, kind, message));
                }
            }
        }
        self
    }
}

/// Largest dataset any statistics calculator accepts
pub const MAX_DATASET_LEN: usize = 10_000;

/// Rule chain for a dataset field. Empty datasets count as missing.
#[derive(Debug, Clone)]
pub struct DatasetCheck<'a> {
    field: &'a str,
    value: Option<&'a [f64]>,
    error: Option<FieldError>,
}

impl<'a> DatasetCheck<'a> {
    fn new(field: &'a str, value: Option<&'a [f64]>) -> Self {
        let value = value.filter(|v| !v.is_empty());
        let error = value
            .and_then(|values| values.iter().position(|v| !v.is_finite()))
            .map(|index| FieldError::invalid_format(field, format!("Value at position {} is not a finite number", index + 1)));
        DatasetCheck { field, value, error }
    }

    pub fn required(mut self) -> Self {
        if self.error.is_none() && self.value.is_none() {
            self.error = Some(FieldError::missing(self.field));
        }
        self
    }

    pub fn min_len(self, min: usize) -> Self {
        self.rule(
            |values| values.len() >= min,
            ErrorKind::DomainPreconditionViolated,
            format!("At least {min} values are required"),
        )
    }

    pub fn max_len(self, max: usize) -> Self {
        self.rule(
            |values| values.len() <= max,
            ErrorKind::OutOfRange,
            format!("At most {max} values are allowed"),
        )
    }

    pub fn rule(mut self, pass: impl FnOnce(&[f64]) -> bool, kind: ErrorKind, message: impl Into<String>) -> Self {
        if self.error.is_none() {
            if let Some(values) = self.value {
                if !pass(values) {
                    self.error = Some(FieldError::new(self.field, kind, message));
                }
            }
        }
        self
    }
}

// ============================================================================
// Parsers for form text
// ============================================================================

/// Parse dataset text such as `"4, 8; 15 16\n23"` into numbers.
///
/// Commas, semicolons and any whitespace separate values; empty tokens are
/// skipped. The first token that is not a finite number fails the parse.
pub fn parse_dataset(field: &str, text: &str) -> Result<Vec<f64>, FieldError> {
    text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(FieldError::invalid_format(field, format!("Could not read '{token}' as a number"))),
        })
        .collect()
}

/// Parse an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(field: &str, text: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| FieldError::invalid_format(field, "Expected a date in YYYY-MM-DD format"))
}

/// Parse a 24-hour clock time (`HH:MM`, hour may be one digit) into minutes
/// after midnight.
pub fn parse_clock_time(field: &str, text: &str) -> Result<u32, FieldError> {
    let invalid = || FieldError::invalid_format(field, "Expected a time in HH:MM format");
    let (hours, minutes) = text.trim().split_once(':').ok_or_else(invalid)?;

    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(FieldError::out_of_range(field, "Time must be between 00:00 and 23:59"));
    }
    Ok(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_accumulate_across_fields() {
        let result = Validator::new()
            .number("a", Some(-1.0), |n| n.required().non_negative())
            .number("b", None, |n| n.required())
            .number("c", Some(5.0), |n| n.required().at_most(10.0))
            .finish();

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].field, "a");
        assert_eq!(result.errors[1].field, "b");
    }

    #[test]
    fn test_one_error_per_field() {
        let result = Validator::new()
            .number("x", Some(-5.0), |n| n.required().non_negative().nonzero().at_least(1.0))
            .check(false, || FieldError::precondition("x", "second problem"))
            .finish();

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ErrorKind::OutOfRange);
    }

    #[test]
    fn test_non_finite_is_invalid_format() {
        let result = Validator::new()
            .number("x", Some(f64::NAN), |n| n.required())
            .number("y", Some(f64::INFINITY), |n| n.required())
            .finish();
        assert!(result.errors.iter().all(|e| e.kind == ErrorKind::InvalidFormat));
    }

    #[test]
    fn test_zero_is_precondition() {
        let result = Validator::new()
            .number("sd", Some(0.0), |n| n.required().non_negative().nonzero())
            .finish();
        assert_eq!(result.error_for("sd").map(|e| e.kind), Some(ErrorKind::DomainPreconditionViolated));
    }

    #[test]
    fn test_optional_absent_passes() {
        let result = Validator::new()
            .number("contribution", None, |n| n.non_negative())
            .text("note", Some("   "), |t| t)
            .finish();
        assert!(result.valid);
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_blank_text_is_missing() {
        let result = Validator::new()
            .text("start_time", Some("  "), |t| t.required())
            .finish();
        assert_eq!(result.errors[0].kind, ErrorKind::MissingRequiredField);
    }

    #[test]
    fn test_dataset_rules() {
        let data = [1.0, f64::NAN, 3.0];
        let result = Validator::new()
            .dataset("dataset", Some(&data[..]), |d| d.required())
            .dataset("empty", Some(&[][..]), |d| d.required())
            .dataset("short", Some(&[1.0][..]), |d| d.required().min_len(2))
            .finish();

        assert_eq!(result.errors.len(), 3);
        assert_eq!(result.errors[0].kind, ErrorKind::InvalidFormat);
        assert!(result.errors[0].message.contains("position 2"));
        assert_eq!(result.errors[1].kind, ErrorKind::MissingRequiredField);
        assert_eq!(result.errors[2].kind, ErrorKind::DomainPreconditionViolated);
    }

    #[test]
    fn test_parse_dataset() {
        let values = parse_dataset("dataset", "4, 8; 15 16\n23,,42").unwrap();
        assert_eq!(values, vec![4.0, 8.0, 15.0, 16.0, 23.0, 42.0]);

        let err = parse_dataset("dataset", "1, two, 3").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidFormat);
        assert!(err.message.contains("two"));

        assert!(parse_dataset("dataset", "1, inf").is_err());
        assert!(parse_dataset("dataset", "").unwrap().is_empty());
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(parse_clock_time("t", "00:00").unwrap(), 0);
        assert_eq!(parse_clock_time("t", "9:05").unwrap(), 545);
        assert_eq!(parse_clock_time("t", "23:59").unwrap(), 1439);
        assert_eq!(parse_clock_time("t", "24:00").unwrap_err().kind, ErrorKind::OutOfRange);
        assert_eq!(parse_clock_time("t", "12:5").unwrap_err().kind, ErrorKind::InvalidFormat);
        assert_eq!(parse_clock_time("t", "noon").unwrap_err().kind, ErrorKind::InvalidFormat);
        assert_eq!(parse_clock_time("t", "-1:30").unwrap_err().kind, ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("d", "2024-02-29").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(parse_date("d", "2023-02-29").is_err());
        assert!(parse_date("d", "29/02/2024").is_err());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::DomainPreconditionViolated).unwrap();
        assert_eq!(json, format!("\"{}\"", ErrorKind::DomainPreconditionViolated.code()));
    }
}
