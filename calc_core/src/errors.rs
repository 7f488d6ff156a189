//! # Error Types
//!
//! Structured error types for calc_core. Field-level input problems are
//! collected into a [`ValidationResult`] first; `CalcError` is what a caller
//! sees when it asks for a result and cannot get one.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn check_years(years: f64) -> CalcResult<()> {
//!     if years <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "years",
//!             years.to_string(),
//!             "Years must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_years(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationResult;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Input failed validation; carries every violated constraint
    #[error("Validation failed with {} error(s)", .0.errors.len())]
    Validation(ValidationResult),

    /// A single input value is invalid
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Unit id not present in the domain's table
    #[error("Unknown unit '{unit}' for domain {domain}")]
    UnknownUnit { domain: String, unit: String },

    /// Calculation produced no finite result
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// File I/O error (configuration loading)
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(domain: impl Into<String>, unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit {
            domain: domain.into(),
            unit: unit.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The validation report, if this error came from input validation
    pub fn validation(&self) -> Option<&ValidationResult> {
        match self {
            CalcError::Validation(result) => Some(result),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Validation(_) => "VALIDATION_FAILED",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{FieldError, Validator};

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("years", "-5", "Years must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::calculation_failed("roi", "overflow").error_code(), "CALCULATION_FAILED");
        assert_eq!(CalcError::unknown_unit("length", "furlong").error_code(), "UNKNOWN_UNIT");
    }

    #[test]
    fn test_validation_error_carries_report() {
        let report = Validator::new()
            .push(FieldError::missing("value"))
            .push(FieldError::missing("from_unit"))
            .finish();
        let error = CalcError::Validation(report);

        assert_eq!(error.error_code(), "VALIDATION_FAILED");
        assert_eq!(error.to_string(), "Validation failed with 2 error(s)");
        assert_eq!(error.validation().map(|v| v.errors.len()), Some(2));

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("missing-required-field"));
    }
}
