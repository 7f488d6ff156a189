//! # Engine Settings
//!
//! Runtime configuration for callers that evaluate calculations in bulk (the
//! CLI, a page renderer). Settings are plain JSON so a deployment can tune
//! display precision per domain without a rebuild:
//!
//! ```json
//! {
//!   "precision": {
//!     "money": 2,
//!     "statistics": 4,
//!     "conversion": 6,
//!     "time": 2
//!   }
//! }
//! ```
//!
//! Omitted keys keep their defaults, so `{}` is a valid settings file.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::settings::EngineSettings;
//! use calc_core::rounding::Precision;
//!
//! let settings = EngineSettings::from_json_str(r#"{ "precision": { "statistics": 6 } }"#).unwrap();
//! assert_eq!(settings.precision.statistics, Precision(6));
//! assert_eq!(settings.precision.money, Precision::MONEY);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::rounding::Precision;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Decimal places per calculation domain
    pub precision: PrecisionPolicy,
}

impl EngineSettings {
    /// Parse settings from a JSON document
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let settings: EngineSettings = serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid settings JSON: {}", e),
        })?;
        settings.precision.check()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        let settings = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded engine settings");
        Ok(settings)
    }
}

/// Rounding precision for each family of calculators.
///
/// Money and scientific precision are separate settings so tuning one never
/// changes the other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecisionPolicy {
    /// Compound interest, ROI, percentages
    pub money: Precision,
    /// Descriptive statistics, correlation, z-scores
    pub statistics: Precision,
    /// Unit conversion and construction quantities
    pub conversion: Precision,
    /// Decimal hours
    pub time: Precision,
}

impl Default for PrecisionPolicy {
    fn default() -> Self {
        PrecisionPolicy {
            money: Precision::MONEY,
            statistics: Precision::STATISTICS,
            conversion: Precision::CONVERSION,
            time: Precision::TIME,
        }
    }
}

impl PrecisionPolicy {
    /// Reject precisions finer than [`Precision::MAX`]
    pub fn check(&self) -> CalcResult<()> {
        match PrecisionFamily::ALL.into_iter().find(|&f| self.for_family(f) > Precision::MAX) {
            Some(family) => Err(CalcError::SerializationError {
                reason: format!(
                    "Precision for {} must be at most {} decimals",
                    family.name(),
                    Precision::MAX.decimals()
                ),
            }),
            None => Ok(()),
        }
    }

    /// Precision configured for a calculator family
    pub fn for_family(&self, family: PrecisionFamily) -> Precision {
        match family {
            PrecisionFamily::Money => self.money,
            PrecisionFamily::Statistics => self.statistics,
            PrecisionFamily::Conversion => self.conversion,
            PrecisionFamily::Time => self.time,
        }
    }
}

/// Which precision setting a calculator rounds with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrecisionFamily {
    Money,
    Statistics,
    Conversion,
    Time,
}

impl PrecisionFamily {
    pub const ALL: [PrecisionFamily; 4] = [
        PrecisionFamily::Money,
        PrecisionFamily::Statistics,
        PrecisionFamily::Conversion,
        PrecisionFamily::Time,
    ];

    /// Settings key for this family
    pub fn name(self) -> &'static str {
        match self {
            PrecisionFamily::Money => "money",
            PrecisionFamily::Statistics => "statistics",
            PrecisionFamily::Conversion => "conversion",
            PrecisionFamily::Time => "time",
        }
    }

    /// Precision used when no settings are supplied
    pub fn default_precision(self) -> Precision {
        PrecisionPolicy::default().for_family(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.precision.money, Precision(2));
        assert_eq!(settings.precision.statistics, Precision(4));
        assert_eq!(settings.precision.conversion, Precision(6));
        assert_eq!(settings.precision.time, Precision(2));
    }

    #[test]
    fn test_family_lookup() {
        let mut policy = PrecisionPolicy::default();
        policy.statistics = Precision(3);
        assert_eq!(policy.for_family(PrecisionFamily::Statistics), Precision(3));
        assert_eq!(policy.for_family(PrecisionFamily::Money), Precision::MONEY);
        assert_eq!(PrecisionFamily::Conversion.default_precision(), Precision::CONVERSION);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let settings = EngineSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let err = EngineSettings::from_json_str("{ precision: ").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_precision_above_limit_rejected() {
        let err = EngineSettings::from_json_str(r#"{ "precision": { "statistics": 4294967295 } }"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.to_string().contains("statistics"));

        let err = EngineSettings::from_json_str(r#"{ "precision": { "time": 16 } }"#).unwrap_err();
        assert!(err.to_string().contains("time"));

        let finest = EngineSettings::from_json_str(r#"{ "precision": { "money": 15 } }"#).unwrap();
        assert_eq!(finest.precision.money, Precision::MAX);
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let err = EngineSettings::load(Path::new("/nonexistent/tally-settings.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_roundtrip() {
        let mut settings = EngineSettings::default();
        settings.precision.conversion = Precision(8);
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let roundtrip = EngineSettings::from_json_str(&json).unwrap();
        assert_eq!(roundtrip, settings);
    }
}
