//! # Unit Conversion
//!
//! Converts a quantity between two units of the same domain by routing it
//! through the domain's base unit, or fans one quantity out to every unit of
//! its domain for "show all conversions" tables.
//!
//! ## Round trips
//!
//! Converting A → B → A recovers the original value to within 1e-4
//! relative, provided the intermediate result keeps enough digits at the
//! chosen precision. Results smaller than half a unit in the last decimal
//! place round to zero: at 6 decimals, 1 carat is 0 metric tons, and
//! converting that back gives 0 carats. Raise the conversion precision for
//! very small quantities in very large units.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{Calculator, conversion::ConversionInput};
//! use calc_core::units::UnitDomain;
//!
//! let input = ConversionInput {
//!     domain: UnitDomain::Length,
//!     value: Some(5.0),
//!     from_unit: Some("mile".to_string()),
//!     to_unit: Some("kilometer".to_string()),
//! };
//!
//! let result = input.calculate().unwrap();
//! assert_eq!(result.result, 8.04672);
//! assert_eq!(result.base_value, 8046.72);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::errors::{CalcError, CalcResult};
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::units::{MeasurementSystem, Unit, UnitDomain, ABSOLUTE_ZERO_C};
use crate::validation::{ErrorKind, NumberCheck, TextCheck, ValidationResult, Validator};

/// Slack for rounding noise when comparing a temperature with absolute zero
const ABSOLUTE_ZERO_TOLERANCE: f64 = 1e-9;

/// Convert `value` from one unit to another through the base unit.
///
/// Returns `(base_value, result)`, both rounded to `precision`. The result is
/// derived from the unrounded base so rounding happens once per output.
pub fn convert(value: f64, from: &Unit, to: &Unit, precision: Precision) -> Option<(f64, f64)> {
    let base = from.to_base(value);
    let result = to.from_base(base);
    Some((precision.finite(base)?, precision.finite(result)?))
}

/// Convert between unit ids of `domain`, failing on unknown ids.
///
/// ```rust
/// use calc_core::calculations::conversion::convert_value;
/// use calc_core::rounding::Precision;
/// use calc_core::units::UnitDomain;
///
/// let f = convert_value(UnitDomain::Temperature, 100.0, "celsius", "fahrenheit", Precision::CONVERSION).unwrap();
/// assert_eq!(f, 212.0);
/// assert!(convert_value(UnitDomain::Length, 1.0, "cubit", "meter", Precision::CONVERSION).is_err());
/// ```
pub fn convert_value(domain: UnitDomain, value: f64, from: &str, to: &str, precision: Precision) -> CalcResult<f64> {
    let from_unit = domain
        .find(from)
        .ok_or_else(|| CalcError::unknown_unit(domain.name(), from))?;
    let to_unit = domain
        .find(to)
        .ok_or_else(|| CalcError::unknown_unit(domain.name(), to))?;
    convert(value, from_unit, to_unit, precision)
        .map(|(_, result)| result)
        .ok_or_else(|| CalcError::calculation_failed("conversion", "Result is not a finite number"))
}

/// Quantity rules shared by every conversion-style input: required, finite,
/// non-negative (or above absolute zero for temperature), within the ceiling.
pub(crate) fn quantity_rules<'a>(check: NumberCheck<'a>, domain: UnitDomain, from: Option<&Unit>) -> NumberCheck<'a> {
    let check = check.required();
    let check = if domain.allows_negative() {
        check.rule(
            |v| from.map_or(true, |unit| unit.to_base(v) >= ABSOLUTE_ZERO_C - ABSOLUTE_ZERO_TOLERANCE),
            ErrorKind::OutOfRange,
            "Temperature is below absolute zero",
        )
    } else {
        check.non_negative()
    };
    check.magnitude_at_most(domain.max_magnitude())
}

/// Unit id rules: required and present in the domain table.
pub(crate) fn unit_rules(check: TextCheck<'_>, domain: UnitDomain) -> TextCheck<'_> {
    check.required().rule(
        |id| domain.find(id).is_some(),
        ErrorKind::DomainPreconditionViolated,
        format!("Unknown {} unit", domain.name()),
    )
}

/// Input for a single conversion.
///
/// ## JSON Example
///
/// ```json
/// { "domain": "volume", "value": 2.0, "from_unit": "gallon", "to_unit": "liter" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionInput {
    pub domain: UnitDomain,
    pub value: Option<f64>,
    pub from_unit: Option<String>,
    pub to_unit: Option<String>,
}

/// Result of a single conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub domain: UnitDomain,
    pub value: f64,
    pub from_unit: String,
    pub from_abbreviation: String,
    pub to_unit: String,
    pub to_abbreviation: String,
    /// Value expressed in the domain's base unit
    pub base_value: f64,
    pub base_unit: String,
    pub result: f64,
}

impl Calculator for ConversionInput {
    type Output = ConversionResult;
    const NAME: &'static str = "conversion";
    const FAMILY: PrecisionFamily = PrecisionFamily::Conversion;

    fn validate(&self) -> ValidationResult {
        let domain = self.domain;
        let from = self.from_unit.as_deref().and_then(|id| domain.find(id));
        Validator::new()
            .number("value", self.value, |n| quantity_rules(n, domain, from))
            .text("from_unit", self.from_unit.as_deref(), |t| unit_rules(t, domain))
            .text("to_unit", self.to_unit.as_deref(), |t| unit_rules(t, domain))
            .finish()
    }

    fn compute(&self, precision: Precision) -> Option<ConversionResult> {
        let from = self.domain.find(self.from_unit.as_deref()?)?;
        let to = self.domain.find(self.to_unit.as_deref()?)?;
        let value = self.value?;
        let (base_value, result) = convert(value, from, to, precision)?;

        Some(ConversionResult {
            domain: self.domain,
            value,
            from_unit: from.id.to_string(),
            from_abbreviation: from.abbreviation.to_string(),
            to_unit: to.id.to_string(),
            to_abbreviation: to.abbreviation.to_string(),
            base_value,
            base_unit: self.domain.base_unit().to_string(),
            result,
        })
    }
}

/// Input for converting one value into every unit of its domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertAllInput {
    pub domain: UnitDomain,
    pub value: Option<f64>,
    pub from_unit: Option<String>,
}

/// One row of a fan-out conversion table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedValue {
    pub unit: String,
    pub abbreviation: String,
    pub system: MeasurementSystem,
    pub value: f64,
}

/// Every unit of the domain, in table order, including the source unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllConversionsResult {
    pub domain: UnitDomain,
    pub value: f64,
    pub from_unit: String,
    pub base_value: f64,
    pub conversions: Vec<ConvertedValue>,
}

impl AllConversionsResult {
    /// Converted value for a unit id
    pub fn value_in(&self, unit: &str) -> Option<f64> {
        self.conversions.iter().find(|c| c.unit == unit).map(|c| c.value)
    }
}

impl Calculator for ConvertAllInput {
    type Output = AllConversionsResult;
    const NAME: &'static str = "convert-all";
    const FAMILY: PrecisionFamily = PrecisionFamily::Conversion;

    fn validate(&self) -> ValidationResult {
        let domain = self.domain;
        let from = self.from_unit.as_deref().and_then(|id| domain.find(id));
        Validator::new()
            .number("value", self.value, |n| quantity_rules(n, domain, from))
            .text("from_unit", self.from_unit.as_deref(), |t| unit_rules(t, domain))
            .finish()
    }

    fn compute(&self, precision: Precision) -> Option<AllConversionsResult> {
        let from = self.domain.find(self.from_unit.as_deref()?)?;
        let value = self.value?;
        let base = from.to_base(value);

        let conversions = self
            .domain
            .units()
            .iter()
            .map(|unit| {
                Some(ConvertedValue {
                    unit: unit.id.to_string(),
                    abbreviation: unit.abbreviation.to_string(),
                    system: unit.system,
                    value: precision.finite(unit.from_base(base))?,
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(AllConversionsResult {
            domain: self.domain,
            value,
            from_unit: from.id.to_string(),
            base_value: precision.finite(base)?,
            conversions,
        })
    }
}
