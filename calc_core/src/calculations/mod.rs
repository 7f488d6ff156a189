//! # Calculations
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - Form-shaped input with nullable fields (JSON-serializable)
//! - `*Result` - Pre-rounded results (JSON-serializable)
//! - [`Calculator`] impl - `validate` reports every violated constraint,
//!   `compute` runs only on valid input and yields `None` on non-finite math
//!
//! [`Calculator::calculate`] ties the two together and is what callers use.
//!
//! ## Available Calculations
//!
//! - [`conversion`] - Unit conversion, single and fan-out
//! - [`central_tendency`] - Means, median, mode
//! - [`dispersion`] - Variance, standard deviation, quartiles, outliers
//! - [`correlation`] - Pearson r, regression line, significance
//! - [`z_score`] - Z-scores and normal probabilities
//! - [`compound_interest`] - Growth with contributions and yearly breakdown
//! - [`roi`] - Return on investment and CAGR
//! - [`leap_year`] - Leap-year rules
//! - [`week_number`] - ISO 8601 week dates
//! - [`time_duration`] - Span between clock times
//! - [`birthday`] - Age, next birthday, milestones
//! - [`date_difference`] - Days, weeks and weekdays between dates
//! - [`concrete`] - Concrete slab volume and bag counts

pub mod birthday;
pub mod central_tendency;
pub mod compound_interest;
pub mod concrete;
pub mod conversion;
pub mod correlation;
pub mod date_difference;
pub mod dispersion;
pub mod leap_year;
pub mod roi;
pub mod time_duration;
pub mod week_number;
pub mod z_score;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::rounding::Precision;
use crate::settings::{EngineSettings, PrecisionFamily};
use crate::validation::ValidationResult;

// Re-export commonly used types
pub use birthday::{BirthdayInput, BirthdayResult};
pub use central_tendency::{CentralTendencyInput, CentralTendencyResult};
pub use compound_interest::{CompoundInterestInput, CompoundInterestResult, CompoundingFrequency};
pub use concrete::{ConcreteSlabInput, ConcreteSlabResult};
pub use conversion::{AllConversionsResult, ConversionInput, ConversionResult, ConvertAllInput};
pub use correlation::{CorrelationInput, CorrelationResult};
pub use date_difference::{DateDifferenceInput, DateDifferenceResult};
pub use dispersion::{DispersionInput, DispersionResult};
pub use leap_year::{LeapYearInput, LeapYearResult};
pub use roi::{RoiInput, RoiResult};
pub use time_duration::{TimeDurationInput, TimeDurationResult};
pub use week_number::{WeekNumberInput, WeekNumberResult};
pub use z_score::{ZScoreInput, ZScoreResult};

/// A validate-then-compute calculation.
pub trait Calculator {
    type Output: Serialize;

    /// Kebab-case name used in logs and errors
    const NAME: &'static str;

    /// Which precision setting results are rounded with
    const FAMILY: PrecisionFamily;

    /// Check the raw input, reporting every violated constraint.
    fn validate(&self) -> ValidationResult;

    /// Derive the result from input that passed [`validate`](Self::validate).
    ///
    /// Returns `None` when an intermediate is not finite.
    fn compute(&self, precision: Precision) -> Option<Self::Output>;

    /// Validate and compute at the family's default precision.
    fn calculate(&self) -> CalcResult<Self::Output> {
        self.calculate_with(Self::FAMILY.default_precision())
    }

    /// Validate and compute at an explicit precision.
    fn calculate_with(&self, precision: Precision) -> CalcResult<Self::Output> {
        tracing::debug!(calculator = Self::NAME, decimals = precision.decimals(), "calculating");

        let validation = self.validate();
        if !validation.valid {
            tracing::debug!(
                calculator = Self::NAME,
                errors = validation.errors.len(),
                "input failed validation"
            );
            return Err(CalcError::Validation(validation));
        }

        self.compute(precision).ok_or_else(|| {
            tracing::warn!(calculator = Self::NAME, "computation produced no finite result");
            CalcError::calculation_failed(Self::NAME, "Result is not a finite number")
        })
    }
}

/// Enum wrapper for all calculation inputs.
///
/// Lets a caller submit any calculation as one JSON document:
///
/// ```json
/// { "type": "roi", "initial_investment": 10000, "final_value": 12500, "years": 1 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CalculationItem {
    Conversion(ConversionInput),
    ConvertAll(ConvertAllInput),
    CentralTendency(CentralTendencyInput),
    Dispersion(DispersionInput),
    Correlation(CorrelationInput),
    ZScore(ZScoreInput),
    CompoundInterest(CompoundInterestInput),
    Roi(RoiInput),
    LeapYear(LeapYearInput),
    WeekNumber(WeekNumberInput),
    TimeDuration(TimeDurationInput),
    Birthday(BirthdayInput),
    DateDifference(DateDifferenceInput),
    ConcreteSlab(ConcreteSlabInput),
}

/// Result of any [`CalculationItem`], tagged the same way.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CalculationOutput {
    Conversion(ConversionResult),
    ConvertAll(AllConversionsResult),
    CentralTendency(CentralTendencyResult),
    Dispersion(DispersionResult),
    Correlation(CorrelationResult),
    ZScore(ZScoreResult),
    CompoundInterest(CompoundInterestResult),
    Roi(RoiResult),
    LeapYear(LeapYearResult),
    WeekNumber(WeekNumberResult),
    TimeDuration(TimeDurationResult),
    Birthday(BirthdayResult),
    DateDifference(DateDifferenceResult),
    ConcreteSlab(ConcreteSlabResult),
}

fn run<C: Calculator>(input: &C, settings: &EngineSettings) -> CalcResult<C::Output> {
    input.calculate_with(settings.precision.for_family(C::FAMILY))
}

impl CalculationItem {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Conversion(_) => ConversionInput::NAME,
            CalculationItem::ConvertAll(_) => ConvertAllInput::NAME,
            CalculationItem::CentralTendency(_) => CentralTendencyInput::NAME,
            CalculationItem::Dispersion(_) => DispersionInput::NAME,
            CalculationItem::Correlation(_) => CorrelationInput::NAME,
            CalculationItem::ZScore(_) => ZScoreInput::NAME,
            CalculationItem::CompoundInterest(_) => CompoundInterestInput::NAME,
            CalculationItem::Roi(_) => RoiInput::NAME,
            CalculationItem::LeapYear(_) => LeapYearInput::NAME,
            CalculationItem::WeekNumber(_) => WeekNumberInput::NAME,
            CalculationItem::TimeDuration(_) => TimeDurationInput::NAME,
            CalculationItem::Birthday(_) => BirthdayInput::NAME,
            CalculationItem::DateDifference(_) => DateDifferenceInput::NAME,
            CalculationItem::ConcreteSlab(_) => ConcreteSlabInput::NAME,
        }
    }

    /// Validate without computing
    pub fn validate(&self) -> ValidationResult {
        match self {
            CalculationItem::Conversion(i) => i.validate(),
            CalculationItem::ConvertAll(i) => i.validate(),
            CalculationItem::CentralTendency(i) => i.validate(),
            CalculationItem::Dispersion(i) => i.validate(),
            CalculationItem::Correlation(i) => i.validate(),
            CalculationItem::ZScore(i) => i.validate(),
            CalculationItem::CompoundInterest(i) => i.validate(),
            CalculationItem::Roi(i) => i.validate(),
            CalculationItem::LeapYear(i) => i.validate(),
            CalculationItem::WeekNumber(i) => i.validate(),
            CalculationItem::TimeDuration(i) => i.validate(),
            CalculationItem::Birthday(i) => i.validate(),
            CalculationItem::DateDifference(i) => i.validate(),
            CalculationItem::ConcreteSlab(i) => i.validate(),
        }
    }

    /// Validate and compute using the precision policy in `settings`.
    pub fn evaluate(&self, settings: &EngineSettings) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::Conversion(i) => run(i, settings).map(CalculationOutput::Conversion),
            CalculationItem::ConvertAll(i) => run(i, settings).map(CalculationOutput::ConvertAll),
            CalculationItem::CentralTendency(i) => run(i, settings).map(CalculationOutput::CentralTendency),
            CalculationItem::Dispersion(i) => run(i, settings).map(CalculationOutput::Dispersion),
            CalculationItem::Correlation(i) => run(i, settings).map(CalculationOutput::Correlation),
            CalculationItem::ZScore(i) => run(i, settings).map(CalculationOutput::ZScore),
            CalculationItem::CompoundInterest(i) => run(i, settings).map(CalculationOutput::CompoundInterest),
            CalculationItem::Roi(i) => run(i, settings).map(CalculationOutput::Roi),
            CalculationItem::LeapYear(i) => run(i, settings).map(CalculationOutput::LeapYear),
            CalculationItem::WeekNumber(i) => run(i, settings).map(CalculationOutput::WeekNumber),
            CalculationItem::TimeDuration(i) => run(i, settings).map(CalculationOutput::TimeDuration),
            CalculationItem::Birthday(i) => run(i, settings).map(CalculationOutput::Birthday),
            CalculationItem::DateDifference(i) => run(i, settings).map(CalculationOutput::DateDifference),
            CalculationItem::ConcreteSlab(i) => run(i, settings).map(CalculationOutput::ConcreteSlab),
        }
    }

    /// Parse a calculation from JSON
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid calculation JSON: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;

    /// One valid and one invalid document per calculator
    const CASES: &[(&str, &str, &str)] = &[
        (
            "conversion",
            r#"{"type":"conversion","domain":"length","value":1,"from_unit":"foot","to_unit":"inch"}"#,
            r#"{"type":"conversion","domain":"length","value":-1,"from_unit":"foot","to_unit":"inch"}"#,
        ),
        (
            "convert-all",
            r#"{"type":"convert-all","domain":"weight","value":2,"from_unit":"pound"}"#,
            r#"{"type":"convert-all","domain":"weight","value":2,"from_unit":"slug"}"#,
        ),
        (
            "central-tendency",
            r#"{"type":"central-tendency","dataset":[1,2,2,3]}"#,
            r#"{"type":"central-tendency","dataset":[]}"#,
        ),
        (
            "dispersion",
            r#"{"type":"dispersion","dataset":[2,4,4,4,5,5,7,9]}"#,
            r#"{"type":"dispersion","dataset":[]}"#,
        ),
        (
            "correlation",
            r#"{"type":"correlation","x_values":[1,2,3,4],"y_values":[2,4,5,8]}"#,
            r#"{"type":"correlation","x_values":[1,2,3],"y_values":[1,2]}"#,
        ),
        (
            "z-score",
            r#"{"type":"z-score","mode":"value-to-z","value":85,"mean":70,"standard_deviation":10}"#,
            r#"{"type":"z-score","mode":"value-to-z","value":85,"mean":70,"standard_deviation":0}"#,
        ),
        (
            "compound-interest",
            r#"{"type":"compound-interest","principal":1000,"annual_rate":5,"years":10,"compounding_frequency":"annually"}"#,
            r#"{"type":"compound-interest","principal":0,"annual_rate":5,"years":10,"compounding_frequency":"annually"}"#,
        ),
        (
            "roi",
            r#"{"type":"roi","initial_investment":10000,"final_value":12500,"years":1}"#,
            r#"{"type":"roi","initial_investment":-5,"final_value":12500,"years":150}"#,
        ),
        (
            "leap-year",
            r#"{"type":"leap-year","year":2024}"#,
            r#"{"type":"leap-year","year":0}"#,
        ),
        (
            "week-number",
            r#"{"type":"week-number","date":"2023-01-01"}"#,
            r#"{"type":"week-number","date":"2023-13-01"}"#,
        ),
        (
            "time-duration",
            r#"{"type":"time-duration","start_time":"22:00","end_time":"06:30"}"#,
            r#"{"type":"time-duration","start_time":"25:00","end_time":"06:30"}"#,
        ),
        (
            "birthday",
            r#"{"type":"birthday","birth_date":"1990-05-15","reference_date":"2024-05-01"}"#,
            r#"{"type":"birthday","birth_date":"2030-05-15","reference_date":"2024-05-01"}"#,
        ),
        (
            "date-difference",
            r#"{"type":"date-difference","start_date":"2024-01-01","end_date":"2024-12-31"}"#,
            r#"{"type":"date-difference","start_date":"2024-01-01"}"#,
        ),
        (
            "concrete-slab",
            r#"{"type":"concrete-slab","length":10,"width":10,"thickness":4,"length_unit":"foot","width_unit":"foot","thickness_unit":"inch"}"#,
            r#"{"type":"concrete-slab","length":10,"width":10,"thickness":0,"length_unit":"foot","width_unit":"foot","thickness_unit":"inch"}"#,
        ),
    ];

    #[test]
    fn test_every_calculator_accepts_valid_input() {
        let settings = EngineSettings::default();
        for (name, valid, _) in CASES {
            let item = CalculationItem::from_json_str(valid).unwrap();
            assert_eq!(item.calc_type(), *name);
            assert!(item.validate().valid, "{name}: {:?}", item.validate().errors);

            let output = item.evaluate(&settings).unwrap();
            let json = serde_json::to_value(&output).unwrap();
            assert_eq!(json["type"], *name);
        }
    }

    #[test]
    fn test_every_calculator_rejects_invalid_input() {
        let settings = EngineSettings::default();
        for (name, _, invalid) in CASES {
            let item = CalculationItem::from_json_str(invalid).unwrap();
            let err = item.evaluate(&settings).unwrap_err();
            let report = err.validation().unwrap_or_else(|| panic!("{name}: expected validation error, got {err}"));
            assert!(!report.valid);
            assert!(!report.errors.is_empty(), "{name}");

            // At most one error per field
            let mut fields: Vec<_> = report.errors.iter().map(|e| e.field.as_str()).collect();
            let total = fields.len();
            fields.sort_unstable();
            fields.dedup();
            assert_eq!(fields.len(), total, "{name}: duplicate field errors");
        }
    }

    #[test]
    fn test_settings_precision_is_applied() {
        let item = CalculationItem::from_json_str(
            r#"{"type":"conversion","domain":"length","value":1,"from_unit":"mile","to_unit":"kilometer"}"#,
        )
        .unwrap();

        let mut settings = EngineSettings::default();
        settings.precision.conversion = Precision(2);
        match item.evaluate(&settings).unwrap() {
            CalculationOutput::Conversion(result) => assert_eq!(result.result, 1.61),
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn test_extreme_precision_does_not_panic() {
        let mut settings = EngineSettings::default();
        settings.precision.statistics = Precision(u32::MAX);
        settings.precision.conversion = Precision(u32::MAX);
        for (name, valid, _) in CASES {
            let item = CalculationItem::from_json_str(valid).unwrap();
            assert!(item.evaluate(&settings).is_ok(), "{name} failed at extreme precision");
        }
    }

    #[test]
    fn test_roi_two_violations() {
        let item = CalculationItem::from_json_str(CASES[7].2).unwrap();
        let report = item.validate();
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.error_for("initial_investment").unwrap().kind, ErrorKind::OutOfRange);
        assert_eq!(report.error_for("years").unwrap().kind, ErrorKind::OutOfRange);
    }

    #[test]
    fn test_unknown_type_is_serialization_error() {
        let err = CalculationItem::from_json_str(r#"{"type":"mortgage","principal":1}"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
