//! # calc_core - Calculation Engine
//!
//! `calc_core` is the computational heart of Tally: finance, statistics, unit
//! conversion, date arithmetic and construction estimates behind a single
//! validate-then-compute API. All inputs and outputs are JSON-serializable,
//! so a web page, a CLI or a script can drive it the same way.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Accumulated Errors**: Validation reports every bad field at once
//! - **Explicit Precision**: Rounding is a parameter, never a hidden global
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{CalculationItem, CalculationOutput};
//! use calc_core::EngineSettings;
//!
//! let item = CalculationItem::from_json_str(
//!     r#"{ "type": "roi", "initial_investment": 10000, "final_value": 12500, "years": 1 }"#,
//! ).unwrap();
//!
//! match item.evaluate(&EngineSettings::default()).unwrap() {
//!     CalculationOutput::Roi(result) => assert_eq!(result.roi_percent, 25.0),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Calculators and the [`Calculator`] trait
//! - [`equations`] - The underlying formulas, unvalidated and unrounded
//! - [`units`] - Unit tables and domains
//! - [`validation`] - Field error accumulation and form-text parsers
//! - [`rounding`] - Rounding policy
//! - [`settings`] - Engine configuration
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod rounding;
pub mod settings;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput, Calculator};
pub use errors::{CalcError, CalcResult};
pub use rounding::Precision;
pub use settings::{EngineSettings, PrecisionPolicy};
pub use validation::{ErrorKind, FieldError, ValidationResult};
