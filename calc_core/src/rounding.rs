//! # Rounding Policy
//!
//! Every derived number leaves the engine rounded to a precision chosen by
//! the caller. There is no global precision: each calculator receives a
//! [`Precision`] and applies it to its own outputs.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::rounding::{round, Precision};
//!
//! assert_eq!(round(1628.894627, 2), 1628.89);
//! assert_eq!(Precision::MONEY.apply(2.675_1), 2.68);
//! assert_eq!(Precision::CONVERSION.apply(0.123_456_789), 0.123457);
//! ```

use serde::{Deserialize, Serialize};

/// Largest power of ten an f64 can hold
const MAX_SCALE_EXPONENT: u32 = 308;

/// Round `value` to `decimals` places, halves away from zero.
///
/// Computed as `round(value × 10^d) / 10^d`. When the scaled value leaves the
/// f64 range there is nothing left to round and `value` is returned as is.
pub fn round(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_SCALE_EXPONENT) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Number of decimal places applied to derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Precision(pub u32);

impl Precision {
    /// Currency amounts and percentages
    pub const MONEY: Precision = Precision(2);

    /// Statistical estimators, z-scores and probabilities
    pub const STATISTICS: Precision = Precision(4);

    /// Unit conversion values
    pub const CONVERSION: Precision = Precision(6);

    /// Decimal hours and other time quantities
    pub const TIME: Precision = Precision(2);

    /// Finest precision a settings file may ask for; f64 keeps about 15
    /// significant decimal digits
    pub const MAX: Precision = Precision(15);

    /// Number of decimal places
    pub fn decimals(self) -> u32 {
        self.0
    }

    /// This precision with `extra` more decimal places
    pub fn extended(self, extra: u32) -> Precision {
        Precision(self.0.saturating_add(extra))
    }

    /// Round a value to this precision
    pub fn apply(self, value: f64) -> f64 {
        round(value, self.0)
    }

    /// Round a value, returning `None` if it is not finite.
    pub fn finite(self, value: f64) -> Option<f64> {
        value.is_finite().then(|| self.apply(value))
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision::STATISTICS
    }
}
