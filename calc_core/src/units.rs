//! # Unit Tables
//!
//! Static conversion tables for the five measurement domains. Every unit in a
//! domain is defined by its relationship to the domain's base unit, so any
//! pair of units converts through the base:
//!
//! ```text
//! base   = value × factor(from) + offset(from)
//! result = (base − offset(to)) / factor(to)
//! ```
//!
//! `offset` is zero everywhere except temperature, whose scales do not share
//! a zero point.
//!
//! | Domain      | Base unit      |
//! |-------------|----------------|
//! | Length      | meter          |
//! | Volume      | liter          |
//! | Weight      | kilogram       |
//! | Temperature | degree Celsius |
//! | Area        | square meter   |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::UnitDomain;
//!
//! let foot = UnitDomain::Length.find("foot").unwrap();
//! assert_eq!(foot.abbreviation, "ft");
//! assert!((foot.to_base(10.0) - 3.048).abs() < 1e-12);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Degrees Celsius at absolute zero
pub const ABSOLUTE_ZERO_C: f64 = -273.15;

/// Measurement system a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeasurementSystem {
    Metric,
    UsImperial,
    UkImperial,
    Other,
}

/// A unit of measure within one domain.
///
/// Invariant: `factor > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Unit {
    /// Stable identifier used in inputs (e.g. "foot")
    pub id: &'static str,
    /// Display abbreviation (e.g. "ft")
    pub abbreviation: &'static str,
    pub system: MeasurementSystem,
    /// Multiplier taking one of this unit to the base unit
    pub factor: f64,
    /// Additive shift applied after the factor (temperature only)
    pub offset: f64,
}

impl Unit {
    const fn scaled(id: &'static str, abbreviation: &'static str, system: MeasurementSystem, factor: f64) -> Self {
        Unit {
            id,
            abbreviation,
            system,
            factor,
            offset: 0.0,
        }
    }

    const fn affine(
        id: &'static str,
        abbreviation: &'static str,
        system: MeasurementSystem,
        factor: f64,
        offset: f64,
    ) -> Self {
        Unit {
            id,
            abbreviation,
            system,
            factor,
            offset,
        }
    }

    /// Express `value` of this unit in the domain's base unit
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.factor + self.offset
    }

    /// Express a base-unit quantity in this unit
    pub fn from_base(&self, base: f64) -> f64 {
        (base - self.offset) / self.factor
    }
}

use MeasurementSystem::{Metric, Other, UkImperial, UsImperial};

static LENGTH_UNITS: [Unit; 9] = [
    Unit::scaled("millimeter", "mm", Metric, 0.001),
    Unit::scaled("centimeter", "cm", Metric, 0.01),
    Unit::scaled("meter", "m", Metric, 1.0),
    Unit::scaled("kilometer", "km", Metric, 1000.0),
    Unit::scaled("inch", "in", UsImperial, 0.0254),
    Unit::scaled("foot", "ft", UsImperial, 0.3048),
    Unit::scaled("yard", "yd", UsImperial, 0.9144),
    Unit::scaled("mile", "mi", UsImperial, 1609.344),
    Unit::scaled("nautical-mile", "nmi", Other, 1852.0),
];

static VOLUME_UNITS: [Unit; 16] = [
    Unit::scaled("milliliter", "mL", Metric, 0.001),
    Unit::scaled("liter", "L", Metric, 1.0),
    Unit::scaled("cubic-meter", "m³", Metric, 1000.0),
    Unit::scaled("teaspoon", "tsp", UsImperial, 0.004_928_921_593_75),
    Unit::scaled("tablespoon", "tbsp", UsImperial, 0.014_786_764_781_25),
    Unit::scaled("fluid-ounce", "fl oz", UsImperial, 0.029_573_529_562_5),
    Unit::scaled("cup", "cup", UsImperial, 0.236_588_236_5),
    Unit::scaled("pint", "pt", UsImperial, 0.473_176_473),
    Unit::scaled("quart", "qt", UsImperial, 0.946_352_946),
    Unit::scaled("gallon", "gal", UsImperial, 3.785_411_784),
    Unit::scaled("cubic-inch", "in³", UsImperial, 0.016_387_064),
    Unit::scaled("cubic-foot", "ft³", UsImperial, 28.316_846_592),
    Unit::scaled("cubic-yard", "yd³", UsImperial, 764.554_857_984),
    Unit::scaled("uk-fluid-ounce", "fl oz (UK)", UkImperial, 0.028_413_062_5),
    Unit::scaled("uk-pint", "pt (UK)", UkImperial, 0.568_261_25),
    Unit::scaled("uk-gallon", "gal (UK)", UkImperial, 4.546_09),
];

static WEIGHT_UNITS: [Unit; 9] = [
    Unit::scaled("gram", "g", Metric, 0.001),
    Unit::scaled("kilogram", "kg", Metric, 1.0),
    Unit::scaled("metric-ton", "t", Metric, 1000.0),
    Unit::scaled("ounce", "oz", UsImperial, 0.028_349_523_125),
    Unit::scaled("pound", "lb", UsImperial, 0.453_592_37),
    Unit::scaled("us-ton", "ton (US)", UsImperial, 907.184_74),
    Unit::scaled("stone", "st", UkImperial, 6.350_293_18),
    Unit::scaled("long-ton", "ton (UK)", UkImperial, 1016.046_908_8),
    Unit::scaled("carat", "ct", Other, 0.0002),
];

static TEMPERATURE_UNITS: [Unit; 4] = [
    Unit::affine("celsius", "°C", Metric, 1.0, 0.0),
    Unit::affine("fahrenheit", "°F", UsImperial, 5.0 / 9.0, -160.0 / 9.0),
    Unit::affine("kelvin", "K", Metric, 1.0, ABSOLUTE_ZERO_C),
    Unit::affine("rankine", "°R", Other, 5.0 / 9.0, ABSOLUTE_ZERO_C),
];

static AREA_UNITS: [Unit; 9] = [
    Unit::scaled("square-centimeter", "cm²", Metric, 0.0001),
    Unit::scaled("square-meter", "m²", Metric, 1.0),
    Unit::scaled("hectare", "ha", Metric, 10_000.0),
    Unit::scaled("square-kilometer", "km²", Metric, 1_000_000.0),
    Unit::scaled("square-inch", "in²", UsImperial, 0.000_645_16),
    Unit::scaled("square-foot", "ft²", UsImperial, 0.092_903_04),
    Unit::scaled("square-yard", "yd²", UsImperial, 0.836_127_36),
    Unit::scaled("acre", "ac", UsImperial, 4046.856_422_4),
    Unit::scaled("square-mile", "mi²", UsImperial, 2_589_988.110_336),
];

static UNIT_INDEX: Lazy<HashMap<UnitDomain, HashMap<&'static str, &'static Unit>>> = Lazy::new(|| {
    UnitDomain::ALL
        .iter()
        .map(|&domain| (domain, domain.units().iter().map(|unit| (unit.id, unit)).collect()))
        .collect()
});

/// A family of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitDomain {
    Length,
    Volume,
    Weight,
    Temperature,
    Area,
}

impl UnitDomain {
    pub const ALL: [UnitDomain; 5] = [
        UnitDomain::Length,
        UnitDomain::Volume,
        UnitDomain::Weight,
        UnitDomain::Temperature,
        UnitDomain::Area,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UnitDomain::Length => "length",
            UnitDomain::Volume => "volume",
            UnitDomain::Weight => "weight",
            UnitDomain::Temperature => "temperature",
            UnitDomain::Area => "area",
        }
    }

    /// Every unit of the domain in display order
    pub fn units(&self) -> &'static [Unit] {
        match self {
            UnitDomain::Length => &LENGTH_UNITS,
            UnitDomain::Volume => &VOLUME_UNITS,
            UnitDomain::Weight => &WEIGHT_UNITS,
            UnitDomain::Temperature => &TEMPERATURE_UNITS,
            UnitDomain::Area => &AREA_UNITS,
        }
    }

    /// Id of the unit with factor 1 and offset 0
    pub fn base_unit(&self) -> &'static str {
        match self {
            UnitDomain::Length => "meter",
            UnitDomain::Volume => "liter",
            UnitDomain::Weight => "kilogram",
            UnitDomain::Temperature => "celsius",
            UnitDomain::Area => "square-meter",
        }
    }

    /// Look up a unit by id (case-insensitive, surrounding whitespace ignored)
    pub fn find(&self, id: &str) -> Option<&'static Unit> {
        let id = id.trim().to_ascii_lowercase();
        UNIT_INDEX
            .get(self)
            .and_then(|units| units.get(id.as_str()))
            .copied()
    }

    /// Largest accepted input magnitude
    pub fn max_magnitude(&self) -> f64 {
        match self {
            UnitDomain::Temperature => 1e9,
            _ => 1e15,
        }
    }

    /// Whether negative quantities are meaningful (temperature only)
    pub fn allows_negative(&self) -> bool {
        matches!(self, UnitDomain::Temperature)
    }
}

impl fmt::Display for UnitDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitDomain {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        UnitDomain::ALL
            .iter()
            .copied()
            .find(|domain| domain.name() == wanted)
            .ok_or_else(|| CalcError::invalid_input("domain", s, "Expected one of: length, volume, weight, temperature, area"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors_positive() {
        for domain in UnitDomain::ALL {
            for unit in domain.units() {
                assert!(unit.factor > 0.0, "{} has non-positive factor", unit.id);
            }
        }
    }

    #[test]
    fn test_base_unit_is_identity() {
        for domain in UnitDomain::ALL {
            let base = domain.find(domain.base_unit()).unwrap();
            assert_eq!(base.factor, 1.0);
            assert_eq!(base.offset, 0.0);
        }
    }

    #[test]
    fn test_ids_unique_within_domain() {
        for domain in UnitDomain::ALL {
            let mut ids: Vec<_> = domain.units().iter().map(|u| u.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), domain.units().len());
        }
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert!(UnitDomain::Weight.find(" Pound ").is_some());
        assert!(UnitDomain::Weight.find("furlong").is_none());
        assert!(UnitDomain::Length.find("pound").is_none());
    }

    #[test]
    fn test_feet_to_inches_via_base() {
        let ft = UnitDomain::Length.find("foot").unwrap();
        let inch = UnitDomain::Length.find("inch").unwrap();
        let inches = inch.from_base(ft.to_base(10.0));
        assert!((inches - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_offsets() {
        let f = UnitDomain::Temperature.find("fahrenheit").unwrap();
        let k = UnitDomain::Temperature.find("kelvin").unwrap();
        let r = UnitDomain::Temperature.find("rankine").unwrap();

        assert!((f.to_base(212.0) - 100.0).abs() < 1e-9);
        assert!((f.to_base(32.0)).abs() < 1e-9);
        assert!((k.to_base(0.0) - ABSOLUTE_ZERO_C).abs() < 1e-9);
        assert!((r.to_base(0.0) - ABSOLUTE_ZERO_C).abs() < 1e-9);
        assert!((f.from_base(-40.0) + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_domain_from_str() {
        assert_eq!("Volume".parse::<UnitDomain>().unwrap(), UnitDomain::Volume);
        assert!("speed".parse::<UnitDomain>().is_err());
    }

    #[test]
    fn test_unit_serialization() {
        let json = serde_json::to_string(UnitDomain::Area.find("acre").unwrap()).unwrap();
        assert!(json.contains("\"system\":\"us-imperial\""));
        assert_eq!(serde_json::to_string(&UnitDomain::Temperature).unwrap(), "\"temperature\"");
    }
}
