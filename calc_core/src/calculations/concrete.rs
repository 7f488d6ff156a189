//! # Concrete Slab Estimator
//!
//! Volume of one or more rectangular slabs and the number of premixed bags
//! needed to pour them. Each dimension may use any length unit; values are
//! routed through the unit conversion engine.
//!
//! ## Formula
//!
//! V = L × W × T × quantity × (1 + waste / 100)
//!
//! Bag counts round up to whole bags.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{Calculator, concrete::ConcreteSlabInput};
//!
//! let input = ConcreteSlabInput {
//!     length: Some(10.0),
//!     width: Some(10.0),
//!     thickness: Some(4.0),
//!     length_unit: Some("foot".to_string()),
//!     width_unit: Some("foot".to_string()),
//!     thickness_unit: Some("inch".to_string()),
//!     quantity: None,
//!     waste_percent: None,
//! };
//!
//! let result = input.calculate().unwrap();
//! assert_eq!(result.volume_cubic_yards, 1.234568);
//! assert_eq!(result.bags[2].count, 56); // 80 lb bags
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::conversion::{convert_value, unit_rules};
use crate::calculations::Calculator;
use crate::rounding::Precision;
use crate::settings::PrecisionFamily;
use crate::units::UnitDomain;
use crate::validation::{NumberCheck, TextCheck, ValidationResult, Validator};

/// Largest slab dimension in its own unit
const MAX_DIMENSION: f64 = 1e5;

/// Most slabs per estimate
pub const MAX_QUANTITY: f64 = 1000.0;

/// Largest waste allowance, in percent
pub const MAX_WASTE_PERCENT: f64 = 50.0;

/// Premix bag sizes (lb) and the cubic feet each yields
pub const BAG_YIELDS: [(u32, f64); 3] = [(40, 0.30), (60, 0.45), (80, 0.60)];

/// Slack so an exact multiple of a bag yield does not round up an extra bag
const BAG_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConcreteSlabInput {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub thickness: Option<f64>,
    pub length_unit: Option<String>,
    pub width_unit: Option<String>,
    pub thickness_unit: Option<String>,
    /// Number of identical slabs, default 1
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Extra material for spillage and uneven subgrade, default 0
    #[serde(default)]
    pub waste_percent: Option<f64>,
}

/// Bags of one size needed for the pour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BagEstimate {
    pub bag_weight_lb: u32,
    pub yield_cubic_feet: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteSlabResult {
    /// Top surface of all slabs
    pub area_square_meters: f64,
    pub area_square_feet: f64,
    /// Volume before the waste allowance
    pub net_volume_cubic_meters: f64,
    pub volume_cubic_meters: f64,
    pub volume_cubic_yards: f64,
    pub volume_cubic_feet: f64,
    pub bags: Vec<BagEstimate>,
}

fn dimension_rules(check: NumberCheck<'_>) -> NumberCheck<'_> {
    check.required().positive().at_most(MAX_DIMENSION)
}

fn length_unit_rules(check: TextCheck<'_>) -> TextCheck<'_> {
    unit_rules(check, UnitDomain::Length)
}

impl ConcreteSlabInput {
    /// Dimension converted to meters
    fn meters(&self, value: Option<f64>, unit: &Option<String>) -> Option<f64> {
        convert_value(UnitDomain::Length, value?, unit.as_deref()?, "meter", Precision::CONVERSION).ok()
    }
}

impl Calculator for ConcreteSlabInput {
    type Output = ConcreteSlabResult;
    const NAME: &'static str = "concrete-slab";
    const FAMILY: PrecisionFamily = PrecisionFamily::Conversion;

    fn validate(&self) -> ValidationResult {
        Validator::new()
            .number("length", self.length, dimension_rules)
            .number("width", self.width, dimension_rules)
            .number("thickness", self.thickness, dimension_rules)
            .text("length_unit", self.length_unit.as_deref(), length_unit_rules)
            .text("width_unit", self.width_unit.as_deref(), length_unit_rules)
            .text("thickness_unit", self.thickness_unit.as_deref(), length_unit_rules)
            .number("quantity", self.quantity, |n| n.whole().at_least(1.0).at_most(MAX_QUANTITY))
            .number("waste_percent", self.waste_percent, |n| {
                n.non_negative().at_most(MAX_WASTE_PERCENT)
            })
            .finish()
    }

    fn compute(&self, precision: Precision) -> Option<ConcreteSlabResult> {
        let length = self.meters(self.length, &self.length_unit)?;
        let width = self.meters(self.width, &self.width_unit)?;
        let thickness = self.meters(self.thickness, &self.thickness_unit)?;
        let quantity = self.quantity.unwrap_or(1.0);
        let waste = 1.0 + self.waste_percent.unwrap_or(0.0) / 100.0;

        let area = length * width * quantity;
        let net_volume = area * thickness;
        let volume = net_volume * waste;

        let to_volume = |unit: &str| {
            convert_value(UnitDomain::Volume, volume, "cubic-meter", unit, precision.extended(3)).ok()
        };
        let cubic_feet = to_volume("cubic-foot")?;

        let bags = BAG_YIELDS
            .iter()
            .map(|&(weight, yield_cubic_feet)| BagEstimate {
                bag_weight_lb: weight,
                yield_cubic_feet,
                count: (cubic_feet / yield_cubic_feet - BAG_EPSILON).ceil().max(0.0) as u64,
            })
            .collect();

        Some(ConcreteSlabResult {
            area_square_meters: precision.finite(area)?,
            area_square_feet: precision.finite(
                convert_value(UnitDomain::Area, area, "square-meter", "square-foot", precision).ok()?,
            )?,
            net_volume_cubic_meters: precision.finite(net_volume)?,
            volume_cubic_meters: precision.finite(volume)?,
            volume_cubic_yards: precision.finite(to_volume("cubic-yard")?)?,
            volume_cubic_feet: precision.finite(cubic_feet)?,
            bags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;

    fn slab(length: f64, width: f64, thickness: f64, units: [&str; 3]) -> ConcreteSlabInput {
        ConcreteSlabInput {
            length: Some(length),
            width: Some(width),
            thickness: Some(thickness),
            length_unit: Some(units[0].to_string()),
            width_unit: Some(units[1].to_string()),
            thickness_unit: Some(units[2].to_string()),
            quantity: None,
            waste_percent: None,
        }
    }

    #[test]
    fn test_imperial_patio() {
        let result = slab(10.0, 10.0, 4.0, ["foot", "foot", "inch"]).calculate().unwrap();
        assert!((result.volume_cubic_feet - 33.333333).abs() < 1e-5);
        assert_eq!(result.volume_cubic_yards, 1.234568);
        assert_eq!(result.area_square_feet, 100.0);
        let counts: Vec<u64> = result.bags.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![112, 75, 56]);
    }

    #[test]
    fn test_metric_slab_with_waste_and_quantity() {
        let mut input = slab(4.0, 250.0, 10.0, ["meter", "centimeter", "centimeter"]);
        input.quantity = Some(2.0);
        input.waste_percent = Some(10.0);

        let result = input.calculate().unwrap();
        assert_eq!(result.area_square_meters, 20.0);
        assert_eq!(result.net_volume_cubic_meters, 2.0);
        assert_eq!(result.volume_cubic_meters, 2.2);
    }

    #[test]
    fn test_exact_bag_multiple_does_not_round_up() {
        // 1 ft × 1 ft × 0.6 ft = 0.6 ft³, exactly one 80 lb bag
        let result = slab(1.0, 1.0, 0.6, ["foot", "foot", "foot"]).calculate().unwrap();
        assert_eq!(result.bags[2].count, 1);
        assert_eq!(result.bags[0].count, 2);
    }

    #[test]
    fn test_validation() {
        let mut input = slab(10.0, -1.0, 0.0, ["foot", "furlong", "inch"]);
        input.quantity = Some(1.5);
        input.waste_percent = Some(80.0);

        let result = input.validate();
        assert_eq!(result.errors.len(), 5);
        assert_eq!(result.error_for("width").unwrap().kind, ErrorKind::OutOfRange);
        assert_eq!(result.error_for("thickness").unwrap().kind, ErrorKind::OutOfRange);
        assert_eq!(
            result.error_for("width_unit").unwrap().kind,
            ErrorKind::DomainPreconditionViolated
        );
        assert_eq!(result.error_for("quantity").unwrap().kind, ErrorKind::InvalidFormat);
        assert_eq!(result.error_for("waste_percent").unwrap().kind, ErrorKind::OutOfRange);
    }
}
