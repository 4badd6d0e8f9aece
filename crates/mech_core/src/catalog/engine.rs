//! Engine definitions and the master engine weight table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::{ceil_half, ratio, Fixed};
use crate::tech::{ComponentBase, RulesLevel, TechBase, TechRated};

/// Engine type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineType {
    /// Standard fusion engine.
    Standard,
    /// Inner Sphere extra-light fusion engine.
    XlInnerSphere,
    /// Clan extra-light fusion engine.
    XlClan,
    /// Light fusion engine.
    Light,
    /// Inner Sphere extra-extra-light fusion engine.
    XxlInnerSphere,
    /// Clan extra-extra-light fusion engine.
    XxlClan,
    /// Compact fusion engine.
    Compact,
    /// Internal combustion engine.
    Ice,
    /// Fuel cell.
    FuelCell,
    /// Fission engine.
    Fission,
}

impl EngineType {
    /// Every engine type.
    pub const ALL: [EngineType; 10] = [
        EngineType::Standard,
        EngineType::XlInnerSphere,
        EngineType::XlClan,
        EngineType::Light,
        EngineType::XxlInnerSphere,
        EngineType::XxlClan,
        EngineType::Compact,
        EngineType::Ice,
        EngineType::FuelCell,
        EngineType::Fission,
    ];
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Catalog record for an engine type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineDefinition {
    /// Type tag.
    pub engine_type: EngineType,
    /// Shared metadata.
    pub base: ComponentBase,
    /// Multiplier applied to the standard fusion weight.
    #[serde(with = "crate::math::fixed_serde")]
    pub weight_multiplier: Fixed,
    /// Slots in the center torso.
    pub center_torso_slots: u8,
    /// Slots in each side torso.
    pub side_torso_slots: u8,
    /// Multiplier applied to the standard engine cost.
    #[serde(with = "crate::math::fixed_serde")]
    pub cost_multiplier: Fixed,
    /// Whether the engine provides integral heat sinks.
    pub fusion: bool,
}

impl TechRated for EngineDefinition {
    fn base(&self) -> &ComponentBase {
        &self.base
    }
}

/// Smallest legal engine rating.
pub const MIN_RATING: u16 = 10;

/// Largest rating covered by the weight table.
pub const MAX_RATING: u16 = 400;

/// Standard fusion weights in half tons, for ratings 10, 15, ... 400.
const STANDARD_WEIGHT_HALF_TONS: [u16; 79] = [
    1, 1, 1, 1, 2, 2, 2, 2, 3, 3, // 10-55
    3, 4, 4, 4, 5, 5, 6, 6, 6, 7, // 60-105
    7, 8, 8, 8, 9, 9, 10, 10, 11, 11, // 110-155
    12, 12, 12, 14, 14, 15, 15, 16, 17, 17, // 160-205
    18, 19, 20, 20, 21, 22, 23, 24, 25, 26, // 210-255
    27, 28, 29, 31, 32, 33, 35, 36, 38, 39, // 260-305
    41, 43, 45, 47, 49, 51, 54, 57, 59, 63, // 310-355
    66, 69, 73, 77, 82, 87, 92, 98, 105, // 360-400
];

/// Whether a rating is legal: a multiple of 5 within the weight table.
#[must_use]
pub const fn is_valid_rating(rating: u16) -> bool {
    rating >= MIN_RATING && rating <= MAX_RATING && rating % 5 == 0
}

/// Standard fusion engine weight for a rating, or `None` for an illegal rating.
#[must_use]
pub fn standard_weight(rating: u16) -> Option<Fixed> {
    if !is_valid_rating(rating) {
        return None;
    }
    let index = usize::from((rating - MIN_RATING) / 5);
    STANDARD_WEIGHT_HALF_TONS
        .get(index)
        .map(|halves| ratio(i32::from(*halves), 2))
}

impl EngineDefinition {
    /// Engine weight for a rating, rounded up to the half ton.
    #[must_use]
    pub fn weight(&self, rating: u16) -> Option<Fixed> {
        standard_weight(rating).and_then(|w| ceil_half(w * self.weight_multiplier))
    }

    /// Total critical slots (center torso plus both side torsos).
    #[must_use]
    pub const fn total_slots(&self) -> u8 {
        self.center_torso_slots + 2 * self.side_torso_slots
    }

    /// Whether the engine extends into the side torsos.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        self.side_torso_slots > 0
    }

    /// Free heat sinks carried inside the engine.
    #[must_use]
    pub fn integral_heat_sinks(&self, rating: u16) -> u16 {
        if self.fusion {
            (rating / 25).min(10)
        } else {
            0
        }
    }
}

fn engine(
    engine_type: EngineType,
    name: &str,
    tech_base: TechBase,
    rules_level: RulesLevel,
    year: u16,
    weight_multiplier: Fixed,
    slots: (u8, u8),
    cost_multiplier: Fixed,
    fusion: bool,
) -> EngineDefinition {
    EngineDefinition {
        engine_type,
        base: ComponentBase::new(name, tech_base, rules_level, year),
        weight_multiplier,
        center_torso_slots: slots.0,
        side_torso_slots: slots.1,
        cost_multiplier,
        fusion,
    }
}

pub(crate) fn definitions() -> Vec<EngineDefinition> {
    use EngineType as E;
    use RulesLevel::{Advanced, Experimental, Introductory, Standard};
    use TechBase::{Clan, InnerSphere};
    let one = Fixed::ONE;
    vec![
        engine(E::Standard, "Fusion Engine", InnerSphere, Introductory, 2021, one, (6, 0), one, true),
        engine(E::XlInnerSphere, "XL Engine", InnerSphere, Standard, 2579, ratio(1, 2), (6, 3), ratio(2, 1), true),
        engine(E::XlClan, "XL Engine (Clan)", Clan, Standard, 2827, ratio(1, 2), (6, 2), ratio(2, 1), true),
        engine(E::Light, "Light Engine", InnerSphere, Standard, 3062, ratio(3, 4), (6, 2), ratio(3, 2), true),
        engine(E::XxlInnerSphere, "XXL Engine", InnerSphere, Experimental, 3055, ratio(1, 3), (6, 6), ratio(3, 1), true),
        engine(E::XxlClan, "XXL Engine (Clan)", Clan, Experimental, 3055, ratio(1, 3), (6, 4), ratio(3, 1), true),
        engine(E::Compact, "Compact Engine", InnerSphere, Standard, 3068, ratio(3, 2), (3, 0), ratio(2, 1), true),
        engine(E::Ice, "I.C.E.", InnerSphere, Standard, 1950, ratio(2, 1), (6, 0), ratio(3, 10), false),
        engine(E::FuelCell, "Fuel Cell", InnerSphere, Advanced, 2300, ratio(6, 5), (6, 0), ratio(7, 10), false),
        engine(E::Fission, "Fission Engine", InnerSphere, Advanced, 2882, ratio(7, 4), (6, 0), ratio(3, 4), true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(t: EngineType) -> EngineDefinition {
        definitions().into_iter().find(|d| d.engine_type == t).unwrap()
    }

    #[test]
    fn test_every_type_defined() {
        let defs = definitions();
        for t in EngineType::ALL {
            assert!(defs.iter().any(|d| d.engine_type == t), "{t} missing");
        }
    }

    #[test]
    fn test_standard_weights() {
        assert_eq!(standard_weight(250), Some(ratio(25, 2)));
        assert_eq!(standard_weight(300), Some(Fixed::from_num(19)));
        assert_eq!(standard_weight(400), Some(ratio(105, 2)));
        assert_eq!(standard_weight(10), Some(ratio(1, 2)));
        assert_eq!(standard_weight(252), None);
        assert_eq!(standard_weight(405), None);
    }

    #[test]
    fn test_weight_table_is_monotonic() {
        assert!(STANDARD_WEIGHT_HALF_TONS.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_derived_weights() {
        assert_eq!(def(EngineType::XlInnerSphere).weight(300), Some(ratio(19, 2)));
        // 12.5 * 0.75 = 9.375 -> 9.5
        assert_eq!(def(EngineType::Light).weight(250), Some(ratio(19, 2)));
        // 12.5 * 1.5 = 18.75 -> 19
        assert_eq!(def(EngineType::Compact).weight(250), Some(Fixed::from_num(19)));
    }

    #[test]
    fn test_slots() {
        assert_eq!(def(EngineType::Standard).total_slots(), 6);
        assert_eq!(def(EngineType::XlInnerSphere).total_slots(), 12);
        assert_eq!(def(EngineType::XlClan).total_slots(), 10);
        assert_eq!(def(EngineType::Compact).total_slots(), 3);
        assert!(def(EngineType::Light).is_split());
        assert!(!def(EngineType::Standard).is_split());
    }

    #[test]
    fn test_integral_heat_sinks() {
        assert_eq!(def(EngineType::Standard).integral_heat_sinks(250), 10);
        assert_eq!(def(EngineType::Standard).integral_heat_sinks(200), 8);
        assert_eq!(def(EngineType::Ice).integral_heat_sinks(250), 0);
    }
}
