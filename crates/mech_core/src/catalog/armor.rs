//! Armor definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::{ceil_half, ratio, Fixed};
use crate::tech::{ComponentBase, RulesLevel, TechBase, TechRated};

/// Armor type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorType {
    /// Standard armor.
    Standard,
    /// Inner Sphere ferro-fibrous.
    FerroFibrousInnerSphere,
    /// Clan ferro-fibrous.
    FerroFibrousClan,
    /// Light ferro-fibrous.
    LightFerroFibrous,
    /// Heavy ferro-fibrous.
    HeavyFerroFibrous,
    /// Stealth armor.
    Stealth,
    /// Hardened armor.
    Hardened,
    /// Reactive armor.
    Reactive,
    /// Reflective armor.
    Reflective,
}

impl ArmorType {
    /// Every armor type.
    pub const ALL: [ArmorType; 9] = [
        ArmorType::Standard,
        ArmorType::FerroFibrousInnerSphere,
        ArmorType::FerroFibrousClan,
        ArmorType::LightFerroFibrous,
        ArmorType::HeavyFerroFibrous,
        ArmorType::Stealth,
        ArmorType::Hardened,
        ArmorType::Reactive,
        ArmorType::Reflective,
    ];
}

impl fmt::Display for ArmorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Catalog record for an armor type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorDefinition {
    /// Type tag.
    pub armor_type: ArmorType,
    /// Shared metadata.
    pub base: ComponentBase,
    /// Armor points per ton, in hundredths (1600 = 16 points).
    pub points_per_ton_hundredths: u32,
    /// Distributed critical slots.
    pub slots: u8,
    /// Cost per ton.
    pub cost_per_ton: u32,
}

impl TechRated for ArmorDefinition {
    fn base(&self) -> &ComponentBase {
        &self.base
    }
}

impl ArmorDefinition {
    /// Armor points per ton.
    #[must_use]
    pub fn points_per_ton(&self) -> Fixed {
        ratio(self.points_per_ton_hundredths as i32, 100)
    }

    /// Tonnage needed for a number of armor points, rounded up to the half ton.
    ///
    /// `None` when the weight is beyond the fixed-point range.
    #[must_use]
    pub fn weight_for_points(&self, points: u32) -> Option<Fixed> {
        // Hundredths keep the division exact for whole-ton multiples.
        let scaled = Fixed::checked_from_num(u64::from(points) * 100)?;
        ceil_half(scaled.checked_div(Fixed::from_num(self.points_per_ton_hundredths))?)
    }
}

fn armor(
    armor_type: ArmorType,
    name: &str,
    tech_base: TechBase,
    rules_level: RulesLevel,
    year: u16,
    points_per_ton_hundredths: u32,
    slots: u8,
    cost_per_ton: u32,
) -> ArmorDefinition {
    ArmorDefinition {
        armor_type,
        base: ComponentBase::new(name, tech_base, rules_level, year),
        points_per_ton_hundredths,
        slots,
        cost_per_ton,
    }
}

pub(crate) fn definitions() -> Vec<ArmorDefinition> {
    use ArmorType as A;
    use RulesLevel::{Advanced, Introductory, Standard};
    use TechBase::{Clan, InnerSphere};
    vec![
        armor(A::Standard, "Standard", InnerSphere, Introductory, 2470, 1600, 0, 10_000),
        armor(A::FerroFibrousInnerSphere, "Ferro-Fibrous", InnerSphere, Standard, 2571, 1792, 14, 20_000),
        armor(A::FerroFibrousClan, "Ferro-Fibrous (Clan)", Clan, Standard, 2820, 1920, 7, 20_000),
        armor(A::LightFerroFibrous, "Light Ferro-Fibrous", InnerSphere, Standard, 3067, 1696, 7, 15_000),
        armor(A::HeavyFerroFibrous, "Heavy Ferro-Fibrous", InnerSphere, Standard, 3069, 1984, 21, 25_000),
        armor(A::Stealth, "Stealth", InnerSphere, Standard, 3063, 1600, 12, 50_000),
        armor(A::Hardened, "Hardened", InnerSphere, Advanced, 3047, 800, 0, 15_000),
        armor(A::Reactive, "Reactive", InnerSphere, Advanced, 3063, 1600, 14, 30_000),
        armor(A::Reflective, "Reflective", InnerSphere, Advanced, 3058, 1600, 10, 30_000),
    ]
}
