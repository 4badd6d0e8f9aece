//! Heat sink definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::{fixed_serde, ratio, Fixed};
use crate::tech::{ComponentBase, RulesLevel, TechBase, TechRated};

/// Heat sink type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeatSinkType {
    /// Single heat sink.
    Single,
    /// Inner Sphere double heat sink.
    DoubleInnerSphere,
    /// Clan double heat sink.
    DoubleClan,
    /// Compact heat sink.
    Compact,
    /// Laser heat sink.
    Laser,
}

impl HeatSinkType {
    /// Every heat sink type.
    pub const ALL: [HeatSinkType; 5] = [
        HeatSinkType::Single,
        HeatSinkType::DoubleInnerSphere,
        HeatSinkType::DoubleClan,
        HeatSinkType::Compact,
        HeatSinkType::Laser,
    ];
}

impl fmt::Display for HeatSinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Catalog record for a heat sink type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatSinkDefinition {
    /// Type tag.
    pub heat_sink_type: HeatSinkType,
    /// Shared metadata.
    pub base: ComponentBase,
    /// Weight per external sink.
    #[serde(with = "fixed_serde")]
    pub weight: Fixed,
    /// Slots per external sink.
    pub slots: u8,
    /// Heat dissipated per sink per turn.
    pub dissipation: u8,
    /// Cost per sink.
    pub cost: u32,
}

impl TechRated for HeatSinkDefinition {
    fn base(&self) -> &ComponentBase {
        &self.base
    }
}

fn sink(
    heat_sink_type: HeatSinkType,
    name: &str,
    tech_base: TechBase,
    rules_level: RulesLevel,
    year: u16,
    weight: Fixed,
    slots: u8,
    dissipation: u8,
    cost: u32,
) -> HeatSinkDefinition {
    HeatSinkDefinition {
        heat_sink_type,
        base: ComponentBase::new(name, tech_base, rules_level, year),
        weight,
        slots,
        dissipation,
        cost,
    }
}

pub(crate) fn definitions() -> Vec<HeatSinkDefinition> {
    use HeatSinkType as H;
    use RulesLevel::{Advanced, Introductory, Standard};
    use TechBase::{Clan, InnerSphere};
    vec![
        sink(H::Single, "Heat Sink", InnerSphere, Introductory, 2022, Fixed::ONE, 1, 1, 2_000),
        sink(H::DoubleInnerSphere, "Double Heat Sink", InnerSphere, Standard, 2567, Fixed::ONE, 3, 2, 6_000),
        sink(H::DoubleClan, "Double Heat Sink (Clan)", Clan, Standard, 2825, Fixed::ONE, 2, 2, 6_000),
        sink(H::Compact, "Compact Heat Sink", InnerSphere, Advanced, 3079, ratio(3, 2), 1, 1, 3_000),
        sink(H::Laser, "Laser Heat Sink", Clan, Advanced, 3051, Fixed::ONE, 2, 2, 6_000),
    ]
}
