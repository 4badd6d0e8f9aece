//! Cockpit definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::location::MechLocation;
use crate::math::{fixed_serde, ratio, Fixed};
use crate::tech::{ComponentBase, RulesLevel, TechBase, TechRated};

/// Cockpit type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CockpitType {
    /// Standard cockpit.
    Standard,
    /// Small cockpit.
    Small,
    /// Standard cockpit with a command console.
    CommandConsole,
    /// Torso-mounted cockpit.
    TorsoMounted,
    /// Primitive cockpit.
    Primitive,
    /// Industrial cockpit.
    Industrial,
    /// Interface cockpit.
    Interface,
}

impl CockpitType {
    /// Every cockpit type.
    pub const ALL: [CockpitType; 7] = [
        CockpitType::Standard,
        CockpitType::Small,
        CockpitType::CommandConsole,
        CockpitType::TorsoMounted,
        CockpitType::Primitive,
        CockpitType::Industrial,
        CockpitType::Interface,
    ];
}

impl fmt::Display for CockpitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Catalog record for a cockpit type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CockpitDefinition {
    /// Type tag.
    pub cockpit_type: CockpitType,
    /// Shared metadata.
    pub base: ComponentBase,
    /// Weight in tons.
    #[serde(with = "fixed_serde")]
    pub weight: Fixed,
    /// Slots used in the head.
    pub head_slots: u8,
    /// Slots used outside the head.
    pub other_slots: u8,
    /// Location of the non-head slots.
    pub other_location: Option<MechLocation>,
    /// Cost.
    pub cost: u32,
}

impl TechRated for CockpitDefinition {
    fn base(&self) -> &ComponentBase {
        &self.base
    }
}

impl CockpitDefinition {
    /// Total slots used.
    #[must_use]
    pub const fn total_slots(&self) -> u8 {
        self.head_slots + self.other_slots
    }
}

fn cockpit(
    cockpit_type: CockpitType,
    name: &str,
    rules_level: RulesLevel,
    year: u16,
    weight: Fixed,
    head_slots: u8,
    other: Option<(MechLocation, u8)>,
    cost: u32,
) -> CockpitDefinition {
    CockpitDefinition {
        cockpit_type,
        base: ComponentBase::new(name, TechBase::InnerSphere, rules_level, year),
        weight,
        head_slots,
        other_slots: other.map_or(0, |(_, n)| n),
        other_location: other.map(|(loc, _)| loc),
        cost,
    }
}

pub(crate) fn definitions() -> Vec<CockpitDefinition> {
    use CockpitType as C;
    use RulesLevel::{Advanced, Experimental, Introductory, Standard};
    let tons = |n: i32| ratio(n, 1);
    vec![
        cockpit(C::Standard, "Standard Cockpit", Introductory, 2468, tons(3), 5, None, 200_000),
        cockpit(C::Small, "Small Cockpit", Standard, 3067, tons(2), 4, None, 175_000),
        cockpit(C::CommandConsole, "Command Console", Advanced, 2631, tons(6), 6, None, 500_000),
        cockpit(
            C::TorsoMounted,
            "Torso-Mounted Cockpit",
            Advanced,
            3053,
            tons(4),
            2,
            Some((MechLocation::CenterTorso, 2)),
            750_000,
        ),
        cockpit(C::Primitive, "Primitive Cockpit", Advanced, 2430, tons(5), 5, None, 100_000),
        cockpit(C::Industrial, "Industrial Cockpit", Standard, 2469, tons(3), 5, None, 100_000),
        cockpit(C::Interface, "Interface Cockpit", Experimental, 3074, tons(4), 6, None, 1_500_000),
    ]
}
