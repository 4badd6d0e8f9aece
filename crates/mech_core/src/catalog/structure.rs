//! Internal structure definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::formula::{fields, Formula, FormulaSet};
use crate::math::{ratio, Fixed, HALF};
use crate::tech::{ComponentBase, RulesLevel, TechBase, TechRated};

/// Internal structure type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureType {
    /// Standard structure.
    Standard,
    /// Inner Sphere endo steel.
    EndoSteelInnerSphere,
    /// Clan endo steel.
    EndoSteelClan,
    /// Inner Sphere endo-composite.
    EndoCompositeInnerSphere,
    /// Clan endo-composite.
    EndoCompositeClan,
    /// Reinforced structure.
    Reinforced,
    /// Composite structure.
    Composite,
    /// Industrial structure.
    Industrial,
}

impl StructureType {
    /// Every structure type.
    pub const ALL: [StructureType; 8] = [
        StructureType::Standard,
        StructureType::EndoSteelInnerSphere,
        StructureType::EndoSteelClan,
        StructureType::EndoCompositeInnerSphere,
        StructureType::EndoCompositeClan,
        StructureType::Reinforced,
        StructureType::Composite,
        StructureType::Industrial,
    ];
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Catalog record for a structure type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureDefinition {
    /// Type tag.
    pub structure_type: StructureType,
    /// Shared metadata.
    pub base: ComponentBase,
    /// `tonnage * fraction` rounded up to the half ton; slots fixed.
    pub formulas: FormulaSet,
    /// Cost per ton of structure.
    pub cost_per_ton: u32,
}

impl StructureDefinition {
    /// Distributed slot count, read from the constant slot formula.
    #[must_use]
    pub fn slots(&self) -> u8 {
        match self.formulas.slots {
            Formula::Constant(v) => v.to_num::<u8>(),
            _ => 0,
        }
    }
}

impl TechRated for StructureDefinition {
    fn base(&self) -> &ComponentBase {
        &self.base
    }
}

fn structure(
    structure_type: StructureType,
    name: &str,
    tech_base: TechBase,
    rules_level: RulesLevel,
    year: u16,
    fraction: Fixed,
    slots: i32,
    cost_per_ton: u32,
) -> StructureDefinition {
    StructureDefinition {
        structure_type,
        base: ComponentBase::new(name, tech_base, rules_level, year),
        formulas: FormulaSet::new(
            Formula::multiply_round(fields::TONNAGE, fraction, HALF),
            Formula::constant(slots),
        ),
        cost_per_ton,
    }
}

pub(crate) fn definitions() -> Vec<StructureDefinition> {
    use RulesLevel::{Advanced, Introductory, Standard};
    use StructureType as S;
    use TechBase::{Clan, InnerSphere};
    vec![
        structure(S::Standard, "Standard", InnerSphere, Introductory, 2439, ratio(1, 10), 0, 400),
        structure(S::EndoSteelInnerSphere, "Endo Steel", InnerSphere, Standard, 2487, ratio(1, 20), 14, 1600),
        structure(S::EndoSteelClan, "Endo Steel (Clan)", Clan, Standard, 2827, ratio(1, 20), 7, 1600),
        structure(S::EndoCompositeInnerSphere, "Endo-Composite", InnerSphere, Advanced, 3067, ratio(3, 40), 7, 3200),
        structure(S::EndoCompositeClan, "Endo-Composite (Clan)", Clan, Advanced, 3073, ratio(3, 40), 4, 3200),
        structure(S::Reinforced, "Reinforced", InnerSphere, Advanced, 3057, ratio(1, 5), 0, 6400),
        structure(S::Composite, "Composite", InnerSphere, Advanced, 3061, ratio(1, 20), 0, 1600),
        structure(S::Industrial, "Industrial", InnerSphere, Standard, 2350, ratio(1, 5), 0, 300),
    ]
}
