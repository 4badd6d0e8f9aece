//! Movement enhancement definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::formula::{fields, Formula, FormulaSet};
use crate::math::{ratio, HALF};
use crate::tech::{ComponentBase, RulesLevel, TechBase, TechRated};

/// Movement enhancement type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MovementEnhancementType {
    /// Inner Sphere MASC.
    MascInnerSphere,
    /// Clan MASC.
    MascClan,
    /// Triple-strength myomer.
    TripleStrengthMyomer,
    /// Supercharger.
    Supercharger,
    /// Inner Sphere partial wing.
    PartialWingInnerSphere,
    /// Clan partial wing.
    PartialWingClan,
}

impl MovementEnhancementType {
    /// Every enhancement type.
    pub const ALL: [MovementEnhancementType; 6] = [
        MovementEnhancementType::MascInnerSphere,
        MovementEnhancementType::MascClan,
        MovementEnhancementType::TripleStrengthMyomer,
        MovementEnhancementType::Supercharger,
        MovementEnhancementType::PartialWingInnerSphere,
        MovementEnhancementType::PartialWingClan,
    ];
}

impl fmt::Display for MovementEnhancementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Catalog record for a movement enhancement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementEnhancementDefinition {
    /// Type tag.
    pub enhancement_type: MovementEnhancementType,
    /// Shared metadata.
    pub base: ComponentBase,
    /// Weight, slot and cost formulas.
    pub formulas: FormulaSet,
    /// Whether the enhancement raises running speed (MASC, supercharger).
    pub boosts_running: bool,
}

impl TechRated for MovementEnhancementDefinition {
    fn base(&self) -> &ComponentBase {
        &self.base
    }
}

fn enhancement(
    enhancement_type: MovementEnhancementType,
    name: &str,
    tech_base: TechBase,
    rules_level: RulesLevel,
    year: u16,
    formulas: FormulaSet,
    boosts_running: bool,
) -> MovementEnhancementDefinition {
    MovementEnhancementDefinition {
        enhancement_type,
        base: ComponentBase::new(name, tech_base, rules_level, year),
        formulas,
        boosts_running,
    }
}

pub(crate) fn definitions() -> Vec<MovementEnhancementDefinition> {
    use MovementEnhancementType as M;
    use RulesLevel::{Advanced, Standard};
    use TechBase::{Clan, InnerSphere};

    let masc = |divisor: i32| {
        FormulaSet::new(Formula::round_divide(fields::TONNAGE, divisor), Formula::EqualsWeight)
            .with_cost(Formula::multiply(fields::WEIGHT, ratio(20_000, 1)))
    };
    let wing = |fraction| {
        FormulaSet::new(
            Formula::multiply_round(fields::TONNAGE, fraction, HALF),
            Formula::constant(6),
        )
        .with_cost(Formula::multiply(fields::WEIGHT, ratio(50_000, 1)))
    };

    vec![
        enhancement(M::MascInnerSphere, "MASC", InnerSphere, Standard, 2740, masc(20), true),
        enhancement(M::MascClan, "MASC (Clan)", Clan, Standard, 2827, masc(25), true),
        enhancement(
            M::TripleStrengthMyomer,
            "Triple Strength Myomer",
            InnerSphere,
            Standard,
            3050,
            FormulaSet::new(Formula::constant(0), Formula::constant(6))
                .with_cost(Formula::multiply(fields::TONNAGE, ratio(16_000, 1))),
            false,
        ),
        enhancement(
            M::Supercharger,
            "Supercharger",
            InnerSphere,
            Advanced,
            3068,
            FormulaSet::new(
                Formula::multiply_round(fields::ENGINE_WEIGHT, ratio(1, 10), HALF),
                Formula::constant(1),
            )
            .with_cost(Formula::multiply(fields::ENGINE_RATING, ratio(10_000, 1))),
            true,
        ),
        enhancement(
            M::PartialWingInnerSphere,
            "Partial Wing",
            InnerSphere,
            Advanced,
            3067,
            wing(ratio(7, 100)),
            false,
        ),
        enhancement(M::PartialWingClan, "Partial Wing (Clan)", Clan, Advanced, 3067, wing(ratio(1, 20)), false),
    ]
}
