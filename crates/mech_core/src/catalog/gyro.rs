//! Gyro definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formula::{evaluate, fields, EvaluationContext, Formula, FormulaOutput, FormulaSet};
use crate::math::{fixed_serde, ratio, Fixed, HALF};
use crate::tech::{ComponentBase, RulesLevel, TechBase, TechRated};

/// Gyro type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GyroType {
    /// Standard gyro.
    Standard,
    /// Extra-light gyro.
    Xl,
    /// Compact gyro.
    Compact,
    /// Heavy-duty gyro.
    HeavyDuty,
}

impl GyroType {
    /// Every gyro type.
    pub const ALL: [GyroType; 4] = [
        GyroType::Standard,
        GyroType::Xl,
        GyroType::Compact,
        GyroType::HeavyDuty,
    ];
}

impl fmt::Display for GyroType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Catalog record for a gyro type.
///
/// Weight is `ceil(rating / 100) * multiplier` rounded up to the half ton,
/// expressed as a formula over [`fields::GYRO_BASE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GyroDefinition {
    /// Type tag.
    pub gyro_type: GyroType,
    /// Shared metadata.
    pub base: ComponentBase,
    /// Weight and slot formulas.
    pub formulas: FormulaSet,
    /// Multiplier applied to the standard gyro cost.
    #[serde(with = "fixed_serde")]
    pub cost_multiplier: Fixed,
}

impl GyroDefinition {
    /// Fixed slot count.
    #[must_use]
    pub fn slots(&self) -> u8 {
        match self.formulas.slots {
            Formula::Constant(v) => v.to_num::<u8>(),
            _ => 0,
        }
    }

    /// Weight and slots for an engine rating.
    pub fn evaluate(&self, rating: u16) -> Result<FormulaOutput> {
        let ctx = EvaluationContext::new().with(fields::ENGINE_RATING, Fixed::from_num(rating));
        let gyro_base = evaluate(&gyro_base_formula(), &ctx)?;
        self.formulas.evaluate(&ctx.with(fields::GYRO_BASE, gyro_base))
    }
}

impl TechRated for GyroDefinition {
    fn base(&self) -> &ComponentBase {
        &self.base
    }
}

/// Formula producing the gyro base weight from the engine rating.
#[must_use]
pub fn gyro_base_formula() -> Formula {
    Formula::ceil_divide(fields::ENGINE_RATING, 100)
}

fn gyro(
    gyro_type: GyroType,
    name: &str,
    rules_level: RulesLevel,
    year: u16,
    multiplier: Fixed,
    slots: i32,
    cost_multiplier: Fixed,
) -> GyroDefinition {
    GyroDefinition {
        gyro_type,
        base: ComponentBase::new(name, TechBase::InnerSphere, rules_level, year),
        formulas: FormulaSet::new(
            Formula::multiply_round(fields::GYRO_BASE, multiplier, HALF),
            Formula::constant(slots),
        ),
        cost_multiplier,
    }
}

pub(crate) fn definitions() -> Vec<GyroDefinition> {
    use RulesLevel::{Introductory, Standard};
    vec![
        gyro(GyroType::Standard, "Standard Gyro", Introductory, 2300, Fixed::ONE, 4, Fixed::ONE),
        gyro(GyroType::Xl, "XL Gyro", Standard, 3067, ratio(1, 2), 6, ratio(5, 2)),
        gyro(GyroType::Compact, "Compact Gyro", Standard, 3068, ratio(3, 2), 2, ratio(3, 2)),
        gyro(GyroType::HeavyDuty, "Heavy-Duty Gyro", Standard, 3067, ratio(2, 1), 4, ratio(2, 1)),
    ]
}
