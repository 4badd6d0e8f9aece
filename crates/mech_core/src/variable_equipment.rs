//! Equipment whose size depends on the carrying unit.
//!
//! Physical weapons scale with tonnage; targeting computers scale with the
//! tonnage of direct-fire weapons carried. All of them are ordinary
//! [`EquipmentRecord`]s with a [`FormulaSet`] attached, so any lookup can
//! serve them.

use crate::allocation::PlacementRestriction;
use crate::equipment::{EquipmentCategory, EquipmentFlag, EquipmentRecord};
use crate::formula::{fields, Formula, FormulaSet};
use crate::math::{ratio, Fixed, HALF};
use crate::tech::{ComponentBase, RulesLevel, TechBase};

/// Record ids of the built-in variable equipment.
pub mod ids {
    /// Hatchet.
    pub const HATCHET: &str = "hatchet";
    /// Sword.
    pub const SWORD: &str = "sword";
    /// Mace.
    pub const MACE: &str = "mace";
    /// Claws.
    pub const CLAWS: &str = "claws";
    /// Retractable blade.
    pub const RETRACTABLE_BLADE: &str = "retractable-blade";
    /// Inner Sphere targeting computer.
    pub const TARGETING_COMPUTER_IS: &str = "targeting-computer-is";
    /// Clan targeting computer.
    pub const TARGETING_COMPUTER_CLAN: &str = "targeting-computer-clan";
}

fn physical(
    id: &str,
    name: &str,
    rules_level: RulesLevel,
    year: u16,
    battle_value: u32,
    formulas: FormulaSet,
) -> EquipmentRecord {
    let mut record = EquipmentRecord::new(
        id,
        ComponentBase::new(name, TechBase::InnerSphere, rules_level, year),
        EquipmentCategory::PhysicalWeapon,
        Fixed::ZERO,
        0,
    )
    .with_restriction(PlacementRestriction::ArmOnly)
    .with_formulas(formulas);
    record.battle_value = battle_value;
    record
}

fn per_ton(cost: i32) -> Formula {
    Formula::multiply(fields::WEIGHT, Fixed::from_num(cost))
}

fn hatchet() -> EquipmentRecord {
    physical(
        ids::HATCHET,
        "Hatchet",
        RulesLevel::Standard,
        3022,
        0,
        FormulaSet::new(Formula::ceil_divide(fields::TONNAGE, 15), Formula::EqualsWeight)
            .with_damage(Formula::floor_divide(fields::TONNAGE, 5))
            .with_cost(per_ton(5_000)),
    )
    .with_flag(EquipmentFlag::RequiresHandActuator)
    .with_flag(EquipmentFlag::RequiresLowerArmActuator)
}

fn sword() -> EquipmentRecord {
    physical(
        ids::SWORD,
        "Sword",
        RulesLevel::Standard,
        3058,
        0,
        FormulaSet::new(
            Formula::multiply_round(fields::TONNAGE, ratio(1, 20), HALF),
            Formula::ceil_divide(fields::TONNAGE, 15),
        )
        .with_damage(Formula::floor_divide(fields::TONNAGE, 10).plus(1))
        .with_cost(per_ton(10_000)),
    )
    .with_flag(EquipmentFlag::RequiresHandActuator)
    .with_flag(EquipmentFlag::RequiresLowerArmActuator)
}

fn mace() -> EquipmentRecord {
    physical(
        ids::MACE,
        "Mace",
        RulesLevel::Advanced,
        3061,
        0,
        FormulaSet::new(Formula::ceil_divide(fields::TONNAGE, 10), Formula::EqualsWeight)
            .with_damage(Formula::floor_divide(fields::TONNAGE, 4))
            .with_cost(per_ton(130_000)),
    )
    .with_flag(EquipmentFlag::RequiresHandActuator)
    .with_flag(EquipmentFlag::RequiresLowerArmActuator)
}

fn claws() -> EquipmentRecord {
    physical(
        ids::CLAWS,
        "Claws",
        RulesLevel::Advanced,
        3060,
        0,
        FormulaSet::new(Formula::ceil_divide(fields::TONNAGE, 15), Formula::EqualsWeight)
            .with_damage(Formula::ceil_divide(fields::TONNAGE, 7))
            .with_cost(Formula::multiply(fields::TONNAGE, Fixed::from_num(200))),
    )
    .with_flag(EquipmentFlag::RequiresLowerArmActuator)
}

fn retractable_blade() -> EquipmentRecord {
    physical(
        ids::RETRACTABLE_BLADE,
        "Retractable Blade",
        RulesLevel::Advanced,
        2420,
        0,
        FormulaSet::new(
            Formula::Plus {
                base: Box::new(Formula::multiply_round(fields::TONNAGE, ratio(1, 20), HALF)),
                bonus: HALF,
            },
            Formula::ceil_divide(fields::TONNAGE, 20).plus(1),
        )
        .with_damage(Formula::floor_divide(fields::TONNAGE, 10))
        .with_cost(Formula::Plus {
            base: Box::new(per_ton(10_000)),
            bonus: Fixed::from_num(10_000),
        }),
    )
}

fn targeting_computer(id: &str, name: &str, tech_base: TechBase, year: u16, divisor: i32) -> EquipmentRecord {
    // At least one ton even with no direct-fire weapons.
    let weight = Formula::Max(vec![
        Formula::constant(1),
        Formula::ceil_divide(fields::DIRECT_FIRE_TONNAGE, divisor),
    ]);
    EquipmentRecord::new(
        id,
        ComponentBase::new(name, tech_base, RulesLevel::Standard, year),
        EquipmentCategory::Electronics,
        Fixed::ZERO,
        0,
    )
    .with_restriction(PlacementRestriction::NotHead)
    .with_flag(EquipmentFlag::TargetingComputer)
    .with_formulas(FormulaSet::new(weight, Formula::EqualsWeight).with_cost(per_ton(10_000)))
}

/// Every built-in variable-size equipment record.
#[must_use]
pub fn variable_equipment() -> Vec<EquipmentRecord> {
    vec![
        hatchet(),
        sword(),
        mace(),
        claws(),
        retractable_blade(),
        targeting_computer(ids::TARGETING_COMPUTER_IS, "Targeting Computer", TechBase::InnerSphere, 3062, 4),
        targeting_computer(ids::TARGETING_COMPUTER_CLAN, "Targeting Computer (Clan)", TechBase::Clan, 2860, 5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::EvaluationContext;

    fn record(id: &str) -> EquipmentRecord {
        variable_equipment().into_iter().find(|r| r.id == id).unwrap()
    }

    #[test]
    fn test_formulas_well_formed() {
        for record in variable_equipment() {
            let set = record.formulas.as_ref().unwrap();
            assert!(set.validate().is_empty(), "{} has malformed formulas", record.id);
        }
    }

    #[test]
    fn test_hatchet_on_seventy_tonner() {
        let out = record(ids::HATCHET)
            .resolve(&EvaluationContext::for_tonnage(70))
            .unwrap();
        assert_eq!(out.weight, Fixed::from_num(5));
        assert_eq!(out.slots, 5);
        assert_eq!(out.damage, Fixed::from_num(14));
        assert_eq!(out.cost, Fixed::from_num(25_000));
    }

    #[test]
    fn test_sword_damage_bonus() {
        let out = record(ids::SWORD)
            .resolve(&EvaluationContext::for_tonnage(55))
            .unwrap();
        // 55 / 20 = 2.75 -> 3.0 tons, ceil(55 / 15) = 4 slots, 5 + 1 damage
        assert_eq!(out.weight, Fixed::from_num(3));
        assert_eq!(out.slots, 4);
        assert_eq!(out.damage, Fixed::from_num(6));
    }

    #[test]
    fn test_retractable_blade_half_ton_bonus() {
        let out = record(ids::RETRACTABLE_BLADE)
            .resolve(&EvaluationContext::for_tonnage(50))
            .unwrap();
        // 2.5 + 0.5
        assert_eq!(out.weight, Fixed::from_num(3));
        assert_eq!(out.slots, 4);
    }

    #[test]
    fn test_targeting_computer_scales_with_direct_fire() {
        let tc = record(ids::TARGETING_COMPUTER_IS);
        let ctx = EvaluationContext::for_tonnage(65).with(fields::DIRECT_FIRE_TONNAGE, Fixed::from_num(13));
        let out = tc.resolve(&ctx).unwrap();
        assert_eq!(out.weight, Fixed::from_num(4));
        assert_eq!(out.slots, 4);

        let none = EvaluationContext::for_tonnage(65).with(fields::DIRECT_FIRE_TONNAGE, Fixed::ZERO);
        assert_eq!(tc.resolve(&none).unwrap().weight, Fixed::ONE);

        let clan = record(ids::TARGETING_COMPUTER_CLAN);
        assert_eq!(clan.resolve(&ctx).unwrap().weight, Fixed::from_num(3));
    }

    #[test]
    fn test_targeting_computer_needs_context() {
        let tc = record(ids::TARGETING_COMPUTER_IS);
        assert!(tc.resolve(&EvaluationContext::for_tonnage(65)).is_err());
    }
}
