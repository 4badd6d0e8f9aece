//! Battle value: defensive plus offensive value, scaled by speed.
//!
//! Defensive and speed factors are kept in integer hundredths so the
//! rounding at .5 boundaries is exact.

use serde::{Deserialize, Serialize};

use crate::catalog::ComponentCatalog;
use crate::construction::{ConstructionResult, MovementProfile};
use crate::equipment::{EquipmentFlag, EquipmentLookup};
use crate::error::{MechError, Result};
use crate::location::total_structure_points;
use crate::math::{fixed_serde, ratio, round_to_i64, saturating_fixed, saturating_sum, Fixed, HALF};
use crate::unit::UnitSnapshot;

/// Speed factor ceiling, in hundredths.
pub const MAX_SPEED_FACTOR_HUNDREDTHS: u32 = 224;

/// Largest jump bonus to the speed factor, in hundredths.
pub const MAX_JUMP_BONUS_HUNDREDTHS: u32 = 50;

/// Heat dissipation covered by the base defensive modifier.
pub const BASE_HEAT_CAPACITY: u32 = 10;

/// Target movement modifier for hexes moved.
///
/// Past 24 MP the modifier keeps climbing one step per ten hexes so the
/// speed factor can reach its ceiling.
#[must_use]
pub const fn target_movement_modifier(mp: u8) -> u8 {
    match mp {
        0..=2 => 0,
        3..=4 => 1,
        5..=6 => 2,
        7..=9 => 3,
        10..=17 => 4,
        18..=24 => 5,
        25..=34 => 6,
        35..=44 => 7,
        _ => 8,
    }
}

/// Speed factor in hundredths.
///
/// `1 + 0.1 * TMM` from the better of running and jumping MP, plus 0.1 per
/// jump MP above walking MP (at most 0.5), capped at 2.24.
#[must_use]
pub fn speed_factor_hundredths(movement: MovementProfile) -> u32 {
    let tmm = u32::from(target_movement_modifier(movement.run.max(movement.jump)));
    let jump_bonus = if movement.jump > movement.walk {
        (u32::from(movement.jump - movement.walk) * 10).min(MAX_JUMP_BONUS_HUNDREDTHS)
    } else {
        0
    };
    (100 + tmm * 10 + jump_bonus).min(MAX_SPEED_FACTOR_HUNDREDTHS)
}

/// Battle value and its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleValueBreakdown {
    /// Armor points counted.
    pub armor_points: u32,
    /// Structure points counted.
    pub structure_points: u32,
    /// Defensive modifier in hundredths.
    pub defensive_modifier_hundredths: u32,
    /// Defensive battle value.
    pub defensive: u32,
    /// Offensive battle value before the speed factor.
    #[serde(with = "fixed_serde")]
    pub offensive: Fixed,
    /// Target movement modifier used for the speed factor.
    pub target_movement_modifier: u8,
    /// Speed factor in hundredths.
    pub speed_factor_hundredths: u32,
    /// Final battle value.
    pub total: u32,
}

impl BattleValueBreakdown {
    /// Speed factor as a number.
    #[must_use]
    pub fn speed_factor(&self) -> Fixed {
        ratio(self.speed_factor_hundredths as i32, 100)
    }
}

/// `round((armor * 2.5 + structure * 1.5) * modifier)`, modifier in hundredths.
#[must_use]
pub fn defensive_battle_value(armor: u32, structure: u32, modifier_hundredths: u32) -> u32 {
    // scaled by 100 for the point weights and 100 for the modifier
    let scaled = (u64::from(armor) * 250 + u64::from(structure) * 150) * u64::from(modifier_hundredths);
    u32::try_from((scaled + 5_000) / 10_000).unwrap_or(u32::MAX)
}

/// Battle value of a unit after construction.
///
/// Heat capacity above ten adds 0.01 per point to the defensive modifier and
/// defensive electronics add 0.1. Weapons count their base value, halved when
/// rear-mounted, and direct-fire weapons gain 25% with a targeting computer.
pub fn battle_value(
    unit: &UnitSnapshot,
    construction: &ConstructionResult,
    catalog: &ComponentCatalog,
    lookup: &dyn EquipmentLookup,
) -> Result<BattleValueBreakdown> {
    let sink = catalog.heat_sink(unit.heat_sinks.heat_sink_type)?;
    let heat_capacity = u32::from(unit.heat_sinks.count) * u32::from(sink.dissipation);

    let mounted: Vec<_> = unit
        .equipment
        .iter()
        .filter_map(|m| lookup.get_by_id(&m.equipment_id).map(|r| (m, r)))
        .collect();
    let has_flag = |flag| mounted.iter().any(|(_, r)| r.has_flag(flag));
    let targeting_computer = has_flag(EquipmentFlag::TargetingComputer);

    let mut modifier = 100 + heat_capacity.saturating_sub(BASE_HEAT_CAPACITY);
    if has_flag(EquipmentFlag::DefensiveElectronics) {
        modifier += 10;
    }

    let armor_points = unit.armor.total_points();
    let structure_points = total_structure_points(unit.tonnage).unwrap_or(0);
    let defensive = defensive_battle_value(armor_points, structure_points, modifier);

    let offensive = saturating_sum(
        mounted
            .iter()
            .filter(|(_, r)| r.category.is_weapon())
            .map(|(m, r)| {
                let mut value = saturating_fixed(r.battle_value);
                if m.rear_mounted {
                    value *= HALF;
                }
                if targeting_computer && r.category.is_direct_fire() {
                    value = value.saturating_mul(ratio(5, 4));
                }
                value
            }),
    );

    let movement = construction.movement;
    let speed = speed_factor_hundredths(movement);
    let scaled = saturating_fixed(defensive)
        .checked_add(offensive)
        .and_then(|value| value.checked_mul(Fixed::from_num(speed)))
        .ok_or_else(|| MechError::overflow("battle value"))?
        / Fixed::from_num(100);
    let total = u32::try_from(round_to_i64(scaled).max(0)).unwrap_or(u32::MAX);

    tracing::debug!(unit = %unit.display_name(), defensive, %offensive, speed, total, "battle value");
    Ok(BattleValueBreakdown {
        armor_points,
        structure_points,
        defensive_modifier_hundredths: modifier,
        defensive,
        offensive,
        target_movement_modifier: target_movement_modifier(movement.run.max(movement.jump)),
        speed_factor_hundredths: speed,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, HeatSinkType};
    use crate::construction::construct;
    use crate::equipment::{EquipmentCategory, EquipmentRecord, StaticEquipmentLookup};
    use crate::location::MechLocation;
    use crate::tech::{ComponentBase, RulesLevel, TechBase};
    use crate::unit::{sample_unit, ArmorAllocation, MountedEquipment};

    fn record(id: &str, category: EquipmentCategory, bv: u32) -> EquipmentRecord {
        EquipmentRecord::new(
            id,
            ComponentBase::new(id, TechBase::InnerSphere, RulesLevel::Standard, 3050),
            category,
            Fixed::ONE,
            1,
        )
        .with_stats(0, bv, 0, 0)
    }

    fn movement(walk: u8, run: u8, jump: u8) -> MovementProfile {
        MovementProfile { walk, run, jump }
    }

    #[test]
    fn test_tmm_table() {
        let expected = [
            (0, 0),
            (2, 0),
            (3, 1),
            (5, 2),
            (7, 3),
            (9, 3),
            (10, 4),
            (17, 4),
            (18, 5),
            (25, 6),
            (34, 6),
            (35, 7),
            (45, 8),
            (u8::MAX, 8),
        ];
        for (mp, tmm) in expected {
            assert_eq!(target_movement_modifier(mp), tmm, "mp {mp}");
        }
    }

    #[test]
    fn test_speed_factor() {
        assert_eq!(speed_factor_hundredths(movement(5, 8, 0)), 130);
        // jumping 7 beats running 6 and adds 0.2
        assert_eq!(speed_factor_hundredths(movement(5, 6, 7)), 150);
        // jump bonus stops at 0.5
        assert_eq!(speed_factor_hundredths(movement(2, 3, 10)), 190);
        // TMM 7 plus the full jump bonus sits just below the ceiling
        assert_eq!(speed_factor_hundredths(movement(20, 30, 35)), 220);
        // TMM 8 plus the jump bonus would be 2.30
        assert_eq!(speed_factor_hundredths(movement(20, 30, 45)), MAX_SPEED_FACTOR_HUNDREDTHS);
        assert_eq!(speed_factor_hundredths(movement(u8::MAX, u8::MAX, 0)), 180);
    }

    #[test]
    fn test_large_armor_totals() {
        let mut unit = sample_unit();
        unit.armor
            .allocation
            .insert(MechLocation::CenterTorso, ArmorAllocation::front(1_000_000));
        let construction = construct(&unit, catalog()).unwrap();
        let lookup = StaticEquipmentLookup::new();
        let bv = battle_value(&unit, &construction, catalog(), &lookup).unwrap();
        assert!(bv.total > bv.defensive);

        unit.armor
            .allocation
            .insert(MechLocation::CenterTorso, ArmorAllocation::front(30_000_000));
        let construction = construct(&unit, catalog()).unwrap();
        assert!(matches!(
            battle_value(&unit, &construction, catalog(), &lookup),
            Err(MechError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn test_defensive_rounding() {
        // 160 * 2.5 + 83 * 1.5 = 524.5
        assert_eq!(defensive_battle_value(160, 83, 100), 525);
        assert_eq!(defensive_battle_value(160, 83, 110), 577);
        assert_eq!(defensive_battle_value(0, 0, 100), 0);
    }

    #[test]
    fn test_reference_unit() {
        let unit = sample_unit();
        let construction = construct(&unit, catalog()).unwrap();
        let bv = battle_value(&unit, &construction, catalog(), &StaticEquipmentLookup::new()).unwrap();
        assert_eq!(bv.structure_points, 83);
        assert_eq!(bv.defensive, 525);
        assert_eq!(bv.offensive, Fixed::ZERO);
        assert_eq!(bv.target_movement_modifier, 3);
        // 525 * 1.3 = 682.5
        assert_eq!(bv.total, 683);
    }

    #[test]
    fn test_offensive_modifiers() {
        let mut unit = sample_unit();
        unit.equipment = vec![
            MountedEquipment::new("ppc", MechLocation::RightArm),
            MountedEquipment::new("ml", MechLocation::CenterTorso).rear(),
            MountedEquipment::new("lrm", MechLocation::LeftTorso),
        ];
        let mut lookup = StaticEquipmentLookup::from_records(vec![
            record("ppc", EquipmentCategory::EnergyWeapon, 176),
            record("ml", EquipmentCategory::EnergyWeapon, 46),
            record("lrm", EquipmentCategory::MissileWeapon, 100),
        ]);
        let construction = construct(&unit, catalog()).unwrap();
        let plain = battle_value(&unit, &construction, catalog(), &lookup).unwrap();
        assert_eq!(plain.offensive, Fixed::from_num(299));

        lookup.register(
            record("tc", EquipmentCategory::Electronics, 0).with_flag(EquipmentFlag::TargetingComputer),
        );
        unit.equipment.push(MountedEquipment::new("tc", MechLocation::LeftTorso));
        let with_tc = battle_value(&unit, &construction, catalog(), &lookup).unwrap();
        // 176 * 1.25 + 23 * 1.25 + 100
        assert_eq!(with_tc.offensive, Fixed::from_num(34875) / Fixed::from_num(100));
    }

    #[test]
    fn test_defensive_modifier_sources() {
        let mut unit = sample_unit();
        unit.heat_sinks.heat_sink_type = HeatSinkType::DoubleInnerSphere;
        unit.equipment = vec![MountedEquipment::new("ecm", MechLocation::LeftTorso)];
        let lookup = StaticEquipmentLookup::from_records(vec![
            record("ecm", EquipmentCategory::Electronics, 61).with_flag(EquipmentFlag::DefensiveElectronics),
        ]);
        let construction = construct(&unit, catalog()).unwrap();
        let bv = battle_value(&unit, &construction, catalog(), &lookup).unwrap();
        // 20 capacity: +0.10, ECM: +0.10
        assert_eq!(bv.defensive_modifier_hundredths, 120);
        assert_eq!(bv.offensive, Fixed::ZERO);
    }
}
