//! End-to-end construction tests over the reference designs.
//!
//! These run the full pipeline and the derived-statistics calculators
//! against units whose numbers were worked out by hand.

use mech_core::allocation::SlotUsage;
use mech_core::battle_value::battle_value;
use mech_core::catalog::{catalog, EngineType};
use mech_core::construction::construct;
use mech_core::cost::calculate_cost;
use mech_core::heat::{heat_profile, MovementMode};
use mech_core::math::Fixed;
use mech_core::mounts::{equipment_slots, equipment_weight, resolve_mounts, unit_context};
use mech_core::unit::{DistributedItem, UnitSnapshot};
use mech_test_utils::fixtures::{fixed, fixed_f, heavy_unit, reference_unit, sample_equipment};

// =============================================================================
// Pipeline
// =============================================================================

mod pipeline {
    use super::*;

    #[test]
    fn test_reference_unit_builds_cleanly() {
        let result = construct(&reference_unit(), catalog()).unwrap();
        assert!(result.valid, "unexpected errors: {:?}", result.errors);
        assert_eq!(result.total_weight, fixed_f(33.5));
        assert_eq!(result.remaining_tonnage, fixed_f(16.5));
        assert_eq!(result.movement.walk, 5);
        assert_eq!(result.movement.run, 8);
        assert_eq!(result.movement.jump, 0);
    }

    #[test]
    fn test_steps_run_in_order() {
        let result = construct(&reference_unit(), catalog()).unwrap();
        let numbers: Vec<u8> = result.steps.iter().map(|s| s.step).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
        assert_eq!(numbers.first(), Some(&1));
    }

    #[test]
    fn test_total_weight_is_sum_of_steps() {
        for unit in [reference_unit(), heavy_unit()] {
            let result = construct(&unit, catalog()).unwrap();
            let sum: Fixed = result.steps.iter().map(|s| s.weight).sum();
            assert_eq!(result.total_weight, sum);
            let slots: u16 = result.steps.iter().map(|s| s.critical_slots).sum();
            assert_eq!(result.total_slots, slots);
        }
    }

    #[test]
    fn test_heavy_unit_numbers() {
        let unit = heavy_unit();
        let result = construct(&unit, catalog()).unwrap();
        assert!(result.valid, "unexpected errors: {:?}", result.errors);
        assert_eq!(result.total_weight, fixed_f(41.5));
        assert_eq!(result.engine_weight, fixed_f(9.5));
        assert_eq!(result.integral_heat_sinks, 10);
        assert_eq!(result.external_heat_sinks, 2);
        assert_eq!(result.movement.walk, 4);
        assert_eq!(result.movement.run, 6);
        assert_eq!(result.movement.jump, 4);
        assert_eq!(result.distributed_slots.get(&DistributedItem::HeatSinks), Some(&6));
        assert_eq!(result.distributed_slots.get(&DistributedItem::JumpJets), Some(&4));
    }

    #[test]
    fn test_heavy_unit_equipment_fits_remaining_tonnage() {
        let unit = heavy_unit();
        let lookup = sample_equipment();
        let result = construct(&unit, catalog()).unwrap();
        let ctx = unit_context(&unit, catalog(), &lookup).unwrap();
        let mounts = resolve_mounts(&unit, &lookup, &ctx).unwrap();
        assert_eq!(mounts.len(), unit.equipment.len());
        let equipment = equipment_weight(&mounts);
        assert_eq!(equipment, fixed(17));
        assert!(result.total_weight + equipment <= fixed(75));
    }

    #[test]
    fn test_slot_usage_within_unit_capacity() {
        for unit in [reference_unit(), heavy_unit()] {
            let lookup = sample_equipment();
            let ctx = unit_context(&unit, catalog(), &lookup).unwrap();
            let mounts = resolve_mounts(&unit, &lookup, &ctx).unwrap();
            let usage = SlotUsage::compute(&unit, catalog(), &equipment_slots(&mounts)).unwrap();
            assert!(usage.total_used() <= 78);
            assert!(usage.capacity_violations().is_empty());
        }
    }

    #[test]
    fn test_overweight_engine_reported_not_raised() {
        let mut unit = reference_unit();
        unit.tonnage = 20;
        unit.engine.rating = 400;
        unit.engine.engine_type = EngineType::Ice;
        let result = construct(&unit, catalog()).unwrap();
        assert!(!result.valid);
        assert_eq!(result.remaining_tonnage, fixed(0));
        assert!(result.errors.iter().any(|e| e.contains("exceeds tonnage")));
    }
}

// =============================================================================
// Derived statistics
// =============================================================================

mod statistics {
    use super::*;

    fn bv(unit: &UnitSnapshot) -> u32 {
        let lookup = sample_equipment();
        let result = construct(unit, catalog()).unwrap();
        battle_value(unit, &result, catalog(), &lookup).unwrap().total
    }

    #[test]
    fn test_reference_battle_value() {
        let lookup = sample_equipment();
        let unit = reference_unit();
        let result = construct(&unit, catalog()).unwrap();
        let breakdown = battle_value(&unit, &result, catalog(), &lookup).unwrap();
        assert_eq!(breakdown.armor_points, 160);
        assert_eq!(breakdown.structure_points, 83);
        assert_eq!(breakdown.defensive, 525);
        assert_eq!(breakdown.target_movement_modifier, 3);
        assert_eq!(breakdown.total, 683);
    }

    #[test]
    fn test_weapons_raise_battle_value() {
        assert!(bv(&heavy_unit()) > bv(&reference_unit()));
    }

    #[test]
    fn test_cost_breakdown_adds_up() {
        let lookup = sample_equipment();
        let unit = heavy_unit();
        let result = construct(&unit, catalog()).unwrap();
        let cost = calculate_cost(&unit, &result, catalog(), &lookup).unwrap();
        assert!(cost.total > cost.subtotal());
        assert!(cost.engine > 0);
        assert!(cost.equipment > 0);
    }

    #[test]
    fn test_xl_engine_costs_more_than_standard() {
        let lookup = sample_equipment();
        let standard = reference_unit();
        let mut xl = reference_unit();
        xl.engine.engine_type = EngineType::XlInnerSphere;
        let cost = |unit: &UnitSnapshot| {
            let result = construct(unit, catalog()).unwrap();
            calculate_cost(unit, &result, catalog(), &lookup).unwrap()
        };
        assert_eq!(cost(&xl).engine, 2 * cost(&standard).engine);
        assert!(cost(&xl).total > cost(&standard).total);
    }

    #[test]
    fn test_heavy_unit_heat_balance() {
        let lookup = sample_equipment();
        let profile =
            heat_profile(&heavy_unit(), catalog(), &lookup, MovementMode::Stationary).unwrap();
        assert_eq!(profile.weapon_heat, 21);
        assert_eq!(profile.dissipation, 24);
        assert_eq!(profile.net_heat, -3);

        let jumping = heat_profile(&heavy_unit(), catalog(), &lookup, MovementMode::Jump(4)).unwrap();
        assert_eq!(jumping.movement_heat, 4);
        assert_eq!(jumping.net_heat, 1);
    }
}
