//! C-bill cost calculations.
//!
//! Per-component costs are whole currency units. The unit total applies the
//! `1 + tonnage / 100` final multiplier to the sum of every component.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    ArmorType, CockpitType, ComponentCatalog, EngineType, GyroType, HeatSinkType,
    MovementEnhancementType, StructureType,
};
use crate::construction::ConstructionResult;
use crate::equipment::EquipmentLookup;
use crate::error::{MechError, Result};
use crate::formula::{fields, EvaluationContext};
use crate::location::ArmActuators;
use crate::math::{round_to_i64, Fixed};
use crate::mounts::{resolve_mounts, unit_context};
use crate::unit::UnitSnapshot;

/// Engine cost per point of rating before the type multiplier.
pub const ENGINE_COST_PER_RATING: u64 = 5_000;
/// Gyro cost per ton of gyro base weight before the type multiplier.
pub const GYRO_COST_PER_BASE: u64 = 300_000;
/// Life support cost.
pub const LIFE_SUPPORT_COST: u64 = 50_000;
/// Sensor cost per ton of unit.
pub const SENSOR_COST_PER_TON: u64 = 2_000;
/// Standard myomer cost per ton of unit.
pub const MYOMER_COST_PER_TON: u64 = 2_000;
/// Triple-strength myomer cost per ton of unit.
pub const TSM_COST_PER_TON: u64 = 16_000;
/// Jump jet cost factor, times tonnage times jump MP squared.
pub const JUMP_JET_COST_FACTOR: u64 = 200;

fn to_cost(value: Fixed) -> u64 {
    u64::try_from(round_to_i64(value)).unwrap_or(0)
}

/// `round(weight * per_ton)` in whole currency units.
fn per_ton_cost(weight: Fixed, per_ton: u32) -> u64 {
    // 32 fractional bits; the product fits easily in 128 bits
    let scaled = i128::from(weight.to_bits()) * i128::from(per_ton);
    let rounded = (scaled + (1 << 31)) >> 32;
    u64::try_from(rounded).unwrap_or(0)
}

fn multiplied(base: u64, multiplier: Fixed, what: &str) -> Result<u64> {
    Fixed::checked_from_num(base)
        .and_then(|b| b.checked_mul(multiplier))
        .map(to_cost)
        .ok_or_else(|| MechError::overflow(what))
}

/// Cost of a structure of the given tonnage.
pub fn calculate_structure_cost(
    catalog: &ComponentCatalog,
    structure_weight: Fixed,
    structure_type: StructureType,
) -> Result<u64> {
    let def = catalog.structure(structure_type)?;
    Ok(per_ton_cost(structure_weight, def.cost_per_ton))
}

/// Engine cost for a rating: `5000 * rating * multiplier`.
pub fn calculate_engine_cost(
    catalog: &ComponentCatalog,
    rating: u16,
    engine_type: EngineType,
) -> Result<u64> {
    let def = catalog.engine(engine_type)?;
    multiplied(
        ENGINE_COST_PER_RATING * u64::from(rating),
        def.cost_multiplier,
        "engine cost",
    )
}

/// Gyro cost: `300000 * ceil(rating / 100) * multiplier`.
pub fn calculate_gyro_cost(
    catalog: &ComponentCatalog,
    rating: u16,
    gyro_type: GyroType,
) -> Result<u64> {
    let def = catalog.gyro(gyro_type)?;
    let gyro_base = u64::from(rating.div_ceil(100));
    multiplied(GYRO_COST_PER_BASE * gyro_base, def.cost_multiplier, "gyro cost")
}

/// Fixed cockpit cost.
pub fn calculate_cockpit_cost(catalog: &ComponentCatalog, cockpit_type: CockpitType) -> Result<u64> {
    Ok(u64::from(catalog.cockpit(cockpit_type)?.cost))
}

/// Cost of `count` heat sinks.
pub fn calculate_heat_sink_cost(
    catalog: &ComponentCatalog,
    count: u16,
    heat_sink_type: HeatSinkType,
) -> Result<u64> {
    Ok(u64::from(count) * u64::from(catalog.heat_sink(heat_sink_type)?.cost))
}

/// Cost of armor of the given tonnage.
pub fn calculate_armor_cost(
    catalog: &ComponentCatalog,
    armor_weight: Fixed,
    armor_type: ArmorType,
) -> Result<u64> {
    let def = catalog.armor(armor_type)?;
    Ok(per_ton_cost(armor_weight, def.cost_per_ton))
}

/// Chassis cost: life support, sensors, musculature and actuators.
#[must_use]
pub fn calculate_chassis_cost(unit: &UnitSnapshot) -> u64 {
    let tons = u64::from(unit.tonnage);
    let myomer = if unit
        .movement
        .enhancements
        .contains(&MovementEnhancementType::TripleStrengthMyomer)
    {
        TSM_COST_PER_TON
    } else {
        MYOMER_COST_PER_TON
    };
    // Upper arm 100, lower arm 50, hand 80 per ton; legs 150 + 80 + 120.
    let arm = |a: ArmActuators| 100 + if a.lower_arm { 50 } else { 0 } + if a.hand { 80 } else { 0 };
    let actuators = tons
        * (arm(unit.actuators.left_arm) + arm(unit.actuators.right_arm) + 2 * (150 + 80 + 120));
    LIFE_SUPPORT_COST + SENSOR_COST_PER_TON * tons + myomer * tons + actuators
}

/// Jump jet cost: `200 * tonnage * jumpMP^2`.
#[must_use]
pub fn calculate_jump_jet_cost(tonnage: u32, jump_mp: u8) -> u64 {
    let jump = u64::from(jump_mp);
    JUMP_JET_COST_FACTOR * u64::from(tonnage) * jump * jump
}

/// `subtotal * (1 + tonnage / 100)`, rounded half up.
#[must_use]
pub fn apply_final_multiplier(subtotal: u64, tonnage: u32) -> u64 {
    let scaled = (u128::from(subtotal) * (100 + u128::from(tonnage)) + 50) / 100;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Per-category cost of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Life support, sensors, musculature and actuators.
    pub chassis: u64,
    /// Engine.
    pub engine: u64,
    /// Gyro.
    pub gyro: u64,
    /// Internal structure.
    pub structure: u64,
    /// Armor.
    pub armor: u64,
    /// Cockpit.
    pub cockpit: u64,
    /// Heat sinks.
    pub heat_sinks: u64,
    /// Movement enhancements and jump jets.
    pub movement: u64,
    /// Mounted equipment.
    pub equipment: u64,
    /// Sum of the above times `1 + tonnage / 100`.
    pub total: u64,
}

impl CostBreakdown {
    /// Sum before the final multiplier.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        [
            self.chassis,
            self.engine,
            self.gyro,
            self.structure,
            self.armor,
            self.cockpit,
            self.heat_sinks,
            self.movement,
            self.equipment,
        ]
        .into_iter()
        .fold(0, u64::saturating_add)
    }
}

/// Full cost breakdown of a unit.
///
/// Structure and armor costs use the weights computed by the pipeline.
pub fn calculate_cost(
    unit: &UnitSnapshot,
    construction: &ConstructionResult,
    catalog: &ComponentCatalog,
    lookup: &dyn EquipmentLookup,
) -> Result<CostBreakdown> {
    use crate::construction::steps;

    let step_weight = |name: &str| construction.step(name).map_or(Fixed::ZERO, |s| s.weight);

    let ctx = EvaluationContext::for_tonnage(unit.tonnage)
        .with(fields::ENGINE_RATING, Fixed::from_num(unit.engine.rating))
        .with(fields::ENGINE_WEIGHT, construction.engine_weight);
    let mut movement = calculate_jump_jet_cost(unit.tonnage, unit.movement.jump_mp);
    for kind in &unit.movement.enhancements {
        let out = catalog.enhancement(*kind)?.formulas.evaluate(&ctx)?;
        movement = movement.saturating_add(out.cost.map_or(0, to_cost));
    }

    let equipment_ctx = unit_context(unit, catalog, lookup)?;
    let equipment = resolve_mounts(unit, lookup, &equipment_ctx)?
        .iter()
        .map(|m| to_cost(m.resolved.cost))
        .fold(0, u64::saturating_add);

    let mut breakdown = CostBreakdown {
        chassis: calculate_chassis_cost(unit),
        engine: calculate_engine_cost(catalog, unit.engine.rating, unit.engine.engine_type)?,
        gyro: calculate_gyro_cost(catalog, unit.engine.rating, unit.gyro)?,
        structure: calculate_structure_cost(catalog, step_weight(steps::STRUCTURE), unit.structure)?,
        armor: calculate_armor_cost(catalog, step_weight(steps::ARMOR), unit.armor.armor_type)?,
        cockpit: calculate_cockpit_cost(catalog, unit.cockpit)?,
        heat_sinks: calculate_heat_sink_cost(
            catalog,
            unit.heat_sinks.count,
            unit.heat_sinks.heat_sink_type,
        )?,
        movement,
        equipment,
        total: 0,
    };
    breakdown.total = apply_final_multiplier(breakdown.subtotal(), unit.tonnage);
    tracing::debug!(unit = %unit.display_name(), total = breakdown.total, "cost calculated");
    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use crate::math::ratio;

    #[test]
    fn test_structure_cost() {
        assert_eq!(
            calculate_structure_cost(catalog(), Fixed::from_num(5), StructureType::Standard).unwrap(),
            2_000
        );
        assert_eq!(
            calculate_structure_cost(catalog(), ratio(5, 2), StructureType::EndoSteelInnerSphere)
                .unwrap(),
            4_000
        );
    }

    #[test]
    fn test_cockpit_cost() {
        assert_eq!(calculate_cockpit_cost(catalog(), CockpitType::Standard).unwrap(), 200_000);
        assert_eq!(
            calculate_cockpit_cost(catalog(), CockpitType::CommandConsole).unwrap(),
            500_000
        );
    }

    #[test]
    fn test_heat_sink_cost() {
        assert_eq!(calculate_heat_sink_cost(catalog(), 10, HeatSinkType::Single).unwrap(), 20_000);
        assert_eq!(
            calculate_heat_sink_cost(catalog(), 10, HeatSinkType::DoubleInnerSphere).unwrap(),
            60_000
        );
    }

    #[test]
    fn test_engine_cost_multipliers() {
        let standard = calculate_engine_cost(catalog(), 250, EngineType::Standard).unwrap();
        let xl = calculate_engine_cost(catalog(), 250, EngineType::XlInnerSphere).unwrap();
        assert_eq!(standard, 1_250_000);
        assert_eq!(xl, 2 * standard);
        assert!(calculate_engine_cost(catalog(), 255, EngineType::Standard).unwrap() > standard);
    }

    #[test]
    fn test_gyro_cost() {
        let standard = calculate_gyro_cost(catalog(), 250, GyroType::Standard).unwrap();
        assert_eq!(standard, 900_000);
        let compact = calculate_gyro_cost(catalog(), 250, GyroType::Compact).unwrap();
        assert_eq!(compact, 1_350_000);
    }

    #[test]
    fn test_armor_cost() {
        assert_eq!(
            calculate_armor_cost(catalog(), Fixed::from_num(10), ArmorType::Standard).unwrap(),
            100_000
        );
    }

    #[test]
    fn test_chassis_cost() {
        let mut unit = crate::unit::sample_unit();
        // 50000 + 50 * (2000 + 2000 + 230 + 230 + 700)
        assert_eq!(calculate_chassis_cost(&unit), 308_000);
        unit.actuators.left_arm = ArmActuators::BARE;
        assert_eq!(calculate_chassis_cost(&unit), 308_000 - 50 * 130);
        unit.movement.enhancements = vec![MovementEnhancementType::TripleStrengthMyomer];
        assert_eq!(calculate_chassis_cost(&unit), 308_000 - 50 * 130 + 50 * 14_000);
    }

    #[test]
    fn test_full_breakdown_applies_multiplier() {
        let unit = crate::unit::sample_unit();
        let construction = crate::construction::construct(&unit, catalog()).unwrap();
        let lookup = crate::equipment::StaticEquipmentLookup::new();
        let cost = calculate_cost(&unit, &construction, catalog(), &lookup).unwrap();
        assert_eq!(cost.structure, 2_000);
        assert_eq!(cost.armor, 100_000);
        assert_eq!(cost.heat_sinks, 20_000);
        assert_eq!(cost.equipment, 0);
        assert_eq!(cost.total, apply_final_multiplier(cost.subtotal(), 50));
        assert_eq!(apply_final_multiplier(1_000_000, 50), 1_500_000);
        assert_eq!(apply_final_multiplier(101, 55), 157);
    }

    #[test]
    fn test_extreme_units_saturate() {
        assert_eq!(apply_final_multiplier(u64::MAX, u32::MAX), u64::MAX);
        assert_eq!(per_ton_cost(Fixed::MAX, u32::MAX), 9_223_372_034_707_292_159);
        assert_eq!(per_ton_cost(ratio(1, 2), 3), 2);

        let mut unit = crate::unit::sample_unit();
        unit.tonnage = 3_000_000_000;
        let construction = crate::construction::construct(&unit, catalog()).unwrap();
        let lookup = crate::equipment::StaticEquipmentLookup::new();
        let cost = calculate_cost(&unit, &construction, catalog(), &lookup).unwrap();
        assert!(cost.structure > 0);
        assert_eq!(cost.total, u64::MAX);
    }

    #[test]
    fn test_jump_jet_cost() {
        assert_eq!(calculate_jump_jet_cost(50, 5), 250_000);
        assert_eq!(calculate_jump_jet_cost(50, 0), 0);
    }
}
