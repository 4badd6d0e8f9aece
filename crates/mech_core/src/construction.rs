//! The construction pipeline.
//!
//! Nine ordered steps compute the structural weight and slot cost of a unit.
//! Each step reads only the snapshot and the outputs of earlier steps. A
//! step that finds the selection illegal still reports whatever it could
//! compute, so one bad choice never hides the rest of the picture. Only a
//! broken catalog or formula aborts the run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{ComponentCatalog, MovementEnhancementType};
use crate::error::{MechError, Result};
use crate::formula::{fields, EvaluationContext};
use crate::math::{fixed_serde, ratio, saturating_fixed, saturating_sum, Fixed};
use crate::unit::{DistributedItem, UnitSnapshot};

/// Smallest legal tonnage.
pub const MIN_TONNAGE: u32 = 20;
/// Largest legal tonnage.
pub const MAX_TONNAGE: u32 = 100;
/// Minimum number of heat sinks on any unit.
pub const MIN_HEAT_SINKS: u16 = 10;

/// Whether a tonnage is legal: 20-100 in steps of 5.
#[must_use]
pub const fn is_valid_tonnage(tonnage: u32) -> bool {
    tonnage >= MIN_TONNAGE && tonnage <= MAX_TONNAGE && tonnage % 5 == 0
}

/// Outcome of one pipeline step. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionStepResult {
    /// One-based step index.
    pub step: u8,
    /// Step name.
    pub name: String,
    /// Weight contributed.
    #[serde(with = "fixed_serde")]
    pub weight: Fixed,
    /// Critical slots contributed.
    pub critical_slots: u16,
    /// Whether the step found no errors.
    pub valid: bool,
    /// Errors.
    pub errors: Vec<String>,
    /// Warnings.
    pub warnings: Vec<String>,
}

impl ConstructionStepResult {
    fn new(step: u8, name: &str) -> Self {
        Self {
            step,
            name: name.to_string(),
            weight: Fixed::ZERO,
            critical_slots: 0,
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn with_cost(mut self, weight: Fixed, critical_slots: u16) -> Self {
        self.weight = weight;
        self.critical_slots = critical_slots;
        self
    }

    fn error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Records arithmetic overflow as a step error; other failures stay fatal.
    fn absorb_overflow<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(MechError::ArithmeticOverflow(what)) => {
                self.error(format!("{} cannot be computed: {what} is out of range", self.name));
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Walking, running and jumping MP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovementProfile {
    /// Walking MP.
    pub walk: u8,
    /// Running MP, including MASC or supercharger.
    pub run: u8,
    /// Jumping MP.
    pub jump: u8,
}

impl MovementProfile {
    /// Running MP for a walking MP and the number of active running boosts.
    ///
    /// No boost: `ceil(walk * 1.5)`. One boost: `walk * 2`. Two: `ceil(walk * 2.5)`.
    #[must_use]
    pub fn running_mp(walk: u8, boosts: usize) -> u8 {
        let factor = match boosts {
            0 => ratio(3, 2),
            1 => Fixed::from_num(2),
            _ => ratio(5, 2),
        };
        (Fixed::from_num(walk) * factor)
            .ceil()
            .to_num::<i64>()
            .clamp(0, i64::from(u8::MAX)) as u8
    }
}

/// Full outcome of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionResult {
    /// Step results in order.
    pub steps: Vec<ConstructionStepResult>,
    /// Total structural weight.
    #[serde(with = "fixed_serde")]
    pub total_weight: Fixed,
    /// Tonnage left for equipment; never negative.
    #[serde(with = "fixed_serde")]
    pub remaining_tonnage: Fixed,
    /// Total structural critical slots.
    pub total_slots: u16,
    /// Whether no step and no aggregate check failed.
    pub valid: bool,
    /// All errors, step errors first.
    pub errors: Vec<String>,
    /// All warnings.
    pub warnings: Vec<String>,
    /// Movement derived from engine, enhancements and jump jets.
    pub movement: MovementProfile,
    /// Engine weight, zero for an invalid rating.
    #[serde(with = "fixed_serde")]
    pub engine_weight: Fixed,
    /// Heat sinks carried inside the engine.
    pub integral_heat_sinks: u16,
    /// Heat sinks needing their own slots.
    pub external_heat_sinks: u16,
    /// Slots each distributed item needs.
    #[serde(with = "slot_pairs")]
    pub distributed_slots: BTreeMap<DistributedItem, u16>,
}

/// Serializes the distributed-slot map as `(item, slots)` pairs, since
/// enhancement items cannot be JSON object keys.
mod slot_pairs {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use crate::unit::DistributedItem;

    pub fn serialize<S>(map: &BTreeMap<DistributedItem, u16>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<DistributedItem, u16>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(DistributedItem, u16)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

impl ConstructionResult {
    /// Step result by name.
    #[must_use]
    pub fn step(&self, name: &str) -> Option<&ConstructionStepResult> {
        self.steps.iter().find(|s| s.name == name)
    }
}

/// Step names, in order.
pub mod steps {
    /// Step 1.
    pub const TONNAGE: &str = "Tonnage";
    /// Step 2.
    pub const STRUCTURE: &str = "Internal Structure";
    /// Step 3.
    pub const ENGINE: &str = "Engine";
    /// Step 4.
    pub const GYRO: &str = "Gyro";
    /// Step 5.
    pub const COCKPIT: &str = "Cockpit";
    /// Step 6.
    pub const HEAT_SINKS: &str = "Heat Sinks";
    /// Step 7.
    pub const ARMOR: &str = "Armor";
    /// Step 8.
    pub const ENHANCEMENTS: &str = "Movement Enhancements";
    /// Step 9.
    pub const JUMP_JETS: &str = "Jump Jets";
}

/// Weight of one standard jump jet for a tonnage.
#[must_use]
pub fn jump_jet_weight(tonnage: u32) -> Fixed {
    match tonnage {
        0..=55 => ratio(1, 2),
        56..=85 => Fixed::ONE,
        _ => Fixed::from_num(2),
    }
}

fn slots16(slots: u8) -> u16 {
    u16::from(slots)
}

/// Values later steps read from earlier ones.
#[derive(Default)]
struct Carry {
    walk: u8,
    engine_weight: Fixed,
    integral_sinks: u16,
    external_sinks: u16,
    run_boosts: usize,
    distributed: BTreeMap<DistributedItem, u16>,
}

fn tonnage_step(unit: &UnitSnapshot) -> ConstructionStepResult {
    let mut step = ConstructionStepResult::new(1, steps::TONNAGE);
    if !is_valid_tonnage(unit.tonnage) {
        step.error(format!(
            "Tonnage {} is invalid: must be {MIN_TONNAGE}-{MAX_TONNAGE} in steps of 5",
            unit.tonnage
        ));
    }
    step
}

fn structure_step(
    unit: &UnitSnapshot,
    catalog: &ComponentCatalog,
    carry: &mut Carry,
) -> Result<ConstructionStepResult> {
    let def = catalog.structure(unit.structure)?;
    let mut step = ConstructionStepResult::new(2, steps::STRUCTURE);
    let evaluated = def.formulas.evaluate(&EvaluationContext::for_tonnage(unit.tonnage));
    let Some(out) = step.absorb_overflow(evaluated)? else {
        return Ok(step);
    };
    if out.slots > 0 {
        carry
            .distributed
            .insert(DistributedItem::Structure, slots16(out.slots));
    }
    Ok(step.with_cost(out.weight, slots16(out.slots)))
}

fn engine_step(
    unit: &UnitSnapshot,
    catalog: &ComponentCatalog,
    carry: &mut Carry,
) -> Result<ConstructionStepResult> {
    let def = catalog.engine(unit.engine.engine_type)?;
    let rating = unit.engine.rating;
    let mut step = ConstructionStepResult::new(3, steps::ENGINE);
    let Some(weight) = def.weight(rating) else {
        step.error(format!("Engine rating {rating} is invalid"));
        return Ok(step.with_cost(Fixed::ZERO, slots16(def.total_slots())));
    };
    carry.engine_weight = weight;
    if unit.tonnage > 0 {
        let walk = u32::from(rating) / unit.tonnage;
        carry.walk = u8::try_from(walk).unwrap_or(u8::MAX);
    }
    if carry.walk < 1 {
        step.error(format!(
            "Engine rating {rating} gives no walking MP on a {} ton unit",
            unit.tonnage
        ));
    }
    if u32::from(rating) != u32::from(carry.walk) * unit.tonnage {
        step.warning(format!(
            "Engine rating {rating} is not a multiple of tonnage {}",
            unit.tonnage
        ));
    }
    Ok(step.with_cost(weight, slots16(def.total_slots())))
}

fn gyro_step(unit: &UnitSnapshot, catalog: &ComponentCatalog) -> Result<ConstructionStepResult> {
    let def = catalog.gyro(unit.gyro)?;
    let out = def.evaluate(unit.engine.rating)?;
    Ok(ConstructionStepResult::new(4, steps::GYRO).with_cost(out.weight, slots16(out.slots)))
}

fn cockpit_step(unit: &UnitSnapshot, catalog: &ComponentCatalog) -> Result<ConstructionStepResult> {
    let def = catalog.cockpit(unit.cockpit)?;
    Ok(ConstructionStepResult::new(5, steps::COCKPIT).with_cost(def.weight, slots16(def.total_slots())))
}

fn heat_sink_step(
    unit: &UnitSnapshot,
    catalog: &ComponentCatalog,
    carry: &mut Carry,
) -> Result<ConstructionStepResult> {
    let engine = catalog.engine(unit.engine.engine_type)?;
    let def = catalog.heat_sink(unit.heat_sinks.heat_sink_type)?;
    let total = unit.heat_sinks.count;
    let integral = engine.integral_heat_sinks(unit.engine.rating).min(total);
    let external = total.saturating_sub(integral);
    carry.integral_sinks = integral;
    carry.external_sinks = external;

    let mut step = ConstructionStepResult::new(6, steps::HEAT_SINKS);
    let (Some(slots), Some(weight)) = (
        external.checked_mul(u16::from(def.slots)),
        Fixed::from_num(external).checked_mul(def.weight),
    ) else {
        step.error(format!(
            "{external} external heat sinks exceed the {} slot capacity",
            u16::MAX
        ));
        return Ok(step);
    };
    if slots > 0 {
        carry.distributed.insert(DistributedItem::HeatSinks, slots);
    }
    let mut step = step.with_cost(weight, slots);
    if total < MIN_HEAT_SINKS {
        step.error(format!("{total} heat sinks installed, minimum is {MIN_HEAT_SINKS}"));
    }
    Ok(step)
}

fn armor_step(
    unit: &UnitSnapshot,
    catalog: &ComponentCatalog,
    carry: &mut Carry,
) -> Result<ConstructionStepResult> {
    let def = catalog.armor(unit.armor.armor_type)?;
    let points = unit.armor.total_points();
    let mut step = ConstructionStepResult::new(7, steps::ARMOR);
    let Some(weight) = def.weight_for_points(points) else {
        step.error(format!("{points} armor points weigh more than any unit can carry"));
        return Ok(step);
    };
    if def.slots > 0 {
        carry
            .distributed
            .insert(DistributedItem::Armor, slots16(def.slots));
    }
    let mut step = step.with_cost(weight, slots16(def.slots));
    if points == 0 {
        step.warning("Unit carries no armor");
    }
    Ok(step)
}

fn enhancement_step(
    unit: &UnitSnapshot,
    catalog: &ComponentCatalog,
    carry: &mut Carry,
) -> Result<ConstructionStepResult> {
    let mut step = ConstructionStepResult::new(8, steps::ENHANCEMENTS);
    let ctx = EvaluationContext::for_tonnage(unit.tonnage)
        .with(fields::ENGINE_RATING, Fixed::from_num(unit.engine.rating))
        .with(fields::ENGINE_WEIGHT, carry.engine_weight);

    let mut weight = Fixed::ZERO;
    let mut slots = 0u16;
    let mut seen: Vec<MovementEnhancementType> = Vec::new();
    for kind in &unit.movement.enhancements {
        if seen.contains(kind) {
            step.error(format!("{kind} is installed more than once"));
            continue;
        }
        seen.push(*kind);
        let def = catalog.enhancement(*kind)?;
        let Some(out) = step.absorb_overflow(def.formulas.evaluate(&ctx))? else {
            continue;
        };
        weight = weight.saturating_add(out.weight);
        slots = slots.saturating_add(slots16(out.slots));
        if out.slots > 0 {
            carry
                .distributed
                .insert(DistributedItem::Enhancement(*kind), slots16(out.slots));
        }
        if def.boosts_running {
            carry.run_boosts += 1;
        }
    }
    Ok(step.with_cost(weight, slots))
}

fn jump_jet_step(unit: &UnitSnapshot, carry: &mut Carry) -> ConstructionStepResult {
    let jets = unit.movement.jump_mp;
    let weight = Fixed::from_num(jets) * jump_jet_weight(unit.tonnage);
    if jets > 0 {
        carry
            .distributed
            .insert(DistributedItem::JumpJets, u16::from(jets));
    }
    let mut step = ConstructionStepResult::new(9, steps::JUMP_JETS).with_cost(weight, u16::from(jets));
    if jets > carry.walk {
        step.error(format!(
            "Jump MP {jets} exceeds walking MP {}",
            carry.walk
        ));
    }
    step
}

/// Run the full pipeline over a unit.
///
/// # Errors
///
/// Returns a configuration error if the catalog lacks a selected component
/// or a catalog formula is malformed. Illegal selections are reported in the
/// result, never as errors.
pub fn construct(unit: &UnitSnapshot, catalog: &ComponentCatalog) -> Result<ConstructionResult> {
    let mut carry = Carry::default();
    let steps = vec![
        tonnage_step(unit),
        structure_step(unit, catalog, &mut carry)?,
        engine_step(unit, catalog, &mut carry)?,
        gyro_step(unit, catalog)?,
        cockpit_step(unit, catalog)?,
        heat_sink_step(unit, catalog, &mut carry)?,
        armor_step(unit, catalog, &mut carry)?,
        enhancement_step(unit, catalog, &mut carry)?,
        jump_jet_step(unit, &mut carry),
    ];
    for step in &steps {
        tracing::debug!(
            step = step.step,
            name = %step.name,
            weight = %step.weight,
            slots = step.critical_slots,
            valid = step.valid,
            "construction step"
        );
    }

    let total_weight = saturating_sum(steps.iter().map(|s| s.weight));
    let total_slots = steps
        .iter()
        .fold(0u16, |acc, s| acc.saturating_add(s.critical_slots));
    let tonnage = saturating_fixed(unit.tonnage);
    let mut errors: Vec<String> = steps.iter().flat_map(|s| s.errors.iter().cloned()).collect();
    let warnings: Vec<String> = steps
        .iter()
        .flat_map(|s| s.warnings.iter().cloned())
        .collect();
    if total_weight > tonnage {
        errors.push(format!(
            "Structural weight {total_weight} exceeds tonnage {}",
            unit.tonnage
        ));
    }

    let movement = MovementProfile {
        walk: carry.walk,
        run: MovementProfile::running_mp(carry.walk, carry.run_boosts),
        jump: unit.movement.jump_mp,
    };

    Ok(ConstructionResult {
        valid: errors.is_empty(),
        remaining_tonnage: tonnage.saturating_sub(total_weight).max(Fixed::ZERO),
        total_weight,
        total_slots,
        errors,
        warnings,
        movement,
        engine_weight: carry.engine_weight,
        integral_heat_sinks: carry.integral_sinks,
        external_heat_sinks: carry.external_sinks,
        distributed_slots: carry.distributed,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        catalog, ArmorType, CockpitType, EngineType, GyroType, HeatSinkType, StructureType,
    };
    use crate::location::MechLocation;
    use crate::tech::TechBaseMode;
    use crate::unit::{
        ActuatorLayout, ArmorAllocation, ArmorSelection, EngineSelection, HeatSinkSelection,
        MovementSelection,
    };

    fn unit(tonnage: u32, rating: u16) -> UnitSnapshot {
        UnitSnapshot {
            chassis: "Pipeline".to_string(),
            model: String::new(),
            tonnage,
            tech_base_mode: TechBaseMode::InnerSphere,
            year: None,
            engine: EngineSelection {
                engine_type: EngineType::Standard,
                rating,
            },
            gyro: GyroType::Standard,
            structure: StructureType::Standard,
            cockpit: CockpitType::Standard,
            armor: ArmorSelection {
                armor_type: ArmorType::Standard,
                allocation: BTreeMap::from([
                    (MechLocation::Head, ArmorAllocation::front(9)),
                    (MechLocation::CenterTorso, ArmorAllocation::split(24, 8)),
                    (MechLocation::LeftTorso, ArmorAllocation::split(18, 6)),
                    (MechLocation::RightTorso, ArmorAllocation::split(18, 6)),
                    (MechLocation::LeftArm, ArmorAllocation::front(16)),
                    (MechLocation::RightArm, ArmorAllocation::front(16)),
                    (MechLocation::LeftLeg, ArmorAllocation::front(19)),
                    (MechLocation::RightLeg, ArmorAllocation::front(20)),
                ]),
            },
            heat_sinks: HeatSinkSelection {
                heat_sink_type: HeatSinkType::Single,
                count: 10,
            },
            movement: MovementSelection::default(),
            actuators: ActuatorLayout::default(),
            equipment: Vec::new(),
            distributed: Vec::new(),
        }
    }

    #[test]
    fn test_reference_fifty_tonner() {
        let u = unit(50, 250);
        assert_eq!(u.armor.total_points(), 160);
        let result = construct(&u, catalog()).unwrap();
        assert!(result.valid, "{:?}", result.errors);
        assert_eq!(result.steps.len(), 9);
        // structure 5 + engine 12.5 + gyro 3 + cockpit 3 + sinks 0 + armor 10
        assert_eq!(result.total_weight, ratio(67, 2));
        assert_eq!(result.remaining_tonnage, ratio(33, 2));
        assert_eq!(result.total_slots, 15);
        assert_eq!(result.movement.walk, 5);
        assert_eq!(result.movement.run, 8);
        assert_eq!(result.integral_heat_sinks, 10);
        assert_eq!(result.external_heat_sinks, 0);
    }

    #[test]
    fn test_invalid_tonnage_is_fail_soft() {
        let result = construct(&unit(52, 260), catalog()).unwrap();
        assert!(!result.valid);
        let tonnage = result.step(steps::TONNAGE).unwrap();
        assert!(!tonnage.valid);
        assert_eq!(tonnage.weight, Fixed::ZERO);
        // later steps still report their weights
        assert!(result.step(steps::ENGINE).unwrap().weight > Fixed::ZERO);
    }

    #[test]
    fn test_huge_tonnage_is_reported_not_fatal() {
        let result = construct(&unit(3_000_000_000, 250), catalog()).unwrap();
        assert!(!result.valid);
        assert!(!result.step(steps::TONNAGE).unwrap().valid);
        assert!(!result.step(steps::ENGINE).unwrap().valid);
        assert_eq!(result.movement.walk, 0);
        assert!(result.remaining_tonnage >= Fixed::ZERO);
    }

    #[test]
    fn test_huge_armor_is_a_step_error() {
        let mut u = unit(50, 250);
        u.armor
            .allocation
            .insert(MechLocation::CenterTorso, ArmorAllocation::front(30_000_000));
        let result = construct(&u, catalog()).unwrap();
        let armor = result.step(steps::ARMOR).unwrap();
        assert!(!armor.valid);
        assert_eq!(armor.weight, Fixed::ZERO);
        assert!(!result.valid);

        u.armor
            .allocation
            .insert(MechLocation::LeftArm, ArmorAllocation::split(i32::MAX, i32::MAX));
        assert!(!construct(&u, catalog()).unwrap().valid);
    }

    #[test]
    fn test_heat_sink_slot_overflow_is_a_step_error() {
        let mut u = unit(50, 250);
        u.heat_sinks.heat_sink_type = HeatSinkType::DoubleInnerSphere;
        u.heat_sinks.count = 30_000;
        let result = construct(&u, catalog()).unwrap();
        let sinks = result.step(steps::HEAT_SINKS).unwrap();
        assert!(!sinks.valid);
        assert_eq!(sinks.critical_slots, 0);
        assert!(!result.distributed_slots.contains_key(&DistributedItem::HeatSinks));

        u.heat_sinks.count = u16::MAX;
        u.heat_sinks.heat_sink_type = HeatSinkType::Single;
        let result = construct(&u, catalog()).unwrap();
        // fits, but far over tonnage
        assert!(result.step(steps::HEAT_SINKS).unwrap().valid);
        assert!(!result.valid);
    }

    #[test]
    fn test_overflow_becomes_step_error() {
        let mut step = ConstructionStepResult::new(2, steps::STRUCTURE);
        let absorbed = step.absorb_overflow::<Fixed>(Err(MechError::overflow("tonnage")));
        assert_eq!(absorbed, Ok(None));
        assert!(!step.valid);
        assert!(step.errors[0].contains("tonnage is out of range"));

        let fatal = step.absorb_overflow::<Fixed>(Err(MechError::WeightUnavailable));
        assert_eq!(fatal, Err(MechError::WeightUnavailable));
    }

    #[test]
    fn test_invalid_rating() {
        let result = construct(&unit(50, 252), catalog()).unwrap();
        let engine = result.step(steps::ENGINE).unwrap();
        assert!(!engine.valid);
        assert_eq!(engine.weight, Fixed::ZERO);
        assert_eq!(result.engine_weight, Fixed::ZERO);
    }

    #[test]
    fn test_walk_below_one() {
        let result = construct(&unit(100, 95), catalog()).unwrap();
        let engine = result.step(steps::ENGINE).unwrap();
        assert!(!engine.valid);
        assert_eq!(result.movement.walk, 0);
    }

    #[test]
    fn test_too_few_heat_sinks() {
        let mut u = unit(50, 250);
        u.heat_sinks.count = 8;
        let result = construct(&u, catalog()).unwrap();
        assert!(!result.step(steps::HEAT_SINKS).unwrap().valid);
    }

    #[test]
    fn test_external_heat_sinks_small_engine() {
        let mut u = unit(20, 100);
        u.heat_sinks.heat_sink_type = HeatSinkType::DoubleInnerSphere;
        let result = construct(&u, catalog()).unwrap();
        assert_eq!(result.integral_heat_sinks, 4);
        assert_eq!(result.external_heat_sinks, 6);
        let sinks = result.step(steps::HEAT_SINKS).unwrap();
        assert_eq!(sinks.weight, Fixed::from_num(6));
        assert_eq!(sinks.critical_slots, 18);
        assert_eq!(result.distributed_slots.get(&DistributedItem::HeatSinks), Some(&18));
    }

    #[test]
    fn test_over_tonnage_reported_and_remaining_clamped() {
        let mut u = unit(20, 400);
        u.engine.engine_type = EngineType::Standard;
        let result = construct(&u, catalog()).unwrap();
        assert!(!result.valid);
        assert!(result.total_weight > Fixed::from_num(20));
        assert_eq!(result.remaining_tonnage, Fixed::ZERO);
    }

    #[test]
    fn test_endo_steel_and_ferro_slots() {
        let mut u = unit(50, 250);
        u.structure = StructureType::EndoSteelInnerSphere;
        u.armor.armor_type = ArmorType::FerroFibrousInnerSphere;
        let result = construct(&u, catalog()).unwrap();
        assert_eq!(result.step(steps::STRUCTURE).unwrap().weight, ratio(5, 2));
        assert_eq!(result.distributed_slots.get(&DistributedItem::Structure), Some(&14));
        assert_eq!(result.distributed_slots.get(&DistributedItem::Armor), Some(&14));
        assert_eq!(result.total_slots, 15 + 28);
    }

    #[test]
    fn test_masc_and_jump_jets() {
        let mut u = unit(50, 250);
        u.movement.enhancements = vec![MovementEnhancementType::MascInnerSphere];
        u.movement.jump_mp = 5;
        let result = construct(&u, catalog()).unwrap();
        let masc = result.step(steps::ENHANCEMENTS).unwrap();
        // round(50 / 20) = 3
        assert_eq!(masc.weight, Fixed::from_num(3));
        assert_eq!(masc.critical_slots, 3);
        assert_eq!(result.movement.run, 10);
        let jets = result.step(steps::JUMP_JETS).unwrap();
        assert_eq!(jets.weight, ratio(5, 2));
        assert!(jets.valid);
    }

    #[test]
    fn test_result_serializes_enhancement_slots() {
        let mut u = unit(50, 250);
        u.movement.enhancements = vec![MovementEnhancementType::MascInnerSphere];
        let result = construct(&u, catalog()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: ConstructionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.distributed_slots, result.distributed_slots);
        assert_eq!(back.total_weight, result.total_weight);
    }

    #[test]
    fn test_jump_above_walk() {
        let mut u = unit(50, 250);
        u.movement.jump_mp = 6;
        let result = construct(&u, catalog()).unwrap();
        assert!(!result.step(steps::JUMP_JETS).unwrap().valid);
    }

    #[test]
    fn test_duplicate_enhancement() {
        let mut u = unit(50, 250);
        u.movement.enhancements = vec![
            MovementEnhancementType::TripleStrengthMyomer,
            MovementEnhancementType::TripleStrengthMyomer,
        ];
        let result = construct(&u, catalog()).unwrap();
        let step = result.step(steps::ENHANCEMENTS).unwrap();
        assert!(!step.valid);
        assert_eq!(step.critical_slots, 6);
    }

    #[test]
    fn test_running_mp() {
        assert_eq!(MovementProfile::running_mp(5, 0), 8);
        assert_eq!(MovementProfile::running_mp(4, 0), 6);
        assert_eq!(MovementProfile::running_mp(5, 1), 10);
        assert_eq!(MovementProfile::running_mp(5, 2), 13);
    }

    #[test]
    fn test_jump_jet_weight_classes() {
        assert_eq!(jump_jet_weight(55), ratio(1, 2));
        assert_eq!(jump_jet_weight(60), Fixed::ONE);
        assert_eq!(jump_jet_weight(90), Fixed::from_num(2));
    }
}
