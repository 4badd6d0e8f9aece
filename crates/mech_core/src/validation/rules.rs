//! Built-in validation rules.

use crate::allocation::{
    is_valid_location_for_equipment, validate_distribution, validate_split,
    AllocationViolation, DistributedAllocationRule, SlotUsage,
};
use crate::catalog::MovementEnhancementType;
use crate::compatibility::{
    effective_rules_level, items_above_rules_level, tech_base_conflicts, unavailable_items,
};
use crate::equipment::EquipmentFlag;
use crate::error::Result;
use crate::heat::{heat_effect, heat_profile, HeatCheck, MovementMode};
use crate::location::{max_armor_points, MechLocation};
use crate::math::saturating_fixed;
use crate::mounts::{equipment_slots, equipment_weight, resolve_mounts, unit_context};
use crate::unit::DistributedItem;

use super::{ValidationCategory, ValidationContext, ValidationIssue, ValidationRule};

/// Stable rule ids.
pub mod ids {
    /// Construction step errors and warnings.
    pub const CONSTRUCTION: &str = "construction.pipeline";
    /// Total weight against tonnage.
    pub const WEIGHT: &str = "weight.budget";
    /// Armor above the location maximum.
    pub const ARMOR_MAXIMUM: &str = "armor.location-maximum";
    /// Negative armor values.
    pub const ARMOR_NEGATIVE: &str = "armor.negative";
    /// Rear armor outside the torso.
    pub const ARMOR_REAR: &str = "armor.rear";
    /// Location slot capacity.
    pub const SLOT_CAPACITY: &str = "slots.capacity";
    /// Distributed item placement.
    pub const SLOT_DISTRIBUTION: &str = "slots.distributed";
    /// Arm actuator configuration.
    pub const ACTUATORS: &str = "slots.actuators";
    /// Equipment ids known to the lookup.
    pub const EQUIPMENT_KNOWN: &str = "equipment.known";
    /// Equipment placement restrictions.
    pub const EQUIPMENT_PLACEMENT: &str = "equipment.placement";
    /// Tech-base compatibility.
    pub const TECH_BASE: &str = "tech.base";
    /// Rules level.
    pub const RULES_LEVEL: &str = "tech.rules-level";
    /// Introduction year.
    pub const ERA: &str = "era.availability";
    /// Movement enhancement combinations.
    pub const ENHANCEMENTS: &str = "movement.enhancements";
    /// Heat balance.
    pub const HEAT: &str = "heat.balance";
}

macro_rules! describe {
    ($id:expr, $name:literal, $category:ident, $priority:literal) => {
        fn id(&self) -> &'static str {
            $id
        }

        fn name(&self) -> &'static str {
            $name
        }

        fn category(&self) -> ValidationCategory {
            ValidationCategory::$category
        }

        fn priority(&self) -> u16 {
            $priority
        }
    };
}

/// Every built-in rule.
#[must_use]
pub fn standard_rules() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(ConstructionSteps),
        Box::new(WeightBudget),
        Box::new(ArmorLocationMaximum),
        Box::new(NegativeArmor),
        Box::new(RearArmor),
        Box::new(SlotCapacity),
        Box::new(DistributedSlots),
        Box::new(ArmActuatorLayout),
        Box::new(KnownEquipment),
        Box::new(EquipmentPlacement),
        Box::new(TechBaseCompatibility),
        Box::new(RulesLevelCap),
        Box::new(EraAvailability),
        Box::new(EnhancementCombinations),
        Box::new(HeatBalance),
    ]
}

fn armor_path(location: MechLocation) -> String {
    format!("armor/{}", location.abbreviation())
}

fn equipment_path(index: usize) -> String {
    format!("equipment/{index}")
}

/// Errors and warnings of the construction steps.
pub struct ConstructionSteps;

impl ValidationRule for ConstructionSteps {
    describe!(ids::CONSTRUCTION, "Construction steps", Construction, 10);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        for step in &ctx.construction.steps {
            let path = format!("construction/{}", step.name);
            issues.extend(step.errors.iter().map(|message| {
                ValidationIssue::error(self.id(), self.category(), message.as_str()).at(path.as_str())
            }));
            issues.extend(step.warnings.iter().map(|message| {
                ValidationIssue::warning(self.id(), self.category(), message.as_str()).at(path.as_str())
            }));
        }
        Ok(issues)
    }
}

/// Structure plus equipment must fit the tonnage.
pub struct WeightBudget;

impl ValidationRule for WeightBudget {
    describe!(ids::WEIGHT, "Weight budget", Weight, 20);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        let formula_ctx = unit_context(ctx.unit, ctx.catalog, ctx.equipment)?;
        let mounts = resolve_mounts(ctx.unit, ctx.equipment, &formula_ctx)?;
        let total = ctx
            .construction
            .total_weight
            .saturating_add(equipment_weight(&mounts));
        let tonnage = saturating_fixed(ctx.unit.tonnage);
        let issue = if total > tonnage {
            ValidationIssue::error(
                self.id(),
                self.category(),
                format!("Unit weighs {total} tons, {} over its tonnage", total - tonnage),
            )
            .expected_actual(format!("<= {tonnage}"), total)
            .suggest("Remove equipment or choose lighter components")
        } else if total < tonnage {
            ValidationIssue::info(
                self.id(),
                self.category(),
                format!("{} tons unallocated", tonnage - total),
            )
        } else {
            return Ok(Vec::new());
        };
        Ok(vec![issue.at("tonnage")])
    }
}

/// Armor may not exceed twice the structure points (head 9).
pub struct ArmorLocationMaximum;

impl ValidationRule for ArmorLocationMaximum {
    describe!(ids::ARMOR_MAXIMUM, "Armor location maximum", Armor, 30);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        for (location, armor) in &ctx.unit.armor.allocation {
            let Some(max) = max_armor_points(ctx.unit.tonnage, *location) else {
                continue;
            };
            let total = armor.total();
            if total > u32::from(max) {
                issues.push(
                    ValidationIssue::error(
                        self.id(),
                        self.category(),
                        format!("{location} carries {total} armor points, maximum is {max}"),
                    )
                    .at(armor_path(*location))
                    .expected_actual(max, total)
                    .repairable(),
                );
            }
        }
        Ok(issues)
    }
}

/// Armor values may not be negative.
pub struct NegativeArmor;

impl ValidationRule for NegativeArmor {
    describe!(ids::ARMOR_NEGATIVE, "Negative armor", Armor, 30);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        Ok(ctx
            .unit
            .armor
            .allocation
            .iter()
            .filter(|(_, armor)| armor.front < 0 || armor.rear < 0)
            .map(|(location, armor)| {
                ValidationIssue::error(
                    self.id(),
                    self.category(),
                    format!("{location} has negative armor ({} / {})", armor.front, armor.rear),
                )
                .at(armor_path(*location))
                .repairable()
            })
            .collect())
    }
}

/// Only torsos carry rear armor.
pub struct RearArmor;

impl ValidationRule for RearArmor {
    describe!(ids::ARMOR_REAR, "Rear armor", Armor, 30);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        Ok(ctx
            .unit
            .armor
            .allocation
            .iter()
            .filter(|(location, armor)| !location.has_rear_armor() && armor.rear != 0)
            .map(|(location, armor)| {
                ValidationIssue::error(
                    self.id(),
                    self.category(),
                    format!("{location} cannot carry rear armor"),
                )
                .at(armor_path(*location))
                .expected_actual(0, armor.rear)
                .repairable()
            })
            .collect())
    }
}

/// Fixed, structural and equipment slots must fit every location.
pub struct SlotCapacity;

impl ValidationRule for SlotCapacity {
    describe!(ids::SLOT_CAPACITY, "Slot capacity", Slots, 40);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        let formula_ctx = unit_context(ctx.unit, ctx.catalog, ctx.equipment)?;
        let mounts = resolve_mounts(ctx.unit, ctx.equipment, &formula_ctx)?;
        let usage = SlotUsage::compute(ctx.unit, ctx.catalog, &equipment_slots(&mounts))?;
        Ok(usage
            .capacity_violations()
            .into_iter()
            .map(|violation| {
                let issue = ValidationIssue::error(self.id(), self.category(), violation.to_string());
                match violation {
                    AllocationViolation::CapacityExceeded { location, .. } => {
                        issue.at(location.to_string()).suggest(format!(
                            "{location} has {} slots free after fixed components",
                            usage.available(location)
                        ))
                    }
                    _ => issue.suggest("Move equipment to a location with free slots"),
                }
            })
            .collect())
    }
}

/// Distributed items must be placed completely and legally.
pub struct DistributedSlots;

impl ValidationRule for DistributedSlots {
    describe!(ids::SLOT_DISTRIBUTION, "Distributed slots", Slots, 40);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        let required = &ctx.construction.distributed_slots;
        let mut issues = Vec::new();
        for (item, slots) in required {
            let rule = DistributedAllocationRule::for_item(*item, *slots, ctx.unit);
            for violation in validate_distribution(&rule, &ctx.unit.placements_of(*item)) {
                issues.push(
                    ValidationIssue::error(self.id(), self.category(), format!("{item}: {violation}"))
                        .at(format!("distributed/{item}")),
                );
            }
        }
        let mut unexpected: Vec<DistributedItem> = ctx
            .unit
            .distributed
            .iter()
            .map(|p| p.item)
            .filter(|item| !required.contains_key(item))
            .collect();
        unexpected.sort();
        unexpected.dedup();
        for item in unexpected {
            issues.push(
                ValidationIssue::error(
                    self.id(),
                    self.category(),
                    format!("Slots placed for {item}, which needs none"),
                )
                .at(format!("distributed/{item}")),
            );
        }
        Ok(issues)
    }
}

/// Hands need lower arms, and some equipment needs both.
pub struct ArmActuatorLayout;

impl ValidationRule for ArmActuatorLayout {
    describe!(ids::ACTUATORS, "Arm actuators", Slots, 40);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        for location in [MechLocation::LeftArm, MechLocation::RightArm] {
            let arm = ctx.unit.actuators.for_location(location);
            if !arm.is_consistent() {
                issues.push(
                    ValidationIssue::error(
                        self.id(),
                        self.category(),
                        format!("{location} has a hand actuator without a lower arm actuator"),
                    )
                    .at(format!("actuators/{}", location.abbreviation())),
                );
            }
        }
        for (index, mount) in ctx.unit.equipment.iter().enumerate() {
            let Some(record) = ctx.equipment.get_by_id(&mount.equipment_id) else {
                continue;
            };
            if !mount.location.is_arm() {
                continue;
            }
            let arm = ctx.unit.actuators.for_location(mount.location);
            let missing = if record.has_flag(EquipmentFlag::RequiresLowerArmActuator) && !arm.lower_arm {
                Some("lower arm")
            } else if record.has_flag(EquipmentFlag::RequiresHandActuator) && !arm.hand {
                Some("hand")
            } else {
                None
            };
            if let Some(actuator) = missing {
                issues.push(
                    ValidationIssue::error(
                        self.id(),
                        self.category(),
                        format!("{} in {} requires a {actuator} actuator", record.name(), mount.location),
                    )
                    .at(equipment_path(index)),
                );
            }
        }
        Ok(issues)
    }
}

/// Every mounted id must exist in the equipment lookup.
pub struct KnownEquipment;

impl ValidationRule for KnownEquipment {
    describe!(ids::EQUIPMENT_KNOWN, "Known equipment", Equipment, 50);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        Ok(ctx
            .unit
            .equipment
            .iter()
            .enumerate()
            .filter(|(_, mount)| ctx.equipment.get_by_id(&mount.equipment_id).is_none())
            .map(|(index, mount)| {
                ValidationIssue::error(
                    self.id(),
                    self.category(),
                    format!("Unknown equipment '{}'", mount.equipment_id),
                )
                .at(equipment_path(index))
            })
            .collect())
    }
}

/// Equipment must sit in locations its restriction allows.
pub struct EquipmentPlacement;

impl ValidationRule for EquipmentPlacement {
    describe!(ids::EQUIPMENT_PLACEMENT, "Equipment placement", Equipment, 50);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        let formula_ctx = unit_context(ctx.unit, ctx.catalog, ctx.equipment)?;
        let mounts = resolve_mounts(ctx.unit, ctx.equipment, &formula_ctx)?;
        let mut issues = Vec::new();
        for resolved in &mounts {
            let (mount, record) = (resolved.mount, resolved.record);
            let index = ctx
                .unit
                .equipment
                .iter()
                .position(|m| std::ptr::eq(m, mount))
                .unwrap_or_default();
            let mut locations = vec![mount.location];
            locations.extend(mount.split.map(|s| s.location));
            for location in locations {
                if !is_valid_location_for_equipment(record.restriction, &record.forbidden_locations, location) {
                    issues.push(
                        ValidationIssue::error(
                            self.id(),
                            self.category(),
                            format!("{} cannot be mounted in {location}", record.name()),
                        )
                        .at(equipment_path(index))
                        .expected_actual(record.restriction, location),
                    );
                }
            }
            for violation in validate_split(mount, resolved.resolved.slots) {
                issues.push(
                    ValidationIssue::error(
                        self.id(),
                        self.category(),
                        format!("{}: {violation}", record.name()),
                    )
                    .at(equipment_path(index)),
                );
            }
            if mount.rear_mounted && !mount.location.has_rear_armor() {
                issues.push(
                    ValidationIssue::error(
                        self.id(),
                        self.category(),
                        format!("{} cannot face rearward in {}", record.name(), mount.location),
                    )
                    .at(equipment_path(index)),
                );
            }
        }
        Ok(issues)
    }
}

/// Component lineage must suit the unit's tech base.
pub struct TechBaseCompatibility;

impl ValidationRule for TechBaseCompatibility {
    describe!(ids::TECH_BASE, "Tech base", TechBase, 60);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        Ok(tech_base_conflicts(ctx.unit, ctx.catalog, ctx.equipment)?
            .into_iter()
            .map(|conflict| {
                ValidationIssue::error(
                    self.id(),
                    self.category(),
                    format!(
                        "{} ({}) is {} technology on a {:?} unit",
                        conflict.name, conflict.source, conflict.tech_base, conflict.unit_mode
                    ),
                )
                .at(conflict.source.to_string())
                .suggest("Enable mixed tech or choose a compatible component")
            })
            .collect())
    }
}

/// Reports the effective rules level and enforces the configured cap.
pub struct RulesLevelCap;

impl ValidationRule for RulesLevelCap {
    describe!(ids::RULES_LEVEL, "Rules level", RulesLevel, 60);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        let level = effective_rules_level(ctx.unit, ctx.catalog, ctx.equipment)?;
        let mut issues = vec![ValidationIssue::info(
            self.id(),
            self.category(),
            format!("Effective rules level is {level}"),
        )];
        if let Some(max) = ctx.config.max_rules_level {
            for (source, name, item_level) in
                items_above_rules_level(ctx.unit, ctx.catalog, ctx.equipment, max)?
            {
                issues.push(
                    ValidationIssue::error(
                        self.id(),
                        self.category(),
                        format!("{name} ({source}) is {item_level}, above the {max} limit"),
                    )
                    .at(source.to_string())
                    .expected_actual(max, item_level),
                );
            }
        }
        Ok(issues)
    }
}

/// Nothing may be introduced after the unit's year.
pub struct EraAvailability;

impl ValidationRule for EraAvailability {
    describe!(ids::ERA, "Era availability", Era, 60);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        let Some(year) = ctx.year() else {
            return Ok(Vec::new());
        };
        Ok(unavailable_items(ctx.unit, ctx.catalog, ctx.equipment, year)?
            .into_iter()
            .map(|(source, name, introduced)| {
                ValidationIssue::error(
                    self.id(),
                    self.category(),
                    format!("{name} ({source}) is not available until {introduced}"),
                )
                .at(source.to_string())
                .expected_actual(format!("<= {year}"), introduced)
            })
            .collect())
    }
}

/// Enhancements that cannot be combined.
pub struct EnhancementCombinations;

const EXCLUSIVE_ENHANCEMENTS: [(MovementEnhancementType, MovementEnhancementType); 4] = [
    (MovementEnhancementType::MascInnerSphere, MovementEnhancementType::TripleStrengthMyomer),
    (MovementEnhancementType::MascClan, MovementEnhancementType::TripleStrengthMyomer),
    (MovementEnhancementType::MascInnerSphere, MovementEnhancementType::MascClan),
    (MovementEnhancementType::PartialWingInnerSphere, MovementEnhancementType::PartialWingClan),
];

impl ValidationRule for EnhancementCombinations {
    describe!(ids::ENHANCEMENTS, "Enhancement combinations", Movement, 70);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        let installed = &ctx.unit.movement.enhancements;
        Ok(EXCLUSIVE_ENHANCEMENTS
            .iter()
            .filter(|(a, b)| installed.contains(a) && installed.contains(b))
            .map(|(a, b)| {
                ValidationIssue::error(
                    self.id(),
                    self.category(),
                    format!("{a} cannot be combined with {b}"),
                )
                .at("movement/enhancements")
            })
            .collect())
    }
}

/// Heat generated by firing everything while running.
pub struct HeatBalance;

impl ValidationRule for HeatBalance {
    describe!(ids::HEAT, "Heat balance", Heat, 80);

    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>> {
        let profile = heat_profile(ctx.unit, ctx.catalog, ctx.equipment, MovementMode::Run)?;
        if profile.weapon_heat == 0 {
            return Ok(Vec::new());
        }
        let mut issues = vec![ValidationIssue::info(
            self.id(),
            self.category(),
            format!(
                "Firing every weapon while running: {} heat generated, {} dissipated, net {}",
                profile.generated(),
                profile.dissipation,
                profile.net_heat
            ),
        )];
        let net = u16::try_from(profile.net_heat.max(0)).unwrap_or(u16::MAX);
        if heat_effect(net).shutdown == HeatCheck::Automatic {
            issues.push(
                ValidationIssue::warning(
                    self.id(),
                    self.category(),
                    format!("Net heat {net} in one turn forces a shutdown"),
                )
                .suggest("Add heat sinks"),
            );
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, EngineType, StructureType};
    use crate::construction::construct;
    use crate::equipment::{EquipmentCategory, EquipmentRecord, StaticEquipmentLookup};
    use crate::tech::{ComponentBase, RulesLevel, TechBase, TechBaseMode};
    use crate::unit::{sample_unit, ArmorAllocation, DistributedPlacement, MountedEquipment, UnitSnapshot};
    use crate::allocation::PlacementRestriction;
    use crate::validation::{Severity, ValidatorConfig};
    use crate::math::Fixed;

    fn weapon(id: &str, weight: i32, slots: u8, heat: u16) -> EquipmentRecord {
        EquipmentRecord::new(
            id,
            ComponentBase::new(id, TechBase::InnerSphere, RulesLevel::Introductory, 2300),
            EquipmentCategory::EnergyWeapon,
            Fixed::from_num(weight),
            slots,
        )
        .with_stats(10_000, 50, heat, 5)
    }

    fn lookup() -> StaticEquipmentLookup {
        StaticEquipmentLookup::from_records(vec![
            weapon("ml", 1, 1, 3),
            weapon("ppc", 7, 3, 10),
            weapon("big", 40, 10, 0),
            weapon("sword", 3, 3, 0)
                .with_restriction(PlacementRestriction::ArmOnly)
                .with_flag(EquipmentFlag::RequiresHandActuator),
            EquipmentRecord::new(
                "clan-ml",
                ComponentBase::new("clan-ml", TechBase::Clan, RulesLevel::Standard, 2824),
                EquipmentCategory::EnergyWeapon,
                Fixed::ONE,
                1,
            ),
        ])
    }

    fn check_with(rule: &dyn ValidationRule, unit: &UnitSnapshot, config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let construction = construct(unit, catalog()).unwrap();
        let lookup = lookup();
        let ctx = ValidationContext {
            unit,
            catalog: catalog(),
            equipment: &lookup,
            construction: &construction,
            config,
        };
        rule.check(&ctx).unwrap()
    }

    fn check(rule: &dyn ValidationRule, unit: &UnitSnapshot) -> Vec<ValidationIssue> {
        check_with(rule, unit, &ValidatorConfig::default())
    }

    fn errors(issues: &[ValidationIssue]) -> usize {
        issues.iter().filter(|i| i.severity == Severity::Error).count()
    }

    #[test]
    fn test_rule_ids_unique() {
        let rules = standard_rules();
        let mut seen: Vec<&str> = rules.iter().map(|r| r.id()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), rules.len());
    }

    #[test]
    fn test_reference_unit_has_no_errors() {
        let unit = sample_unit();
        for rule in standard_rules() {
            let issues = check(rule.as_ref(), &unit);
            assert_eq!(errors(&issues), 0, "{}: {issues:?}", rule.id());
        }
    }

    #[test]
    fn test_construction_errors_surface() {
        let mut unit = sample_unit();
        unit.heat_sinks.count = 8;
        let issues = check(&ConstructionSteps, &unit);
        assert_eq!(errors(&issues), 1);
        assert_eq!(issues[0].path.as_deref(), Some("construction/Heat Sinks"));
    }

    #[test]
    fn test_weight_budget() {
        let mut unit = sample_unit();
        let info = check(&WeightBudget, &unit);
        assert_eq!(info[0].severity, Severity::Info);
        assert!(info[0].message.starts_with("16.5"));

        unit.equipment.push(MountedEquipment::new("big", MechLocation::LeftTorso));
        let over = check(&WeightBudget, &unit);
        assert_eq!(over[0].severity, Severity::Error);
        assert_eq!(over[0].actual.as_deref(), Some("73.5"));
    }

    #[test]
    fn test_armor_rules_are_repairable() {
        let mut unit = sample_unit();
        unit.armor.allocation.insert(MechLocation::Head, ArmorAllocation::front(10));
        unit.armor.allocation.insert(MechLocation::LeftArm, ArmorAllocation::split(-1, 2));
        let max = check(&ArmorLocationMaximum, &unit);
        assert_eq!(max.len(), 1);
        assert!(max[0].auto_repairable);
        assert_eq!(max[0].path.as_deref(), Some("armor/HD"));
        assert_eq!(check(&NegativeArmor, &unit).len(), 1);
        assert_eq!(check(&RearArmor, &unit).len(), 1);
    }

    #[test]
    fn test_slot_capacity() {
        let mut unit = sample_unit();
        // arm has 8 free slots
        for _ in 0..3 {
            unit.equipment.push(MountedEquipment::new("ppc", MechLocation::RightArm));
        }
        let issues = check(&SlotCapacity, &unit);
        assert_eq!(errors(&issues), 1);
        assert!(issues[0].message.contains("13 of 12"));
        assert_eq!(issues[0].path.as_deref(), Some("Right Arm"));
        assert!(issues[0]
            .suggestion
            .as_deref()
            .is_some_and(|s| s.contains("8 slots free")));
    }

    #[test]
    fn test_distributed_slots() {
        let mut unit = sample_unit();
        unit.structure = StructureType::EndoSteelInnerSphere;
        let missing = check(&DistributedSlots, &unit);
        assert_eq!(errors(&missing), 1);

        unit.distributed = [
            (MechLocation::LeftTorso, 4),
            (MechLocation::RightTorso, 4),
            (MechLocation::LeftLeg, 2),
            (MechLocation::RightLeg, 2),
            (MechLocation::LeftArm, 1),
            (MechLocation::RightArm, 1),
        ]
        .into_iter()
        .map(|(location, slots)| DistributedPlacement {
            item: DistributedItem::Structure,
            location,
            slots,
        })
        .collect();
        assert!(check(&DistributedSlots, &unit).is_empty());

        unit.distributed.push(DistributedPlacement {
            item: DistributedItem::JumpJets,
            location: MechLocation::LeftLeg,
            slots: 1,
        });
        let stray = check(&DistributedSlots, &unit);
        assert_eq!(stray.len(), 1);
        assert!(stray[0].message.contains("jump jets"));
    }

    #[test]
    fn test_actuators() {
        let mut unit = sample_unit();
        unit.actuators.left_arm.lower_arm = false;
        assert_eq!(check(&ArmActuatorLayout, &unit).len(), 1);

        unit.actuators.left_arm.hand = false;
        unit.equipment.push(MountedEquipment::new("sword", MechLocation::LeftArm));
        let issues = check(&ArmActuatorLayout, &unit);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("hand"));
    }

    #[test]
    fn test_equipment_rules() {
        let mut unit = sample_unit();
        unit.equipment = vec![
            MountedEquipment::new("nope", MechLocation::LeftArm),
            MountedEquipment::new("sword", MechLocation::LeftTorso),
            MountedEquipment::new("ml", MechLocation::LeftArm).rear(),
        ];
        let unknown = check(&KnownEquipment, &unit);
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].path.as_deref(), Some("equipment/0"));

        let placement = check(&EquipmentPlacement, &unit);
        assert_eq!(placement.len(), 2);
        assert_eq!(placement[0].path.as_deref(), Some("equipment/1"));
        assert_eq!(placement[1].path.as_deref(), Some("equipment/2"));
    }

    #[test]
    fn test_split_placement() {
        let mut unit = sample_unit();
        unit.equipment = vec![MountedEquipment::new("ppc", MechLocation::LeftArm)
            .split_into(MechLocation::RightTorso, 1)];
        let issues = check(&EquipmentPlacement, &unit);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("not adjacent"));
    }

    #[test]
    fn test_tech_rules() {
        let mut unit = sample_unit();
        unit.engine.engine_type = EngineType::XlInnerSphere;
        unit.equipment.push(MountedEquipment::new("clan-ml", MechLocation::RightArm));
        assert_eq!(check(&TechBaseCompatibility, &unit).len(), 1);
        unit.tech_base_mode = TechBaseMode::Mixed(TechBase::InnerSphere);
        assert!(check(&TechBaseCompatibility, &unit).is_empty());

        let config = ValidatorConfig {
            max_rules_level: Some(RulesLevel::Introductory),
            year: Some(2500),
            ..ValidatorConfig::default()
        };
        let levels = check_with(&RulesLevelCap, &unit, &config);
        assert_eq!(levels[0].severity, Severity::Info);
        assert_eq!(errors(&levels), 2);
        let era = check_with(&EraAvailability, &unit, &config);
        assert_eq!(errors(&era), 2);
        assert!(check(&EraAvailability, &unit).is_empty());
    }

    #[test]
    fn test_enhancement_combinations() {
        let mut unit = sample_unit();
        unit.movement.enhancements = vec![
            MovementEnhancementType::MascInnerSphere,
            MovementEnhancementType::TripleStrengthMyomer,
        ];
        assert_eq!(check(&EnhancementCombinations, &unit).len(), 1);
        unit.movement.enhancements = vec![
            MovementEnhancementType::MascInnerSphere,
            MovementEnhancementType::Supercharger,
        ];
        assert!(check(&EnhancementCombinations, &unit).is_empty());
    }

    #[test]
    fn test_heat_balance() {
        let mut unit = sample_unit();
        assert!(check(&HeatBalance, &unit).is_empty());
        unit.equipment = vec![MountedEquipment::new("ppc", MechLocation::RightArm)];
        let issues = check(&HeatBalance, &unit);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);
        unit.equipment = (0..4)
            .map(|_| MountedEquipment::new("ppc", MechLocation::LeftTorso))
            .collect();
        let hot = check(&HeatBalance, &unit);
        assert_eq!(hot.len(), 2);
        assert_eq!(hot[1].severity, Severity::Warning);
    }
}
