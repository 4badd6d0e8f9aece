//! Mounted-equipment records and the lookup service that supplies them.
//!
//! Equipment data is loaded outside this crate; the engine only depends on
//! the [`EquipmentLookup`] capability. [`StaticEquipmentLookup`] is the
//! in-memory implementation used by tools and tests, loadable from RON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::allocation::PlacementRestriction;
use crate::error::{MechError, Result};
use crate::formula::{EvaluationContext, FormulaSet};
use crate::location::MechLocation;
use crate::math::{fixed_serde, saturating_fixed, Fixed};
use crate::tech::{ComponentBase, TechRated};

/// Broad equipment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentCategory {
    /// Lasers, PPCs and other energy weapons.
    EnergyWeapon,
    /// Autocannons, gauss rifles, machine guns.
    BallisticWeapon,
    /// Missile launchers.
    MissileWeapon,
    /// Artillery pieces.
    ArtilleryWeapon,
    /// Melee weapons.
    PhysicalWeapon,
    /// Ammunition bins.
    Ammunition,
    /// Electronics (ECM, probes, targeting computers).
    Electronics,
    /// Everything else.
    Misc,
}

impl EquipmentCategory {
    /// Categories that count as weapons.
    pub const WEAPONS: [EquipmentCategory; 5] = [
        EquipmentCategory::EnergyWeapon,
        EquipmentCategory::BallisticWeapon,
        EquipmentCategory::MissileWeapon,
        EquipmentCategory::ArtilleryWeapon,
        EquipmentCategory::PhysicalWeapon,
    ];

    /// Whether this category is a weapon.
    #[must_use]
    pub fn is_weapon(self) -> bool {
        Self::WEAPONS.contains(&self)
    }

    /// Whether this category is direct fire (energy or ballistic).
    #[must_use]
    pub const fn is_direct_fire(self) -> bool {
        matches!(self, Self::EnergyWeapon | Self::BallisticWeapon)
    }
}

/// Behavioral flags on an equipment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentFlag {
    /// A targeting computer.
    TargetingComputer,
    /// Defensive electronics (ECM, anti-missile systems).
    DefensiveElectronics,
    /// Requires a hand actuator in the mounting arm.
    RequiresHandActuator,
    /// Requires a lower arm actuator in the mounting arm.
    RequiresLowerArmActuator,
}

/// An equipment record as supplied by the lookup service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    /// Stable identifier.
    pub id: String,
    /// Shared metadata (name, tech base, rules level, year).
    pub base: ComponentBase,
    /// Category.
    pub category: EquipmentCategory,
    /// Weight in tons; ignored when `formulas` is set.
    #[serde(with = "fixed_serde")]
    pub weight: Fixed,
    /// Critical slots; ignored when `formulas` is set.
    pub critical_slots: u8,
    /// Cost.
    #[serde(default)]
    pub cost: u32,
    /// Base battle value.
    #[serde(default)]
    pub battle_value: u32,
    /// Heat generated per firing.
    #[serde(default)]
    pub heat: u16,
    /// Damage per hit.
    #[serde(default)]
    pub damage: u16,
    /// Placement restriction.
    #[serde(default)]
    pub restriction: PlacementRestriction,
    /// Locations that are always illegal, regardless of restriction.
    #[serde(default)]
    pub forbidden_locations: Vec<MechLocation>,
    /// Behavioral flags.
    #[serde(default)]
    pub flags: Vec<EquipmentFlag>,
    /// Formulas for variable-size equipment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formulas: Option<FormulaSet>,
}

impl TechRated for EquipmentRecord {
    fn base(&self) -> &ComponentBase {
        &self.base
    }
}

/// Weight, slots, cost and damage of one mounted item for a specific unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEquipment {
    /// Weight in tons.
    pub weight: Fixed,
    /// Critical slots.
    pub slots: u8,
    /// Cost.
    pub cost: Fixed,
    /// Damage.
    pub damage: Fixed,
}

impl EquipmentRecord {
    /// Create a fixed-size record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        base: ComponentBase,
        category: EquipmentCategory,
        weight: Fixed,
        critical_slots: u8,
    ) -> Self {
        Self {
            id: id.into(),
            base,
            category,
            weight,
            critical_slots,
            cost: 0,
            battle_value: 0,
            heat: 0,
            damage: 0,
            restriction: PlacementRestriction::Any,
            forbidden_locations: Vec::new(),
            flags: Vec::new(),
            formulas: None,
        }
    }

    /// Builder method to set cost, battle value, heat and damage.
    #[must_use]
    pub fn with_stats(mut self, cost: u32, battle_value: u32, heat: u16, damage: u16) -> Self {
        self.cost = cost;
        self.battle_value = battle_value;
        self.heat = heat;
        self.damage = damage;
        self
    }

    /// Builder method to set the placement restriction.
    #[must_use]
    pub fn with_restriction(mut self, restriction: PlacementRestriction) -> Self {
        self.restriction = restriction;
        self
    }

    /// Builder method to forbid locations.
    #[must_use]
    pub fn with_forbidden(mut self, locations: Vec<MechLocation>) -> Self {
        self.forbidden_locations = locations;
        self
    }

    /// Builder method to add a flag.
    #[must_use]
    pub fn with_flag(mut self, flag: EquipmentFlag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Builder method to make the record variable-size.
    #[must_use]
    pub fn with_formulas(mut self, formulas: FormulaSet) -> Self {
        self.formulas = Some(formulas);
        self
    }

    /// Whether a flag is set.
    #[must_use]
    pub fn has_flag(&self, flag: EquipmentFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.base.name
    }

    /// Whether the record's size depends on the unit.
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.formulas.is_some()
    }

    /// Weight, slots, cost and damage for the unit described by `ctx`.
    ///
    /// Fixed-size records ignore the context.
    pub fn resolve(&self, ctx: &EvaluationContext) -> Result<ResolvedEquipment> {
        match &self.formulas {
            None => Ok(ResolvedEquipment {
                weight: self.weight,
                slots: self.critical_slots,
                cost: saturating_fixed(self.cost),
                damage: Fixed::from_num(self.damage),
            }),
            Some(set) => {
                let out = set.evaluate(ctx)?;
                Ok(ResolvedEquipment {
                    weight: out.weight,
                    slots: out.slots,
                    cost: out.cost.unwrap_or_else(|| saturating_fixed(self.cost)),
                    damage: out.damage.unwrap_or_else(|| Fixed::from_num(self.damage)),
                })
            }
        }
    }
}

/// Read-only equipment lookup capability.
pub trait EquipmentLookup: Send + Sync {
    /// Record by id.
    fn get_by_id(&self, id: &str) -> Option<&EquipmentRecord>;

    /// All records of a category, sorted by id.
    fn get_by_category(&self, category: EquipmentCategory) -> Vec<&EquipmentRecord>;

    /// All weapon records, sorted by id.
    fn get_all_weapons(&self) -> Vec<&EquipmentRecord> {
        let mut weapons: Vec<&EquipmentRecord> = EquipmentCategory::WEAPONS
            .iter()
            .flat_map(|c| self.get_by_category(*c))
            .collect();
        weapons.sort_by(|a, b| a.id.cmp(&b.id));
        weapons
    }

    /// Record by id, failing loudly when absent.
    fn require(&self, id: &str) -> Result<&EquipmentRecord> {
        self.get_by_id(id)
            .ok_or_else(|| MechError::UnknownEquipment(id.to_string()))
    }
}

/// In-memory equipment lookup indexed by id.
#[derive(Debug, Clone, Default)]
pub struct StaticEquipmentLookup {
    records: HashMap<String, EquipmentRecord>,
}

impl StaticEquipmentLookup {
    /// Create an empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lookup from records; later duplicates replace earlier ones.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = EquipmentRecord>) -> Self {
        let mut lookup = Self::new();
        for record in records {
            lookup.register(record);
        }
        lookup
    }

    /// Parse a RON list of records.
    ///
    /// # Errors
    ///
    /// Returns [`MechError::DataParseError`] if the text is not a valid record list.
    pub fn from_ron_str(label: &str, text: &str) -> Result<Self> {
        let records: Vec<EquipmentRecord> =
            ron::from_str(text).map_err(|e| MechError::DataParseError {
                path: label.to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!(count = records.len(), source = label, "loaded equipment records");
        Ok(Self::from_records(records))
    }

    /// Register a record.
    pub fn register(&mut self, record: EquipmentRecord) {
        self.records.insert(record.id.clone(), record);
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl EquipmentLookup for StaticEquipmentLookup {
    fn get_by_id(&self, id: &str) -> Option<&EquipmentRecord> {
        self.records.get(id)
    }

    fn get_by_category(&self, category: EquipmentCategory) -> Vec<&EquipmentRecord> {
        let mut out: Vec<&EquipmentRecord> = self
            .records
            .values()
            .filter(|r| r.category == category)
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{fields, Formula};
    use crate::tech::{RulesLevel, TechBase};

    fn base(name: &str) -> ComponentBase {
        ComponentBase::new(name, TechBase::InnerSphere, RulesLevel::Introductory, 2300)
    }

    fn lookup() -> StaticEquipmentLookup {
        StaticEquipmentLookup::from_records(vec![
            EquipmentRecord::new("medium-laser", base("Medium Laser"), EquipmentCategory::EnergyWeapon, Fixed::ONE, 1)
                .with_stats(40_000, 46, 3, 5),
            EquipmentRecord::new("ac-20", base("AC/20"), EquipmentCategory::BallisticWeapon, Fixed::from_num(14), 10)
                .with_stats(300_000, 178, 7, 20),
            EquipmentRecord::new("srm-6", base("SRM 6"), EquipmentCategory::MissileWeapon, Fixed::from_num(3), 2)
                .with_stats(80_000, 59, 4, 2),
            EquipmentRecord::new("ecm", base("Guardian ECM"), EquipmentCategory::Electronics, ratio_half(3), 2)
                .with_flag(EquipmentFlag::DefensiveElectronics),
        ])
    }

    fn ratio_half(n: i32) -> Fixed {
        crate::math::ratio(n, 2)
    }

    #[test]
    fn test_get_by_id() {
        let lookup = lookup();
        assert_eq!(lookup.get_by_id("ac-20").unwrap().critical_slots, 10);
        assert!(lookup.get_by_id("gauss").is_none());
        assert_eq!(
            lookup.require("gauss").unwrap_err(),
            MechError::UnknownEquipment("gauss".to_string())
        );
    }

    #[test]
    fn test_get_all_weapons() {
        let lookup = lookup();
        let ids: Vec<&str> = lookup.get_all_weapons().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["ac-20", "medium-laser", "srm-6"]);
        assert_eq!(lookup.get_by_category(EquipmentCategory::Electronics).len(), 1);
    }

    #[test]
    fn test_category_predicates() {
        assert!(EquipmentCategory::BallisticWeapon.is_direct_fire());
        assert!(!EquipmentCategory::MissileWeapon.is_direct_fire());
        assert!(EquipmentCategory::PhysicalWeapon.is_weapon());
        assert!(!EquipmentCategory::Ammunition.is_weapon());
    }

    #[test]
    fn test_resolve_fixed_and_variable() {
        let ctx = EvaluationContext::for_tonnage(60);
        let laser = lookup().get_by_id("medium-laser").cloned().unwrap();
        let resolved = laser.resolve(&ctx).unwrap();
        assert_eq!(resolved.weight, Fixed::ONE);
        assert_eq!(resolved.damage, Fixed::from_num(5));

        let hatchet = EquipmentRecord::new("hatchet", base("Hatchet"), EquipmentCategory::PhysicalWeapon, Fixed::ZERO, 0)
            .with_formulas(
                FormulaSet::new(Formula::ceil_divide(fields::TONNAGE, 15), Formula::EqualsWeight)
                    .with_damage(Formula::floor_divide(fields::TONNAGE, 5)),
            );
        let resolved = hatchet.resolve(&ctx).unwrap();
        assert_eq!(resolved.weight, Fixed::from_num(4));
        assert_eq!(resolved.slots, 4);
        assert_eq!(resolved.damage, Fixed::from_num(12));
    }

    #[test]
    fn test_from_ron() {
        let text = r#"[
            (
                id: "small-laser",
                base: (name: "Small Laser", tech_base: InnerSphere, rules_level: Introductory, introduction_year: 2400),
                category: EnergyWeapon,
                weight: 0.5,
                critical_slots: 1,
                battle_value: 9,
                heat: 1,
                damage: 3,
            ),
        ]"#;
        let lookup = StaticEquipmentLookup::from_ron_str("inline", text).unwrap();
        let record = lookup.get_by_id("small-laser").unwrap();
        assert_eq!(record.weight, crate::math::ratio(1, 2));
        assert_eq!(record.restriction, PlacementRestriction::Any);
    }

    #[test]
    fn test_from_ron_rejects_garbage() {
        let err = StaticEquipmentLookup::from_ron_str("broken.ron", "[ (id: ").unwrap_err();
        assert!(matches!(err, MechError::DataParseError { .. }));
    }
}
