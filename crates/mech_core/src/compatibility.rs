//! Tech-base compatibility, rules level and era availability.
//!
//! All three checks work over anything with a [`ComponentBase`], so
//! structural components and mounted equipment go through the same code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{ComponentCatalog, ComponentType};
use crate::equipment::EquipmentLookup;
use crate::error::Result;
use crate::tech::{ComponentBase, RulesLevel, TechBase, TechBaseMode, TechRated};
use crate::unit::UnitSnapshot;

/// Where a rated item came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemSource {
    /// A structural component selection.
    Component(ComponentType),
    /// A mounted equipment record, by id.
    Equipment(String),
}

impl fmt::Display for ItemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component(t) => write!(f, "{} {t}", t.category()),
            Self::Equipment(id) => write!(f, "equipment {id}"),
        }
    }
}

/// Whether a component of `component` lineage is legal on a unit in `mode`.
///
/// Same lineage is legal, mixed tech allows anything, and Clan units may
/// carry Inner Sphere technology.
#[must_use]
pub const fn is_compatible(mode: TechBaseMode, component: TechBase) -> bool {
    match mode {
        TechBaseMode::Mixed(_) | TechBaseMode::Clan => true,
        TechBaseMode::InnerSphere => matches!(component, TechBase::InnerSphere),
    }
}

/// Every rated item on a unit: structural selections, then known equipment.
///
/// Unknown equipment ids are skipped.
pub fn rated_items<'a>(
    unit: &UnitSnapshot,
    catalog: &'a ComponentCatalog,
    lookup: &'a dyn EquipmentLookup,
) -> Result<Vec<(ItemSource, &'a ComponentBase)>> {
    let mut items = Vec::new();
    for component in unit.selected_components() {
        items.push((ItemSource::Component(component), catalog.base(component)?));
    }
    for mount in &unit.equipment {
        if let Some(record) = lookup.get_by_id(&mount.equipment_id) {
            items.push((ItemSource::Equipment(record.id.clone()), record.base()));
        }
    }
    Ok(items)
}

/// An item whose lineage is illegal on the unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechBaseConflict {
    /// The offending item.
    pub source: ItemSource,
    /// Its display name.
    pub name: String,
    /// Its lineage.
    pub tech_base: TechBase,
    /// The unit's mode.
    pub unit_mode: TechBaseMode,
}

/// Every tech-base conflict on a unit.
pub fn tech_base_conflicts(
    unit: &UnitSnapshot,
    catalog: &ComponentCatalog,
    lookup: &dyn EquipmentLookup,
) -> Result<Vec<TechBaseConflict>> {
    Ok(rated_items(unit, catalog, lookup)?
        .into_iter()
        .filter(|(_, base)| !is_compatible(unit.tech_base_mode, base.tech_base))
        .map(|(source, base)| TechBaseConflict {
            source,
            name: base.name.clone(),
            tech_base: base.tech_base,
            unit_mode: unit.tech_base_mode,
        })
        .collect())
}

/// Highest rules level across every selected item.
pub fn effective_rules_level(
    unit: &UnitSnapshot,
    catalog: &ComponentCatalog,
    lookup: &dyn EquipmentLookup,
) -> Result<RulesLevel> {
    Ok(rated_items(unit, catalog, lookup)?
        .iter()
        .map(|(_, base)| base.rules_level)
        .max()
        .unwrap_or_default())
}

/// Items above a rules level, with their level.
pub fn items_above_rules_level(
    unit: &UnitSnapshot,
    catalog: &ComponentCatalog,
    lookup: &dyn EquipmentLookup,
    max: RulesLevel,
) -> Result<Vec<(ItemSource, String, RulesLevel)>> {
    Ok(rated_items(unit, catalog, lookup)?
        .into_iter()
        .filter(|(_, base)| base.rules_level > max)
        .map(|(source, base)| (source, base.name.clone(), base.rules_level))
        .collect())
}

/// Items not yet introduced in `year`, with their introduction year.
pub fn unavailable_items(
    unit: &UnitSnapshot,
    catalog: &ComponentCatalog,
    lookup: &dyn EquipmentLookup,
    year: u16,
) -> Result<Vec<(ItemSource, String, u16)>> {
    Ok(rated_items(unit, catalog, lookup)?
        .into_iter()
        .filter(|(_, base)| !base.available_in(year))
        .map(|(source, base)| (source, base.name.clone(), base.introduction_year))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, EngineType, HeatSinkType};
    use crate::equipment::{EquipmentCategory, EquipmentRecord, StaticEquipmentLookup};
    use crate::location::MechLocation;
    use crate::math::Fixed;
    use crate::unit::{sample_unit, MountedEquipment};

    #[test]
    fn test_compatibility_matrix() {
        use TechBase::{Clan, InnerSphere};
        assert!(is_compatible(TechBaseMode::InnerSphere, InnerSphere));
        assert!(!is_compatible(TechBaseMode::InnerSphere, Clan));
        assert!(is_compatible(TechBaseMode::Clan, Clan));
        assert!(is_compatible(TechBaseMode::Clan, InnerSphere));
        assert!(is_compatible(TechBaseMode::Mixed(InnerSphere), Clan));
    }

    #[test]
    fn test_inner_sphere_unit_with_clan_parts() {
        let mut unit = sample_unit();
        unit.engine.engine_type = EngineType::XlClan;
        unit.heat_sinks.heat_sink_type = HeatSinkType::DoubleClan;
        let lookup = StaticEquipmentLookup::new();
        let conflicts = tech_base_conflicts(&unit, catalog(), &lookup).unwrap();
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts
            .iter()
            .any(|c| c.source == ItemSource::Component(ComponentType::Engine(EngineType::XlClan))));

        unit.tech_base_mode = TechBaseMode::Mixed(TechBase::InnerSphere);
        assert!(tech_base_conflicts(&unit, catalog(), &lookup).unwrap().is_empty());
    }

    #[test]
    fn test_equipment_is_checked() {
        let mut unit = sample_unit();
        unit.equipment
            .push(MountedEquipment::new("er-ml-clan", MechLocation::RightArm));
        let lookup = StaticEquipmentLookup::from_records(vec![EquipmentRecord::new(
            "er-ml-clan",
            ComponentBase::new("ER Medium Laser (Clan)", TechBase::Clan, RulesLevel::Standard, 2824),
            EquipmentCategory::EnergyWeapon,
            Fixed::ONE,
            1,
        )]);
        let conflicts = tech_base_conflicts(&unit, catalog(), &lookup).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].source, ItemSource::Equipment("er-ml-clan".to_string()));
        assert_eq!(
            effective_rules_level(&unit, catalog(), &lookup).unwrap(),
            RulesLevel::Standard
        );
    }

    #[test]
    fn test_effective_rules_level() {
        let mut unit = sample_unit();
        let lookup = StaticEquipmentLookup::new();
        assert_eq!(
            effective_rules_level(&unit, catalog(), &lookup).unwrap(),
            RulesLevel::Introductory
        );
        unit.engine.engine_type = EngineType::XxlInnerSphere;
        assert_eq!(
            effective_rules_level(&unit, catalog(), &lookup).unwrap(),
            RulesLevel::Experimental
        );
        let above = items_above_rules_level(&unit, catalog(), &lookup, RulesLevel::Standard).unwrap();
        assert_eq!(above.len(), 1);
    }

    #[test]
    fn test_unavailable_items() {
        let mut unit = sample_unit();
        unit.engine.engine_type = EngineType::XlInnerSphere;
        let lookup = StaticEquipmentLookup::new();
        assert_eq!(unavailable_items(&unit, catalog(), &lookup, 3025).unwrap().len(), 0);
        let early = unavailable_items(&unit, catalog(), &lookup, 2500).unwrap();
        assert_eq!(early.len(), 1);
        assert_eq!(early[0].2, 2579);
    }
}
