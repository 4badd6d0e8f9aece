//! Canonical structural component catalog.
//!
//! Definitions are built once from static tables, indexed by type tag and
//! never mutated afterwards. [`catalog()`] returns the process-wide
//! instance; [`ComponentCatalog::standard()`] builds a private copy.

mod armor;
mod cockpit;
mod engine;
mod gyro;
mod heat_sink;
mod movement;
mod structure;

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, Result};
use crate::tech::{ComponentBase, TechRated};

pub use armor::{ArmorDefinition, ArmorType};
pub use cockpit::{CockpitDefinition, CockpitType};
pub use engine::{is_valid_rating, standard_weight, EngineDefinition, EngineType, MAX_RATING, MIN_RATING};
pub use gyro::{gyro_base_formula, GyroDefinition, GyroType};
pub use heat_sink::{HeatSinkDefinition, HeatSinkType};
pub use movement::{MovementEnhancementDefinition, MovementEnhancementType};
pub use structure::{StructureDefinition, StructureType};

/// Structural component category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentCategory {
    /// Engines.
    Engine,
    /// Gyros.
    Gyro,
    /// Internal structure.
    Structure,
    /// Armor.
    Armor,
    /// Cockpits.
    Cockpit,
    /// Heat sinks.
    HeatSink,
    /// Movement enhancements.
    MovementEnhancement,
}

impl ComponentCategory {
    /// Every category, in pipeline order.
    pub const ALL: [ComponentCategory; 7] = [
        ComponentCategory::Structure,
        ComponentCategory::Engine,
        ComponentCategory::Gyro,
        ComponentCategory::Cockpit,
        ComponentCategory::HeatSink,
        ComponentCategory::Armor,
        ComponentCategory::MovementEnhancement,
    ];
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Engine => "engine",
            Self::Gyro => "gyro",
            Self::Structure => "structure",
            Self::Armor => "armor",
            Self::Cockpit => "cockpit",
            Self::HeatSink => "heat sink",
            Self::MovementEnhancement => "movement enhancement",
        };
        f.write_str(name)
    }
}

/// A type tag from any category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    /// Engine type.
    Engine(EngineType),
    /// Gyro type.
    Gyro(GyroType),
    /// Structure type.
    Structure(StructureType),
    /// Armor type.
    Armor(ArmorType),
    /// Cockpit type.
    Cockpit(CockpitType),
    /// Heat sink type.
    HeatSink(HeatSinkType),
    /// Movement enhancement type.
    MovementEnhancement(MovementEnhancementType),
}

impl ComponentType {
    /// Category the tag belongs to.
    #[must_use]
    pub const fn category(self) -> ComponentCategory {
        match self {
            Self::Engine(_) => ComponentCategory::Engine,
            Self::Gyro(_) => ComponentCategory::Gyro,
            Self::Structure(_) => ComponentCategory::Structure,
            Self::Armor(_) => ComponentCategory::Armor,
            Self::Cockpit(_) => ComponentCategory::Cockpit,
            Self::HeatSink(_) => ComponentCategory::HeatSink,
            Self::MovementEnhancement(_) => ComponentCategory::MovementEnhancement,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(t) => fmt::Display::fmt(t, f),
            Self::Gyro(t) => fmt::Display::fmt(t, f),
            Self::Structure(t) => fmt::Display::fmt(t, f),
            Self::Armor(t) => fmt::Display::fmt(t, f),
            Self::Cockpit(t) => fmt::Display::fmt(t, f),
            Self::HeatSink(t) => fmt::Display::fmt(t, f),
            Self::MovementEnhancement(t) => fmt::Display::fmt(t, f),
        }
    }
}

/// A borrowed catalog definition of any category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentDefinition<'a> {
    /// Engine definition.
    Engine(&'a EngineDefinition),
    /// Gyro definition.
    Gyro(&'a GyroDefinition),
    /// Structure definition.
    Structure(&'a StructureDefinition),
    /// Armor definition.
    Armor(&'a ArmorDefinition),
    /// Cockpit definition.
    Cockpit(&'a CockpitDefinition),
    /// Heat sink definition.
    HeatSink(&'a HeatSinkDefinition),
    /// Movement enhancement definition.
    MovementEnhancement(&'a MovementEnhancementDefinition),
}

impl TechRated for ComponentDefinition<'_> {
    fn base(&self) -> &ComponentBase {
        match self {
            Self::Engine(d) => d.base(),
            Self::Gyro(d) => d.base(),
            Self::Structure(d) => d.base(),
            Self::Armor(d) => d.base(),
            Self::Cockpit(d) => d.base(),
            Self::HeatSink(d) => d.base(),
            Self::MovementEnhancement(d) => d.base(),
        }
    }
}

/// Registry of all structural component definitions, indexed by type tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentCatalog {
    engines: HashMap<EngineType, EngineDefinition>,
    gyros: HashMap<GyroType, GyroDefinition>,
    structures: HashMap<StructureType, StructureDefinition>,
    armors: HashMap<ArmorType, ArmorDefinition>,
    cockpits: HashMap<CockpitType, CockpitDefinition>,
    heat_sinks: HashMap<HeatSinkType, HeatSinkDefinition>,
    enhancements: HashMap<MovementEnhancementType, MovementEnhancementDefinition>,
}

static CATALOG: OnceLock<ComponentCatalog> = OnceLock::new();

/// The process-wide catalog, built on first access.
pub fn catalog() -> &'static ComponentCatalog {
    CATALOG.get_or_init(ComponentCatalog::standard)
}

fn lookup<'a, K, V>(map: &'a HashMap<K, V>, category: ComponentCategory, key: K) -> Result<&'a V>
where
    K: std::hash::Hash + Eq + Copy + fmt::Display,
{
    map.get(&key).ok_or_else(|| {
        tracing::warn!(%category, type_name = %key, "catalog lookup failed");
        MechError::unknown_component(category.to_string(), key)
    })
}

impl ComponentCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the catalog from the canonical rulebook tables.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for def in engine::definitions() {
            catalog.register_engine(def);
        }
        for def in gyro::definitions() {
            catalog.register_gyro(def);
        }
        for def in structure::definitions() {
            catalog.register_structure(def);
        }
        for def in armor::definitions() {
            catalog.register_armor(def);
        }
        for def in cockpit::definitions() {
            catalog.register_cockpit(def);
        }
        for def in heat_sink::definitions() {
            catalog.register_heat_sink(def);
        }
        for def in movement::definitions() {
            catalog.register_enhancement(def);
        }
        tracing::debug!(entries = catalog.len(), "component catalog built");
        catalog
    }

    /// Register an engine definition.
    pub fn register_engine(&mut self, def: EngineDefinition) {
        self.engines.insert(def.engine_type, def);
    }

    /// Register a gyro definition.
    pub fn register_gyro(&mut self, def: GyroDefinition) {
        self.gyros.insert(def.gyro_type, def);
    }

    /// Register a structure definition.
    pub fn register_structure(&mut self, def: StructureDefinition) {
        self.structures.insert(def.structure_type, def);
    }

    /// Register an armor definition.
    pub fn register_armor(&mut self, def: ArmorDefinition) {
        self.armors.insert(def.armor_type, def);
    }

    /// Register a cockpit definition.
    pub fn register_cockpit(&mut self, def: CockpitDefinition) {
        self.cockpits.insert(def.cockpit_type, def);
    }

    /// Register a heat sink definition.
    pub fn register_heat_sink(&mut self, def: HeatSinkDefinition) {
        self.heat_sinks.insert(def.heat_sink_type, def);
    }

    /// Register a movement enhancement definition.
    pub fn register_enhancement(&mut self, def: MovementEnhancementDefinition) {
        self.enhancements.insert(def.enhancement_type, def);
    }

    /// Total number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.engines.len()
            + self.gyros.len()
            + self.structures.len()
            + self.armors.len()
            + self.cockpits.len()
            + self.heat_sinks.len()
            + self.enhancements.len()
    }

    /// Whether the catalog has no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Engine definition by type.
    pub fn engine(&self, t: EngineType) -> Result<&EngineDefinition> {
        lookup(&self.engines, ComponentCategory::Engine, t)
    }

    /// Gyro definition by type.
    pub fn gyro(&self, t: GyroType) -> Result<&GyroDefinition> {
        lookup(&self.gyros, ComponentCategory::Gyro, t)
    }

    /// Structure definition by type.
    pub fn structure(&self, t: StructureType) -> Result<&StructureDefinition> {
        lookup(&self.structures, ComponentCategory::Structure, t)
    }

    /// Armor definition by type.
    pub fn armor(&self, t: ArmorType) -> Result<&ArmorDefinition> {
        lookup(&self.armors, ComponentCategory::Armor, t)
    }

    /// Cockpit definition by type.
    pub fn cockpit(&self, t: CockpitType) -> Result<&CockpitDefinition> {
        lookup(&self.cockpits, ComponentCategory::Cockpit, t)
    }

    /// Heat sink definition by type.
    pub fn heat_sink(&self, t: HeatSinkType) -> Result<&HeatSinkDefinition> {
        lookup(&self.heat_sinks, ComponentCategory::HeatSink, t)
    }

    /// Movement enhancement definition by type.
    pub fn enhancement(&self, t: MovementEnhancementType) -> Result<&MovementEnhancementDefinition> {
        lookup(&self.enhancements, ComponentCategory::MovementEnhancement, t)
    }

    /// Definition for any type tag.
    pub fn get_definition(&self, t: ComponentType) -> Result<ComponentDefinition<'_>> {
        Ok(match t {
            ComponentType::Engine(t) => ComponentDefinition::Engine(self.engine(t)?),
            ComponentType::Gyro(t) => ComponentDefinition::Gyro(self.gyro(t)?),
            ComponentType::Structure(t) => ComponentDefinition::Structure(self.structure(t)?),
            ComponentType::Armor(t) => ComponentDefinition::Armor(self.armor(t)?),
            ComponentType::Cockpit(t) => ComponentDefinition::Cockpit(self.cockpit(t)?),
            ComponentType::HeatSink(t) => ComponentDefinition::HeatSink(self.heat_sink(t)?),
            ComponentType::MovementEnhancement(t) => {
                ComponentDefinition::MovementEnhancement(self.enhancement(t)?)
            }
        })
    }

    /// Shared metadata for any type tag.
    pub fn base(&self, t: ComponentType) -> Result<&ComponentBase> {
        Ok(match t {
            ComponentType::Engine(t) => &self.engine(t)?.base,
            ComponentType::Gyro(t) => &self.gyro(t)?.base,
            ComponentType::Structure(t) => &self.structure(t)?.base,
            ComponentType::Armor(t) => &self.armor(t)?.base,
            ComponentType::Cockpit(t) => &self.cockpit(t)?.base,
            ComponentType::HeatSink(t) => &self.heat_sink(t)?.base,
            ComponentType::MovementEnhancement(t) => &self.enhancement(t)?.base,
        })
    }

    /// Every registered type tag of a category.
    #[must_use]
    pub fn types_in(&self, category: ComponentCategory) -> Vec<ComponentType> {
        let mut out: Vec<ComponentType> = match category {
            ComponentCategory::Engine => self.engines.keys().map(|t| ComponentType::Engine(*t)).collect(),
            ComponentCategory::Gyro => self.gyros.keys().map(|t| ComponentType::Gyro(*t)).collect(),
            ComponentCategory::Structure => {
                self.structures.keys().map(|t| ComponentType::Structure(*t)).collect()
            }
            ComponentCategory::Armor => self.armors.keys().map(|t| ComponentType::Armor(*t)).collect(),
            ComponentCategory::Cockpit => {
                self.cockpits.keys().map(|t| ComponentType::Cockpit(*t)).collect()
            }
            ComponentCategory::HeatSink => {
                self.heat_sinks.keys().map(|t| ComponentType::HeatSink(*t)).collect()
            }
            ComponentCategory::MovementEnhancement => self
                .enhancements
                .keys()
                .map(|t| ComponentType::MovementEnhancement(*t))
                .collect(),
        };
        out.sort_by_key(ToString::to_string);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::validate;
    use crate::tech::{RulesLevel, TechBase};

    #[test]
    fn test_every_tag_resolves() {
        let catalog = ComponentCatalog::standard();
        for t in EngineType::ALL {
            assert!(catalog.engine(t).is_ok());
        }
        for t in GyroType::ALL {
            assert!(catalog.gyro(t).is_ok());
        }
        for t in StructureType::ALL {
            assert!(catalog.structure(t).is_ok());
        }
        for t in ArmorType::ALL {
            assert!(catalog.armor(t).is_ok());
        }
        for t in CockpitType::ALL {
            assert!(catalog.cockpit(t).is_ok());
        }
        for t in HeatSinkType::ALL {
            assert!(catalog.heat_sink(t).is_ok());
        }
        for t in MovementEnhancementType::ALL {
            assert!(catalog.enhancement(t).is_ok());
        }
        assert_eq!(catalog.len(), 49);
    }

    #[test]
    fn test_unknown_type_is_error() {
        let catalog = ComponentCatalog::new();
        let err = catalog.gyro(GyroType::Xl).unwrap_err();
        assert_eq!(
            err,
            MechError::UnknownComponent {
                category: "gyro".to_string(),
                type_name: "Xl".to_string(),
            }
        );
    }

    #[test]
    fn test_get_definition_by_tag() {
        let catalog = catalog();
        let def = catalog
            .get_definition(ComponentType::Structure(StructureType::EndoSteelClan))
            .unwrap();
        assert_eq!(def.base().tech_base, TechBase::Clan);
        match def {
            ComponentDefinition::Structure(s) => assert_eq!(s.slots(), 7),
            other => panic!("unexpected definition {other:?}"),
        }
    }

    #[test]
    fn test_base_lookup() {
        let base = catalog()
            .base(ComponentType::Engine(EngineType::XxlClan))
            .unwrap();
        assert_eq!(base.rules_level, RulesLevel::Experimental);
    }

    #[test]
    fn test_catalog_formulas_are_well_formed() {
        let catalog = catalog();
        for t in GyroType::ALL {
            assert!(catalog.gyro(t).unwrap().formulas.validate().is_empty());
        }
        for t in StructureType::ALL {
            assert!(catalog.structure(t).unwrap().formulas.validate().is_empty());
        }
        for t in MovementEnhancementType::ALL {
            assert!(catalog.enhancement(t).unwrap().formulas.validate().is_empty());
        }
        assert!(validate(&gyro_base_formula()).is_empty());
    }

    #[test]
    fn test_types_in_category() {
        let gyros = catalog().types_in(ComponentCategory::Gyro);
        assert_eq!(gyros.len(), 4);
        assert!(gyros.contains(&ComponentType::Gyro(GyroType::Compact)));
    }
}
