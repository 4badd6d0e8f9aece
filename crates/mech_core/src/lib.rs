//! # Mech Core
//!
//! Deterministic BattleMech construction rules engine.
//!
//! This crate contains **only** rules logic:
//! - No rendering
//! - No IO
//! - No randomness (dice rolls are explicit inputs)
//! - No floating-point math (uses fixed-point)
//!
//! Every calculation is a pure function of a [`unit::UnitSnapshot`], the
//! [`catalog::ComponentCatalog`] and an injected
//! [`equipment::EquipmentLookup`].
//!
//! ## Crate Structure
//!
//! - [`formula`] - Declarative weight/slot formulas and their evaluator
//! - [`catalog`] - Structural component definitions
//! - [`construction`] - The ordered construction pipeline
//! - [`allocation`] - Critical-slot accounting and placement rules
//! - [`compatibility`] - Tech base, rules level and era checks
//! - [`validation`] - Rule registry and orchestrator
//! - [`battle_value`], [`cost`], [`heat`], [`combat`] - Derived statistics and tables

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod allocation;
pub mod battle_value;
pub mod catalog;
pub mod combat;
pub mod compatibility;
pub mod construction;
pub mod cost;
pub mod equipment;
pub mod error;
pub mod formula;
pub mod heat;
pub mod location;
pub mod math;
pub mod mounts;
pub mod repair;
pub mod tech;
pub mod unit;
pub mod validation;
pub mod variable_equipment;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::battle_value::{battle_value, BattleValueBreakdown};
    pub use crate::catalog::{
        catalog, ArmorType, CockpitType, ComponentCatalog, ComponentType, EngineType, GyroType,
        HeatSinkType, MovementEnhancementType, StructureType,
    };
    pub use crate::construction::{construct, ConstructionResult, ConstructionStepResult};
    pub use crate::cost::{calculate_cost, CostBreakdown};
    pub use crate::equipment::{
        EquipmentCategory, EquipmentLookup, EquipmentRecord, StaticEquipmentLookup,
    };
    pub use crate::error::{MechError, Result};
    pub use crate::location::MechLocation;
    pub use crate::math::Fixed;
    pub use crate::repair::apply_auto_repairs;
    pub use crate::tech::{RulesLevel, TechBase, TechBaseMode};
    pub use crate::unit::{MountedEquipment, UnitSnapshot};
    pub use crate::validation::{
        RuleRegistry, Severity, ValidationIssue, ValidationOptions, ValidationResult, Validator,
        ValidatorConfig,
    };
}
