//! The unit snapshot: an immutable description of one design's selections.
//!
//! Snapshots are produced by the persistence and UI layers and passed in by
//! value; nothing in this crate keeps them beyond one request.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{
    ArmorType, CockpitType, ComponentType, EngineType, GyroType, HeatSinkType,
    MovementEnhancementType, StructureType,
};
use crate::error::{MechError, Result};
use crate::location::{ArmActuators, MechLocation};
use crate::tech::TechBaseMode;

/// Engine selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSelection {
    /// Engine type.
    pub engine_type: EngineType,
    /// Engine rating.
    pub rating: u16,
}

/// Armor points in one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArmorAllocation {
    /// Front armor. Negative values are invalid but representable.
    pub front: i32,
    /// Rear armor; only torsos carry it.
    #[serde(default)]
    pub rear: i32,
}

impl ArmorAllocation {
    /// Front-only allocation.
    #[must_use]
    pub const fn front(points: i32) -> Self {
        Self {
            front: points,
            rear: 0,
        }
    }

    /// Front and rear allocation.
    #[must_use]
    pub const fn split(front: i32, rear: i32) -> Self {
        Self { front, rear }
    }

    /// Sum of non-negative front and rear points.
    #[must_use]
    pub fn total(self) -> u32 {
        self.front
            .max(0)
            .unsigned_abs()
            .saturating_add(self.rear.max(0).unsigned_abs())
    }
}

/// Armor selection and per-location points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorSelection {
    /// Armor type.
    pub armor_type: ArmorType,
    /// Points per location; missing locations carry no armor.
    #[serde(default)]
    pub allocation: BTreeMap<MechLocation, ArmorAllocation>,
}

impl ArmorSelection {
    /// Total armor points across all locations, ignoring negative values.
    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.allocation
            .values()
            .fold(0, |acc: u32, a| acc.saturating_add(a.total()))
    }

    /// Points in one location.
    #[must_use]
    pub fn at(&self, location: MechLocation) -> ArmorAllocation {
        self.allocation.get(&location).copied().unwrap_or_default()
    }
}

/// Heat sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatSinkSelection {
    /// Heat sink type.
    pub heat_sink_type: HeatSinkType,
    /// Total sinks, integral and external.
    pub count: u16,
}

/// Jump and enhancement selections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovementSelection {
    /// Jump MP, one standard jump jet per point.
    #[serde(default)]
    pub jump_mp: u8,
    /// Installed movement enhancements.
    #[serde(default)]
    pub enhancements: Vec<MovementEnhancementType>,
}

/// Optional actuators of both arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActuatorLayout {
    /// Left arm.
    #[serde(default)]
    pub left_arm: ArmActuators,
    /// Right arm.
    #[serde(default)]
    pub right_arm: ArmActuators,
}

impl ActuatorLayout {
    /// Actuators for a location; non-arm locations report the default.
    #[must_use]
    pub fn for_location(&self, location: MechLocation) -> ArmActuators {
        match location {
            MechLocation::LeftArm => self.left_arm,
            MechLocation::RightArm => self.right_arm,
            _ => ArmActuators::default(),
        }
    }
}

/// The part of a split item that lives outside its primary location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitMount {
    /// Secondary location.
    pub location: MechLocation,
    /// Slots in the secondary location.
    pub slots: u8,
}

/// One mounted equipment item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountedEquipment {
    /// Equipment record id.
    pub equipment_id: String,
    /// Primary location.
    pub location: MechLocation,
    /// Rear-facing mount.
    #[serde(default)]
    pub rear_mounted: bool,
    /// Secondary location for split items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitMount>,
}

impl MountedEquipment {
    /// Item mounted in one location.
    #[must_use]
    pub fn new(equipment_id: impl Into<String>, location: MechLocation) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            location,
            rear_mounted: false,
            split: None,
        }
    }

    /// Builder method to mark the mount rear-facing.
    #[must_use]
    pub fn rear(mut self) -> Self {
        self.rear_mounted = true;
        self
    }

    /// Builder method to split the item into a second location.
    #[must_use]
    pub fn split_into(mut self, location: MechLocation, slots: u8) -> Self {
        self.split = Some(SplitMount { location, slots });
        self
    }

    /// Per-location slot counts for an item needing `total` slots.
    #[must_use]
    pub fn slot_spread(&self, total: u8) -> Vec<(MechLocation, u8)> {
        match self.split {
            Some(split) if split.location != self.location => vec![
                (self.location, total.saturating_sub(split.slots)),
                (split.location, split.slots.min(total)),
            ],
            _ => vec![(self.location, total)],
        }
    }
}

/// Structural items whose slots are placed freely across locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DistributedItem {
    /// Slot-consuming internal structure (Endo Steel and relatives).
    Structure,
    /// Slot-consuming armor (Ferro-Fibrous, Stealth and relatives).
    Armor,
    /// External heat sinks.
    HeatSinks,
    /// Jump jets.
    JumpJets,
    /// A movement enhancement.
    Enhancement(MovementEnhancementType),
}

impl fmt::Display for DistributedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure => f.write_str("internal structure"),
            Self::Armor => f.write_str("armor"),
            Self::HeatSinks => f.write_str("heat sinks"),
            Self::JumpJets => f.write_str("jump jets"),
            Self::Enhancement(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

/// Slots of one distributed item placed in one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributedPlacement {
    /// The item.
    pub item: DistributedItem,
    /// Location.
    pub location: MechLocation,
    /// Slots placed there.
    pub slots: u8,
}

/// An immutable unit design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    /// Chassis name.
    pub chassis: String,
    /// Model designation.
    #[serde(default)]
    pub model: String,
    /// Tonnage.
    pub tonnage: u32,
    /// Tech-base mode.
    pub tech_base_mode: TechBaseMode,
    /// In-universe year for availability checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// Engine.
    pub engine: EngineSelection,
    /// Gyro.
    pub gyro: GyroType,
    /// Internal structure.
    pub structure: StructureType,
    /// Cockpit.
    pub cockpit: CockpitType,
    /// Armor.
    pub armor: ArmorSelection,
    /// Heat sinks.
    pub heat_sinks: HeatSinkSelection,
    /// Jump jets and enhancements.
    #[serde(default)]
    pub movement: MovementSelection,
    /// Optional arm actuators.
    #[serde(default)]
    pub actuators: ActuatorLayout,
    /// Mounted equipment.
    #[serde(default)]
    pub equipment: Vec<MountedEquipment>,
    /// Where distributed slots were placed.
    #[serde(default)]
    pub distributed: Vec<DistributedPlacement>,
}

impl UnitSnapshot {
    /// Display name, `chassis model`.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.model.is_empty() {
            self.chassis.clone()
        } else {
            format!("{} {}", self.chassis, self.model)
        }
    }

    /// Every selected structural component, in pipeline order.
    #[must_use]
    pub fn selected_components(&self) -> Vec<ComponentType> {
        let mut out = vec![
            ComponentType::Structure(self.structure),
            ComponentType::Engine(self.engine.engine_type),
            ComponentType::Gyro(self.gyro),
            ComponentType::Cockpit(self.cockpit),
            ComponentType::HeatSink(self.heat_sinks.heat_sink_type),
            ComponentType::Armor(self.armor.armor_type),
        ];
        out.extend(
            self.movement
                .enhancements
                .iter()
                .map(|e| ComponentType::MovementEnhancement(*e)),
        );
        out
    }

    /// Placements of one distributed item as `(location, slots)` pairs.
    #[must_use]
    pub fn placements_of(&self, item: DistributedItem) -> Vec<(MechLocation, u8)> {
        self.distributed
            .iter()
            .filter(|p| p.item == item)
            .map(|p| (p.location, p.slots))
            .collect()
    }

    /// Serialize to the persisted JSON envelope.
    ///
    /// # Errors
    ///
    /// Returns [`MechError::InvalidState`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&UnitEnvelope::wrap(self.clone()))
            .map_err(|e| MechError::InvalidState(e.to_string()))
    }

    /// Parse the persisted JSON envelope.
    ///
    /// # Errors
    ///
    /// Returns [`MechError::DataParseError`] on malformed input or an
    /// unsupported envelope version.
    pub fn from_json(text: &str) -> Result<Self> {
        let envelope: UnitEnvelope =
            serde_json::from_str(text).map_err(|e| MechError::DataParseError {
                path: "unit envelope".to_string(),
                message: e.to_string(),
            })?;
        envelope.into_unit()
    }

    /// Parse a bare RON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MechError::DataParseError`] on malformed input.
    pub fn from_ron_str(label: &str, text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| MechError::DataParseError {
            path: label.to_string(),
            message: e.to_string(),
        })
    }
}

/// Current envelope format version.
pub const ENVELOPE_VERSION: u32 = 1;

/// Versioned wrapper around a snapshot for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitEnvelope {
    /// Format version.
    pub version: u32,
    /// The unit.
    pub unit: UnitSnapshot,
}

impl UnitEnvelope {
    /// Wrap a snapshot at the current version.
    #[must_use]
    pub fn wrap(unit: UnitSnapshot) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            unit,
        }
    }

    /// Unwrap, rejecting unknown versions.
    pub fn into_unit(self) -> Result<UnitSnapshot> {
        if self.version != ENVELOPE_VERSION {
            return Err(MechError::DataParseError {
                path: "unit envelope".to_string(),
                message: format!("unsupported envelope version {}", self.version),
            });
        }
        Ok(self.unit)
    }
}

/// Reference 50-ton unit for unit tests: standard components, engine 250,
/// 160 armor points, 10 single heat sinks, no equipment.
#[cfg(test)]
pub(crate) fn sample_unit() -> UnitSnapshot {
    UnitSnapshot {
        chassis: "Sample".to_string(),
        model: "SMP-1".to_string(),
        tonnage: 50,
        tech_base_mode: TechBaseMode::InnerSphere,
        year: None,
        engine: EngineSelection {
            engine_type: EngineType::Standard,
            rating: 250,
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

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> UnitSnapshot {
        UnitSnapshot {
            chassis: "Test".to_string(),
            model: "TST-1".to_string(),
            tonnage: 50,
            tech_base_mode: TechBaseMode::InnerSphere,
            year: None,
            engine: EngineSelection {
                engine_type: EngineType::Standard,
                rating: 250,
            },
            gyro: GyroType::Standard,
            structure: StructureType::Standard,
            cockpit: CockpitType::Standard,
            armor: ArmorSelection {
                armor_type: ArmorType::Standard,
                allocation: BTreeMap::from([
                    (MechLocation::Head, ArmorAllocation::front(9)),
                    (MechLocation::CenterTorso, ArmorAllocation::split(20, 8)),
                    (MechLocation::LeftArm, ArmorAllocation::front(-4)),
                ]),
            },
            heat_sinks: HeatSinkSelection {
                heat_sink_type: HeatSinkType::Single,
                count: 10,
            },
            movement: MovementSelection::default(),
            actuators: ActuatorLayout::default(),
            equipment: vec![MountedEquipment::new("medium-laser", MechLocation::RightArm)],
            distributed: Vec::new(),
        }
    }

    #[test]
    fn test_armor_totals_ignore_negative() {
        let unit = minimal();
        assert_eq!(unit.armor.total_points(), 37);
        assert_eq!(unit.armor.at(MechLocation::RightLeg), ArmorAllocation::default());
    }

    #[test]
    fn test_armor_totals_saturate() {
        let mut unit = minimal();
        for location in MechLocation::ALL {
            unit.armor
                .allocation
                .insert(location, ArmorAllocation::split(i32::MAX, i32::MAX));
        }
        assert_eq!(unit.armor.total_points(), u32::MAX);
    }

    #[test]
    fn test_display_name() {
        let mut unit = minimal();
        assert_eq!(unit.display_name(), "Test TST-1");
        unit.model.clear();
        assert_eq!(unit.display_name(), "Test");
    }

    #[test]
    fn test_slot_spread() {
        let mount = MountedEquipment::new("ac-20", MechLocation::RightTorso)
            .split_into(MechLocation::RightArm, 4);
        assert_eq!(
            mount.slot_spread(10),
            vec![(MechLocation::RightTorso, 6), (MechLocation::RightArm, 4)]
        );
        let single = MountedEquipment::new("ac-20", MechLocation::RightTorso);
        assert_eq!(single.slot_spread(10), vec![(MechLocation::RightTorso, 10)]);
    }

    #[test]
    fn test_selected_components_include_enhancements() {
        let mut unit = minimal();
        unit.movement.enhancements.push(MovementEnhancementType::MascInnerSphere);
        let components = unit.selected_components();
        assert_eq!(components.len(), 7);
        assert_eq!(
            components.last(),
            Some(&ComponentType::MovementEnhancement(MovementEnhancementType::MascInnerSphere))
        );
    }

    #[test]
    fn test_distributed_items_order_enhancements_last() {
        let items: std::collections::BTreeSet<_> = [
            DistributedItem::Enhancement(MovementEnhancementType::Supercharger),
            DistributedItem::JumpJets,
            DistributedItem::Enhancement(MovementEnhancementType::MascInnerSphere),
            DistributedItem::Structure,
        ]
        .into_iter()
        .collect();
        assert_eq!(
            items.into_iter().collect::<Vec<_>>(),
            vec![
                DistributedItem::Structure,
                DistributedItem::JumpJets,
                DistributedItem::Enhancement(MovementEnhancementType::MascInnerSphere),
                DistributedItem::Enhancement(MovementEnhancementType::Supercharger),
            ]
        );
    }

    #[test]
    fn test_envelope_rejects_unknown_version() {
        let mut envelope = UnitEnvelope::wrap(minimal());
        envelope.version = 7;
        let text = serde_json::to_string(&envelope).unwrap();
        assert!(matches!(
            UnitSnapshot::from_json(&text),
            Err(MechError::DataParseError { .. })
        ));
    }
}
