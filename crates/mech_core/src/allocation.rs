//! Critical-slot allocation: capacities, placement restrictions,
//! distributed components and split equipment.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{ArmorType, ComponentCatalog, HeatSinkType, MovementEnhancementType};
use crate::error::Result;
use crate::location::{actuator_allocations, ArmActuators, MechLocation};
use crate::unit::{DistributedItem, MountedEquipment, UnitSnapshot};

/// Named placement restriction for equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlacementRestriction {
    /// No restriction.
    #[default]
    Any,
    /// Arms only.
    ArmOnly,
    /// Any torso location.
    TorsoOnly,
    /// Left or right torso only.
    SideTorsoOnly,
    /// Center torso only.
    CenterTorsoOnly,
    /// Anywhere except the head.
    NotHead,
    /// Torso or leg locations.
    TorsoOrLeg,
    /// Arm or torso locations.
    ArmOrTorso,
    /// Legs only.
    LegOnly,
    /// Head only.
    HeadOnly,
}

impl PlacementRestriction {
    /// Whether the restriction alone permits the location.
    #[must_use]
    pub const fn permits(self, location: MechLocation) -> bool {
        match self {
            Self::Any => true,
            Self::ArmOnly => location.is_arm(),
            Self::TorsoOnly => location.is_torso(),
            Self::SideTorsoOnly => location.is_side_torso(),
            Self::CenterTorsoOnly => matches!(location, MechLocation::CenterTorso),
            Self::NotHead => !matches!(location, MechLocation::Head),
            Self::TorsoOrLeg => location.is_torso() || location.is_leg(),
            Self::ArmOrTorso => location.is_arm() || location.is_torso(),
            Self::LegOnly => location.is_leg(),
            Self::HeadOnly => matches!(location, MechLocation::Head),
        }
    }
}

impl fmt::Display for PlacementRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Any => "any location",
            Self::ArmOnly => "arms only",
            Self::TorsoOnly => "torsos only",
            Self::SideTorsoOnly => "side torsos only",
            Self::CenterTorsoOnly => "center torso only",
            Self::NotHead => "not in the head",
            Self::TorsoOrLeg => "torsos or legs",
            Self::ArmOrTorso => "arms or torsos",
            Self::LegOnly => "legs only",
            Self::HeadOnly => "head only",
        };
        f.write_str(text)
    }
}

/// Whether equipment may be mounted in `location`.
///
/// A forbidden location always loses, whatever the restriction says.
#[must_use]
pub fn is_valid_location_for_equipment(
    restriction: PlacementRestriction,
    forbidden: &[MechLocation],
    location: MechLocation,
) -> bool {
    !forbidden.contains(&location) && restriction.permits(location)
}

/// Slots left in a location after its fixed actuators and the engine, gyro
/// and cockpit slots listed in `system` (see [`system_slots`]).
#[must_use]
pub fn available_slots(
    location: MechLocation,
    arm: ArmActuators,
    system: &BTreeMap<MechLocation, u8>,
) -> u8 {
    let actuators = u8::try_from(actuator_allocations(location, arm).len()).unwrap_or(u8::MAX);
    let fixed = actuators.saturating_add(system.get(&location).copied().unwrap_or(0));
    location.slot_capacity().saturating_sub(fixed)
}

/// A single allocation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationViolation {
    /// Placed slots do not add up to the requirement.
    TotalMismatch {
        /// Slots required.
        required: u16,
        /// Slots placed.
        allocated: u16,
    },
    /// A location outside the allowed list was used.
    LocationNotAllowed {
        /// Offending location.
        location: MechLocation,
    },
    /// Fewer slots than the per-location minimum.
    BelowMinimum {
        /// Location.
        location: MechLocation,
        /// Slots placed.
        allocated: u8,
        /// Minimum.
        minimum: u8,
    },
    /// Slots in a location are not whole items.
    NotWholeItems {
        /// Location.
        location: MechLocation,
        /// Slots placed.
        allocated: u8,
        /// Slots per item.
        item_slots: u8,
    },
    /// Too many locations used.
    TooManyLocations {
        /// Locations used.
        used: u8,
        /// Maximum.
        maximum: u8,
    },
    /// A location is over capacity.
    CapacityExceeded {
        /// Location.
        location: MechLocation,
        /// Slots used.
        used: u16,
        /// Capacity.
        capacity: u8,
    },
    /// Split halves are not in adjacent locations.
    NotAdjacent {
        /// Primary location.
        primary: MechLocation,
        /// Secondary location.
        secondary: MechLocation,
    },
    /// A split part holds no slots.
    EmptySplitPart {
        /// Location holding zero slots.
        location: MechLocation,
    },
}

impl fmt::Display for AllocationViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TotalMismatch { required, allocated } => {
                write!(f, "{allocated} slots allocated but {required} required")
            }
            Self::LocationNotAllowed { location } => write!(f, "{location} is not allowed"),
            Self::BelowMinimum {
                location,
                allocated,
                minimum,
            } => write!(
                f,
                "{location} holds {allocated} slots, minimum per location is {minimum}"
            ),
            Self::NotWholeItems {
                location,
                allocated,
                item_slots,
            } => write!(
                f,
                "{location} holds {allocated} slots, not a multiple of {item_slots}"
            ),
            Self::TooManyLocations { used, maximum } => {
                write!(f, "{used} locations used, maximum is {maximum}")
            }
            Self::CapacityExceeded {
                location,
                used,
                capacity,
            } => write!(f, "{location} uses {used} of {capacity} slots"),
            Self::NotAdjacent { primary, secondary } => {
                write!(f, "{primary} and {secondary} are not adjacent")
            }
            Self::EmptySplitPart { location } => {
                write!(f, "split part in {location} holds no slots")
            }
        }
    }
}

/// Placement constraints for a slot-spanning component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributedAllocationRule {
    /// Total slots the component needs.
    pub total_slots: u16,
    /// Locations that may hold slots.
    pub allowed_locations: Vec<MechLocation>,
    /// Minimum slots in each used location.
    pub min_per_location: u8,
    /// Maximum number of locations used.
    pub max_locations: u8,
    /// Slots per whole item; per-location counts must be multiples.
    pub item_slots: u8,
}

impl DistributedAllocationRule {
    /// Rule allowing any location, one slot minimum.
    #[must_use]
    pub fn anywhere(total_slots: u16) -> Self {
        Self {
            total_slots,
            allowed_locations: MechLocation::ALL.to_vec(),
            min_per_location: 1,
            max_locations: 8,
            item_slots: 1,
        }
    }

    fn restricted(total_slots: u16, allowed: &[MechLocation], min: u8, max: u8) -> Self {
        Self {
            total_slots,
            allowed_locations: allowed.to_vec(),
            min_per_location: min,
            max_locations: max,
            item_slots: 1,
        }
    }

    /// Placement rule for a distributed item of a given unit.
    #[must_use]
    pub fn for_item(item: DistributedItem, total_slots: u16, unit: &UnitSnapshot) -> Self {
        use MechLocation as L;
        const TORSOS: [MechLocation; 3] = [L::CenterTorso, L::LeftTorso, L::RightTorso];
        match item {
            DistributedItem::Structure => Self::anywhere(total_slots),
            DistributedItem::Armor => match unit.armor.armor_type {
                ArmorType::Stealth => Self::restricted(
                    total_slots,
                    &[L::LeftTorso, L::RightTorso, L::LeftArm, L::RightArm, L::LeftLeg, L::RightLeg],
                    2,
                    6,
                ),
                _ => Self::anywhere(total_slots),
            },
            DistributedItem::HeatSinks => {
                let per_sink = match unit.heat_sinks.heat_sink_type {
                    HeatSinkType::DoubleInnerSphere => 3,
                    HeatSinkType::DoubleClan | HeatSinkType::Laser => 2,
                    _ => 1,
                };
                Self {
                    min_per_location: per_sink,
                    item_slots: per_sink,
                    ..Self::anywhere(total_slots)
                }
            }
            DistributedItem::JumpJets => Self::restricted(
                total_slots,
                &[L::CenterTorso, L::LeftTorso, L::RightTorso, L::LeftLeg, L::RightLeg],
                1,
                5,
            ),
            DistributedItem::Enhancement(kind) => match kind {
                MovementEnhancementType::MascInnerSphere | MovementEnhancementType::MascClan => {
                    Self::restricted(total_slots, &TORSOS, 1, 1)
                }
                MovementEnhancementType::Supercharger => {
                    Self::restricted(total_slots, &TORSOS, 1, 1)
                }
                MovementEnhancementType::TripleStrengthMyomer => Self::restricted(
                    total_slots,
                    &[L::CenterTorso, L::LeftTorso, L::RightTorso, L::LeftArm, L::RightArm, L::LeftLeg, L::RightLeg],
                    1,
                    7,
                ),
                MovementEnhancementType::PartialWingInnerSphere
                | MovementEnhancementType::PartialWingClan => {
                    Self::restricted(total_slots, &[L::LeftTorso, L::RightTorso], 3, 2)
                }
            },
        }
    }
}

/// Check a distribution against its rule, reporting every violation.
///
/// Placements naming the same location are merged first.
#[must_use]
pub fn validate_distribution(
    rule: &DistributedAllocationRule,
    placements: &[(MechLocation, u8)],
) -> Vec<AllocationViolation> {
    let mut per_location: BTreeMap<MechLocation, u8> = BTreeMap::new();
    for (location, slots) in placements {
        let entry = per_location.entry(*location).or_insert(0);
        *entry = entry.saturating_add(*slots);
    }
    per_location.retain(|_, slots| *slots > 0);

    let mut violations = Vec::new();
    let allocated: u16 = per_location.values().map(|s| u16::from(*s)).sum();
    if allocated != rule.total_slots {
        violations.push(AllocationViolation::TotalMismatch {
            required: rule.total_slots,
            allocated,
        });
    }
    for (location, slots) in &per_location {
        if !rule.allowed_locations.contains(location) {
            violations.push(AllocationViolation::LocationNotAllowed {
                location: *location,
            });
        }
        if *slots < rule.min_per_location {
            violations.push(AllocationViolation::BelowMinimum {
                location: *location,
                allocated: *slots,
                minimum: rule.min_per_location,
            });
        }
        if rule.item_slots > 1 && *slots % rule.item_slots != 0 {
            violations.push(AllocationViolation::NotWholeItems {
                location: *location,
                allocated: *slots,
                item_slots: rule.item_slots,
            });
        }
    }
    let used = u8::try_from(per_location.len()).unwrap_or(u8::MAX);
    if used > rule.max_locations {
        violations.push(AllocationViolation::TooManyLocations {
            used,
            maximum: rule.max_locations,
        });
    }
    violations
}

/// Check a split mount: two adjacent locations, each holding at least one slot.
#[must_use]
pub fn validate_split(mount: &MountedEquipment, total_slots: u8) -> Vec<AllocationViolation> {
    let Some(split) = mount.split else {
        return Vec::new();
    };
    let mut violations = Vec::new();
    if !mount.location.is_adjacent_to(split.location) {
        violations.push(AllocationViolation::NotAdjacent {
            primary: mount.location,
            secondary: split.location,
        });
    }
    if split.slots == 0 {
        violations.push(AllocationViolation::EmptySplitPart {
            location: split.location,
        });
    }
    if split.slots >= total_slots {
        violations.push(AllocationViolation::EmptySplitPart {
            location: mount.location,
        });
    }
    violations
}

/// Slots fixed by engine, gyro and cockpit, per location.
pub fn system_slots(
    unit: &UnitSnapshot,
    catalog: &ComponentCatalog,
) -> Result<BTreeMap<MechLocation, u8>> {
    let engine = catalog.engine(unit.engine.engine_type)?;
    let gyro = catalog.gyro(unit.gyro)?;
    let cockpit = catalog.cockpit(unit.cockpit)?;

    let mut out = BTreeMap::new();
    let mut add = |location: MechLocation, slots: u8| {
        if slots > 0 {
            *out.entry(location).or_insert(0) += slots;
        }
    };
    add(MechLocation::CenterTorso, engine.center_torso_slots);
    add(MechLocation::LeftTorso, engine.side_torso_slots);
    add(MechLocation::RightTorso, engine.side_torso_slots);
    add(MechLocation::CenterTorso, gyro.slots());
    add(MechLocation::Head, cockpit.head_slots);
    if let Some(location) = cockpit.other_location {
        add(location, cockpit.other_slots);
    }
    Ok(out)
}

/// Slot usage of one location, broken down by source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationUsage {
    /// Fixed actuators.
    pub actuators: u8,
    /// Engine, gyro and cockpit.
    pub system: u8,
    /// Distributed structural items.
    pub distributed: u16,
    /// Mounted equipment.
    pub equipment: u16,
    /// Slots left after actuators and system components.
    pub available: u8,
}

impl LocationUsage {
    /// Total slots used.
    #[must_use]
    pub fn used(&self) -> u16 {
        (u16::from(self.actuators) + u16::from(self.system))
            .saturating_add(self.distributed)
            .saturating_add(self.equipment)
    }
}

/// Per-location slot usage of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotUsage {
    /// Usage per location; every location is present.
    pub locations: BTreeMap<MechLocation, LocationUsage>,
}

impl SlotUsage {
    /// Build the usage map from its parts.
    ///
    /// `equipment` lists resolved `(location, slots)` pairs of mounted items.
    pub fn compute(
        unit: &UnitSnapshot,
        catalog: &ComponentCatalog,
        equipment: &[(MechLocation, u8)],
    ) -> Result<Self> {
        let system = system_slots(unit, catalog)?;
        let mut locations = BTreeMap::new();
        for location in MechLocation::ALL {
            let arm = unit.actuators.for_location(location);
            let actuators = actuator_allocations(location, arm);
            locations.insert(
                location,
                LocationUsage {
                    actuators: u8::try_from(actuators.len()).unwrap_or(u8::MAX),
                    system: system.get(&location).copied().unwrap_or(0),
                    available: available_slots(location, arm, &system),
                    ..LocationUsage::default()
                },
            );
        }
        for placement in &unit.distributed {
            if let Some(usage) = locations.get_mut(&placement.location) {
                usage.distributed = usage.distributed.saturating_add(u16::from(placement.slots));
            }
        }
        for (location, slots) in equipment {
            if let Some(usage) = locations.get_mut(location) {
                usage.equipment = usage.equipment.saturating_add(u16::from(*slots));
            }
        }
        Ok(Self { locations })
    }

    /// Slots left for distributed items and equipment in a location.
    #[must_use]
    pub fn available(&self, location: MechLocation) -> u8 {
        self.locations.get(&location).map_or(0, |usage| usage.available)
    }

    /// Slots used in a location.
    #[must_use]
    pub fn used(&self, location: MechLocation) -> u16 {
        self.locations.get(&location).map_or(0, LocationUsage::used)
    }

    /// Total slots used.
    #[must_use]
    pub fn total_used(&self) -> u16 {
        self.locations
            .values()
            .map(LocationUsage::used)
            .fold(0, u16::saturating_add)
    }

    /// Every location whose usage exceeds its capacity.
    #[must_use]
    pub fn capacity_violations(&self) -> Vec<AllocationViolation> {
        self.locations
            .iter()
            .filter(|(location, usage)| usage.used() > u16::from(location.slot_capacity()))
            .map(|(location, usage)| AllocationViolation::CapacityExceeded {
                location: *location,
                used: usage.used(),
                capacity: location.slot_capacity(),
            })
            .collect()
    }
}
