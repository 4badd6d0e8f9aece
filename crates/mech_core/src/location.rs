//! Body locations, their slot capacities and the fixed system components
//! that occupy them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the eight fixed body locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MechLocation {
    /// Head.
    Head,
    /// Center torso.
    CenterTorso,
    /// Left torso.
    LeftTorso,
    /// Right torso.
    RightTorso,
    /// Left arm.
    LeftArm,
    /// Right arm.
    RightArm,
    /// Left leg.
    LeftLeg,
    /// Right leg.
    RightLeg,
}

/// Total critical slots across all locations.
pub const TOTAL_SLOTS: u8 = 78;

impl MechLocation {
    /// All locations in record-sheet order.
    pub const ALL: [MechLocation; 8] = [
        MechLocation::Head,
        MechLocation::CenterTorso,
        MechLocation::LeftTorso,
        MechLocation::RightTorso,
        MechLocation::LeftArm,
        MechLocation::RightArm,
        MechLocation::LeftLeg,
        MechLocation::RightLeg,
    ];

    /// Fixed critical-slot capacity of this location.
    #[must_use]
    pub const fn slot_capacity(self) -> u8 {
        match self {
            MechLocation::Head | MechLocation::LeftLeg | MechLocation::RightLeg => 6,
            _ => 12,
        }
    }

    /// Whether this is one of the three torso locations.
    #[must_use]
    pub const fn is_torso(self) -> bool {
        matches!(
            self,
            MechLocation::CenterTorso | MechLocation::LeftTorso | MechLocation::RightTorso
        )
    }

    /// Whether this is the left or right torso.
    #[must_use]
    pub const fn is_side_torso(self) -> bool {
        matches!(self, MechLocation::LeftTorso | MechLocation::RightTorso)
    }

    /// Whether this is an arm.
    #[must_use]
    pub const fn is_arm(self) -> bool {
        matches!(self, MechLocation::LeftArm | MechLocation::RightArm)
    }

    /// Whether this is a leg.
    #[must_use]
    pub const fn is_leg(self) -> bool {
        matches!(self, MechLocation::LeftLeg | MechLocation::RightLeg)
    }

    /// Whether this location can carry rear-facing armor.
    #[must_use]
    pub const fn has_rear_armor(self) -> bool {
        self.is_torso()
    }

    /// Torso this location transfers damage into, if any.
    ///
    /// Head and center torso are terminal.
    #[must_use]
    pub const fn transfers_to(self) -> Option<MechLocation> {
        match self {
            MechLocation::LeftArm | MechLocation::LeftLeg => Some(MechLocation::LeftTorso),
            MechLocation::RightArm | MechLocation::RightLeg => Some(MechLocation::RightTorso),
            MechLocation::LeftTorso | MechLocation::RightTorso => Some(MechLocation::CenterTorso),
            MechLocation::Head | MechLocation::CenterTorso => None,
        }
    }

    /// Whether two locations are adjacent for split equipment.
    ///
    /// Adjacency follows the damage-transfer graph in both directions.
    #[must_use]
    pub fn is_adjacent_to(self, other: MechLocation) -> bool {
        self.transfers_to() == Some(other) || other.transfers_to() == Some(self)
    }

    /// Short record-sheet abbreviation.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            MechLocation::Head => "HD",
            MechLocation::CenterTorso => "CT",
            MechLocation::LeftTorso => "LT",
            MechLocation::RightTorso => "RT",
            MechLocation::LeftArm => "LA",
            MechLocation::RightArm => "RA",
            MechLocation::LeftLeg => "LL",
            MechLocation::RightLeg => "RL",
        }
    }
}

impl fmt::Display for MechLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MechLocation::Head => "Head",
            MechLocation::CenterTorso => "Center Torso",
            MechLocation::LeftTorso => "Left Torso",
            MechLocation::RightTorso => "Right Torso",
            MechLocation::LeftArm => "Left Arm",
            MechLocation::RightArm => "Right Arm",
            MechLocation::LeftLeg => "Left Leg",
            MechLocation::RightLeg => "Right Leg",
        };
        f.write_str(name)
    }
}

/// Non-movable system components with fixed slot positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemComponent {
    /// Life support.
    LifeSupport,
    /// Sensors.
    Sensors,
    /// Cockpit.
    Cockpit,
    /// Shoulder joint.
    Shoulder,
    /// Upper arm actuator.
    UpperArmActuator,
    /// Lower arm actuator (optional).
    LowerArmActuator,
    /// Hand actuator (optional).
    HandActuator,
    /// Hip joint.
    Hip,
    /// Upper leg actuator.
    UpperLegActuator,
    /// Lower leg actuator.
    LowerLegActuator,
    /// Foot actuator.
    FootActuator,
}

/// A system component pinned to a slot range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedSlotAllocation {
    /// The component.
    pub component: SystemComponent,
    /// Where it lives.
    pub location: MechLocation,
    /// First slot index (zero based).
    pub first_slot: u8,
    /// Number of consecutive slots.
    pub slot_count: u8,
    /// Whether the component can be removed.
    pub required: bool,
}

impl FixedSlotAllocation {
    const fn new(
        component: SystemComponent,
        location: MechLocation,
        first_slot: u8,
        required: bool,
    ) -> Self {
        Self {
            component,
            location,
            first_slot,
            slot_count: 1,
            required,
        }
    }
}

/// Optional actuator configuration for one arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmActuators {
    /// Lower arm actuator installed.
    pub lower_arm: bool,
    /// Hand actuator installed.
    pub hand: bool,
}

impl Default for ArmActuators {
    fn default() -> Self {
        Self {
            lower_arm: true,
            hand: true,
        }
    }
}

impl ArmActuators {
    /// Arm with only shoulder and upper arm.
    pub const BARE: Self = Self {
        lower_arm: false,
        hand: false,
    };

    /// A hand actuator without a lower arm actuator is not a legal arm.
    #[must_use]
    pub const fn is_consistent(self) -> bool {
        self.lower_arm || !self.hand
    }
}

/// Fixed actuator placements for a limb given its optional actuators.
///
/// Head and torso locations return an empty list; their system slots depend
/// on the selected cockpit, engine and gyro.
#[must_use]
pub fn actuator_allocations(location: MechLocation, arm: ArmActuators) -> Vec<FixedSlotAllocation> {
    use SystemComponent as C;
    match location {
        MechLocation::LeftArm | MechLocation::RightArm => {
            let mut slots = vec![
                FixedSlotAllocation::new(C::Shoulder, location, 0, true),
                FixedSlotAllocation::new(C::UpperArmActuator, location, 1, true),
            ];
            if arm.lower_arm {
                slots.push(FixedSlotAllocation::new(C::LowerArmActuator, location, 2, false));
            }
            if arm.hand {
                slots.push(FixedSlotAllocation::new(C::HandActuator, location, 3, false));
            }
            slots
        }
        MechLocation::LeftLeg | MechLocation::RightLeg => vec![
            FixedSlotAllocation::new(C::Hip, location, 0, true),
            FixedSlotAllocation::new(C::UpperLegActuator, location, 1, true),
            FixedSlotAllocation::new(C::LowerLegActuator, location, 2, true),
            FixedSlotAllocation::new(C::FootActuator, location, 3, true),
        ],
        _ => Vec::new(),
    }
}

/// Internal structure points per location, indexed by tonnage.
///
/// Columns: center torso, side torso, arm, leg. Head is always 3.
const STRUCTURE_TABLE: [(u32, [u16; 4]); 17] = [
    (20, [6, 5, 3, 4]),
    (25, [8, 6, 4, 6]),
    (30, [10, 7, 5, 7]),
    (35, [11, 8, 6, 8]),
    (40, [12, 10, 6, 10]),
    (45, [14, 11, 7, 11]),
    (50, [16, 12, 8, 12]),
    (55, [18, 13, 9, 13]),
    (60, [20, 14, 10, 14]),
    (65, [21, 15, 10, 15]),
    (70, [22, 15, 11, 15]),
    (75, [23, 16, 12, 16]),
    (80, [25, 17, 13, 17]),
    (85, [27, 18, 14, 18]),
    (90, [29, 19, 15, 19]),
    (95, [30, 20, 16, 20]),
    (100, [31, 21, 17, 21]),
];

/// Head structure points for every tonnage.
pub const HEAD_STRUCTURE: u16 = 3;

/// Maximum armor on the head regardless of structure.
pub const HEAD_ARMOR_MAX: u16 = 9;

/// Internal structure points of a location, or `None` for an illegal tonnage.
#[must_use]
pub fn structure_points(tonnage: u32, location: MechLocation) -> Option<u16> {
    let (_, row) = STRUCTURE_TABLE.iter().find(|(t, _)| *t == tonnage)?;
    Some(match location {
        MechLocation::Head => HEAD_STRUCTURE,
        MechLocation::CenterTorso => row[0],
        MechLocation::LeftTorso | MechLocation::RightTorso => row[1],
        MechLocation::LeftArm | MechLocation::RightArm => row[2],
        MechLocation::LeftLeg | MechLocation::RightLeg => row[3],
    })
}

/// Total internal structure points across all locations.
#[must_use]
pub fn total_structure_points(tonnage: u32) -> Option<u32> {
    MechLocation::ALL
        .iter()
        .map(|loc| structure_points(tonnage, *loc).map(u32::from))
        .sum()
}

/// Maximum armor points a location may carry (front plus rear).
#[must_use]
pub fn max_armor_points(tonnage: u32, location: MechLocation) -> Option<u16> {
    match location {
        MechLocation::Head => Some(HEAD_ARMOR_MAX),
        _ => structure_points(tonnage, location).map(|points| points * 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_capacity() {
        let total: u32 = MechLocation::ALL
            .iter()
            .map(|l| u32::from(l.slot_capacity()))
            .sum();
        assert_eq!(total, u32::from(TOTAL_SLOTS));
    }

    #[test]
    fn test_transfer_graph() {
        assert_eq!(MechLocation::LeftArm.transfers_to(), Some(MechLocation::LeftTorso));
        assert_eq!(MechLocation::RightLeg.transfers_to(), Some(MechLocation::RightTorso));
        assert_eq!(MechLocation::LeftTorso.transfers_to(), Some(MechLocation::CenterTorso));
        assert_eq!(MechLocation::Head.transfers_to(), None);
        assert_eq!(MechLocation::CenterTorso.transfers_to(), None);
    }

    #[test]
    fn test_adjacency() {
        assert!(MechLocation::LeftArm.is_adjacent_to(MechLocation::LeftTorso));
        assert!(MechLocation::CenterTorso.is_adjacent_to(MechLocation::RightTorso));
        assert!(!MechLocation::LeftArm.is_adjacent_to(MechLocation::RightTorso));
        assert!(!MechLocation::Head.is_adjacent_to(MechLocation::CenterTorso));
    }

    #[test]
    fn test_structure_points() {
        assert_eq!(structure_points(50, MechLocation::CenterTorso), Some(16));
        assert_eq!(structure_points(50, MechLocation::Head), Some(3));
        assert_eq!(structure_points(100, MechLocation::LeftLeg), Some(21));
        assert_eq!(structure_points(52, MechLocation::Head), None);
        assert_eq!(total_structure_points(50), Some(83));
    }

    #[test]
    fn test_max_armor() {
        assert_eq!(max_armor_points(50, MechLocation::Head), Some(9));
        assert_eq!(max_armor_points(50, MechLocation::CenterTorso), Some(32));
    }

    #[test]
    fn test_arm_actuators() {
        let full = actuator_allocations(MechLocation::LeftArm, ArmActuators::default());
        assert_eq!(full.len(), 4);
        let bare = actuator_allocations(MechLocation::LeftArm, ArmActuators::BARE);
        assert_eq!(bare.len(), 2);
        assert!(bare.iter().all(|a| a.required));
        assert_eq!(actuator_allocations(MechLocation::LeftLeg, ArmActuators::BARE).len(), 4);
        assert!(!ArmActuators { lower_arm: false, hand: true }.is_consistent());
    }
}
