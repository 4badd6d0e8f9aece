//! Opt-in repair of auto-repairable armor problems.
//!
//! Validation only flags these issues. Repair is a separate call that returns
//! a new snapshot and leaves the input untouched.

use serde::{Deserialize, Serialize};

use crate::location::{max_armor_points, MechLocation};
use crate::unit::{ArmorAllocation, UnitSnapshot};

/// What a repair changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepairKind {
    /// Negative armor raised to zero.
    ClampNegative,
    /// Rear armor removed from a location that cannot carry it.
    ClearRear,
    /// Armor lowered to the location maximum.
    CapToMaximum,
}

/// One applied repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairAction {
    /// Location changed.
    pub location: MechLocation,
    /// Kind of change.
    pub kind: RepairKind,
    /// Allocation before.
    pub before: ArmorAllocation,
    /// Allocation after.
    pub after: ArmorAllocation,
}

fn repair_location(
    tonnage: u32,
    location: MechLocation,
    mut armor: ArmorAllocation,
    actions: &mut Vec<RepairAction>,
) -> ArmorAllocation {
    let mut record = |kind, before: ArmorAllocation, after: ArmorAllocation| {
        if before != after {
            actions.push(RepairAction {
                location,
                kind,
                before,
                after,
            });
        }
    };

    let before = armor;
    armor.front = armor.front.max(0);
    armor.rear = armor.rear.max(0);
    record(RepairKind::ClampNegative, before, armor);

    if !location.has_rear_armor() {
        let before = armor;
        armor.rear = 0;
        record(RepairKind::ClearRear, before, armor);
    }

    // illegal tonnage has no maximum to cap against
    if let Some(max) = max_armor_points(tonnage, location) {
        let max = i32::from(max);
        let before = armor;
        armor.front = armor.front.min(max);
        armor.rear = armor.rear.min(max - armor.front);
        record(RepairKind::CapToMaximum, before, armor);
    }
    armor
}

/// Apply every automatic armor repair.
///
/// Returns the repaired copy and the actions taken, in location order.
#[must_use]
pub fn apply_auto_repairs(unit: &UnitSnapshot) -> (UnitSnapshot, Vec<RepairAction>) {
    let mut repaired = unit.clone();
    let mut actions = Vec::new();
    for (location, armor) in &mut repaired.armor.allocation {
        *armor = repair_location(unit.tonnage, *location, *armor, &mut actions);
    }
    if !actions.is_empty() {
        tracing::debug!(unit = %unit.display_name(), repairs = actions.len(), "applied auto repairs");
    }
    (repaired, actions)
}
