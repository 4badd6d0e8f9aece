//! Combat resolution tables: hit location, cluster hits, critical hits and
//! damage transfer.
//!
//! Dice are inputs, never rolled here. Every function rejects a roll outside
//! the range of its dice with [`MechError::InvalidRoll`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, Result};
use crate::location::{structure_points, MechLocation};
use crate::unit::UnitSnapshot;

/// Direction or type of an attack, selecting the hit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackDirection {
    /// Attack from the front arc (2d6).
    Front,
    /// Attack from the rear arc (2d6), striking rear armor.
    Rear,
    /// Attack from the left side (2d6).
    Left,
    /// Attack from the right side (2d6).
    Right,
    /// Punch from the front (1d6).
    Punch,
    /// Kick from the front (1d6).
    Kick,
}

impl AttackDirection {
    /// Whether the table is rolled on 2d6.
    #[must_use]
    pub const fn is_directional(self) -> bool {
        !matches!(self, Self::Punch | Self::Kick)
    }
}

/// Result of a hit-location roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitLocation {
    /// Location struck.
    pub location: MechLocation,
    /// Whether rear armor takes the hit.
    pub rear: bool,
    /// Whether the hit may cause a critical (2 or 12 on a directional table).
    pub critical_candidate: bool,
}

fn check_roll(roll: u8, min: u8, max: u8) -> Result<()> {
    if (min..=max).contains(&roll) {
        Ok(())
    } else {
        Err(MechError::InvalidRoll { roll, min, max })
    }
}

/// Resolve a hit location from a roll on the table for `direction`.
///
/// # Errors
///
/// Returns [`MechError::InvalidRoll`] for a roll outside 2-12 on a
/// directional table or 1-6 on the punch and kick tables.
pub fn resolve_hit_location(direction: AttackDirection, roll: u8) -> Result<HitLocation> {
    use MechLocation as L;
    let location = match direction {
        AttackDirection::Front | AttackDirection::Rear => {
            check_roll(roll, 2, 12)?;
            match roll {
                2 | 7 => L::CenterTorso,
                3 | 4 => L::RightArm,
                5 => L::RightLeg,
                6 => L::RightTorso,
                8 => L::LeftTorso,
                9 => L::LeftLeg,
                10 | 11 => L::LeftArm,
                _ => L::Head,
            }
        }
        AttackDirection::Left => {
            check_roll(roll, 2, 12)?;
            match roll {
                2 | 7 => L::LeftTorso,
                3 | 6 => L::LeftLeg,
                4 | 5 => L::LeftArm,
                8 => L::CenterTorso,
                9 => L::RightTorso,
                10 => L::RightArm,
                11 => L::RightLeg,
                _ => L::Head,
            }
        }
        AttackDirection::Right => {
            check_roll(roll, 2, 12)?;
            match roll {
                2 | 7 => L::RightTorso,
                3 | 6 => L::RightLeg,
                4 | 5 => L::RightArm,
                8 => L::CenterTorso,
                9 => L::LeftTorso,
                10 => L::LeftArm,
                11 => L::LeftLeg,
                _ => L::Head,
            }
        }
        AttackDirection::Punch => {
            check_roll(roll, 1, 6)?;
            match roll {
                1 => L::LeftArm,
                2 => L::LeftTorso,
                3 => L::CenterTorso,
                4 => L::RightTorso,
                5 => L::RightArm,
                _ => L::Head,
            }
        }
        AttackDirection::Kick => {
            check_roll(roll, 1, 6)?;
            if roll <= 3 {
                L::RightLeg
            } else {
                L::LeftLeg
            }
        }
    };
    Ok(HitLocation {
        location,
        rear: direction == AttackDirection::Rear && location.has_rear_armor(),
        critical_candidate: direction.is_directional() && (roll == 2 || roll == 12),
    })
}

/// Missile counts with their own cluster-table column.
pub const CLUSTER_SIZES: [u8; 21] = [
    2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 30, 40,
];

/// Hits per missile count, for 2d6 rolls of 2 through 12.
const CLUSTER_TABLE: [[u8; 11]; 21] = [
    [1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2],
    [1, 1, 2, 2, 2, 2, 2, 2, 3, 3, 3],
    [1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4],
    [1, 2, 2, 3, 3, 3, 3, 4, 4, 5, 5],
    [2, 2, 3, 3, 4, 4, 4, 5, 5, 6, 6],
    [2, 2, 3, 4, 4, 4, 4, 6, 6, 7, 7],
    [3, 3, 4, 4, 5, 5, 5, 6, 6, 7, 8],
    [3, 3, 4, 5, 5, 5, 5, 7, 7, 8, 9],
    [3, 3, 4, 6, 6, 6, 6, 8, 8, 10, 10],
    [4, 4, 5, 7, 7, 7, 7, 9, 9, 11, 11],
    [4, 4, 5, 8, 8, 8, 8, 10, 10, 12, 12],
    [4, 4, 5, 8, 8, 8, 8, 11, 11, 13, 13],
    [5, 5, 6, 9, 9, 9, 9, 11, 11, 14, 14],
    [5, 5, 6, 9, 9, 9, 9, 12, 12, 15, 15],
    [5, 5, 7, 10, 10, 10, 10, 13, 13, 16, 16],
    [5, 5, 7, 10, 10, 10, 10, 14, 14, 17, 17],
    [6, 6, 8, 11, 11, 11, 11, 14, 14, 18, 18],
    [6, 6, 8, 11, 11, 11, 11, 15, 15, 19, 19],
    [6, 6, 9, 12, 12, 12, 12, 16, 16, 20, 20],
    [10, 10, 12, 18, 18, 18, 18, 24, 24, 30, 30],
    [12, 12, 18, 24, 24, 24, 24, 32, 32, 40, 40],
];

/// Number of missiles that hit from a cluster of `missiles`.
///
/// Counts without their own column use the nearest smaller column. A single
/// missile always hits; zero missiles never do.
///
/// # Errors
///
/// Returns [`MechError::InvalidRoll`] for a roll outside 2-12.
pub fn cluster_hits(missiles: u8, roll: u8) -> Result<u8> {
    check_roll(roll, 2, 12)?;
    if missiles < CLUSTER_SIZES[0] {
        return Ok(missiles);
    }
    let column = CLUSTER_SIZES
        .iter()
        .rposition(|size| *size <= missiles)
        .unwrap_or(0);
    Ok(CLUSTER_TABLE[column][usize::from(roll - 2)])
}

/// Outcome of a critical-hit determination roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CriticalHitOutcome {
    /// No critical hit.
    None,
    /// This many critical hits (1-3).
    Hits(u8),
    /// The head or limb is destroyed outright.
    LocationDestroyed,
}

/// Determine critical hits from a 2d6 roll against a location.
///
/// # Errors
///
/// Returns [`MechError::InvalidRoll`] for a roll outside 2-12.
pub fn determine_critical_hits(roll: u8, location: MechLocation) -> Result<CriticalHitOutcome> {
    check_roll(roll, 2, 12)?;
    Ok(match roll {
        2..=7 => CriticalHitOutcome::None,
        8 | 9 => CriticalHitOutcome::Hits(1),
        10 | 11 => CriticalHitOutcome::Hits(2),
        _ if location.is_torso() => CriticalHitOutcome::Hits(3),
        _ => CriticalHitOutcome::LocationDestroyed,
    })
}

/// Armor and structure left in one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationState {
    /// Front armor.
    pub armor: u16,
    /// Rear armor.
    pub rear_armor: u16,
    /// Internal structure.
    pub structure: u16,
}

impl LocationState {
    /// Whether the location has no structure left.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.structure == 0
    }
}

/// Fresh damage state for a unit, or `None` for an illegal tonnage.
#[must_use]
pub fn initial_state(unit: &UnitSnapshot) -> Option<BTreeMap<MechLocation, LocationState>> {
    let clamp = |points: i32| u16::try_from(points.max(0)).unwrap_or(u16::MAX);
    MechLocation::ALL
        .iter()
        .map(|location| {
            let armor = unit.armor.at(*location);
            structure_points(unit.tonnage, *location).map(|structure| {
                (
                    *location,
                    LocationState {
                        armor: clamp(armor.front),
                        rear_armor: clamp(armor.rear),
                        structure,
                    },
                )
            })
        })
        .collect()
}

/// Result of applying damage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOutcome {
    /// State after the damage.
    pub locations: BTreeMap<MechLocation, LocationState>,
    /// Locations destroyed by this damage, in order.
    pub destroyed: Vec<MechLocation>,
    /// Whether the head or center torso was destroyed.
    pub catastrophic: bool,
    /// Damage left over after the chain ended.
    pub excess: u16,
}

/// Apply `damage` to `location`, walking the transfer chain.
///
/// Armor absorbs first, then structure; whatever is left moves to the next
/// location inward. Destroying a side torso also destroys the arm on that
/// side. The input map is not modified.
#[must_use]
pub fn allocate_damage(
    state: &BTreeMap<MechLocation, LocationState>,
    location: MechLocation,
    damage: u16,
    rear: bool,
) -> DamageOutcome {
    let mut locations = state.clone();
    let mut destroyed = Vec::new();
    let mut remaining = damage;
    let mut current = location;

    loop {
        let entry = locations.entry(current).or_default();
        if !entry.is_destroyed() {
            let armor = if rear && current.has_rear_armor() {
                &mut entry.rear_armor
            } else {
                &mut entry.armor
            };
            let absorbed = (*armor).min(remaining);
            *armor -= absorbed;
            remaining -= absorbed;

            let absorbed = entry.structure.min(remaining);
            entry.structure -= absorbed;
            remaining -= absorbed;
            if entry.is_destroyed() {
                destroyed.push(current);
                let arm = match current {
                    MechLocation::LeftTorso => Some(MechLocation::LeftArm),
                    MechLocation::RightTorso => Some(MechLocation::RightArm),
                    _ => None,
                };
                if let Some(arm) = arm {
                    let arm_state = locations.entry(arm).or_default();
                    if !arm_state.is_destroyed() {
                        arm_state.structure = 0;
                        destroyed.push(arm);
                    }
                }
            }
        }
        if remaining == 0 {
            break;
        }
        match current.transfers_to() {
            Some(next) => current = next,
            None => break,
        }
    }

    let catastrophic = destroyed
        .iter()
        .any(|l| matches!(l, MechLocation::Head | MechLocation::CenterTorso));
    tracing::trace!(?location, damage, excess = remaining, catastrophic, "damage allocated");
    DamageOutcome {
        locations,
        destroyed,
        catastrophic,
        excess: remaining,
    }
}
