//! Heat scale effects and per-turn heat balance.

use serde::{Deserialize, Serialize};

use crate::catalog::ComponentCatalog;
use crate::equipment::EquipmentLookup;
use crate::error::Result;
use crate::unit::UnitSnapshot;

/// A roll required to avoid a heat consequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatCheck {
    /// No roll needed.
    None,
    /// Roll this number or higher on 2d6 to avoid it.
    Avoid(u8),
    /// Happens without a roll.
    Automatic,
}

/// Effects active at or above a heat threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatEffect {
    /// Lowest heat at which this row applies.
    pub threshold: u16,
    /// Change to walking MP (zero or negative).
    pub movement_penalty: i8,
    /// To-hit modifier.
    pub to_hit_penalty: u8,
    /// Shutdown check.
    pub shutdown: HeatCheck,
    /// Ammunition explosion check.
    pub ammo_explosion: HeatCheck,
}

const fn row(
    threshold: u16,
    movement_penalty: i8,
    to_hit_penalty: u8,
    shutdown: HeatCheck,
    ammo_explosion: HeatCheck,
) -> HeatEffect {
    HeatEffect {
        threshold,
        movement_penalty,
        to_hit_penalty,
        shutdown,
        ammo_explosion,
    }
}

/// The heat scale, ascending by threshold.
pub const HEAT_SCALE: [HeatEffect; 12] = {
    use HeatCheck::{Automatic, Avoid, None};
    [
        row(0, 0, 0, None, None),
        row(5, -1, 0, None, None),
        row(10, -2, 1, None, None),
        row(15, -3, 2, Avoid(4), None),
        row(18, -3, 2, Avoid(6), None),
        row(20, -4, 3, Avoid(6), Avoid(4)),
        row(22, -4, 3, Avoid(8), Avoid(6)),
        row(24, -4, 4, Avoid(8), Avoid(6)),
        row(25, -5, 4, Avoid(8), Avoid(6)),
        row(26, -5, 4, Avoid(10), Avoid(6)),
        row(28, -5, 4, Avoid(10), Avoid(8)),
        row(30, -5, 4, Automatic, Automatic),
    ]
};

/// The highest heat-scale row whose threshold is at or below `heat`.
#[must_use]
pub fn heat_effect(heat: u16) -> &'static HeatEffect {
    HEAT_SCALE
        .iter()
        .rev()
        .find(|e| heat >= e.threshold)
        .unwrap_or(&HEAT_SCALE[0])
}

/// How the unit moved this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    /// Did not move.
    Stationary,
    /// Walked.
    Walk,
    /// Ran.
    Run,
    /// Jumped this many hexes.
    Jump(u8),
}

/// Heat generated by movement: walk 1, run 2, jump the greater of 3 and jump MP.
#[must_use]
pub fn movement_heat(mode: MovementMode) -> u16 {
    match mode {
        MovementMode::Stationary => 0,
        MovementMode::Walk => 1,
        MovementMode::Run => 2,
        MovementMode::Jump(mp) => u16::from(mp).max(3),
    }
}

/// Heat generated and dissipated in one turn of full fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatProfile {
    /// Heat from firing every weapon once.
    pub weapon_heat: u32,
    /// Heat from movement.
    pub movement_heat: u16,
    /// Heat sunk per turn.
    pub dissipation: u32,
    /// Generated minus dissipated; negative means spare capacity.
    pub net_heat: i64,
}

impl HeatProfile {
    /// Weapon plus movement heat.
    #[must_use]
    pub fn generated(&self) -> u32 {
        self.weapon_heat.saturating_add(u32::from(self.movement_heat))
    }
}

/// Heat balance of a unit firing every weapon while moving in `mode`.
pub fn heat_profile(
    unit: &UnitSnapshot,
    catalog: &ComponentCatalog,
    lookup: &dyn EquipmentLookup,
    mode: MovementMode,
) -> Result<HeatProfile> {
    let sink = catalog.heat_sink(unit.heat_sinks.heat_sink_type)?;
    let dissipation = u32::from(unit.heat_sinks.count) * u32::from(sink.dissipation);
    let weapon_heat = unit
        .equipment
        .iter()
        .filter_map(|m| lookup.get_by_id(&m.equipment_id))
        .filter(|r| r.category.is_weapon())
        .fold(0u32, |acc, r| acc.saturating_add(u32::from(r.heat)));
    let mut profile = HeatProfile {
        weapon_heat,
        movement_heat: movement_heat(mode),
        dissipation,
        net_heat: 0,
    };
    profile.net_heat = i64::from(profile.generated()) - i64::from(dissipation);
    Ok(profile)
}
