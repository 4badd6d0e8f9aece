//! Test fixtures and helpers.
//!
//! Reference unit designs with hand-checked construction numbers, and an
//! equipment lookup holding the weapons they mount.

use std::collections::BTreeMap;

use fixed::types::I32F32;
use mech_core::catalog::{
    ArmorType, CockpitType, EngineType, GyroType, HeatSinkType, StructureType,
};
use mech_core::equipment::{EquipmentCategory, EquipmentFlag, EquipmentRecord, StaticEquipmentLookup};
use mech_core::location::MechLocation;
use mech_core::tech::{ComponentBase, RulesLevel, TechBase, TechBaseMode};
use mech_core::unit::{
    ActuatorLayout, ArmorAllocation, ArmorSelection, DistributedItem, DistributedPlacement,
    EngineSelection, HeatSinkSelection, MountedEquipment, MovementSelection, UnitSnapshot,
};
use mech_core::variable_equipment::variable_equipment;

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> I32F32 {
    I32F32::from_num(n)
}

/// Create a fixed-point number from a float (for tests only).
///
/// Note: rules code never uses floats. This is only for convenient
/// assertions on half-ton values.
#[must_use]
pub fn fixed_f(n: f64) -> I32F32 {
    I32F32::from_num(n)
}

/// Equipment ids in [`sample_equipment`].
pub mod ids {
    /// Medium laser.
    pub const MEDIUM_LASER: &str = "medium-laser";
    /// PPC.
    pub const PPC: &str = "ppc";
    /// LRM-15.
    pub const LRM_15: &str = "lrm-15";
    /// LRM-15 ammunition.
    pub const LRM_15_AMMO: &str = "ammo-lrm-15";
    /// AC/20.
    pub const AC_20: &str = "ac-20";
    /// Guardian ECM.
    pub const ECM: &str = "guardian-ecm";
    /// Clan ER medium laser.
    pub const CLAN_ER_MEDIUM_LASER: &str = "clan-er-medium-laser";
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    name: &str,
    tech_base: TechBase,
    rules_level: RulesLevel,
    year: u16,
    category: EquipmentCategory,
    weight: I32F32,
    slots: u8,
) -> EquipmentRecord {
    EquipmentRecord::new(
        id,
        ComponentBase::new(name, tech_base, rules_level, year),
        category,
        weight,
        slots,
    )
}

/// A lookup with common weapons plus every variable-size item.
#[must_use]
pub fn sample_equipment() -> StaticEquipmentLookup {
    use EquipmentCategory as C;
    use RulesLevel::{Introductory, Standard};
    use TechBase::{Clan, InnerSphere};

    let mut records = vec![
        record(ids::MEDIUM_LASER, "Medium Laser", InnerSphere, Introductory, 2300, C::EnergyWeapon, fixed(1), 1)
            .with_stats(40_000, 46, 3, 5),
        record(ids::PPC, "PPC", InnerSphere, Introductory, 2460, C::EnergyWeapon, fixed(7), 3)
            .with_stats(200_000, 176, 10, 10),
        record(ids::LRM_15, "LRM 15", InnerSphere, Introductory, 2400, C::MissileWeapon, fixed(7), 3)
            .with_stats(175_000, 136, 5, 15),
        record(ids::LRM_15_AMMO, "LRM 15 Ammo", InnerSphere, Introductory, 2400, C::Ammunition, fixed(1), 1)
            .with_stats(30_000, 17, 0, 0),
        record(ids::AC_20, "AC/20", InnerSphere, Introductory, 2500, C::BallisticWeapon, fixed(14), 10)
            .with_stats(300_000, 178, 7, 20),
        record(ids::ECM, "Guardian ECM Suite", InnerSphere, Standard, 2597, C::Electronics, fixed_f(1.5), 2)
            .with_stats(200_000, 61, 0, 0)
            .with_flag(EquipmentFlag::DefensiveElectronics),
        record(ids::CLAN_ER_MEDIUM_LASER, "ER Medium Laser (Clan)", Clan, Standard, 2824, C::EnergyWeapon, fixed(1), 1)
            .with_stats(80_000, 108, 5, 7),
    ];
    records.extend(variable_equipment());
    StaticEquipmentLookup::from_records(records)
}

fn armor(entries: [(MechLocation, ArmorAllocation); 8]) -> BTreeMap<MechLocation, ArmorAllocation> {
    BTreeMap::from(entries)
}

/// 50-ton reference design with no equipment.
///
/// Standard engine 250, gyro, structure, cockpit and armor (160 points),
/// ten single heat sinks. Structural weight 33.5 tons, 15 slots, walk 5,
/// run 8.
#[must_use]
pub fn reference_unit() -> UnitSnapshot {
    use MechLocation as L;
    UnitSnapshot {
        chassis: "Reference".to_string(),
        model: "REF-50".to_string(),
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
            allocation: armor([
                (L::Head, ArmorAllocation::front(9)),
                (L::CenterTorso, ArmorAllocation::split(24, 8)),
                (L::LeftTorso, ArmorAllocation::split(18, 6)),
                (L::RightTorso, ArmorAllocation::split(18, 6)),
                (L::LeftArm, ArmorAllocation::front(16)),
                (L::RightArm, ArmorAllocation::front(16)),
                (L::LeftLeg, ArmorAllocation::front(19)),
                (L::RightLeg, ArmorAllocation::front(20)),
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

/// 75-ton legal design exercising distributed slots and equipment.
///
/// XL engine 300 (walk 4, run 6, jump 4), 12 double heat sinks with two
/// external, 200 armor points. Structural weight 41.5 tons; equipment
/// 17 tons (PPC, two medium lasers, LRM 15 with one ton of ammunition).
#[must_use]
pub fn heavy_unit() -> UnitSnapshot {
    use MechLocation as L;
    let placement = |item, location, slots| DistributedPlacement {
        item,
        location,
        slots,
    };
    UnitSnapshot {
        chassis: "Heavy".to_string(),
        model: "HVY-75".to_string(),
        tonnage: 75,
        tech_base_mode: TechBaseMode::InnerSphere,
        year: Some(3025),
        engine: EngineSelection {
            engine_type: EngineType::XlInnerSphere,
            rating: 300,
        },
        gyro: GyroType::Standard,
        structure: StructureType::Standard,
        cockpit: CockpitType::Standard,
        armor: ArmorSelection {
            armor_type: ArmorType::Standard,
            allocation: armor([
                (L::Head, ArmorAllocation::front(9)),
                (L::CenterTorso, ArmorAllocation::split(30, 10)),
                (L::LeftTorso, ArmorAllocation::split(22, 6)),
                (L::RightTorso, ArmorAllocation::split(22, 6)),
                (L::LeftArm, ArmorAllocation::front(22)),
                (L::RightArm, ArmorAllocation::front(22)),
                (L::LeftLeg, ArmorAllocation::front(25)),
                (L::RightLeg, ArmorAllocation::front(26)),
            ]),
        },
        heat_sinks: HeatSinkSelection {
            heat_sink_type: HeatSinkType::DoubleInnerSphere,
            count: 12,
        },
        movement: MovementSelection {
            jump_mp: 4,
            enhancements: Vec::new(),
        },
        actuators: ActuatorLayout::default(),
        equipment: vec![
            MountedEquipment::new(ids::PPC, L::RightArm),
            MountedEquipment::new(ids::MEDIUM_LASER, L::LeftArm),
            MountedEquipment::new(ids::MEDIUM_LASER, L::LeftArm),
            MountedEquipment::new(ids::LRM_15, L::LeftTorso),
            MountedEquipment::new(ids::LRM_15_AMMO, L::LeftTorso),
        ],
        distributed: vec![
            placement(DistributedItem::HeatSinks, L::LeftTorso, 3),
            placement(DistributedItem::HeatSinks, L::RightTorso, 3),
            placement(DistributedItem::JumpJets, L::LeftLeg, 2),
            placement(DistributedItem::JumpJets, L::RightLeg, 2),
        ],
    }
}

/// A unit carrying several illegal choices at once.
///
/// Over-maximum head armor, negative arm armor, eight heat sinks and an
/// unknown equipment id.
#[must_use]
pub fn broken_unit() -> UnitSnapshot {
    let mut unit = reference_unit();
    unit.model = "BRK-1".to_string();
    unit.armor
        .allocation
        .insert(MechLocation::Head, ArmorAllocation::front(12));
    unit.armor
        .allocation
        .insert(MechLocation::LeftArm, ArmorAllocation::front(-5));
    unit.heat_sinks.count = 8;
    unit.equipment
        .push(MountedEquipment::new("no-such-weapon", MechLocation::RightArm));
    unit
}
