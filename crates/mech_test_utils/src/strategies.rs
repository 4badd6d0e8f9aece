//! Proptest strategies for construction rules.
//!
//! These strategies generate random but reproducible inputs for
//! property-based testing of the rules engine.

use proptest::prelude::*;

use mech_core::catalog::{
    ArmorType, EngineType, GyroType, HeatSinkType, MovementEnhancementType, StructureType,
};
use mech_core::construction::{MAX_TONNAGE, MIN_TONNAGE};
use mech_core::location::MechLocation;
use mech_core::unit::{ArmorAllocation, EngineSelection, HeatSinkSelection, UnitSnapshot};

use crate::fixtures::reference_unit;

/// Legal tonnage: 20 to 100 in steps of 5.
pub fn arb_tonnage() -> impl Strategy<Value = u32> {
    (MIN_TONNAGE / 5..=MAX_TONNAGE / 5).prop_map(|n| n * 5)
}

/// Any tonnage, biased towards the legal range and the ends of `u32`.
pub fn arb_any_tonnage() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => arb_tonnage(),
        2 => 0u32..=200u32,
        1 => Just(u32::MAX),
        1 => any::<u32>(),
    ]
}

/// Armor points for one facing, including negative and huge values.
pub fn arb_any_armor_points() -> impl Strategy<Value = i32> {
    prop_oneof![
        3 => -10i32..=60i32,
        1 => Just(i32::MAX),
        1 => any::<i32>(),
    ]
}

/// Heat sink count anywhere in `u16`.
pub fn arb_any_heat_sink_count() -> impl Strategy<Value = u16> {
    prop_oneof![
        3 => 0u16..=40u16,
        1 => Just(u16::MAX),
        1 => any::<u16>(),
    ]
}

/// Legal engine rating: 10 to 400 in steps of 5.
pub fn arb_rating() -> impl Strategy<Value = u16> {
    (2u16..=80u16).prop_map(|n| n * 5)
}

/// Heat value in a range wider than the heat scale.
pub fn arb_heat() -> impl Strategy<Value = u16> {
    0u16..60u16
}

/// Any 2d6 roll.
pub fn arb_2d6() -> impl Strategy<Value = u8> {
    2u8..=12u8
}

/// Any 1d6 roll.
pub fn arb_1d6() -> impl Strategy<Value = u8> {
    1u8..=6u8
}

/// Any location.
pub fn arb_location() -> impl Strategy<Value = MechLocation> {
    proptest::sample::select(MechLocation::ALL.to_vec())
}

/// Any engine type.
pub fn arb_engine_type() -> impl Strategy<Value = EngineType> {
    proptest::sample::select(EngineType::ALL.to_vec())
}

/// Any gyro type.
pub fn arb_gyro_type() -> impl Strategy<Value = GyroType> {
    proptest::sample::select(GyroType::ALL.to_vec())
}

/// Any structure type.
pub fn arb_structure_type() -> impl Strategy<Value = StructureType> {
    proptest::sample::select(StructureType::ALL.to_vec())
}

/// Any heat sink type.
pub fn arb_heat_sink_type() -> impl Strategy<Value = HeatSinkType> {
    proptest::sample::select(HeatSinkType::ALL.to_vec())
}

/// A reference-unit variant with random tonnage, engine and gyro.
///
/// The rating is a whole multiple of tonnage giving walk 1-8 and never
/// exceeding 400, so the engine step never reports an invalid rating.
pub fn arb_unit() -> impl Strategy<Value = UnitSnapshot> {
    (arb_tonnage(), arb_engine_type(), arb_gyro_type(), arb_structure_type(), 1u32..=8u32).prop_map(
        |(tonnage, engine_type, gyro, structure, walk)| {
            let walk = walk.min(400 / tonnage).max(1);
            let mut unit = reference_unit();
            unit.tonnage = tonnage;
            unit.engine = EngineSelection {
                engine_type,
                rating: u16::try_from(tonnage * walk).unwrap_or(400),
            };
            unit.gyro = gyro;
            unit.structure = structure;
            unit
        },
    )
}

/// A reference-unit variant with arbitrary, mostly illegal, numbers.
///
/// Tonnage, rating, armor, heat sinks and jump MP range over their whole
/// types, so the pipeline has to report or absorb every overflow.
pub fn arb_extreme_unit() -> impl Strategy<Value = UnitSnapshot> {
    (
        arb_any_tonnage(),
        arb_engine_type(),
        any::<u16>(),
        proptest::collection::vec((arb_location(), arb_any_armor_points(), arb_any_armor_points()), 0..8),
        proptest::sample::select(ArmorType::ALL.to_vec()),
        arb_heat_sink_type(),
        arb_any_heat_sink_count(),
        any::<u8>(),
        proptest::sample::subsequence(MovementEnhancementType::ALL.to_vec(), 0..=2),
    )
        .prop_map(
            |(tonnage, engine_type, rating, armor, armor_type, sink_type, sinks, jump, enhancements)| {
                let mut unit = reference_unit();
                unit.tonnage = tonnage;
                unit.engine = EngineSelection { engine_type, rating };
                unit.armor.armor_type = armor_type;
                for (location, front, rear) in armor {
                    unit.armor
                        .allocation
                        .insert(location, ArmorAllocation::split(front, rear));
                }
                unit.heat_sinks = HeatSinkSelection {
                    heat_sink_type: sink_type,
                    count: sinks,
                };
                unit.movement.jump_mp = jump;
                unit.movement.enhancements = enhancements;
                unit
            },
        )
}
