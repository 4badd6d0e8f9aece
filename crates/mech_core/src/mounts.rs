//! Per-unit formula context and resolution of mounted equipment.

use crate::catalog::{gyro_base_formula, ComponentCatalog};
use crate::equipment::{EquipmentLookup, EquipmentRecord, ResolvedEquipment};
use crate::error::Result;
use crate::formula::{evaluate, fields, EvaluationContext};
use crate::location::MechLocation;
use crate::math::{saturating_sum, Fixed};
use crate::unit::{MountedEquipment, UnitSnapshot};

/// A mount joined with its record and unit-specific size.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMount<'a> {
    /// The mount in the snapshot.
    pub mount: &'a MountedEquipment,
    /// The equipment record.
    pub record: &'a EquipmentRecord,
    /// Size and stats for this unit.
    pub resolved: ResolvedEquipment,
}

impl ResolvedMount<'_> {
    /// `(location, slots)` pairs this mount occupies.
    #[must_use]
    pub fn slot_spread(&self) -> Vec<(MechLocation, u8)> {
        self.mount.slot_spread(self.resolved.slots)
    }
}

/// Formula context describing a unit.
///
/// Holds tonnage, engine rating, engine weight (zero for an invalid rating),
/// gyro base and the tonnage of fixed-size direct-fire weapons.
pub fn unit_context(
    unit: &UnitSnapshot,
    catalog: &ComponentCatalog,
    lookup: &dyn EquipmentLookup,
) -> Result<EvaluationContext> {
    let engine = catalog.engine(unit.engine.engine_type)?;
    let engine_weight = engine.weight(unit.engine.rating).unwrap_or(Fixed::ZERO);
    let mut ctx = EvaluationContext::for_tonnage(unit.tonnage)
        .with(fields::ENGINE_RATING, Fixed::from_num(unit.engine.rating))
        .with(fields::ENGINE_WEIGHT, engine_weight);
    let gyro_base = evaluate(&gyro_base_formula(), &ctx)?;
    ctx.insert(fields::GYRO_BASE, gyro_base);

    let direct_fire = saturating_sum(
        unit.equipment
            .iter()
            .filter_map(|m| lookup.get_by_id(&m.equipment_id))
            .filter(|r| r.category.is_direct_fire() && !r.is_variable())
            .map(|r| r.weight),
    );
    ctx.insert(fields::DIRECT_FIRE_TONNAGE, direct_fire);
    Ok(ctx)
}

/// Resolve every mount against the lookup.
///
/// Mounts naming an unknown id are skipped; the equipment validation rule
/// reports them.
pub fn resolve_mounts<'a>(
    unit: &'a UnitSnapshot,
    lookup: &'a dyn EquipmentLookup,
    ctx: &EvaluationContext,
) -> Result<Vec<ResolvedMount<'a>>> {
    let mut out = Vec::with_capacity(unit.equipment.len());
    for mount in &unit.equipment {
        let Some(record) = lookup.get_by_id(&mount.equipment_id) else {
            tracing::warn!(id = %mount.equipment_id, "skipping unknown equipment");
            continue;
        };
        let resolved = record.resolve(ctx)?;
        out.push(ResolvedMount {
            mount,
            record,
            resolved,
        });
    }
    Ok(out)
}

/// Every `(location, slots)` pair occupied by resolved mounts.
#[must_use]
pub fn equipment_slots(mounts: &[ResolvedMount<'_>]) -> Vec<(MechLocation, u8)> {
    mounts.iter().flat_map(ResolvedMount::slot_spread).collect()
}

/// Total weight of resolved mounts.
#[must_use]
pub fn equipment_weight(mounts: &[ResolvedMount<'_>]) -> Fixed {
    saturating_sum(mounts.iter().map(|m| m.resolved.weight))
}
