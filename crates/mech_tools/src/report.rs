//! Plain-text rendering of engine results.

use mech_core::battle_value::BattleValueBreakdown;
use mech_core::construction::ConstructionResult;
use mech_core::cost::CostBreakdown;
use mech_core::repair::{RepairAction, RepairKind};
use mech_core::unit::UnitSnapshot;
use mech_core::validation::ValidationResult;

/// A catalog row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CatalogEntry {
    /// Category name.
    pub category: String,
    /// Type tag as displayed.
    pub type_name: String,
    /// Component name.
    pub name: String,
    /// Tech base.
    pub tech_base: String,
    /// Rules level.
    pub rules_level: String,
    /// Introduction year.
    pub introduction_year: u16,
}

fn header(unit: &UnitSnapshot) -> String {
    format!("{} ({} tons)", unit.display_name(), unit.tonnage)
}

/// Step table, totals and movement.
pub fn construction(unit: &UnitSnapshot, result: &ConstructionResult) -> String {
    let mut lines = vec![header(unit)];
    for step in &result.steps {
        let status = if step.valid { "" } else { "  !" };
        lines.push(format!(
            "  {}. {:<24} {:>6} t {:>3} slots{status}",
            step.step, step.name, step.weight, step.critical_slots
        ));
    }
    lines.push(format!(
        "Structural weight: {} / {} t ({} remaining)",
        result.total_weight, unit.tonnage, result.remaining_tonnage
    ));
    lines.push(format!("Critical slots: {}", result.total_slots));
    lines.push(format!(
        "Movement: walk {} / run {} / jump {}",
        result.movement.walk, result.movement.run, result.movement.jump
    ));
    lines.push(format!(
        "Heat sinks: {} integral, {} external",
        result.integral_heat_sinks, result.external_heat_sinks
    ));
    lines.extend(result.errors.iter().map(|e| format!("  error: {e}")));
    lines.extend(result.warnings.iter().map(|w| format!("  warning: {w}")));
    lines.join("\n")
}

/// Verdict line followed by every issue, errors first.
pub fn validation(unit: &UnitSnapshot, result: &ValidationResult) -> String {
    let verdict = if result.valid { "VALID" } else { "INVALID" };
    let mut lines = vec![format!(
        "{}: {verdict} ({} errors, {} warnings, {} infos from {} rules in {} us)",
        header(unit),
        result.counts.errors,
        result.counts.warnings,
        result.counts.infos,
        result.counts.rules_run,
        result.total_duration_micros
    )];
    for issue in result.issues() {
        let mut line = format!("  {issue}");
        if let Some(suggestion) = &issue.suggestion {
            line.push_str(&format!(" -> {suggestion}"));
        }
        if issue.auto_repairable {
            line.push_str(" [repairable]");
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// One line per applied repair.
pub fn repairs(actions: &[RepairAction]) -> String {
    if actions.is_empty() {
        return "No repairs needed".to_string();
    }
    let mut lines = vec![format!("Applied {} repairs:", actions.len())];
    for action in actions {
        let what = match action.kind {
            RepairKind::ClampNegative => "clamped negative armor",
            RepairKind::ClearRear => "cleared rear armor",
            RepairKind::CapToMaximum => "capped armor to maximum",
        };
        lines.push(format!(
            "  {}: {what} ({}/{} -> {}/{})",
            action.location, action.before.front, action.before.rear, action.after.front, action.after.rear
        ));
    }
    lines.join("\n")
}

/// Itemized cost.
pub fn cost(unit: &UnitSnapshot, breakdown: &CostBreakdown) -> String {
    let rows = [
        ("Chassis", breakdown.chassis),
        ("Engine", breakdown.engine),
        ("Gyro", breakdown.gyro),
        ("Internal structure", breakdown.structure),
        ("Armor", breakdown.armor),
        ("Cockpit", breakdown.cockpit),
        ("Heat sinks", breakdown.heat_sinks),
        ("Movement", breakdown.movement),
        ("Equipment", breakdown.equipment),
    ];
    let mut lines = vec![header(unit)];
    lines.extend(rows.iter().map(|(label, value)| format!("  {label:<20} {value:>12}")));
    lines.push(format!("  {:<20} {:>12}", "Subtotal", breakdown.subtotal()));
    lines.push(format!("  {:<20} {:>12}", "Total (C-bills)", breakdown.total));
    lines.join("\n")
}

/// Defensive and offensive components with the final value.
pub fn battle_value(unit: &UnitSnapshot, breakdown: &BattleValueBreakdown) -> String {
    [
        header(unit),
        format!(
            "  Defensive: {} ({} armor, {} structure, x{})",
            breakdown.defensive,
            breakdown.armor_points,
            breakdown.structure_points,
            hundredths(breakdown.defensive_modifier_hundredths)
        ),
        format!("  Offensive: {}", breakdown.offensive),
        format!(
            "  Speed factor: x{} (TMM {})",
            hundredths(breakdown.speed_factor_hundredths),
            breakdown.target_movement_modifier
        ),
        format!("  Battle value: {}", breakdown.total),
    ]
    .join("\n")
}

fn hundredths(value: u32) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}

/// Catalog listing grouped by category.
pub fn catalog(entries: &[CatalogEntry]) -> String {
    let mut lines = Vec::new();
    let mut current = "";
    for entry in entries {
        if entry.category != current {
            current = &entry.category;
            lines.push(format!("{current}:"));
        }
        lines.push(format!(
            "  {:<28} {:<14} {:<13} {}",
            entry.name, entry.tech_base, entry.rules_level, entry.introduction_year
        ));
    }
    lines.join("\n")
}
