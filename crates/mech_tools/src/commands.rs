//! Subcommand implementations.
//!
//! Each command produces a [`Report`]: the rendered body plus whether the
//! unit passed, which decides the process exit code.

use serde::Serialize;

use mech_core::battle_value::battle_value;
use mech_core::catalog::{catalog, ComponentCatalog, ComponentCategory};
use mech_core::construction::construct;
use mech_core::cost::calculate_cost;
use mech_core::equipment::EquipmentLookup;
use mech_core::repair::{apply_auto_repairs, RepairAction};
use mech_core::unit::UnitSnapshot;
use mech_core::validation::{ValidationOptions, ValidationResult, Validator, ValidatorConfig};

use crate::load::Result;
use crate::report::{self, CatalogEntry};

/// How reports are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Output of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Rendered output.
    pub body: String,
    /// False when the unit is illegal.
    pub passed: bool,
}

/// Process exit code: 0 when the unit passed, 1 when it is illegal, 2 on
/// error. Errors are logged here.
pub fn exit_code(result: &Result<Report>) -> i32 {
    match result {
        Ok(report) if report.passed => 0,
        Ok(_) => 1,
        Err(e) => {
            tracing::error!("{e}");
            2
        }
    }
}

fn render<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce() -> String) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => text(),
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
    })
}

/// Run the construction pipeline.
///
/// # Errors
///
/// Returns a configuration error from the engine.
pub fn construct_unit(unit: &UnitSnapshot, format: OutputFormat) -> Result<Report> {
    let result = construct(unit, catalog())?;
    Ok(Report {
        body: render(format, &result, || report::construction(unit, &result))?,
        passed: result.valid,
    })
}

#[derive(Serialize)]
struct RepairedValidation<'a> {
    repairs: &'a [RepairAction],
    result: &'a ValidationResult,
}

/// Validate a unit, optionally applying auto-repairs first.
///
/// # Errors
///
/// Returns a configuration error from the engine.
pub fn validate_unit(
    unit: &UnitSnapshot,
    lookup: &dyn EquipmentLookup,
    config: ValidatorConfig,
    options: &ValidationOptions,
    repair: bool,
    format: OutputFormat,
) -> Result<Report> {
    let (unit, repairs) = if repair {
        apply_auto_repairs(unit)
    } else {
        (unit.clone(), Vec::new())
    };
    let validator = Validator::new(config);
    let result = validator.validate(&unit, catalog(), lookup, options)?;
    if !result.valid {
        tracing::warn!(unit = %unit.display_name(), errors = result.counts.errors, "unit failed validation");
    }

    let body = match format {
        OutputFormat::Json if repair => serde_json::to_string_pretty(&RepairedValidation {
            repairs: &repairs,
            result: &result,
        })?,
        OutputFormat::Json => serde_json::to_string_pretty(&result)?,
        OutputFormat::Text if repair => format!(
            "{}\n{}",
            report::repairs(&repairs),
            report::validation(&unit, &result)
        ),
        OutputFormat::Text => report::validation(&unit, &result),
    };
    Ok(Report {
        body,
        passed: result.valid,
    })
}

/// Itemized cost.
///
/// # Errors
///
/// Returns a configuration error from the engine.
pub fn cost_unit(unit: &UnitSnapshot, lookup: &dyn EquipmentLookup, format: OutputFormat) -> Result<Report> {
    let construction = construct(unit, catalog())?;
    let breakdown = calculate_cost(unit, &construction, catalog(), lookup)?;
    Ok(Report {
        body: render(format, &breakdown, || report::cost(unit, &breakdown))?,
        passed: construction.valid,
    })
}

/// Battle value.
///
/// # Errors
///
/// Returns a configuration error from the engine.
pub fn battle_value_unit(
    unit: &UnitSnapshot,
    lookup: &dyn EquipmentLookup,
    format: OutputFormat,
) -> Result<Report> {
    let construction = construct(unit, catalog())?;
    let breakdown = battle_value(unit, &construction, catalog(), lookup)?;
    Ok(Report {
        body: render(format, &breakdown, || report::battle_value(unit, &breakdown))?,
        passed: construction.valid,
    })
}

/// Catalog rows for the given categories, in order.
///
/// # Errors
///
/// Returns an error if a listed type has no definition.
pub fn catalog_entries(
    catalog: &ComponentCatalog,
    categories: &[ComponentCategory],
) -> Result<Vec<CatalogEntry>> {
    let mut entries = Vec::new();
    for category in categories {
        for component in catalog.types_in(*category) {
            let base = catalog.base(component)?;
            entries.push(CatalogEntry {
                category: category.to_string(),
                type_name: component.to_string(),
                name: base.name.clone(),
                tech_base: base.tech_base.to_string(),
                rules_level: base.rules_level.to_string(),
                introduction_year: base.introduction_year,
            });
        }
    }
    Ok(entries)
}

/// List catalog components; every category when none is given.
///
/// # Errors
///
/// Returns an error if a listed type has no definition.
pub fn list_catalog(category: Option<ComponentCategory>, format: OutputFormat) -> Result<Report> {
    let categories = match category {
        Some(category) => vec![category],
        None => ComponentCategory::ALL.to_vec(),
    };
    let entries = catalog_entries(catalog(), &categories)?;
    Ok(Report {
        body: render(format, &entries, || report::catalog(&entries))?,
        passed: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load;
    use mech_core::catalog::EngineType;
    use mech_test_utils::fixtures::{broken_unit, heavy_unit, reference_unit, sample_equipment};

    #[test]
    fn test_exit_codes() {
        let passed = construct_unit(&reference_unit(), OutputFormat::Text);
        assert_eq!(exit_code(&passed), 0);
        let mut overweight = reference_unit();
        overweight.tonnage = 20;
        assert_eq!(exit_code(&construct_unit(&overweight, OutputFormat::Text)), 1);
        let missing = load::load_unit(std::path::Path::new("no/such/unit.json"));
        assert_eq!(exit_code(&missing.map(|_| Report { body: String::new(), passed: true })), 2);
    }

    #[test]
    fn test_construct_text() {
        let report = construct_unit(&reference_unit(), OutputFormat::Text).unwrap();
        assert!(report.passed);
        assert!(report.body.contains("Reference REF-50 (50 tons)"));
        assert!(report.body.contains("walk 5 / run 8 / jump 0"));
    }

    #[test]
    fn test_construct_json_parses() {
        let report = construct_unit(&heavy_unit(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report.body).unwrap();
        assert_eq!(value["valid"], serde_json::Value::Bool(true));
        assert_eq!(value["movement"]["jump"], 4);
    }

    #[test]
    fn test_validate_broken_unit_fails() {
        let report = validate_unit(
            &broken_unit(),
            &sample_equipment(),
            ValidatorConfig::default(),
            &ValidationOptions::default(),
            false,
            OutputFormat::Text,
        )
        .unwrap();
        assert!(!report.passed);
        assert!(report.body.contains("INVALID"));
        assert!(report.body.contains("[repairable]"));
    }

    #[test]
    fn test_validate_with_repair_lists_actions() {
        let report = validate_unit(
            &broken_unit(),
            &sample_equipment(),
            ValidatorConfig::default(),
            &ValidationOptions::default(),
            true,
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&report.body).unwrap();
        assert_eq!(value["repairs"].as_array().map(Vec::len), Some(2));
        // Eight heat sinks and the unknown id remain.
        assert!(!report.passed);
    }

    #[test]
    fn test_cost_and_battle_value_reports() {
        let lookup = sample_equipment();
        let cost = cost_unit(&heavy_unit(), &lookup, OutputFormat::Text).unwrap();
        assert!(cost.body.contains("Total (C-bills)"));
        let bv = battle_value_unit(&reference_unit(), &lookup, OutputFormat::Text).unwrap();
        assert!(bv.body.contains("Battle value: 683"));
    }

    #[test]
    fn test_catalog_lists_every_engine() {
        let entries = catalog_entries(catalog(), &[ComponentCategory::Engine]).unwrap();
        assert_eq!(entries.len(), EngineType::ALL.len());
        assert!(entries.iter().all(|e| e.category == "engine"));

        let all = list_catalog(None, OutputFormat::Json).unwrap();
        assert!(all.passed);
        let value: serde_json::Value = serde_json::from_str(&all.body).unwrap();
        assert!(value.as_array().map_or(0, Vec::len) > entries.len());
    }
}
