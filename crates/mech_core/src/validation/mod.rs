//! Validation of complete unit designs.
//!
//! Rules are independent predicates over a read-only unit snapshot. The
//! [`RuleRegistry`] runs the enabled ones and merges their issues into a
//! [`ValidationResult`]; nothing here mutates the unit. Repairs flagged with
//! `auto_repairable` are applied separately by [`crate::repair`].

mod registry;
pub mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ComponentCatalog;
use crate::construction::construct;
use crate::equipment::EquipmentLookup;
use crate::error::Result;
use crate::unit::UnitSnapshot;

pub use registry::{
    RuleExecution, RuleRegistry, ValidationContext, ValidationOptions, ValidationRule,
    ValidatorConfig,
};

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// The unit is illegal.
    Error,
    /// Legal but questionable.
    Warning,
    /// Informational.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        })
    }
}

/// Area a rule checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValidationCategory {
    /// Construction pipeline steps.
    Construction,
    /// Tonnage budget.
    Weight,
    /// Armor allocation.
    Armor,
    /// Critical slots.
    Slots,
    /// Mounted equipment.
    Equipment,
    /// Tech-base compatibility.
    TechBase,
    /// Rules level.
    RulesLevel,
    /// Introduction dates.
    Era,
    /// Movement and enhancements.
    Movement,
    /// Heat balance.
    Heat,
}

impl fmt::Display for ValidationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One problem found by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Id of the rule that raised it.
    pub rule_id: String,
    /// Rule category.
    pub category: ValidationCategory,
    /// Severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Where in the unit the issue is, e.g. `armor/LT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Expected value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Actual value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// How to fix it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Whether [`crate::repair::apply_auto_repairs`] fixes it.
    #[serde(default)]
    pub auto_repairable: bool,
}

impl ValidationIssue {
    /// Create an issue.
    pub fn new(
        rule_id: impl Into<String>,
        category: ValidationCategory,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            category,
            severity,
            message: message.into(),
            path: None,
            expected: None,
            actual: None,
            suggestion: None,
            auto_repairable: false,
        }
    }

    /// Create an error.
    pub fn error(rule_id: impl Into<String>, category: ValidationCategory, message: impl Into<String>) -> Self {
        Self::new(rule_id, category, Severity::Error, message)
    }

    /// Create a warning.
    pub fn warning(rule_id: impl Into<String>, category: ValidationCategory, message: impl Into<String>) -> Self {
        Self::new(rule_id, category, Severity::Warning, message)
    }

    /// Create an info.
    pub fn info(rule_id: impl Into<String>, category: ValidationCategory, message: impl Into<String>) -> Self {
        Self::new(rule_id, category, Severity::Info, message)
    }

    /// Set the path.
    #[must_use]
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set expected and actual values.
    #[must_use]
    pub fn expected_actual(mut self, expected: impl ToString, actual: impl ToString) -> Self {
        self.expected = Some(expected.to_string());
        self.actual = Some(actual.to_string());
        self
    }

    /// Set the suggestion.
    #[must_use]
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Mark as auto-repairable.
    #[must_use]
    pub fn repairable(mut self) -> Self {
        self.auto_repairable = true;
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.rule_id, self.message)?;
        if let Some(path) = &self.path {
            write!(f, " ({path})")?;
        }
        Ok(())
    }
}

/// Issue counts by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssueCounts {
    /// Errors.
    pub errors: usize,
    /// Warnings.
    pub warnings: usize,
    /// Infos.
    pub infos: usize,
    /// Rules run.
    pub rules_run: usize,
}

/// Merged outcome of a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether no rule reported an error.
    pub valid: bool,
    /// Errors, in rule order.
    pub errors: Vec<ValidationIssue>,
    /// Warnings, in rule order.
    pub warnings: Vec<ValidationIssue>,
    /// Infos, in rule order.
    pub infos: Vec<ValidationIssue>,
    /// Counts.
    pub counts: IssueCounts,
    /// Per-rule execution metadata, in rule order.
    pub rule_results: Vec<RuleExecution>,
    /// Wall time of the whole run.
    pub total_duration_micros: u64,
}

impl ValidationResult {
    /// All issues, errors first.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(&self.warnings).chain(&self.infos)
    }

    /// Issues raised by one rule.
    pub fn issues_from<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues().filter(move |i| i.rule_id == rule_id)
    }

    /// Whether any issue can be fixed by auto-repair.
    #[must_use]
    pub fn has_repairable(&self) -> bool {
        self.issues().any(|i| i.auto_repairable)
    }
}

/// A registry plus configuration, ready to validate units.
pub struct Validator {
    registry: RuleRegistry,
    config: ValidatorConfig,
}

impl Validator {
    /// Validator running every standard rule.
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        Self::with_registry(RuleRegistry::with_standard_rules(), config)
    }

    /// Validator over a custom registry.
    #[must_use]
    pub fn with_registry(registry: RuleRegistry, config: ValidatorConfig) -> Self {
        Self { registry, config }
    }

    /// The registry.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Mutable access to the registry, for enabling and disabling rules.
    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Run construction, then every selected rule.
    ///
    /// # Errors
    ///
    /// Returns a configuration error from the pipeline or from a rule.
    pub fn validate(
        &self,
        unit: &UnitSnapshot,
        catalog: &ComponentCatalog,
        equipment: &dyn EquipmentLookup,
        options: &ValidationOptions,
    ) -> Result<ValidationResult> {
        let construction = construct(unit, catalog)?;
        let ctx = ValidationContext {
            unit,
            catalog,
            equipment,
            construction: &construction,
            config: &self.config,
        };
        self.registry.validate(&ctx, options)
    }
}
