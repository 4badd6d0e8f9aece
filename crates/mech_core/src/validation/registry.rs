//! Rule trait, execution context and the rule registry.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{rules, IssueCounts, Severity, ValidationCategory, ValidationIssue, ValidationResult};
use crate::catalog::ComponentCatalog;
use crate::construction::ConstructionResult;
use crate::equipment::EquipmentLookup;
use crate::error::{MechError, Result};
use crate::tech::RulesLevel;
use crate::unit::UnitSnapshot;

/// Everything a rule may read. Rules never see each other's output.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    /// The unit under validation.
    pub unit: &'a UnitSnapshot,
    /// Component catalog.
    pub catalog: &'a ComponentCatalog,
    /// Equipment lookup.
    pub equipment: &'a dyn EquipmentLookup,
    /// Pipeline result for the unit.
    pub construction: &'a ConstructionResult,
    /// Validator configuration.
    pub config: &'a ValidatorConfig,
}

impl ValidationContext<'_> {
    /// Year availability is checked against: the configured year, else the unit's.
    #[must_use]
    pub fn year(&self) -> Option<u16> {
        self.config.year.or(self.unit.year)
    }
}

/// A side-effect-free check over a unit.
pub trait ValidationRule: Send + Sync {
    /// Stable id, e.g. `armor.location-maximum`.
    fn id(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &'static str;

    /// Category.
    fn category(&self) -> ValidationCategory;

    /// Lower runs first. Order only affects how issues are listed.
    fn priority(&self) -> u16 {
        100
    }

    /// Run the check.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when catalog or formula data is broken.
    fn check(&self, ctx: &ValidationContext<'_>) -> Result<Vec<ValidationIssue>>;
}

/// Validator settings, loadable from RON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Highest permitted rules level; `None` allows everything.
    pub max_rules_level: Option<RulesLevel>,
    /// Rule ids never run.
    pub disabled_rules: Vec<String>,
    /// Evaluate rules in parallel.
    pub parallel: bool,
    /// Year for availability checks, overriding the unit's own.
    pub year: Option<u16>,
}

impl ValidatorConfig {
    /// Parse a config from RON text. `label` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`MechError::DataParseError`] when the text is malformed.
    pub fn from_ron_str(label: &str, text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| {
            tracing::warn!(source = label, error = %e, "invalid validator config");
            MechError::DataParseError {
                path: label.to_string(),
                message: e.to_string(),
            }
        })
    }
}

/// Per-run selection of rules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Only run rules in these categories; `None` runs all.
    pub categories: Option<Vec<ValidationCategory>>,
    /// Rule ids to skip.
    pub skip: Vec<String>,
    /// Parallel evaluation; `None` follows the config.
    pub parallel: Option<bool>,
}

impl ValidationOptions {
    /// Restrict to categories.
    #[must_use]
    pub fn only(categories: &[ValidationCategory]) -> Self {
        Self {
            categories: Some(categories.to_vec()),
            ..Self::default()
        }
    }

    /// Skip a rule.
    #[must_use]
    pub fn skipping(mut self, rule_id: impl Into<String>) -> Self {
        self.skip.push(rule_id.into());
        self
    }
}

/// Execution metadata of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleExecution {
    /// Rule id.
    pub rule_id: String,
    /// Rule category.
    pub category: ValidationCategory,
    /// Issues raised.
    pub issue_count: usize,
    /// Wall time.
    pub duration_micros: u64,
}

fn run_rule(
    rule: &dyn ValidationRule,
    ctx: &ValidationContext<'_>,
) -> Result<(RuleExecution, Vec<ValidationIssue>)> {
    let started = Instant::now();
    let issues = rule.check(ctx).map_err(|e| {
        tracing::warn!(rule = rule.id(), error = %e, "rule failed");
        e
    })?;
    let execution = RuleExecution {
        rule_id: rule.id().to_string(),
        category: rule.category(),
        issue_count: issues.len(),
        duration_micros: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
    };
    tracing::debug!(
        rule = rule.id(),
        issues = execution.issue_count,
        micros = execution.duration_micros,
        "rule executed"
    );
    Ok((execution, issues))
}

struct RegisteredRule {
    rule: Box<dyn ValidationRule>,
    enabled: bool,
}

/// Ordered set of rules with enable flags.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<RegisteredRule>,
}

impl RuleRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in rule enabled.
    #[must_use]
    pub fn with_standard_rules() -> Self {
        let mut registry = Self::new();
        for rule in rules::standard_rules() {
            registry.register(rule);
        }
        registry
    }

    /// Register a rule, replacing any rule with the same id.
    pub fn register(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.retain(|r| r.rule.id() != rule.id());
        self.rules.push(RegisteredRule {
            rule,
            enabled: true,
        });
        self.rules
            .sort_by(|a, b| (a.rule.priority(), a.rule.id()).cmp(&(b.rule.priority(), b.rule.id())));
    }

    fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.rules.iter_mut().find(|r| r.rule.id() == id) {
            Some(entry) => {
                entry.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Enable a rule. Returns false for an unknown id.
    pub fn enable(&mut self, id: &str) -> bool {
        self.set_enabled(id, true)
    }

    /// Disable a rule. Returns false for an unknown id.
    pub fn disable(&mut self, id: &str) -> bool {
        self.set_enabled(id, false)
    }

    /// Whether a rule is registered and enabled.
    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        self.rules.iter().any(|r| r.enabled && r.rule.id() == id)
    }

    /// Rule ids in execution order.
    #[must_use]
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.rule.id()).collect()
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn selected<'r>(
        &'r self,
        config: &ValidatorConfig,
        options: &ValidationOptions,
    ) -> Vec<&'r dyn ValidationRule> {
        self.rules
            .iter()
            .filter(|r| r.enabled)
            .map(|r| r.rule.as_ref())
            .filter(|rule| !config.disabled_rules.iter().any(|id| id == rule.id()))
            .filter(|rule| !options.skip.iter().any(|id| id == rule.id()))
            .filter(|rule| {
                options
                    .categories
                    .as_ref()
                    .map_or(true, |c| c.contains(&rule.category()))
            })
            .collect()
    }

    /// Run every selected rule and merge the issues.
    ///
    /// Results are identical in parallel and sequential mode: outcomes are
    /// collected per rule and merged in registry order.
    ///
    /// # Errors
    ///
    /// Returns the configuration error of the first failing rule.
    pub fn validate(
        &self,
        ctx: &ValidationContext<'_>,
        options: &ValidationOptions,
    ) -> Result<ValidationResult> {
        let start = Instant::now();
        let selected = self.selected(ctx.config, options);
        let parallel = options.parallel.unwrap_or(ctx.config.parallel) && !cfg!(feature = "single-threaded");

        let outcomes: Vec<Result<_>> = if parallel {
            selected.par_iter().map(|rule| run_rule(*rule, ctx)).collect()
        } else {
            selected.iter().map(|rule| run_rule(*rule, ctx)).collect()
        };

        let mut result = ValidationResult::default();
        for outcome in outcomes {
            let (execution, issues) = outcome?;
            result.rule_results.push(execution);
            for issue in issues {
                match issue.severity {
                    Severity::Error => result.errors.push(issue),
                    Severity::Warning => result.warnings.push(issue),
                    Severity::Info => result.infos.push(issue),
                }
            }
        }
        result.counts = IssueCounts {
            errors: result.errors.len(),
            warnings: result.warnings.len(),
            infos: result.infos.len(),
            rules_run: result.rule_results.len(),
        };
        result.valid = result.errors.is_empty();
        result.total_duration_micros = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        tracing::debug!(
            unit = %ctx.unit.display_name(),
            valid = result.valid,
            errors = result.counts.errors,
            warnings = result.counts.warnings,
            rules = result.counts.rules_run,
            parallel,
            "validation complete"
        );
        Ok(result)
    }
}
