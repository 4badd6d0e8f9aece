//! Arithmetic formula interpreter.
//!
//! Variable quantities (anything that depends on tonnage, engine rating or
//! another computed value) are described as [`Formula`] trees and evaluated
//! against an [`EvaluationContext`]. Each kind carries exactly the fields it
//! needs; the only run-time failures are a missing context field or a
//! non-positive divisor, both of which are configuration errors.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{MechError, Result};
use crate::math::{fixed_serde, round_up_to, saturating_fixed, Fixed};

/// Well-known context field names.
pub mod fields {
    /// Unit tonnage.
    pub const TONNAGE: &str = "tonnage";
    /// Engine rating.
    pub const ENGINE_RATING: &str = "engineRating";
    /// Engine weight after rounding.
    pub const ENGINE_WEIGHT: &str = "engineWeight";
    /// `ceil(engineRating / 100)`, the gyro base weight.
    pub const GYRO_BASE: &str = "gyroBase";
    /// Tonnage of direct-fire weapons (targeting computer sizing).
    pub const DIRECT_FIRE_TONNAGE: &str = "directFireWeaponTonnage";
    /// The component's own computed weight; populated for slot and cost formulas.
    pub const WEIGHT: &str = "weight";
}

/// A formula over a named-field context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Formula {
    /// A fixed value.
    Constant(#[serde(with = "fixed_serde")] Fixed),
    /// `ceil(context[field] / divisor)`.
    CeilDivide {
        /// Context field.
        field: String,
        /// Divisor, must be positive.
        #[serde(with = "fixed_serde")]
        divisor: Fixed,
    },
    /// `floor(context[field] / divisor)`.
    FloorDivide {
        /// Context field.
        field: String,
        /// Divisor, must be positive.
        #[serde(with = "fixed_serde")]
        divisor: Fixed,
    },
    /// `round(context[field] / divisor)`, halves away from zero.
    RoundDivide {
        /// Context field.
        field: String,
        /// Divisor, must be positive.
        #[serde(with = "fixed_serde")]
        divisor: Fixed,
    },
    /// `context[field] * multiplier`.
    Multiply {
        /// Context field.
        field: String,
        /// Multiplier.
        #[serde(with = "fixed_serde")]
        multiplier: Fixed,
    },
    /// `context[field] * multiplier`, rounded up to a multiple of `round_to`.
    MultiplyRound {
        /// Context field.
        field: String,
        /// Multiplier.
        #[serde(with = "fixed_serde")]
        multiplier: Fixed,
        /// Rounding step, must be positive.
        #[serde(with = "fixed_serde")]
        round_to: Fixed,
    },
    /// The component's already-computed weight.
    EqualsWeight,
    /// `context[field]` unchanged.
    EqualsField {
        /// Context field.
        field: String,
    },
    /// Smallest of the sub-formulas.
    Min(Vec<Formula>),
    /// Largest of the sub-formulas.
    Max(Vec<Formula>),
    /// `base + bonus`.
    Plus {
        /// Base formula.
        base: Box<Formula>,
        /// Flat bonus.
        #[serde(with = "fixed_serde")]
        bonus: Fixed,
    },
}

impl Formula {
    /// Constant formula from an integer.
    #[must_use]
    pub fn constant(value: i32) -> Self {
        Self::Constant(Fixed::from_num(value))
    }

    /// `ceil(field / divisor)`.
    #[must_use]
    pub fn ceil_divide(field: &str, divisor: i32) -> Self {
        Self::CeilDivide {
            field: field.to_string(),
            divisor: Fixed::from_num(divisor),
        }
    }

    /// `floor(field / divisor)`.
    #[must_use]
    pub fn floor_divide(field: &str, divisor: i32) -> Self {
        Self::FloorDivide {
            field: field.to_string(),
            divisor: Fixed::from_num(divisor),
        }
    }

    /// `round(field / divisor)`.
    #[must_use]
    pub fn round_divide(field: &str, divisor: i32) -> Self {
        Self::RoundDivide {
            field: field.to_string(),
            divisor: Fixed::from_num(divisor),
        }
    }

    /// `field * multiplier`.
    #[must_use]
    pub fn multiply(field: &str, multiplier: Fixed) -> Self {
        Self::Multiply {
            field: field.to_string(),
            multiplier,
        }
    }

    /// `field * multiplier` rounded up to `round_to`.
    #[must_use]
    pub fn multiply_round(field: &str, multiplier: Fixed, round_to: Fixed) -> Self {
        Self::MultiplyRound {
            field: field.to_string(),
            multiplier,
            round_to,
        }
    }

    /// Passthrough of a context field.
    #[must_use]
    pub fn equals_field(field: &str) -> Self {
        Self::EqualsField {
            field: field.to_string(),
        }
    }

    /// `self + bonus`.
    #[must_use]
    pub fn plus(self, bonus: i32) -> Self {
        Self::Plus {
            base: Box::new(self),
            bonus: Fixed::from_num(bonus),
        }
    }

    /// Short kind name, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Constant(_) => "FIXED",
            Self::CeilDivide { .. } => "CEIL_DIVIDE",
            Self::FloorDivide { .. } => "FLOOR_DIVIDE",
            Self::RoundDivide { .. } => "ROUND_DIVIDE",
            Self::Multiply { .. } => "MULTIPLY",
            Self::MultiplyRound { .. } => "MULTIPLY_ROUND",
            Self::EqualsWeight => "EQUALS_WEIGHT",
            Self::EqualsField { .. } => "EQUALS_FIELD",
            Self::Min(_) => "MIN",
            Self::Max(_) => "MAX",
            Self::Plus { .. } => "PLUS",
        }
    }

    /// Context fields this formula reads, recursively.
    ///
    /// `EQUALS_WEIGHT` reports [`fields::WEIGHT`].
    #[must_use]
    pub fn referenced_fields(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields(&self, out: &mut BTreeSet<String>) {
        match self {
            Self::Constant(_) => {}
            Self::CeilDivide { field, .. }
            | Self::FloorDivide { field, .. }
            | Self::RoundDivide { field, .. }
            | Self::Multiply { field, .. }
            | Self::MultiplyRound { field, .. }
            | Self::EqualsField { field } => {
                out.insert(field.clone());
            }
            Self::EqualsWeight => {
                out.insert(fields::WEIGHT.to_string());
            }
            Self::Min(items) | Self::Max(items) => {
                for item in items {
                    item.collect_fields(out);
                }
            }
            Self::Plus { base, .. } => base.collect_fields(out),
        }
    }
}

/// Named numeric inputs for one calculation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationContext {
    values: HashMap<String, Fixed>,
}

impl EvaluationContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context holding only the unit tonnage, clamped to the fixed-point range.
    #[must_use]
    pub fn for_tonnage(tonnage: u32) -> Self {
        Self::new().with(fields::TONNAGE, saturating_fixed(tonnage))
    }

    /// Builder method to add a field.
    #[must_use]
    pub fn with(mut self, field: &str, value: Fixed) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field.
    pub fn insert(&mut self, field: &str, value: Fixed) {
        self.values.insert(field.to_string(), value);
    }

    /// Read a field, failing if absent.
    pub fn get(&self, field: &str) -> Result<Fixed> {
        self.values
            .get(field)
            .copied()
            .ok_or_else(|| MechError::MissingContextField(field.to_string()))
    }

    /// Whether a field is present.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }
}

fn checked_divide(ctx: &EvaluationContext, field: &str, divisor: Fixed) -> Result<Fixed> {
    if divisor <= Fixed::ZERO {
        return Err(MechError::NonPositiveDivisor {
            field: field.to_string(),
            divisor: divisor.to_num::<f64>(),
        });
    }
    ctx.get(field)?
        .checked_div(divisor)
        .ok_or_else(|| MechError::overflow(field))
}

fn in_range(value: Option<Fixed>, field: &str) -> Result<Fixed> {
    value.ok_or_else(|| MechError::overflow(field))
}

/// Evaluate a formula against a context.
///
/// # Errors
///
/// Returns [`MechError::MissingContextField`] when a referenced field is absent,
/// [`MechError::NonPositiveDivisor`] for a bad divisor or rounding step,
/// [`MechError::EmptyFormulaList`] for an empty MIN/MAX and
/// [`MechError::WeightUnavailable`] for `EQUALS_WEIGHT` outside a slot/cost context
/// and [`MechError::ArithmeticOverflow`] when a result leaves the fixed-point range.
pub fn evaluate(formula: &Formula, ctx: &EvaluationContext) -> Result<Fixed> {
    match formula {
        Formula::Constant(value) => Ok(*value),
        Formula::CeilDivide { field, divisor } => {
            in_range(checked_divide(ctx, field, *divisor)?.checked_ceil(), field)
        }
        Formula::FloorDivide { field, divisor } => {
            in_range(checked_divide(ctx, field, *divisor)?.checked_floor(), field)
        }
        Formula::RoundDivide { field, divisor } => {
            in_range(checked_divide(ctx, field, *divisor)?.checked_round(), field)
        }
        Formula::Multiply { field, multiplier } => {
            in_range(ctx.get(field)?.checked_mul(*multiplier), field)
        }
        Formula::MultiplyRound {
            field,
            multiplier,
            round_to,
        } => {
            if *round_to <= Fixed::ZERO {
                return Err(MechError::NonPositiveDivisor {
                    field: field.clone(),
                    divisor: round_to.to_num::<f64>(),
                });
            }
            let product = in_range(ctx.get(field)?.checked_mul(*multiplier), field)?;
            in_range(round_up_to(product, *round_to), field)
        }
        Formula::EqualsWeight => ctx
            .get(fields::WEIGHT)
            .map_err(|_| MechError::WeightUnavailable),
        Formula::EqualsField { field } => ctx.get(field),
        Formula::Min(items) => reduce(items, ctx, "MIN", |a, b| a.min(b)),
        Formula::Max(items) => reduce(items, ctx, "MAX", |a, b| a.max(b)),
        Formula::Plus { base, bonus } => in_range(evaluate(base, ctx)?.checked_add(*bonus), "bonus"),
    }
}

fn reduce(
    items: &[Formula],
    ctx: &EvaluationContext,
    kind: &'static str,
    pick: fn(Fixed, Fixed) -> Fixed,
) -> Result<Fixed> {
    let mut values = items.iter().map(|f| evaluate(f, ctx));
    let first = values.next().ok_or(MechError::EmptyFormulaList(kind))??;
    values.try_fold(first, |acc, v| Ok(pick(acc, v?)))
}

/// Structural check of a formula, independent of any context.
///
/// Reports every problem found, recursing into MIN/MAX/PLUS.
#[must_use]
pub fn validate(formula: &Formula) -> Vec<MechError> {
    let mut errors = Vec::new();
    validate_into(formula, &mut errors);
    errors
}

fn validate_into(formula: &Formula, errors: &mut Vec<MechError>) {
    let bad_divisor = |field: &str, divisor: Fixed| MechError::NonPositiveDivisor {
        field: field.to_string(),
        divisor: divisor.to_num::<f64>(),
    };
    match formula {
        Formula::Constant(_) | Formula::EqualsWeight => {}
        Formula::CeilDivide { field, divisor }
        | Formula::FloorDivide { field, divisor }
        | Formula::RoundDivide { field, divisor } => {
            if field.is_empty() {
                errors.push(MechError::MissingContextField(String::new()));
            }
            if *divisor <= Fixed::ZERO {
                errors.push(bad_divisor(field, *divisor));
            }
        }
        Formula::MultiplyRound {
            field, round_to, ..
        } => {
            if field.is_empty() {
                errors.push(MechError::MissingContextField(String::new()));
            }
            if *round_to <= Fixed::ZERO {
                errors.push(bad_divisor(field, *round_to));
            }
        }
        Formula::Multiply { field, .. } | Formula::EqualsField { field } => {
            if field.is_empty() {
                errors.push(MechError::MissingContextField(String::new()));
            }
        }
        Formula::Min(items) | Formula::Max(items) => {
            if items.is_empty() {
                errors.push(MechError::EmptyFormulaList(formula.kind()));
            }
            for item in items {
                validate_into(item, errors);
            }
        }
        Formula::Plus { base, .. } => validate_into(base, errors),
    }
}

/// Values produced by evaluating a [`FormulaSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaOutput {
    /// Weight in tons.
    pub weight: Fixed,
    /// Critical slots.
    pub slots: u8,
    /// Cost, if the set has a cost formula.
    pub cost: Option<Fixed>,
    /// Damage, if the set has a damage formula.
    pub damage: Option<Fixed>,
}

/// The formulas describing one variable component, with the context fields
/// callers must provide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaSet {
    /// Weight formula.
    pub weight: Formula,
    /// Slot formula; may use `EQUALS_WEIGHT`.
    pub slots: Formula,
    /// Cost formula; may use `EQUALS_WEIGHT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Formula>,
    /// Damage formula for physical weapons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<Formula>,
    /// Context fields the caller guarantees.
    pub required_context: Vec<String>,
}

impl FormulaSet {
    /// Create a set from weight and slot formulas, deriving the required context.
    #[must_use]
    pub fn new(weight: Formula, slots: Formula) -> Self {
        let mut set = Self {
            weight,
            slots,
            cost: None,
            damage: None,
            required_context: Vec::new(),
        };
        set.required_context = set.derive_required_context();
        set
    }

    /// Builder method to add a cost formula.
    #[must_use]
    pub fn with_cost(mut self, cost: Formula) -> Self {
        self.cost = Some(cost);
        self.required_context = self.derive_required_context();
        self
    }

    /// Builder method to add a damage formula.
    #[must_use]
    pub fn with_damage(mut self, damage: Formula) -> Self {
        self.damage = Some(damage);
        self.required_context = self.derive_required_context();
        self
    }

    fn all_formulas(&self) -> impl Iterator<Item = &Formula> {
        [Some(&self.weight), Some(&self.slots), self.cost.as_ref(), self.damage.as_ref()]
            .into_iter()
            .flatten()
    }

    fn derive_required_context(&self) -> Vec<String> {
        let mut fields: BTreeSet<String> = BTreeSet::new();
        for formula in self.all_formulas() {
            fields.extend(formula.referenced_fields());
        }
        fields.remove(fields::WEIGHT);
        fields.into_iter().collect()
    }

    /// Structural check of every formula plus the required-context declaration.
    #[must_use]
    pub fn validate(&self) -> Vec<MechError> {
        let mut errors: Vec<MechError> = self.all_formulas().flat_map(validate).collect();
        if matches!(self.weight, Formula::EqualsWeight) {
            errors.push(MechError::WeightUnavailable);
        }
        for field in self.derive_required_context() {
            if !self.required_context.contains(&field) {
                errors.push(MechError::MissingContextField(field));
            }
        }
        errors
    }

    /// Evaluate weight, then slots/cost/damage with the weight in context.
    pub fn evaluate(&self, ctx: &EvaluationContext) -> Result<FormulaOutput> {
        if let Some(missing) = self.required_context.iter().find(|f| !ctx.contains(f)) {
            tracing::warn!(field = %missing, "formula context is missing a required field");
            return Err(MechError::MissingContextField(missing.clone()));
        }
        let weight = evaluate(&self.weight, ctx)?;
        let with_weight = ctx.clone().with(fields::WEIGHT, weight);
        let slots = evaluate(&self.slots, &with_weight)?
            .checked_ceil()
            .ok_or_else(|| MechError::overflow("critical slots"))?
            .to_num::<i64>();
        let cost = self
            .cost
            .as_ref()
            .map(|f| evaluate(f, &with_weight))
            .transpose()?;
        let damage = self
            .damage
            .as_ref()
            .map(|f| evaluate(f, &with_weight))
            .transpose()?;
        Ok(FormulaOutput {
            weight,
            slots: slots.clamp(0, i64::from(u8::MAX)) as u8,
            cost,
            damage,
        })
    }
}
