//! Error types for the construction rules engine.
//!
//! These are configuration errors: broken formula data, unknown catalog
//! entries, out-of-range dice. A user building an illegal unit never sees
//! one of these; illegal choices are reported as
//! [`ValidationIssue`](crate::validation::ValidationIssue) values instead.

use thiserror::Error;

/// Result type alias using [`MechError`].
pub type Result<T> = std::result::Result<T, MechError>;

/// Top-level error type for all rules-engine configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MechError {
    /// A formula referenced a context field the caller did not supply.
    #[error("Formula requires context field '{0}' which is not present")]
    MissingContextField(String),

    /// A divide formula was configured with a zero or negative divisor.
    #[error("Formula on field '{field}' has non-positive divisor {divisor}")]
    NonPositiveDivisor {
        /// Field the formula divides.
        field: String,
        /// The offending divisor.
        divisor: f64,
    },

    /// A MIN or MAX formula was configured with no sub-formulas.
    #[error("{0} formula has no sub-formulas")]
    EmptyFormulaList(&'static str),

    /// An EQUALS_WEIGHT formula was evaluated before the weight was known.
    #[error("Slot formula references the component weight before it was computed")]
    WeightUnavailable,

    /// No catalog definition exists for a component type.
    #[error("Unknown {category} type: {type_name}")]
    UnknownComponent {
        /// Catalog category that was searched.
        category: String,
        /// Type tag that was not found.
        type_name: String,
    },

    /// No equipment record exists for an id.
    #[error("Unknown equipment id: {0}")]
    UnknownEquipment(String),

    /// A dice roll outside the table's domain.
    #[error("Roll {roll} is outside the table range {min}..={max}")]
    InvalidRoll {
        /// The roll supplied.
        roll: u8,
        /// Lowest legal roll.
        min: u8,
        /// Highest legal roll.
        max: u8,
    },

    /// Data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// Path (or label) of the data that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// A calculation left the fixed-point range.
    #[error("Arithmetic overflow computing {0}")]
    ArithmeticOverflow(String),

    /// Invalid engine state that a rule table cannot represent.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl MechError {
    /// Build an [`MechError::ArithmeticOverflow`] naming the quantity.
    pub fn overflow(what: impl Into<String>) -> Self {
        Self::ArithmeticOverflow(what.into())
    }

    /// Build an [`MechError::UnknownComponent`] from any displayable type tag.
    pub fn unknown_component(category: impl Into<String>, type_name: impl std::fmt::Display) -> Self {
        Self::UnknownComponent {
            category: category.into(),
            type_name: type_name.to_string(),
        }
    }
}
