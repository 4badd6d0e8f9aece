//! # Mech Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Reference unit designs with known construction results
//! - An in-memory equipment lookup with common weapons
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
