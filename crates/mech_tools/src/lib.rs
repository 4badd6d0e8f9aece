//! # Mech Development Tools
//!
//! Command-line tools for working with unit designs:
//! - Construction, cost and battle value reports
//! - Validation with optional auto-repair
//! - Component catalog listings

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod commands;
pub mod load;
pub mod report;
