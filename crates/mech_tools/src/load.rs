//! Loading units, equipment and validator configuration from disk.

use std::path::Path;

use mech_core::equipment::{EquipmentLookup, StaticEquipmentLookup};
use mech_core::error::MechError;
use mech_core::unit::UnitSnapshot;
use mech_core::validation::ValidatorConfig;
use mech_core::variable_equipment::variable_equipment;
use thiserror::Error;

/// Errors raised by the tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Unit files must be `.json` envelopes or bare `.ron` snapshots.
    #[error("unsupported unit file {0}: expected a .json or .ron extension")]
    UnsupportedFormat(String),

    /// Error from the rules engine.
    #[error(transparent)]
    Core(#[from] MechError),

    /// A report could not be encoded.
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;

/// On-disk unit encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFormat {
    /// Versioned JSON envelope.
    Json,
    /// Bare RON snapshot.
    Ron,
}

impl UnitFormat {
    /// Format implied by a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Ok(Self::Ron),
            _ => Err(ToolError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Parse a unit from text.
///
/// # Errors
///
/// Returns a parse error from the rules engine.
pub fn parse_unit(label: &str, text: &str, format: UnitFormat) -> Result<UnitSnapshot> {
    let unit = match format {
        UnitFormat::Json => UnitSnapshot::from_json(text)?,
        UnitFormat::Ron => UnitSnapshot::from_ron_str(label, text)?,
    };
    Ok(unit)
}

/// Load a unit file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_unit(path: &Path) -> Result<UnitSnapshot> {
    let format = UnitFormat::from_path(path)?;
    let unit = parse_unit(&path.display().to_string(), &read(path)?, format)?;
    tracing::info!(unit = %unit.display_name(), path = %path.display(), "loaded unit");
    Ok(unit)
}

/// Equipment from an optional RON record list, plus the built-in variable
/// equipment for any id the list does not define.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_equipment(path: Option<&Path>) -> Result<StaticEquipmentLookup> {
    let mut lookup = match path {
        Some(path) => StaticEquipmentLookup::from_ron_str(&path.display().to_string(), &read(path)?)?,
        None => StaticEquipmentLookup::new(),
    };
    for record in variable_equipment() {
        if lookup.get_by_id(&record.id).is_none() {
            lookup.register(record);
        }
    }
    Ok(lookup)
}

/// Validator configuration from an optional RON file; defaults otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<ValidatorConfig> {
    match path {
        Some(path) => Ok(ValidatorConfig::from_ron_str(
            &path.display().to_string(),
            &read(path)?,
        )?),
        None => Ok(ValidatorConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mech_test_utils::fixtures::heavy_unit;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(UnitFormat::from_path(Path::new("a/unit.json")).unwrap(), UnitFormat::Json);
        assert_eq!(UnitFormat::from_path(Path::new("unit.RON")).unwrap(), UnitFormat::Ron);
        assert!(matches!(
            UnitFormat::from_path(Path::new("unit.txt")),
            Err(ToolError::UnsupportedFormat(_))
        ));
        assert!(UnitFormat::from_path(Path::new("unit")).is_err());
    }

    #[test]
    fn test_parse_json_envelope() {
        let unit = heavy_unit();
        let text = unit.to_json().unwrap();
        assert_eq!(parse_unit("heavy", &text, UnitFormat::Json).unwrap(), unit);
    }

    #[test]
    fn test_parse_errors_carry_label() {
        let err = parse_unit("broken.ron", "(chassis: ", UnitFormat::Ron).unwrap_err();
        assert!(err.to_string().contains("broken.ron"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_unit(Path::new("/nonexistent/unit.json")).unwrap_err();
        assert!(matches!(err, ToolError::Io { .. }));
    }

    #[test]
    fn test_default_equipment_has_variable_items() {
        let lookup = load_equipment(None).unwrap();
        assert!(lookup.get_by_id("hatchet").is_some());
        assert_eq!(lookup.len(), variable_equipment().len());
    }

    #[test]
    fn test_default_config() {
        assert_eq!(load_config(None).unwrap(), ValidatorConfig::default());
    }
}
