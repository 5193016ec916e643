//! YAML settings file loading and parsing

use crate::config::FileSettings;
use crate::error::SchoolError;
use crate::system::System;
use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::debug;

/// Load and parse a YAML settings file
///
/// # Errors
///
/// Returns a configuration error if the file does not exist, cannot be read
/// or is not a valid settings document
pub fn load_settings(system: &dyn System, path: &Path) -> Result<FileSettings> {
    if !system.exists(path) {
        return Err(SchoolError::configuration(format!(
            "Settings file not found: {}",
            path.display()
        ))
        .into());
    }

    let content = system.read_to_string(path).map_err(|e| {
        SchoolError::configuration(format!(
            "Failed to read settings file {}: {e}",
            path.display()
        ))
    })?;

    parse_settings(&content).with_context(|| {
        return format!(
            "Failed to parse YAML settings in file: {}\n\
            Expected optional keys 'database' (string) and 'strict_ids' (bool)",
            path.display()
        );
    })
}

/// Parse settings from YAML text; an empty document yields defaults
///
/// # Errors
///
/// Returns a configuration error for malformed YAML, wrong value types or
/// unknown keys
pub fn parse_settings(content: &str) -> Result<FileSettings> {
    if content.trim().is_empty() {
        debug!("Settings file is empty, using defaults");
        return Ok(FileSettings::default());
    }

    serde_yaml::from_str(content)
        .map_err(|e| anyhow::Error::from(SchoolError::configuration(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn test_parse_full_settings() {
        let settings = parse_settings("database: /var/lib/school.db\nstrict_ids: true\n").unwrap();

        assert_eq!(settings.database.as_deref(), Some("/var/lib/school.db"));
        assert_eq!(settings.strict_ids, Some(true));
    }

    #[test]
    fn test_parse_empty_settings() {
        assert_eq!(parse_settings("").unwrap(), FileSettings::default());
        assert_eq!(parse_settings("  \n").unwrap(), FileSettings::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = parse_settings("databse: typo.db").unwrap_err();
        let code = err
            .downcast_ref::<SchoolError>()
            .map_or(0, SchoolError::exit_code);
        assert_eq!(code, 1);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(parse_settings("strict_ids: [1, 2]").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let system = MockSystem::new();
        let err = load_settings(&system, Path::new("/etc/schooldb.yaml")).unwrap_err();

        assert!(err.to_string().contains("Settings file not found"));
    }

    #[test]
    fn test_load_from_system() {
        let system = MockSystem::new()
            .with_file("/etc/schooldb.yaml", b"database: records.db")
            .unwrap();
        let settings = load_settings(&system, Path::new("/etc/schooldb.yaml")).unwrap();

        assert_eq!(settings.database.as_deref(), Some("records.db"));
        assert_eq!(settings.strict_ids, None);
    }
}
