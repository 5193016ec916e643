//! Settings validation logic

use crate::error::SchoolError;
use crate::system::System;
use anyhow::Result;
use std::path::PathBuf;

/// Validate the configured database location and expand a leading `~/`
///
/// # Errors
///
/// Returns a configuration error if:
/// - The path is empty or only whitespace
/// - The path starts with `~/` and `HOME` is not set
#[inline]
pub fn validate_database_path(system: &dyn System, raw: &str) -> Result<PathBuf> {
    if raw.trim().is_empty() {
        return Err(SchoolError::configuration("Database path cannot be empty").into());
    }

    if let Some(rest) = raw.strip_prefix("~/") {
        let home = system.env_var("HOME").map_err(|_| {
            SchoolError::configuration(format!(
                "Cannot expand '{raw}': HOME is not set"
            ))
        })?;
        return Ok(PathBuf::from(home).join(rest));
    }

    Ok(PathBuf::from(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn test_plain_path_is_kept() {
        let system = MockSystem::new();
        assert_eq!(
            validate_database_path(&system, "data/school.db").unwrap(),
            PathBuf::from("data/school.db")
        );
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let system = MockSystem::new();
        let err = validate_database_path(&system, "   ").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_home_is_expanded() {
        let system = MockSystem::new().with_env("HOME", "/home/lee").unwrap();
        assert_eq!(
            validate_database_path(&system, "~/school.db").unwrap(),
            PathBuf::from("/home/lee/school.db")
        );
    }

    #[test]
    fn test_home_expansion_without_home() {
        let system = MockSystem::new();
        let err = validate_database_path(&system, "~/school.db").unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchoolError>()
                .map(SchoolError::exit_code),
            Some(1)
        );
    }
}
