//! File system utilities

use crate::error::SchoolError;
use crate::system::System;
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// Create the parent directories of `file_path` if they don't exist
///
/// # Errors
///
/// Returns a storage error if a directory cannot be created or the parent
/// path exists but is not a directory
pub fn create_parent_directories(system: &dyn System, file_path: &Path) -> Result<()> {
    let Some(parent) = file_path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    if system.exists(parent) {
        if !system.is_dir(parent) {
            return Err(SchoolError::storage(format!(
                "Parent of {} is not a directory",
                file_path.display()
            ))
            .into());
        }
        return Ok(());
    }

    debug!("Creating directory {}", parent.display());
    system.create_dir_all(parent).map_err(|e| {
        SchoolError::storage(format!(
            "Failed to create parent directories for {}: {e}",
            file_path.display()
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{MockSystem, RealSystem};
    use tempfile::TempDir;

    #[test]
    fn test_create_parent_directories() {
        let system = RealSystem::new();
        let temp_dir = TempDir::new().unwrap();
        let nested_file = temp_dir.path().join("a/b/c/school.db");

        assert!(create_parent_directories(&system, &nested_file).is_ok());
        assert!(nested_file.parent().unwrap().is_dir());
    }

    #[test]
    fn test_bare_file_name_needs_no_directory() {
        let system = MockSystem::new();
        assert!(create_parent_directories(&system, Path::new("school.db")).is_ok());
    }

    #[test]
    fn test_parent_that_is_a_file() {
        let system = MockSystem::new().with_file("/data", b"").unwrap();
        let err = create_parent_directories(&system, Path::new("/data/school.db")).unwrap_err();

        assert_eq!(
            err.downcast_ref::<SchoolError>()
                .map(SchoolError::exit_code),
            Some(3)
        );
    }

    #[test]
    fn test_mock_parent_is_created() {
        let system = MockSystem::new();
        create_parent_directories(&system, Path::new("/var/lib/schooldb/school.db")).unwrap();

        assert!(system.is_dir(Path::new("/var/lib/schooldb")));
    }
}
