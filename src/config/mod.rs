//! Configuration management module
//!
//! Resolves where the store lives and how references are checked, merging
//! built-in defaults, an optional YAML settings file and CLI/environment
//! overrides (in increasing precedence).

pub mod validation;
pub mod yaml;

use crate::cli::Args;
use crate::store::ReferencePolicy;
use crate::system::System;
use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Store file used when nothing else is configured
pub const DEFAULT_DATABASE: &str = "school.db";

/// Settings file read from the working directory when `--config` is absent
pub const DEFAULT_SETTINGS_FILE: &str = "schooldb.yaml";

/// Contents of a YAML settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    /// Path of the store file
    pub database: Option<String>,

    /// Reject add commands whose teacher/class id does not resolve
    pub strict_ids: Option<bool>,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Location of the store file
    pub database: PathBuf,

    /// Whether teacher/class ids are validated before inserting
    pub strict_ids: bool,
}

impl Config {
    /// Resolve settings from defaults, the settings file and CLI/environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - An explicitly given settings file is missing or invalid
    /// - The default settings file exists but is invalid
    /// - The resulting database path is invalid
    pub fn resolve(system: &dyn System, args: &Args) -> Result<Self> {
        let file = Self::load_file_settings(system, args.config.as_deref())?;

        let raw_database = args
            .database
            .clone()
            .or(file.database)
            .unwrap_or_else(|| DEFAULT_DATABASE.to_owned());
        let database = validation::validate_database_path(system, &raw_database)
            .context("Invalid database setting")?;

        let strict_ids = args.strict_ids || file.strict_ids.unwrap_or(false);

        debug!(
            "Resolved settings: database={}, strict_ids={strict_ids}",
            database.display()
        );

        Ok(Self {
            database,
            strict_ids,
        })
    }

    fn load_file_settings(system: &dyn System, explicit: Option<&Path>) -> Result<FileSettings> {
        if let Some(path) = explicit {
            return yaml::load_settings(system, path);
        }

        let default_path = system
            .current_dir()
            .map(|dir| dir.join(DEFAULT_SETTINGS_FILE))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_FILE));
        if system.is_file(&default_path) {
            debug!("Using settings file {}", default_path.display());
            return yaml::load_settings(system, &default_path);
        }

        Ok(FileSettings::default())
    }

    /// Reference policy implied by `strict_ids`
    #[must_use]
    #[inline]
    pub const fn reference_policy(&self) -> ReferencePolicy {
        ReferencePolicy::from_strict(self.strict_ids)
    }
}
