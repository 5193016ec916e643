//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for schooldb operations
///
/// Usage errors never reach this type: clap reports them itself and exits
/// with status 2 before any store is opened.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SchoolError {
    /// Configuration Error - unreadable or invalid settings
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Storage Error - the store could not be opened, written or read
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Invalid Reference Error - a teacher or class id was rejected in strict mode
    #[error("Invalid reference: {message}")]
    InvalidReference { message: String },
}

impl SchoolError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. } => 1,
            Self::Storage { .. } => 3,
            Self::InvalidReference { .. } => 4,
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a storage error
    #[inline]
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an invalid reference error
    #[inline]
    pub fn invalid_reference<S: Into<String>>(message: S) -> Self {
        Self::InvalidReference {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_eq!(SchoolError::configuration("x").exit_code(), 1);
        assert_eq!(SchoolError::storage("x").exit_code(), 3);
        assert_eq!(SchoolError::invalid_reference("x").exit_code(), 4);
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = SchoolError::invalid_reference("Teacher ID 9 does not exist").into();
        let err = err.context("Failed to add class");

        let code = err
            .downcast_ref::<SchoolError>()
            .map_or(1, SchoolError::exit_code);
        assert_eq!(code, 4);
    }
}
