//! Error types for configuration loading.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Section that failed validation.
        section: String,
        /// Field that failed validation.
        field: String,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Reading the configuration file failed.
    #[error("filesystem operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// File involved in the operation.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// The configuration file was not a valid document.
    #[error("failed to parse configuration file")]
    Json {
        /// File that failed to parse.
        path: PathBuf,
        /// Source serde error.
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid_field(
        section: &str,
        field: &str,
        value: Option<&str>,
        reason: &'static str,
    ) -> Self {
        Self::InvalidField {
            section: section.to_string(),
            field: field.to_string(),
            value: value.map(str::to_string),
            reason,
        }
    }

    pub(crate) fn io(operation: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.to_path_buf(),
            source,
        }
    }

    /// One-line summary including the structured context, for user-facing output.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::InvalidField {
                section,
                field,
                value,
                reason,
            } => match value {
                Some(value) => format!("{section}.{field}: {reason} (got '{value}')"),
                None => format!("{section}.{field}: {reason}"),
            },
            Self::Io {
                operation, path, ..
            } => format!("{operation} {}: {self}", path.display()),
            Self::Json { path, source } => format!("{}: {self}: {source}", path.display()),
        }
    }
}
