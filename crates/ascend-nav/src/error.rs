//! # Design
//!
//! - Constant error messages; the failing operation and path travel as fields.
//! - `AtRoot` and `Declined` are outcomes, not errors, and never appear here.
//! - Preserve source errors without interpolating context into the message.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for navigation operations.
pub type NavResult<T> = Result<T, NavError>;

/// Errors produced while moving a session or listing its location.
#[derive(Debug, Error)]
pub enum NavError {
    /// The location-change primitive refused the move.
    #[error("navigation failed")]
    NavigationFailed {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// Target location of the move.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The process working directory could not be read.
    #[error("current location unavailable")]
    CurrentLocation {
        /// Underlying IO error.
        source: io::Error,
    },
    /// Enumerating a directory failed.
    #[error("directory listing failed")]
    Listing {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying walkdir error.
        source: walkdir::Error,
    },
}

impl NavError {
    pub(crate) fn navigation_failed(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self::NavigationFailed {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn listing(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::Listing {
            path: path.into(),
            source,
        }
    }

    /// Path the failure relates to, when there is one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NavigationFailed { path, .. } | Self::Listing { path, .. } => Some(path),
            Self::CurrentLocation { .. } => None,
        }
    }
}
