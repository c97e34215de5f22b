//! Session state and the navigate-up operation.

use std::env;
use std::fmt::{self, Debug, Formatter};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::confirm::{ConfirmGate, ConfirmationRequest};
use crate::error::{NavError, NavResult};
use crate::location::{LocationBackend, VerifiedLocation};
use crate::path::parent_of;

/// Terminal, non-error results of [`NavigationSession::navigate_up`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The current location is a root; nothing was asked or changed.
    AtRoot,
    /// The gate denied the move; the location is unchanged.
    Declined,
    /// The session moved to the contained parent.
    Navigated(PathBuf),
}

impl NavigationOutcome {
    /// Stable label used in logs and telemetry.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AtRoot => "at_root",
            Self::Declined => "declined",
            Self::Navigated(_) => "navigated",
        }
    }
}

/// Owned navigation state: the current location plus the backend that applies moves.
pub struct NavigationSession {
    current: PathBuf,
    backend: Box<dyn LocationBackend>,
}

impl NavigationSession {
    /// Session rooted at `current` using [`VerifiedLocation`].
    ///
    /// # Errors
    ///
    /// See [`NavigationSession::with_backend`].
    pub fn new(current: impl AsRef<Path>) -> NavResult<Self> {
        Self::with_backend(current, VerifiedLocation)
    }

    /// Session rooted at `current` with an explicit backend.
    ///
    /// Relative locations are resolved against the process working directory
    /// so that only a real root can report [`NavigationOutcome::AtRoot`].
    ///
    /// # Errors
    ///
    /// Returns [`NavError::CurrentLocation`] if `current` is empty or the
    /// working directory needed to resolve it cannot be read.
    pub fn with_backend(
        current: impl AsRef<Path>,
        backend: impl LocationBackend + 'static,
    ) -> NavResult<Self> {
        let current = std::path::absolute(current.as_ref())
            .map_err(|source| NavError::CurrentLocation { source })?;
        Ok(Self {
            current,
            backend: Box::new(backend),
        })
    }

    /// Session seeded from the process working directory.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::CurrentLocation`] if the working directory cannot be read.
    pub fn from_process() -> NavResult<Self> {
        let current = env::current_dir().map_err(|source| NavError::CurrentLocation { source })?;
        Self::new(current)
    }

    /// The session's current location.
    #[must_use]
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Move the session to the parent of its current location.
    ///
    /// The gate is invoked inline, and only when a parent exists. The current
    /// location changes only on [`NavigationOutcome::Navigated`].
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NavigationFailed`] when the backend refuses the
    /// approved move; the current location is left as it was.
    pub fn navigate_up(&mut self, confirm: &dyn ConfirmGate) -> NavResult<NavigationOutcome> {
        let Some(parent) = parent_of(&self.current) else {
            debug!(path = %self.current.display(), "already at root");
            return Ok(NavigationOutcome::AtRoot);
        };

        let request = ConfirmationRequest::change_location(&self.current, &parent);
        if !confirm.confirm(&request) {
            debug!(request = %request, "navigation declined");
            return Ok(NavigationOutcome::Declined);
        }

        self.backend.change_to(&parent)?;
        info!(
            from = %self.current.display(),
            to = %parent.display(),
            "location changed"
        );
        self.current.clone_from(&parent);
        Ok(NavigationOutcome::Navigated(parent))
    }
}

impl Debug for NavigationSession {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NavigationSession")
            .field("current", &self.current)
            .field("backend", &self.backend)
            .finish()
    }
}
