//! Backends that apply an approved location change.
//!
//! # Design
//! - The session decides *where* to go; a backend decides whether the move is
//!   possible and performs any side effect.
//! - [`VerifiedLocation`] keeps process state untouched so hosts that only
//!   report the new location (and tests) stay isolated.

use std::fmt::Debug;
use std::path::Path;
use std::{env, fs, io};

use tracing::debug;

use crate::error::{NavError, NavResult};

/// Primitive that changes the active location to `target`.
pub trait LocationBackend: Debug + Send + Sync {
    /// Apply the change.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NavigationFailed`] if the target is missing, is not
    /// a directory, cannot be read, or the change itself is refused.
    fn change_to(&self, target: &Path) -> NavResult<()>;
}

/// Checks that the target is a readable directory without mutating process state.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifiedLocation;

impl LocationBackend for VerifiedLocation {
    fn change_to(&self, target: &Path) -> NavResult<()> {
        verify_directory(target)
    }
}

/// Verifies the target, then moves the process working directory to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLocation;

impl LocationBackend for ProcessLocation {
    fn change_to(&self, target: &Path) -> NavResult<()> {
        verify_directory(target)?;
        env::set_current_dir(target)
            .map_err(|source| NavError::navigation_failed("set_current_dir", target, source))?;
        debug!(path = %target.display(), "process working directory changed");
        Ok(())
    }
}

fn verify_directory(target: &Path) -> NavResult<()> {
    let metadata = fs::metadata(target)
        .map_err(|source| NavError::navigation_failed("metadata", target, source))?;
    if !metadata.is_dir() {
        return Err(NavError::navigation_failed(
            "metadata",
            target,
            io::Error::new(io::ErrorKind::NotADirectory, "target is not a directory"),
        ));
    }
    fs::read_dir(target)
        .map(drop)
        .map_err(|source| NavError::navigation_failed("read_dir", target, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn verified_location_accepts_directories() -> Result<(), Box<dyn Error>> {
        let temp = tempfile::tempdir()?;
        VerifiedLocation.change_to(temp.path())?;
        Ok(())
    }

    #[test]
    fn verified_location_rejects_missing_and_files() -> Result<(), Box<dyn Error>> {
        let temp = tempfile::tempdir()?;
        let missing = temp.path().join("missing");
        let Err(NavError::NavigationFailed { operation, .. }) = VerifiedLocation.change_to(&missing)
        else {
            return Err("expected missing directory to fail".into());
        };
        assert_eq!(operation, "metadata");

        let file = temp.path().join("file.txt");
        fs::write(&file, b"data")?;
        let Err(NavError::NavigationFailed { source, .. }) = VerifiedLocation.change_to(&file)
        else {
            return Err("expected regular file to fail".into());
        };
        assert_eq!(source.kind(), io::ErrorKind::NotADirectory);
        Ok(())
    }

    #[test]
    fn process_location_follows_the_move() -> Result<(), Box<dyn Error>> {
        let original = env::current_dir()?;
        let temp = tempfile::tempdir()?;
        let target = temp.path().canonicalize()?;

        let moved = ProcessLocation.change_to(&target);
        let observed = env::current_dir();
        env::set_current_dir(&original)?;

        moved?;
        assert_eq!(observed?.canonicalize()?, target);
        Ok(())
    }
}
