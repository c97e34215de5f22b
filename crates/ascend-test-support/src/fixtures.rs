//! Temporary directory fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A temporary directory with a nested chain of subdirectories.
///
/// The directory is removed when the fixture is dropped.
#[derive(Debug)]
pub struct DirTree {
    root: TempDir,
    leaf: PathBuf,
}

impl DirTree {
    /// Create `root/<segments[0]>/<segments[1]>/...`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory or any segment cannot be created.
    pub fn nested(segments: &[&str]) -> Result<Self> {
        let root = tempfile::Builder::new()
            .prefix("ascend-")
            .tempdir()
            .context("failed to create temporary directory")?;
        let leaf = segments
            .iter()
            .fold(root.path().to_path_buf(), |path, segment| path.join(segment));
        fs::create_dir_all(&leaf)
            .with_context(|| format!("failed to create {}", leaf.display()))?;
        Ok(Self { root, leaf })
    }

    /// Root of the temporary tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Deepest directory created by [`DirTree::nested`].
    #[must_use]
    pub fn leaf(&self) -> &Path {
        &self.leaf
    }

    /// Write `contents` to `relative` under the root, creating parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directories cannot be written.
    pub fn write_file(&self, relative: impl AsRef<Path>, contents: &str) -> Result<PathBuf> {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}
