//! Directory-listing collaborator.
//!
//! The navigation core never lists anything itself; hosts call a
//! [`DirectoryLister`] on the new location after a successful move.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{NavError, NavResult};

/// Coarse file type of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// A regular file.
    File,
    /// A symbolic link (not followed).
    Symlink,
    /// Sockets, pipes, devices.
    Other,
}

impl EntryKind {
    /// Short label used by table renderers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "dir",
            Self::File => "file",
            Self::Symlink => "link",
            Self::Other => "other",
        }
    }
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntrySummary {
    /// File name of the entry (lossy UTF-8).
    pub name: String,
    /// Full path of the entry.
    pub path: PathBuf,
    /// Entry type.
    pub kind: EntryKind,
    /// Size in bytes for regular files, zero otherwise.
    pub size_bytes: u64,
    /// Last modification time, when the platform reports one.
    pub modified: Option<DateTime<Utc>>,
}

/// Capability that enumerates the entries of a directory.
pub trait DirectoryLister {
    /// List the direct children of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Listing`] if the directory or one of its entries
    /// cannot be read.
    fn list(&self, path: &Path) -> NavResult<Vec<DirEntrySummary>>;
}

/// Single-level listing backed by `walkdir`, directories first, then by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirLister {
    show_hidden: bool,
}

impl WalkdirLister {
    /// Lister that skips dot-files.
    #[must_use]
    pub const fn new() -> Self {
        Self { show_hidden: false }
    }

    /// Include or skip entries whose name starts with `.`.
    #[must_use]
    pub const fn show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }
}

impl DirectoryLister for WalkdirLister {
    fn list(&self, path: &Path) -> NavResult<Vec<DirEntrySummary>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let entry = entry.map_err(|source| NavError::listing(path, source))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.show_hidden && name.starts_with('.') {
                continue;
            }

            let file_type = entry.file_type();
            let kind = if file_type.is_symlink() {
                EntryKind::Symlink
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };

            let metadata = entry
                .metadata()
                .map_err(|source| NavError::listing(path, source))?;
            let size_bytes = if kind == EntryKind::File {
                metadata.len()
            } else {
                0
            };
            let modified = metadata.modified().ok().map(DateTime::<Utc>::from);

            entries.push(DirEntrySummary {
                name,
                path: entry.into_path(),
                kind,
                size_bytes,
                modified,
            });
        }
        entries.sort_by(directories_first);
        Ok(entries)
    }
}

fn directories_first(left: &DirEntrySummary, right: &DirEntrySummary) -> Ordering {
    let left_dir = left.kind == EntryKind::Directory;
    let right_dir = right.kind == EntryKind::Directory;
    right_dir
        .cmp(&left_dir)
        .then_with(|| left.name.cmp(&right.name))
}
