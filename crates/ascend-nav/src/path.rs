//! Lexical path helpers.
//!
//! Nothing in this module touches the filesystem: symlinks are not resolved
//! and `..` is folded against the preceding component as written.

use std::path::{Component, Path, PathBuf};

/// Fold `.` and `..` components out of `path` without consulting the filesystem.
///
/// `..` directly under a root collapses into the root. Leading `..` in a
/// relative path is kept, since there is nothing to fold it against.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    fold(path).iter().collect()
}

/// Parent of `path`, or `None` when the path has no parent.
///
/// Roots, bare prefixes, single relative components, and paths that only
/// climb (`..`) have no parent. The returned path is always a strict
/// component-wise prefix of the normalised input.
#[must_use]
pub fn parent_of(path: &Path) -> Option<PathBuf> {
    let mut components = fold(path);
    match components.pop() {
        Some(Component::Normal(_)) if !components.is_empty() => {
            Some(components.iter().collect())
        }
        _ => None,
    }
}

fn fold(path: &Path) -> Vec<Component<'_>> {
    let mut folded: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match folded.last() {
                Some(Component::Normal(_)) => {
                    folded.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => folded.push(component),
            },
            other => folded.push(other),
        }
    }
    folded
}
