//! Shared path helpers.

use std::path::{Component, Path, PathBuf};

/// Replace Windows separators with forward slashes.
pub fn to_forward_slashes(s: &str) -> String {
    s.replace('\\', "/")
}

/// Normalize a path without touching the filesystem.
///
/// `.` components are dropped and `..` removes the preceding normal
/// component. A `..` that would climb above the root is discarded; one that
/// climbs above the start of a relative path is kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}
