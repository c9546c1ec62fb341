//! Best-effort traversal of a source tree.

use std::{
    borrow::Cow,
    fs, io,
    path::{Path, PathBuf},
    vec,
};

/// Whether a tree entry is a directory or something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    /// Regular files, and symlinks (which are listed but never followed).
    File,
}

/// A single entry yielded by [`Walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    /// Nesting level below the walked root; direct children are at 0.
    pub depth: usize,
    pub kind: EntryKind,
}

impl TreeEntry {
    /// Final path component.
    pub fn name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

type SkipHook<'a> = Box<dyn FnMut(&Path, &io::Error) + 'a>;

/// A directory tree to walk.
///
/// # Example
///
/// ```no_run
/// use cxscaffold_core::SourceTree;
///
/// let mut skipped = Vec::new();
/// let entries: Vec<_> = SourceTree::new("src")
///     .on_skip(|path, _| skipped.push(path.to_path_buf()))
///     .walk()
///     .collect();
/// ```
pub struct SourceTree<'a> {
    root: PathBuf,
    on_skip: Option<SkipHook<'a>>,
}

impl<'a> SourceTree<'a> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            on_skip: None,
        }
    }

    /// Register a callback invoked for every directory that could not be read.
    pub fn on_skip(mut self, hook: impl FnMut(&Path, &io::Error) + 'a) -> Self {
        self.on_skip = Some(Box::new(hook));
        self
    }

    /// Walk the tree depth-first. Within a directory, subdirectories come
    /// before files and each group is sorted by name.
    pub fn walk(self) -> Walk<'a> {
        let mut walk = Walk {
            stack: Vec::new(),
            on_skip: self.on_skip,
        };
        if self.root.exists() {
            if let Some(children) = walk.read_dir(&self.root, 0) {
                walk.stack.push(children);
            }
        }
        walk
    }
}

/// Lazy iterator over a [`SourceTree`].
pub struct Walk<'a> {
    stack: Vec<vec::IntoIter<TreeEntry>>,
    on_skip: Option<SkipHook<'a>>,
}

impl Walk<'_> {
    fn read_dir(&mut self, dir: &Path, depth: usize) -> Option<vec::IntoIter<TreeEntry>> {
        let read = match fs::read_dir(dir) {
            Ok(read) => read,
            Err(e) => {
                self.skip(dir, &e);
                return None;
            }
        };

        let mut entries = Vec::new();
        for entry in read {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.skip(dir, &e);
                    continue;
                }
            };
            let kind = match entry.file_type() {
                Ok(ft) if ft.is_dir() => EntryKind::Dir,
                _ => EntryKind::File,
            };
            entries.push(TreeEntry {
                path: entry.path(),
                depth,
                kind,
            });
        }

        entries.sort_by(|a, b| {
            (!a.is_dir(), a.path.file_name()).cmp(&(!b.is_dir(), b.path.file_name()))
        });
        Some(entries.into_iter())
    }

    fn skip(&mut self, path: &Path, err: &io::Error) {
        tracing::warn!(path = %path.display(), error = %err, "skipping unreadable directory");
        if let Some(hook) = self.on_skip.as_mut() {
            hook(path, err);
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = TreeEntry;

    fn next(&mut self) -> Option<TreeEntry> {
        loop {
            let entry = match self.stack.last_mut()?.next() {
                Some(entry) => entry,
                None => {
                    self.stack.pop();
                    continue;
                }
            };

            if entry.is_dir() {
                if let Some(children) = self.read_dir(&entry.path, entry.depth + 1) {
                    self.stack.push(children);
                }
            }
            return Some(entry);
        }
    }
}
