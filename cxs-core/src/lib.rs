//! Core utilities and types for the cxs C++ scaffolder.
//!
//! This crate provides the file-writing, path and identifier helpers used
//! across the cxs workspace.

mod file;
mod ident;
mod tree;
mod utils;

// File operations
pub use file::{Encoding, File, FileRules, GeneratedFile, Overwrite, write_atomic};
// C++ identifiers
pub use ident::{is_cpp_keyword, validate_identifier};
// Source tree traversal
pub use tree::{EntryKind, SourceTree, TreeEntry, Walk};
// Path utilities
pub use utils::{normalize_lexically, to_forward_slashes};
