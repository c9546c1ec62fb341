//! Structured editing of a CMake-style build manifest.
//!
//! The manifest is a plain text file holding `set(NAME ... )` blocks that
//! list the project's sources and headers. This crate knows how to turn a
//! file on disk into a manifest token, which block a file belongs to, and
//! how to insert or remove entries while leaving every other byte alone.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod classify;
mod config;
mod error;
mod file;
mod patch;
mod path;

pub use classify::{BucketRule, Classification, EntryClassifier, HEADERS, SOURCES};
pub use config::{CONFIG_FILE_NAME, ProjectConfig};
pub use error::{Error, Result};
pub use file::{ManifestFile, edit_manifest};
pub use patch::{
    AddEdit, BLOCK_CLOSE, DeleteEdit, DeleteMatch, Edit, PatchWarning, Patched, apply_edit,
    block_start_marker, split_lines,
};
pub use path::{ManifestToken, PathResolver, resolve_token};
