//! Core operations.
//!
//! Business logic for the commands that is not already a library call,
//! separated from CLI argument parsing and output rendering.

pub mod config;
pub mod tree;

pub use tree::tree;
