//! C++ file scaffolding for cxs.
//!
//! [`files`] renders the boilerplate for new headers and sources, and
//! [`Scaffolder`] writes it into the project and keeps the build manifest in
//! step with what is on disk.

mod scaffolder;

pub mod files;

pub use scaffolder::{Deleted, ManifestUpdate, Scaffolded, Scaffolder};
