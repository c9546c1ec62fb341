//! Boilerplate for generated C++ files.
//!
//! Every file here is created with [`cxscaffold_core::Overwrite::Never`]:
//! scaffolding never replaces existing code.

/// Extension of generated headers.
pub const HEADER_EXT: &str = "h";
/// Extension of generated sources.
pub const SOURCE_EXT: &str = "cpp";
/// Trailer of the comment line in stub files.
pub const CREATED_BY: &str = "created by cxs";

mod class_header;
mod class_source;
mod header_stub;
mod source_stub;

pub use class_header::ClassHeader;
pub use class_source::ClassSource;
pub use header_stub::HeaderStub;
pub use source_stub::SourceStub;
