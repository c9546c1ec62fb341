use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Result type for manifest and scaffolding operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("'{}' already exists", .path.display())]
    #[diagnostic(
        code(cxs::already_exists),
        help("pick a different name, or delete the existing file first")
    )]
    AlreadyExists { path: PathBuf },

    #[error("manifest '{}' not found", .path.display())]
    #[diagnostic(
        code(cxs::manifest_missing),
        help("check `root_path` and `manifest_filename` in the project config")
    )]
    ManifestMissing { path: PathBuf },

    #[error("manifest '{}' was modified by another process during the edit", .path.display())]
    #[diagnostic(
        code(cxs::manifest_changed),
        help("nothing was written; re-run the command to edit the latest content")
    )]
    ManifestChanged { path: PathBuf },

    #[error("directory '{}' does not exist", .path.display())]
    #[diagnostic(code(cxs::io), help("it may have been moved or deleted"))]
    DirectoryMissing { path: PathBuf },

    #[error("'{}' is not a file", .path.display())]
    #[diagnostic(
        code(cxs::not_a_file),
        help("directories are not managed by cxs; remove them by hand and fix the manifest")
    )]
    NotAFile { path: PathBuf },

    #[error("invalid {kind} name '{name}'")]
    #[diagnostic(code(cxs::invalid_name), help("{reason}"))]
    InvalidName {
        name: String,
        kind: &'static str,
        reason: &'static str,
    },

    #[error("failed to {action} '{}'", .path.display())]
    #[diagnostic(code(cxs::io))]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Create an I/O error for an action on a path
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Box<Self> {
        Box::new(Error::Io {
            action,
            path: path.into(),
            source,
        })
    }

    /// Create an invalid name error
    pub fn invalid_name(
        name: impl Into<String>,
        kind: &'static str,
        reason: &'static str,
    ) -> Box<Self> {
        Box::new(Error::InvalidName {
            name: name.into(),
            kind,
            reason,
        })
    }

    /// Process exit code for this error's category.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidName { .. } | Error::NotAFile { .. } => 2,
            Error::AlreadyExists { .. } => 3,
            Error::ManifestMissing { .. } => 4,
            Error::ManifestChanged { .. } => 5,
            Error::DirectoryMissing { .. } | Error::Io { .. } => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_messages_name_the_path() {
        let err = Error::AlreadyExists {
            path: Path::new("src").join("Foo.h"),
        };
        assert!(err.to_string().contains("Foo.h"));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = Error::io(
            "remove",
            "src/Foo.cpp",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to remove 'src/Foo.cpp'");
        let source = std::error::Error::source(&*err).unwrap();
        assert_eq!(source.to_string(), "denied");
    }

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        let codes = [
            Error::invalid_name("1x", "class", "bad").exit_code(),
            Error::AlreadyExists { path: "a".into() }.exit_code(),
            Error::ManifestMissing { path: "a".into() }.exit_code(),
            Error::ManifestChanged { path: "a".into() }.exit_code(),
            Error::DirectoryMissing { path: "a".into() }.exit_code(),
        ];
        assert_eq!(codes, [2, 3, 4, 5, 6]);
        assert!(codes.iter().all(|&c| c != 0));
    }
}
