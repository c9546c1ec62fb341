//! Turning file locations into manifest tokens.

use std::{
    fmt,
    path::{Component, Path, PathBuf},
};

use cxscaffold_core::{normalize_lexically, to_forward_slashes};

use crate::ProjectConfig;

/// A path as written in the manifest: `<variable>/<dir>/<file>`, always
/// with forward slashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManifestToken(String);

impl ManifestToken {
    /// Build a token, omitting the directory segment when `rel_dir` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cxscaffold_manifest::ManifestToken;
    ///
    /// assert_eq!(ManifestToken::new("$SRC", "Core/Render", "Foo.h").as_str(), "$SRC/Core/Render/Foo.h");
    /// assert_eq!(ManifestToken::new("$SRC", "", "Foo.h").as_str(), "$SRC/Foo.h");
    /// ```
    pub fn new(variable: &str, rel_dir: &str, file_name: &str) -> Self {
        if rel_dir.is_empty() {
            Self(format!("{}/{}", variable, file_name))
        } else {
            Self(format!("{}/{}/{}", variable, rel_dir, file_name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ManifestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ManifestToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolves directories against the configured source root.
#[derive(Debug, Clone)]
pub struct PathResolver<'a> {
    variable: &'a str,
    source_root: PathBuf,
}

impl<'a> PathResolver<'a> {
    pub fn new(config: &'a ProjectConfig) -> Self {
        Self {
            variable: &config.path_variable_token,
            source_root: absolutize(&config.source_root()),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Directory of `target_dir` relative to the source root, with forward
    /// slashes. The root itself gives an empty string.
    ///
    /// Directories outside the source root also give an empty string; that
    /// is logged rather than reported as an error.
    pub fn relative_dir(&self, target_dir: &Path) -> String {
        let target = absolutize(target_dir);
        match target.strip_prefix(&self.source_root) {
            Ok(rel) => {
                let parts: Vec<_> = rel
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(part) => Some(part.to_string_lossy()),
                        _ => None,
                    })
                    .collect();
                to_forward_slashes(&parts.join("/"))
            }
            Err(_) => {
                tracing::warn!(
                    dir = %target.display(),
                    source_root = %self.source_root.display(),
                    "directory is outside the source root, using the root in the manifest"
                );
                String::new()
            }
        }
    }

    /// Token for `file_name` living in `target_dir`.
    pub fn resolve_token(&self, target_dir: &Path, file_name: &str) -> ManifestToken {
        ManifestToken::new(self.variable, &self.relative_dir(target_dir), file_name)
    }
}

/// Token for `file_name` living in `target_dir` under `config`.
pub fn resolve_token(target_dir: &Path, file_name: &str, config: &ProjectConfig) -> ManifestToken {
    PathResolver::new(config).resolve_token(target_dir, file_name)
}

fn absolutize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize_lexically(&absolute)
}
