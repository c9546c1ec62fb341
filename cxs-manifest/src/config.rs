//! Project configuration persisted as a flat JSON object.

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use cxscaffold_core::{Encoding, File, FileRules, Overwrite};
use serde::{Deserialize, Serialize};

use crate::{BucketRule, DeleteMatch, Error, Result};

/// Default location of the project configuration.
pub const CONFIG_FILE_NAME: &str = "cxs.json";

/// Where the project lives and how its manifest is laid out.
///
/// Keys written by older tools (`PROJECT_ROOT`, `TARGET_DIR`, `CMAKE_FILE`,
/// `CMAKE_VAR_PREFIX`, `BG_IMAGE`) are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project root; relative paths are taken from the current directory.
    #[serde(alias = "PROJECT_ROOT")]
    pub root_path: PathBuf,

    /// Directory under the root holding the sources.
    #[serde(alias = "TARGET_DIR")]
    pub source_subdir: PathBuf,

    /// Manifest file name, relative to the root.
    #[serde(alias = "CMAKE_FILE")]
    pub manifest_filename: PathBuf,

    /// Prefix of every manifest token, usually a CMake variable.
    #[serde(alias = "CMAKE_VAR_PREFIX")]
    pub path_variable_token: String,

    /// Carried over for front ends that render one; unused by cxs itself.
    #[serde(alias = "BG_IMAGE", skip_serializing_if = "Option::is_none")]
    pub background_image: Option<PathBuf>,

    pub buckets: Vec<BucketRule>,

    /// Encoding of generated C++ files.
    pub encoding: Encoding,

    pub delete_match: DeleteMatch,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            source_subdir: PathBuf::from("src"),
            manifest_filename: PathBuf::from("CMakeLists.txt"),
            path_variable_token: "${PROJECT_SRC_DIR}".to_string(),
            background_image: None,
            buckets: BucketRule::defaults(),
            encoding: Encoding::default(),
            delete_match: DeleteMatch::default(),
        }
    }
}

impl ProjectConfig {
    /// Load the configuration, falling back to defaults.
    ///
    /// A missing, unreadable or malformed file is never an error: the
    /// problem is logged and [`ProjectConfig::default`] is returned.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no project config, using defaults");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable project config, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed project config, using defaults");
                Self::default()
            }
        }
    }

    /// Save as pretty-printed JSON, replacing the file atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.write(path.as_ref(), Overwrite::Always)
    }

    /// Save to a file that must not exist yet.
    pub fn create(&self, path: impl AsRef<Path>) -> Result<()> {
        self.write(path.as_ref(), Overwrite::Never)
    }

    fn write(&self, path: &Path, overwrite: Overwrite) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::io("serialize", path, io::Error::from(e)))?;
        json.push('\n');

        File::new(path, json)
            .with_rules(FileRules {
                overwrite,
                encoding: Encoding::Utf8,
            })
            .write()
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => Box::new(Error::AlreadyExists {
                    path: path.to_path_buf(),
                }),
                _ => Error::io("write", path, e),
            })?;
        tracing::info!(path = %path.display(), "project config saved");
        Ok(())
    }

    /// `root_path` joined with `source_subdir`.
    pub fn source_root(&self) -> PathBuf {
        self.root_path.join(&self.source_subdir)
    }

    /// `root_path` joined with `manifest_filename`.
    pub fn manifest_path(&self) -> PathBuf {
        self.root_path.join(&self.manifest_filename)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig::load(temp.path().join(CONFIG_FILE_NAME));
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(ProjectConfig::load(&path), ProjectConfig::default());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "root_path": "/work/engine" }"#).unwrap();

        let config = ProjectConfig::load(&path);
        assert_eq!(config.root_path, PathBuf::from("/work/engine"));
        assert_eq!(config.source_subdir, PathBuf::from("src"));
        assert_eq!(config.buckets, BucketRule::defaults());
        assert_eq!(config.encoding, Encoding::Utf8Bom);
    }

    #[test]
    fn test_legacy_keys_are_accepted() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(
            &path,
            r#"{
    "PROJECT_ROOT": "D:/Github/Renderer",
    "TARGET_DIR": "src",
    "CMAKE_FILE": "CMakeLists.txt",
    "CMAKE_VAR_PREFIX": "${RENDERER_SRC_DIR}",
    "BG_IMAGE": "background.png"
}"#,
        )
        .unwrap();

        let config = ProjectConfig::load(&path);
        assert_eq!(config.root_path, PathBuf::from("D:/Github/Renderer"));
        assert_eq!(config.path_variable_token, "${RENDERER_SRC_DIR}");
        assert_eq!(config.background_image, Some(PathBuf::from("background.png")));
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        let config = ProjectConfig {
            root_path: PathBuf::from("/proj"),
            path_variable_token: "$SRC".to_string(),
            delete_match: DeleteMatch::WholeLine,
            encoding: Encoding::Utf8,
            ..ProjectConfig::default()
        };

        config.save(&path).unwrap();
        let saved = fs::read_to_string(&path).unwrap();

        assert!(saved.contains("\"delete_match\": \"whole-line\""));
        assert!(!saved.contains("background_image"));
        assert_eq!(ProjectConfig::load(&path), config);
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);

        ProjectConfig::default().create(&path).unwrap();
        let err = ProjectConfig::default().create(&path).unwrap_err();

        assert!(matches!(*err, Error::AlreadyExists { .. }));
        ProjectConfig::default().save(&path).unwrap();
    }

    #[test]
    fn test_derived_paths() {
        let config = ProjectConfig {
            root_path: PathBuf::from("/proj"),
            ..ProjectConfig::default()
        };
        assert_eq!(config.source_root(), Path::new("/proj").join("src"));
        assert_eq!(config.manifest_path(), Path::new("/proj").join("CMakeLists.txt"));
    }
}
