//! Config command report data structures.

use std::path::{Path, PathBuf};

use cxscaffold_manifest::ProjectConfig;

use super::output::{Output, Report};

/// Report data for a project config.
#[derive(Debug)]
pub struct ConfigReport {
    /// Config file path.
    pub path: PathBuf,
    /// Whether the config file exists.
    pub exists: bool,
    pub config: ProjectConfig,
}

impl ConfigReport {
    pub fn new(path: &Path, config: ProjectConfig) -> Self {
        Self {
            path: path.to_path_buf(),
            exists: path.is_file(),
            config,
        }
    }
}

impl Report for ConfigReport {
    fn render(&self, out: &mut dyn Output) {
        let source = if self.exists {
            self.path.display().to_string()
        } else {
            format!("{} (not found, using defaults)", self.path.display())
        };
        out.key_value("Config", &source);
        out.newline();

        let config = &self.config;
        out.key_value("root_path", &config.root_path.display().to_string());
        out.key_value("source_subdir", &config.source_subdir.display().to_string());
        out.key_value(
            "manifest_filename",
            &config.manifest_filename.display().to_string(),
        );
        out.key_value("path_variable_token", &config.path_variable_token);
        out.key_value("encoding", config.encoding.as_str());
        out.key_value("delete_match", config.delete_match.as_str());
        if let Some(image) = &config.background_image {
            out.key_value("background_image", &image.display().to_string());
        }

        out.section("buckets");
        for rule in &config.buckets {
            out.list_item(&format!(
                "{} -> {} [{}]",
                rule.name,
                rule.block,
                rule.extensions.join(", ")
            ));
        }
    }
}
