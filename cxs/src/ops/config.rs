//! Config operation - apply command-line changes to a project config.

use std::path::PathBuf;

use clap::Args;
use cxscaffold_manifest::ProjectConfig;

/// Values given to `cxs config set`.
#[derive(Args, Debug, Default)]
pub struct ConfigChanges {
    /// Project root directory
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Source directory, relative to the root
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Manifest file, relative to the root
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Variable written in front of every manifest entry
    #[arg(long)]
    pub token: Option<String>,
}

impl ConfigChanges {
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
            && self.source_dir.is_none()
            && self.manifest.is_none()
            && self.token.is_none()
    }
}

/// Apply `changes` on top of `config`, leaving unset values alone.
pub fn apply(mut config: ProjectConfig, changes: &ConfigChanges) -> ProjectConfig {
    if let Some(root) = &changes.root {
        config.root_path = root.clone();
    }
    if let Some(source_dir) = &changes.source_dir {
        config.source_subdir = source_dir.clone();
    }
    if let Some(manifest) = &changes.manifest {
        config.manifest_filename = manifest.clone();
    }
    if let Some(token) = &changes.token {
        config.path_variable_token = token.clone();
    }
    config
}
