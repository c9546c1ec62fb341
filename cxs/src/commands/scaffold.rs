use std::path::{Path, PathBuf};

use clap::Args;
use cxscaffold_cpp::{Scaffolded, Scaffolder};
use cxscaffold_manifest::ProjectConfig;
use eyre::Result;

use super::UnwrapOrExit;
use crate::reports::{Report, ScaffoldReport, TerminalOutput};

#[derive(Args)]
pub struct ScaffoldArgs {
    /// Name of the file without extension
    pub name: String,

    /// Target directory (defaults to the source root)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

impl ScaffoldArgs {
    fn target_dir(&self, config: &ProjectConfig) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| config.source_root())
    }
}

#[derive(Args)]
pub struct AddClassCommand {
    #[command(flatten)]
    args: ScaffoldArgs,
}

impl AddClassCommand {
    pub fn run(&self, config: &ProjectConfig) -> Result<()> {
        let dir = self.args.target_dir(config);
        let scaffolded = Scaffolder::new(config)
            .create_class(&self.args.name, &dir)
            .unwrap_or_exit();
        finish(scaffolded)
    }
}

#[derive(Args)]
pub struct AddHeaderCommand {
    #[command(flatten)]
    args: ScaffoldArgs,
}

impl AddHeaderCommand {
    pub fn run(&self, config: &ProjectConfig) -> Result<()> {
        let dir = self.args.target_dir(config);
        let scaffolded = Scaffolder::new(config)
            .create_header_only(&self.args.name, &dir)
            .unwrap_or_exit();
        finish(scaffolded)
    }
}

#[derive(Args)]
pub struct AddSourceCommand {
    #[command(flatten)]
    args: ScaffoldArgs,
}

impl AddSourceCommand {
    pub fn run(&self, config: &ProjectConfig) -> Result<()> {
        let dir = self.args.target_dir(config);
        let scaffolded = Scaffolder::new(config)
            .create_source_only(&self.args.name, &dir)
            .unwrap_or_exit();
        finish(scaffolded)
    }
}

/// Report what was created, then fail if the manifest could not follow.
fn finish(scaffolded: Scaffolded) -> Result<()> {
    let Scaffolded { files, manifest } = scaffolded;
    let cwd = std::env::current_dir().unwrap_or_default();

    let report = ScaffoldReport {
        files: files.iter().map(|f| display_path(f, &cwd)).collect(),
        manifest: manifest.as_ref().ok().cloned(),
    };
    report.render(&mut TerminalOutput::new());

    manifest.unwrap_or_exit();
    Ok(())
}

/// Paths below the current directory are shown relative to it.
pub(crate) fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .display()
        .to_string()
}
