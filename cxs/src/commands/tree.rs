use std::path::PathBuf;

use clap::Args;
use cxscaffold_manifest::ProjectConfig;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct TreeCommand {
    /// Directory to list (defaults to the source root)
    pub dir: Option<PathBuf>,
}

impl TreeCommand {
    pub fn run(&self, config: &ProjectConfig) -> Result<()> {
        let root = self.dir.clone().unwrap_or_else(|| config.source_root());
        let report = ops::tree(&root, config);
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
