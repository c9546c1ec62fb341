use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use clap::Args;
use cxscaffold_cpp::{Deleted, Scaffolder};
use cxscaffold_manifest::ProjectConfig;
use dialoguer::{Confirm, theme::ColorfulTheme};
use eyre::{Context, Result};

use super::{UnwrapOrExit, scaffold::display_path};
use crate::reports::{DeleteReport, Report, TerminalOutput};

#[derive(Args)]
pub struct DeleteCommand {
    /// File to delete
    pub path: PathBuf,

    /// Delete without asking
    #[arg(short, long)]
    pub yes: bool,
}

impl DeleteCommand {
    pub fn run(&self, config: &ProjectConfig) -> Result<()> {
        if !self.yes && io::stdin().is_terminal() && !self.confirm()? {
            println!("Nothing deleted");
            return Ok(());
        }

        let Deleted { file, manifest } = Scaffolder::new(config)
            .delete_file(&self.path)
            .unwrap_or_exit();

        let cwd = std::env::current_dir().unwrap_or_default();
        let report = DeleteReport {
            file: display_path(&file, &cwd),
            manifest: manifest.as_ref().ok().cloned(),
        };
        report.render(&mut TerminalOutput::new());

        manifest.unwrap_or_exit();
        Ok(())
    }

    fn confirm(&self) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete '{}' and its manifest entries?",
                self.path.display()
            ))
            .default(false)
            .interact()
            .wrap_err("Failed to get confirmation")
    }
}
