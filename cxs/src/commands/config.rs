use std::path::Path;

use clap::{Args, Subcommand};
use cxscaffold_manifest::ProjectConfig;
use eyre::{Result, bail};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{ConfigReport, Report, TerminalOutput},
};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective config
    Show,

    /// Write a config file with the default values
    Init(InitArgs),

    /// Change config values and save
    Set(ops::config::ConfigChanges),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

impl ConfigCommand {
    pub fn run(&self, path: &Path) -> Result<()> {
        match self {
            ConfigCommand::Show => Self::show(path),
            ConfigCommand::Init(args) => Self::init(path, args),
            ConfigCommand::Set(changes) => Self::set(path, changes),
        }
    }

    fn show(path: &Path) -> Result<()> {
        let report = ConfigReport::new(path, ProjectConfig::load(path));
        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    fn init(path: &Path, args: &InitArgs) -> Result<()> {
        let config = ProjectConfig::default();
        if args.force {
            config.save(path).unwrap_or_exit();
        } else {
            config.create(path).unwrap_or_exit();
        }
        println!("Wrote {}", path.display());
        Ok(())
    }

    fn set(path: &Path, changes: &ops::config::ConfigChanges) -> Result<()> {
        if changes.is_empty() {
            bail!("nothing to set; pass at least one of --root, --source-dir, --manifest, --token");
        }

        let config = ops::config::apply(ProjectConfig::load(path), changes);
        config.save(path).unwrap_or_exit();

        let report = ConfigReport::new(path, config);
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}

