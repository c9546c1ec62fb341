mod completions;
mod config;
mod delete;
mod scaffold;
mod tree;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use config::ConfigCommand;
use cxscaffold_manifest::{CONFIG_FILE_NAME, ProjectConfig};
use delete::DeleteCommand;
use eyre::Result;
use scaffold::{AddClassCommand, AddHeaderCommand, AddSourceCommand};
use tree::TreeCommand;

/// Extension trait for exiting on scaffolding errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for cxscaffold_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                let code = e.exit_code();
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(code);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "cxs")]
#[command(version)]
#[command(about = "Scaffold C++ files and keep the CMake source lists in sync")]
pub(crate) struct Cli {
    /// Path to the project config
    #[arg(long, global = true, env = "CXS_CONFIG", default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Log more (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::AddClass(cmd) => cmd.run(&self.load_config()),
            Commands::AddHeader(cmd) => cmd.run(&self.load_config()),
            Commands::AddSource(cmd) => cmd.run(&self.load_config()),
            Commands::Delete(cmd) => cmd.run(&self.load_config()),
            Commands::Tree(cmd) => cmd.run(&self.load_config()),
            Commands::Config(cmd) => cmd.run(&self.config),
            Commands::Completions(cmd) => cmd.run(),
        }
    }

    fn load_config(&self) -> ProjectConfig {
        tracing::debug!(path = %self.config.display(), "loading project config");
        ProjectConfig::load(&self.config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a class header and source and list both in the manifest
    AddClass(AddClassCommand),

    /// Create a header and list it in the manifest
    AddHeader(AddHeaderCommand),

    /// Create a source file and list it in the manifest
    AddSource(AddSourceCommand),

    /// Delete a file and drop its manifest entries
    Delete(DeleteCommand),

    /// Print the source tree
    Tree(TreeCommand),

    /// Show or edit the project config
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
