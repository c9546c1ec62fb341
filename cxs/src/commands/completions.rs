use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use clap::{Args, CommandFactory};
use eyre::{Context, Result};

use super::Cli;

#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    shell: clap_complete::Shell,

    /// Write the script to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();

        let mut script = Vec::new();
        clap_complete::generate(self.shell, &mut cmd, name, &mut script);

        match &self.output {
            Some(path) => fs::write(path, script)
                .wrap_err_with(|| format!("Failed to write {}", path.display())),
            None => io::stdout()
                .write_all(&script)
                .wrap_err("Failed to write completions"),
        }
    }
}
