//! `seathold completions`: print a completion script for a shell.

use std::io;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// How to load the generated script, for shells with a one-line recipe.
fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some("eval \"$(seathold completions bash)\""),
        Shell::Zsh => Some("seathold completions zsh > \"${fpath[1]}/_seathold\""),
        Shell::Fish => Some("seathold completions fish | source"),
        Shell::PowerShell => {
            Some("seathold completions powershell | Out-String | Invoke-Expression")
        }
        _ => None,
    }
}

impl CompletionsCommand {
    /// Write the script to stdout and a loading hint to stderr.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        if let Some(hint) = install_hint(self.shell) {
            eprintln!("# load with: {hint}");
        }

        let mut command = Cli::command();
        let name = command.get_name().to_string();
        generate(self.shell, &mut command, name, &mut io::stdout());
        Ok(())
    }
}
