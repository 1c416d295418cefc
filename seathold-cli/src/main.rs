//! Main entry point for the seathold CLI.
//!
//! Commands:
//! - `demo`: walk through the standard booking scenarios
//! - `session`: run hold and reserve instructions from a script or stdin
//! - `validate`: check a configuration file
//! - `show-config`: print the effective configuration
//! - `completions`: generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let global = cli.global_options();

    let result = match cli.command {
        cli::Command::Demo(cmd) => cmd.execute(&global),
        cli::Command::Session(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::ShowConfig(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
