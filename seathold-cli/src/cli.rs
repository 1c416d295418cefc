//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    CompletionsCommand, DemoCommand, SessionCommand, ShowConfigCommand, ValidateCommand,
};
use crate::utils::GlobalOptions;

/// Command-line driver for holding and reserving venue seats.
#[derive(Parser)]
#[command(name = "seathold")]
#[command(version, about = "Hold and reserve venue seats", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Directory holding the user config.yaml
    #[arg(long, value_name = "PATH", global = true, env = "SEATHOLD_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Number of rows in the venue
    #[arg(long, value_name = "N", global = true)]
    pub rows: Option<usize>,

    /// Number of seats in each row
    #[arg(long, value_name = "N", global = true)]
    pub cols: Option<usize>,

    /// How long a hold lasts before it expires (in milliseconds)
    #[arg(long, value_name = "MS", global = true)]
    pub hold_timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The options every command receives.
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            config_dir: self.config_dir.clone(),
            rows: self.rows,
            cols: self.cols,
            hold_timeout_ms: self.hold_timeout_ms,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Walk through the standard booking scenarios
    Demo(DemoCommand),

    /// Run hold and reserve commands from a script or stdin
    Session(SessionCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Print the effective configuration as YAML
    ShowConfig(ShowConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
