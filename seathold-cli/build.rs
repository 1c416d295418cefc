//! Build script for seathold-cli.
//!
//! Renders the `seathold.1` man page into OUT_DIR with clap_mangen. Build
//! scripts cannot depend on the crate being built, so the command tree is
//! declared again here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("seathold")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Hold and reserve venue seats")
        .long_about(
            "Command-line driver for leasing blocks of consecutive venue seats with expiring holds",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory holding the user config.yaml")
                .value_name("PATH")
                .global(true)
                .env("SEATHOLD_CONFIG_DIR"),
        )
        .arg(
            Arg::new("rows")
                .long("rows")
                .help("Number of rows in the venue")
                .value_name("N")
                .global(true),
        )
        .arg(
            Arg::new("cols")
                .long("cols")
                .help("Number of seats in each row")
                .value_name("N")
                .global(true),
        )
        .arg(
            Arg::new("hold-timeout-ms")
                .long("hold-timeout-ms")
                .help("How long a hold lasts before it expires (in milliseconds)")
                .value_name("MS")
                .global(true),
        )
        .subcommands(vec![
            Command::new("demo")
                .about("Walk through the standard booking scenarios")
                .long_about(
                    "Run over-booking, hold, reserve, expiry and concurrency scenarios on a fresh venue",
                ),
            Command::new("session")
                .about("Run hold and reserve commands from a script or stdin")
                .long_about(
                    "Execute hold, reserve, available, status, holds and wait instructions line by line",
                ),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a seathold configuration file for errors"),
            Command::new("show-config")
                .about("Print the effective configuration as YAML")
                .long_about("Merge defaults, files, environment and flags and print the result"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("seathold.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
