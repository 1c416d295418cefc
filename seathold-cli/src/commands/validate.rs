//! `seathold validate`: check one configuration file on its own.
//!
//! The file is judged in isolation, without the other layers, so a
//! project file that only sets `hold_timeout_ms` is still valid.

use std::path::PathBuf;

use clap::Args;
use seathold::config::{Config, ConfigLoader, ConfigValidator};

use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Check a seathold configuration file for errors.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to check
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    /// Parse and validate the file, printing what it sets.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let path = &self.config_path;
        if !path.is_file() {
            return Err(CliError::InvalidArguments(format!(
                "no configuration file at {}",
                path.display()
            )));
        }

        let config = ConfigLoader::load_file(path).map_err(|e| {
            eprintln!("Parse error: {e}");
            CliError::SemanticFailure(format!("{} could not be parsed", path.display()))
        })?;

        if let Err(e) = ConfigValidator::validate(&config) {
            eprintln!("Validation error: {e}");
            return Err(CliError::SemanticFailure(format!(
                "{} has invalid settings",
                path.display()
            )));
        }

        println!("Configuration is valid: {}", summarize(&config));
        Ok(())
    }
}

/// Names the settings a single file provides.
fn summarize(config: &Config) -> String {
    let mut parts = Vec::new();
    if let Some(venue) = config.venue {
        if let Some(rows) = venue.rows {
            parts.push(format!("rows={rows}"));
        }
        if let Some(cols) = venue.cols {
            parts.push(format!("cols={cols}"));
        }
    }
    if let Some(ms) = config.hold_timeout_ms {
        parts.push(format!("hold_timeout_ms={ms}"));
    }
    if let Some(mode) = &config.log_mode {
        parts.push(format!("log_mode={mode}"));
    }
    if let Some(format) = config.output_format {
        parts.push(format!("output_format={format}"));
    }

    if parts.is_empty() {
        "no settings, defaults apply".to_string()
    } else {
        parts.join(", ")
    }
}
