//! Utility functions for CLI operations.
//!
//! Configuration loading, logger setup, service construction and output
//! formatting shared by the commands.

use std::io::Write;
use std::path::PathBuf;
use std::time::SystemTime;

use seathold::config::{Config, ConfigBuilder, VenueConfig};
use seathold::{init_logger, LogLevel, Logger, SeatHold, TicketService, VenueSnapshot};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Directory holding the user `config.yaml`.
    pub config_dir: Option<PathBuf>,

    /// Override the number of rows.
    pub rows: Option<usize>,

    /// Override the seats per row.
    pub cols: Option<usize>,

    /// Override the hold timeout in milliseconds.
    pub hold_timeout_ms: Option<u64>,
}

impl GlobalOptions {
    /// The command-line overrides as a configuration layer.
    pub fn overrides(&self) -> Config {
        let venue = (self.rows.is_some() || self.cols.is_some()).then_some(VenueConfig {
            rows: self.rows,
            cols: self.cols,
        });
        Config {
            venue,
            hold_timeout_ms: self.hold_timeout_ms,
            ..Config::default()
        }
    }
}

/// Load hierarchical configuration and install the logger it selects.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref dir) = global.config_dir {
        builder = builder.with_config_dir(dir);
    }

    let config = builder
        .with_config(global.overrides())
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    install_logger(global, &config);
    Ok(config)
}

/// Flags win over the configured `log_mode`, which already carries
/// `SEATHOLD_LOG_MODE`.
fn install_logger(global: &GlobalOptions, config: &Config) {
    let logger = if global.verbose || global.quiet {
        init_logger(global.verbose, global.quiet)
    } else {
        Logger::new(config.log_level().unwrap_or(LogLevel::Normal))
    };

    // Only the first install in a process takes effect
    let _ = logger.install();
}

/// Build a ticket service with a wall-clock expiry scheduler.
pub fn build_service(config: &Config) -> Result<TicketService, CliError> {
    TicketService::from_config(config).map_err(CliError::from)
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// One-line description of a hold.
pub fn describe_hold(hold: &SeatHold) -> String {
    let first = hold.seats().first().map_or(0, |s| s.index);
    let last = hold.seats().last().map_or(0, |s| s.index);
    format!(
        "hold {}: row {} seats {}-{} for {} until {}",
        hold.id(),
        hold.row(),
        first,
        last,
        hold.email(),
        format_timestamp(hold.expires_at())
    )
}

/// JSON view of a hold.
pub fn hold_json(hold: &SeatHold) -> serde_json::Value {
    serde_json::json!({
        "hold_id": hold.id(),
        "row": hold.row(),
        "seats": hold.seats().iter().map(|s| s.index).collect::<Vec<_>>(),
        "email": hold.email(),
        "created_at": format_timestamp(hold.created_at()),
        "expires_at": format_timestamp(hold.expires_at()),
    })
}

/// Write the seat matrix followed by the availability line.
pub fn write_venue(
    out: &mut impl Write,
    snapshot: &VenueSnapshot,
    available: usize,
) -> Result<(), CliError> {
    writeln!(out, "{snapshot}")?;
    writeln!(out, "Total Seats Available: {available}")?;
    Ok(())
}
