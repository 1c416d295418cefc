//! Environment variable handling for configuration overrides.
//!
//! `SEATHOLD_*` variables override values from configuration files.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::logging::LOG_MODE_ENV;
use std::env;
use std::str::FromStr;

/// Venue rows override.
pub const ROWS_ENV: &str = "SEATHOLD_ROWS";
/// Seats-per-row override.
pub const COLS_ENV: &str = "SEATHOLD_COLS";
/// Hold timeout override, in milliseconds.
pub const HOLD_TIMEOUT_ENV: &str = "SEATHOLD_HOLD_TIMEOUT_MS";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use seathold::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that is not a
    /// non-negative integer.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(rows) = Self::read_number(ROWS_ENV)? {
            config.venue.get_or_insert_with(Default::default).rows = Some(rows);
        }

        if let Some(cols) = Self::read_number(COLS_ENV)? {
            config.venue.get_or_insert_with(Default::default).cols = Some(cols);
        }

        if let Some(timeout) = Self::read_number(HOLD_TIMEOUT_ENV)? {
            config.hold_timeout_ms = Some(timeout);
        }

        if let Ok(mode) = env::var(LOG_MODE_ENV) {
            config.log_mode = Some(mode);
        }

        Ok(())
    }

    fn read_number<T: FromStr>(name: &str) -> Result<Option<T>> {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| Error::Validation {
                    field: name.into(),
                    message: format!("Must be a non-negative integer, got '{value}'"),
                }),
            Err(_) => Ok(None),
        }
    }
}
