//! Configuration validation.

use crate::config::schema::{Config, VenueConfig};
use crate::error::{Error, Result};
use crate::logging::LogLevel;

/// Largest venue the service accepts.
pub const MAX_SEATS: usize = 1_000_000;

/// Longest hold the service accepts: one day.
pub const MAX_HOLD_TIMEOUT_MS: u64 = 24 * 60 * 60 * 1000;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use seathold::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::defaults()).unwrap();
///
/// let bad = Config { hold_timeout_ms: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration layer or a merged configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(venue) = config.venue {
            Self::validate_venue(venue)?;
        }

        if let Some(timeout) = config.hold_timeout_ms {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "hold_timeout_ms".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
            if timeout > MAX_HOLD_TIMEOUT_MS {
                return Err(Error::Validation {
                    field: "hold_timeout_ms".into(),
                    message: format!("Timeout cannot exceed {MAX_HOLD_TIMEOUT_MS} ms"),
                });
            }
        }

        if let Some(ref mode) = config.log_mode {
            LogLevel::parse(mode).map_err(|message| Error::Validation {
                field: "log_mode".into(),
                message,
            })?;
        }

        Ok(())
    }

    fn validate_venue(venue: VenueConfig) -> Result<()> {
        for (field, value) in [("venue.rows", venue.rows), ("venue.cols", venue.cols)] {
            if value == Some(0) {
                return Err(Error::Validation {
                    field: field.into(),
                    message: "Must be greater than 0".into(),
                });
            }
        }

        if let (Some(rows), Some(cols)) = (venue.rows, venue.cols) {
            let within = rows.checked_mul(cols).is_some_and(|seats| seats <= MAX_SEATS);
            if !within {
                return Err(Error::Validation {
                    field: "venue".into(),
                    message: format!("A venue cannot have more than {MAX_SEATS} seats"),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(rows: Option<usize>, cols: Option<usize>) -> Config {
        Config {
            venue: Some(VenueConfig { rows, cols }),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_config_is_valid() {
        ConfigValidator::validate(&Config::default()).unwrap();
    }

    #[test]
    fn test_zero_rows_or_cols() {
        let err = ConfigValidator::validate(&venue(Some(0), Some(4))).unwrap_err();
        assert!(err.to_string().contains("venue.rows"));
        let err = ConfigValidator::validate(&venue(None, Some(0))).unwrap_err();
        assert!(err.to_string().contains("venue.cols"));
    }

    #[test]
    fn test_seat_count_bounded() {
        ConfigValidator::validate(&venue(Some(1000), Some(1000))).unwrap();
        assert!(ConfigValidator::validate(&venue(Some(1001), Some(1000))).is_err());
        assert!(ConfigValidator::validate(&venue(Some(usize::MAX), Some(2))).is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        let config = |ms| Config {
            hold_timeout_ms: Some(ms),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config(0)).is_err());
        ConfigValidator::validate(&config(1)).unwrap();
        ConfigValidator::validate(&config(MAX_HOLD_TIMEOUT_MS)).unwrap();
        assert!(ConfigValidator::validate(&config(MAX_HOLD_TIMEOUT_MS + 1)).is_err());
    }

    #[test]
    fn test_log_mode_must_be_known() {
        let config = |mode: &str| Config {
            log_mode: Some(mode.to_string()),
            ..Default::default()
        };
        ConfigValidator::validate(&config("Verbose")).unwrap();
        let err = ConfigValidator::validate(&config("chatty")).unwrap_err();
        assert!(err.to_string().contains("log_mode"));
    }
}
