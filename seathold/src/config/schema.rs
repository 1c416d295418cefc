//! Configuration schema definitions.
//!
//! Every field is optional so that each layer (user file, project files,
//! environment, programmatic overrides) can set just the values it cares
//! about. Missing values resolve to the built-in defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::logging::LogLevel;
use crate::service::{ServiceSettings, DEFAULT_COLS, DEFAULT_HOLD_TIMEOUT_MS, DEFAULT_ROWS};

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use seathold::config::{Config, VenueConfig};
///
/// let config = Config {
///     venue: Some(VenueConfig { rows: Some(10), cols: Some(20) }),
///     hold_timeout_ms: Some(30_000),
///     ..Default::default()
/// };
/// let settings = config.service_settings().unwrap();
/// assert_eq!(settings.dimensions().capacity(), 200);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Venue size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<VenueConfig>,

    /// How long a hold lasts before it expires, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_timeout_ms: Option<u64>,

    /// Log verbosity: quiet, normal or verbose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_mode: Option<String>,

    /// Default output format for session transcripts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
}

/// Venue dimensions.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct VenueConfig {
    /// Number of rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    /// Seats per row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cols: Option<usize>,
}

/// Output format for session transcripts.
///
/// # Examples
///
/// ```
/// use seathold::config::OutputFormat;
///
/// assert_eq!(OutputFormat::Json.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Customer-facing messages and seat maps.
    Human,
    /// One JSON document per line.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl Config {
    /// The built-in defaults: a 4x4 venue and 5 second holds.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            venue: Some(VenueConfig {
                rows: Some(DEFAULT_ROWS),
                cols: Some(DEFAULT_COLS),
            }),
            hold_timeout_ms: Some(DEFAULT_HOLD_TIMEOUT_MS),
            log_mode: None,
            output_format: None,
        }
    }

    /// Rows, falling back to the default.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.venue.and_then(|v| v.rows).unwrap_or(DEFAULT_ROWS)
    }

    /// Seats per row, falling back to the default.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.venue.and_then(|v| v.cols).unwrap_or(DEFAULT_COLS)
    }

    /// Hold lifetime, falling back to the default.
    #[must_use]
    pub fn hold_timeout(&self) -> Duration {
        Duration::from_millis(self.hold_timeout_ms.unwrap_or(DEFAULT_HOLD_TIMEOUT_MS))
    }

    /// The configured log level, if a recognised one is set.
    #[must_use]
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_mode
            .as_deref()
            .and_then(|mode| LogLevel::parse(mode).ok())
    }

    /// Resolves the settings a ticket service is built from.
    ///
    /// # Errors
    ///
    /// Returns an error if the venue is empty or the timeout is zero.
    pub fn service_settings(&self) -> Result<ServiceSettings> {
        ServiceSettings::new(self.rows(), self.cols(), self.hold_timeout())
    }

    /// Renders the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
