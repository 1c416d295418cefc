//! Layered settings for a venue: its size, how long holds last, log
//! verbosity and the session output format.
//!
//! Each layer may set any subset of fields. Later layers win:
//!
//! | layer | source |
//! |-------|--------|
//! | defaults | 4 rows, 4 seats per row, 5000 ms holds |
//! | user | `~/.seathold/config.yaml` |
//! | project | nearest `seathold.yaml` |
//! | local | `seathold.local.yaml` next to it |
//! | environment | `SEATHOLD_ROWS`, `SEATHOLD_COLS`, `SEATHOLD_HOLD_TIMEOUT_MS`, `SEATHOLD_LOG_MODE` |
//! | overrides | [`ConfigBuilder::with_config`] |
//!
//! Every file layer is validated on its own, then the merged result again.
//!
//! # Examples
//!
//! Resolving for a project directory:
//!
//! ```no_run
//! use seathold::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//! println!("{} rows of {} seats", config.rows(), config.cols());
//! ```
//!
//! Overrides only, ignoring disk and environment:
//!
//! ```
//! use seathold::config::{Config, ConfigBuilder, VenueConfig};
//!
//! let custom = Config {
//!     venue: Some(VenueConfig { rows: Some(2), cols: Some(6) }),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.service_settings().unwrap().dimensions().capacity(), 12);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, VenueConfig};
pub use validator::ConfigValidator;
