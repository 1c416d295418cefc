//! Builder that assembles the effective configuration from every layer.

use std::env;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a validated [`Config`] from defaults, files, environment and
/// programmatic overrides.
///
/// # Examples
///
/// ```
/// use seathold::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { hold_timeout_ms: Some(250), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.hold_timeout_ms, Some(250));
/// assert_eq!(config.rows(), 4);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Vec<Config>,
}

impl ConfigBuilder {
    /// Starts from the built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory to start the project file search from (default: the
    /// current directory).
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Directory holding the user `config.yaml` (default: `~/.seathold`).
    #[must_use]
    pub fn with_config_dir(mut self, dir: &Path) -> Self {
        self.config_dir = Some(dir.to_path_buf());
        self
    }

    /// Ignore user and project configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `SEATHOLD_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Adds a programmatic layer above every other source. Later calls take
    /// precedence over earlier ones.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Loads, merges and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed,
    /// an environment variable is malformed, or any layer or the merged
    /// result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::defaults();

        if !self.skip_files {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.config_dir.as_deref())?;
            for source in &sources {
                debug!("loaded configuration from {}", source.path.display());
                ConfigValidator::validate(&source.config)?;
            }
            config = ConfigMerger::merge(config, &sources);
        }

        if !self.skip_env {
            let mut env_layer = Config::default();
            EnvironmentConfig::apply_overrides(&mut env_layer)?;
            ConfigValidator::validate(&env_layer)?;
            ConfigMerger::merge_into(&mut config, &env_layer);
        }

        for layer in &self.overrides {
            ConfigMerger::merge_into(&mut config, layer);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
