//! Finding and reading the YAML files that configure a venue.
//!
//! Three files can contribute: the user's `config.yaml`, the nearest
//! `seathold.yaml` above the working directory, and the private
//! `seathold.local.yaml` beside it.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "seathold.yaml";
/// Private (uncommitted) project configuration file name.
pub const LOCAL_CONFIG_FILE: &str = "seathold.local.yaml";
/// User configuration file name inside the config directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// One parsed configuration file and where it sits in the layering.
///
/// A file with a larger `precedence` wins over a smaller one.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Where the file was read from.
    pub path: PathBuf,
    /// Layer rank: 1 user, 2 project, 3 local.
    pub precedence: u8,
    /// File contents.
    pub config: Config,
}

/// Reads configuration files from disk.
///
/// # Examples
///
/// ```no_run
/// use seathold::config::ConfigLoader;
/// use std::path::Path;
///
/// for source in ConfigLoader::load_all(Path::new("."), None).unwrap() {
///     println!("{} (layer {})", source.path.display(), source.precedence);
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Every configuration file that applies to `working_dir`, lowest layer first.
    ///
    /// Looks for:
    /// 1. User config at `~/.seathold/config.yaml` (precedence 1)
    /// 2. Project `seathold.yaml` walking up from `working_dir` (precedence 2)
    /// 3. Project `seathold.local.yaml` next to it (precedence 3)
    ///
    /// `config_dir` replaces `~/.seathold` as the user config location.
    ///
    /// # Errors
    ///
    /// A file that exists but is unreadable or not valid YAML.
    pub fn load_all(working_dir: &Path, config_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(config_dir)? {
            sources.push(user_config);
        }

        sources.extend(Self::discover_project_configs(working_dir)?);
        sources.sort_by_key(|s| s.precedence);

        Ok(sources)
    }

    fn load_user_config(config_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match config_dir {
            Some(dir) => dir.join(USER_CONFIG_FILE),
            None => Self::user_config_path()?,
        };

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Project files in `start_dir` or its nearest ancestor that has any.
    ///
    /// Files further up the tree are shadowed, not merged.
    ///
    /// # Errors
    ///
    /// A found file that is unreadable or not valid YAML.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut configs = Vec::new();
        let mut current = start_dir.to_path_buf();

        loop {
            for (name, precedence) in [(PROJECT_CONFIG_FILE, 2), (LOCAL_CONFIG_FILE, 3)] {
                let path = current.join(name);
                if path.exists() {
                    let config = Self::load_file(&path)?;
                    configs.push(ConfigSource {
                        path,
                        precedence,
                        config,
                    });
                }
            }

            if !configs.is_empty() || !current.pop() {
                break;
            }
        }

        Ok(configs)
    }

    /// Parses a single YAML configuration file.
    ///
    /// An empty file is an empty configuration.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPath`] when the file cannot be read and
    /// [`Error::Validation`] when it does not parse.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("cannot read configuration: {e}"),
        })?;

        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("not a valid seathold configuration: {e}"),
        })
    }

    /// Default location of the user config file.
    ///
    /// # Errors
    ///
    /// [`Error::HomeDirectoryUnavailable`] when there is no home directory.
    pub fn user_config_path() -> Result<PathBuf> {
        let home = home::home_dir().ok_or(Error::HomeDirectoryUnavailable)?;
        Ok(home.join(".seathold").join(USER_CONFIG_FILE))
    }
}
