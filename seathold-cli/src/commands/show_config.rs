//! Command to print the effective configuration.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};

/// Print the merged configuration as YAML.
#[derive(Args)]
pub struct ShowConfigCommand {}

impl ShowConfigCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        print!("{}", config.to_yaml()?);
        Ok(())
    }
}
