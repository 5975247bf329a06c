//! Configuration commands.

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Renders the effective configuration as TOML.
pub fn dump(config: &CliConfig) -> CliResult<String> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::config(format!("failed to serialize config: {}", e)))?;
    Ok(format!(
        "# config.toml ({})\n{}",
        CliConfig::default_path().display(),
        toml_str
    ))
}

/// Validates the configuration.
pub fn validate(config: &CliConfig) -> CliResult<String> {
    config.validate()?;
    Ok("Configuration is valid.".to_string())
}

/// Shows the configuration file path.
pub fn path() -> String {
    format!("config: {}", CliConfig::default_path().display())
}
