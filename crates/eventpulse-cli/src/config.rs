//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/eventpulse/config.toml` by default. A missing file means
//! defaults.

use std::path::{Path, PathBuf};

use eventpulse_core::{ProgressFilter, TracingConfig, TracingOutputFormat};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Shortest title length that leaves room for the ellipsis.
const MIN_TITLE_LENGTH: usize = 4;

/// Configuration for the eventpulse CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Debug mode.
    pub debug: bool,

    /// Display settings.
    pub display: DisplaySettings,

    /// Progress view settings.
    pub progress: ProgressSettings,

    /// Log output settings.
    pub logging: LoggingSettings,
}

/// Which timezone calendar days are computed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimezonePolicy {
    /// The machine's local timezone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

/// Display settings for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Timezone used for day boundaries and rendered times.
    pub timezone: TimezonePolicy,

    /// Maximum title length (truncated with ellipsis).
    pub max_title_length: Option<usize>,

    /// Text to show when there are no events.
    pub no_events_text: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            timezone: TimezonePolicy::Local,
            max_title_length: None,
            no_events_text: "No events".to_string(),
        }
    }
}

/// Progress view settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSettings {
    /// Filter applied when `--filter` is not given.
    pub filter: ProgressFilter,
}

/// Log output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Format of log lines on stderr: pretty, compact or json.
    pub format: TracingOutputFormat,
}

impl CliConfig {
    /// Loads configuration from the default path, or defaults if absent.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::config(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| CliError::config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Checks settings that parse but cannot be honoured.
    pub fn validate(&self) -> CliResult<()> {
        if let Some(max) = self.display.max_title_length {
            if max < MIN_TITLE_LENGTH {
                return Err(CliError::config(format!(
                    "display.max_title_length must be at least {}, got {}",
                    MIN_TITLE_LENGTH, max
                )));
            }
        }
        Ok(())
    }

    /// Builds the tracing setup for this run.
    ///
    /// `--debug` or `debug = true` selects the verbose preset; `format`
    /// overrides `[logging] format`.
    pub fn tracing_config(
        &self,
        debug: bool,
        format: Option<TracingOutputFormat>,
    ) -> TracingConfig {
        let preset = if debug || self.debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::cli()
        };
        preset.with_format(format.unwrap_or(self.logging.format))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventpulse")
    }
}
