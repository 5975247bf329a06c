//! CLI error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading an input file failed.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The event feed is not valid JSON of the expected shape.
    #[error("invalid event feed {}: {source}", path.display())]
    Feed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No event with the requested ID exists in the feed.
    #[error("no event with id {event_id:?}")]
    NotFound { event_id: String },

    /// A command-line value could not be used.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Serializing output failed.
    #[error("failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),

    /// Logging could not be set up.
    #[error(transparent)]
    Tracing(#[from] eventpulse_core::TracingError),
}

impl CliError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
