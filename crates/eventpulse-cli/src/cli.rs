//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use eventpulse_core::{ProgressFilter, TracingOutputFormat};

/// eventpulse - Event status, schedule and progress for the society calendar
#[derive(Debug, Parser)]
#[command(name = "eventpulse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "EVENTPULSE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Log format on stderr: pretty, compact or json
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<TracingOutputFormat>,

    /// Compute days and render times in UTC instead of the configured timezone
    #[arg(long, global = true)]
    pub utc: bool,

    /// Evaluate as if the current time were this ISO-8601 timestamp
    #[arg(long, global = true, value_name = "TIMESTAMP")]
    pub at: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the status of every event in a feed
    Status {
        /// Event feed (JSON file, or - for stdin)
        file: PathBuf,
    },

    /// Show the day-by-day session schedule
    Schedule {
        /// Event feed (JSON file, or - for stdin)
        file: PathBuf,

        /// Only show this day (YYYY-MM-DD) instead of today onward
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show per-event progress and totals
    Progress {
        /// Event feed (JSON file, or - for stdin)
        file: PathBuf,

        /// Which events to list: all, completed, on-progress, upcoming
        #[arg(long)]
        filter: Option<ProgressFilter>,
    },

    /// Show the dates and sessions of one event
    Show {
        /// Event feed (JSON file, or - for stdin)
        file: PathBuf,

        /// ID of the event to show
        event_id: String,
    },

    /// Compute the duration between two timestamps
    Duration {
        /// Start timestamp (ISO-8601)
        start: String,

        /// End timestamp (ISO-8601)
        end: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_schedule_with_date() {
        let cli = Cli::try_parse_from([
            "eventpulse",
            "--utc",
            "schedule",
            "events.json",
            "--date",
            "2025-06-15",
        ])
        .unwrap();
        assert!(cli.utc);
        match cli.command {
            Command::Schedule { file, date } => {
                assert_eq!(file, PathBuf::from("events.json"));
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 15));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_progress_filter() {
        let cli = Cli::try_parse_from([
            "eventpulse",
            "progress",
            "events.json",
            "--filter",
            "on-progress",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::Progress {
                filter: Some(ProgressFilter::OnProgress),
                ..
            }
        ));
    }

    #[test]
    fn parses_log_format() {
        let cli = Cli::try_parse_from(["eventpulse", "--log-format", "json", "config", "path"])
            .unwrap();
        assert_eq!(cli.log_format, Some(TracingOutputFormat::Json));

        let result = Cli::try_parse_from(["eventpulse", "--log-format", "xml", "config", "path"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_bad_date() {
        let result = Cli::try_parse_from(["eventpulse", "schedule", "f.json", "--date", "June"]);
        assert!(result.is_err());
    }
}
