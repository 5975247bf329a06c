//! eventpulse CLI entry point.

use std::process::ExitCode;

use chrono::{DateTime, Local, TimeZone, Utc};
use clap::Parser;

use eventpulse_cli::cli::{Cli, Command, ConfigAction};
use eventpulse_cli::commands::{self, Context};
use eventpulse_cli::config::{CliConfig, TimezonePolicy};
use eventpulse_cli::error::{CliError, CliResult};
use eventpulse_core::{init_tracing, parse_timestamp};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<String> {
    let config = match cli.config {
        Some(ref path) => CliConfig::load_from(path)?,
        None => CliConfig::load()?,
    };

    init_tracing(config.tracing_config(cli.debug, cli.log_format))?;

    if let Command::Config { action } = &cli.command {
        return match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => Ok(commands::config::path()),
        };
    }

    let policy = if cli.utc {
        TimezonePolicy::Utc
    } else {
        config.display.timezone
    };
    tracing::debug!(?policy, "using timezone policy");

    match policy {
        TimezonePolicy::Local => dispatch(Local, cli, config),
        TimezonePolicy::Utc => dispatch(Utc, cli, config),
    }
}

fn dispatch<Tz: TimeZone>(tz: Tz, cli: Cli, config: CliConfig) -> CliResult<String> {
    let now = evaluation_time(cli.at.as_deref(), &tz)?;
    let ctx = Context::new(tz, now, config, cli.json);

    match cli.command {
        Command::Status { file } => commands::status::run(&ctx, &file),
        Command::Schedule { file, date } => commands::schedule::run(&ctx, &file, date),
        Command::Progress { file, filter } => commands::progress::run(&ctx, &file, filter),
        Command::Show { file, event_id } => commands::show::run(&ctx, &file, &event_id),
        Command::Duration { start, end } => commands::duration::run(&ctx, &start, &end),
        Command::Config { .. } => Err(CliError::invalid_argument("unexpected config command")),
    }
}

/// Returns the instant to evaluate at: `--at` if given, otherwise the clock.
fn evaluation_time<Tz: TimeZone>(at: Option<&str>, tz: &Tz) -> CliResult<DateTime<Utc>> {
    match at {
        Some(value) => parse_timestamp(value, tz)
            .map_err(|e| CliError::invalid_argument(format!("--at: {}", e))),
        None => Ok(Utc::now()),
    }
}
