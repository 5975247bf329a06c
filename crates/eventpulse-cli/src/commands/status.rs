//! The `status` command.

use std::path::Path;

use chrono::TimeZone;
use eventpulse_core::{Event, resolve_status};

use super::Context;
use crate::error::CliResult;
use crate::feed::load_events;
use crate::render::{StatusLine, StatusOutput};

/// Resolves the status of every event in `events`.
pub fn status_lines<Tz: TimeZone>(ctx: &Context<Tz>, events: &[Event]) -> Vec<StatusLine> {
    events
        .iter()
        .map(|event| {
            let resolved = resolve_status(event, ctx.now, &ctx.tz);
            if let Err(e) = &resolved {
                tracing::warn!(event_id = %e.event_id(), error = %e, "cannot resolve event status");
            }
            StatusLine::new(event, resolved)
        })
        .collect()
}

/// Renders the status of every event in the feed at `file`.
pub fn run<Tz: TimeZone>(ctx: &Context<Tz>, file: &Path) -> CliResult<String> {
    let events = load_events(file)?;
    render(ctx, &events)
}

/// Renders the status of `events`.
pub fn render<Tz: TimeZone>(ctx: &Context<Tz>, events: &[Event]) -> CliResult<String> {
    let lines = status_lines(ctx, events);
    let renderer = ctx.renderer();
    if ctx.json {
        renderer.json(&StatusOutput {
            count: lines.len(),
            events: lines,
        })
    } else {
        Ok(renderer.status_text(&lines))
    }
}
