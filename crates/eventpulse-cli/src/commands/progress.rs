//! The `progress` command.

use std::path::Path;

use chrono::TimeZone;
use eventpulse_core::{Event, ProgressFilter, progress_list, progress_summary};

use super::Context;
use crate::error::CliResult;
use crate::feed::load_events;
use crate::render::ProgressOutput;

/// Renders progress for the feed at `file`.
///
/// Without an explicit `filter`, the one from `[progress]` in the config is
/// used.
pub fn run<Tz: TimeZone>(
    ctx: &Context<Tz>,
    file: &Path,
    filter: Option<ProgressFilter>,
) -> CliResult<String> {
    let events = load_events(file)?;
    render(ctx, &events, filter.unwrap_or(ctx.config.progress.filter))
}

/// Renders progress rows for `events` and totals across all of them.
pub fn render<Tz: TimeZone>(
    ctx: &Context<Tz>,
    events: &[Event],
    filter: ProgressFilter,
) -> CliResult<String> {
    let rows = filter.apply(progress_list(events, ctx.now, &ctx.tz));
    let summary = progress_summary(events, ctx.now, &ctx.tz);

    let renderer = ctx.renderer();
    if ctx.json {
        renderer.json(&ProgressOutput {
            events: rows,
            summary,
        })
    } else {
        Ok(renderer.progress_text(&rows, &summary))
    }
}
