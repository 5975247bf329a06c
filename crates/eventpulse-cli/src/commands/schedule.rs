//! The `schedule` command.

use std::path::Path;

use chrono::{NaiveDate, TimeZone};
use eventpulse_core::{Event, build_schedule};

use super::Context;
use crate::error::CliResult;
use crate::feed::load_events;

/// Renders the day-by-day schedule of the feed at `file`.
pub fn run<Tz: TimeZone>(
    ctx: &Context<Tz>,
    file: &Path,
    date: Option<NaiveDate>,
) -> CliResult<String> {
    let events = load_events(file)?;
    render(ctx, &events, date)
}

/// Renders the schedule of `events`, limited to `date` when given.
pub fn render<Tz: TimeZone>(
    ctx: &Context<Tz>,
    events: &[Event],
    date: Option<NaiveDate>,
) -> CliResult<String> {
    let groups = build_schedule(events, ctx.now, date, &ctx.tz);
    tracing::debug!(groups = groups.len(), ?date, "built schedule");

    let renderer = ctx.renderer();
    if ctx.json {
        renderer.json(&groups)
    } else {
        Ok(renderer.schedule_text(&groups))
    }
}
