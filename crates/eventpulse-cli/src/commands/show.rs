//! The `show` command.

use std::path::Path;

use chrono::TimeZone;
use eventpulse_core::{Event, resolve_status};

use super::Context;
use crate::error::CliResult;
use crate::feed::{find_event, load_events};
use crate::render::StatusLine;

/// Renders the details of event `event_id` from the feed at `file`.
pub fn run<Tz: TimeZone>(ctx: &Context<Tz>, file: &Path, event_id: &str) -> CliResult<String> {
    let events = load_events(file)?;
    let event = find_event(&events, event_id)?;
    render(ctx, event)
}

/// Renders the details of `event`.
pub fn render<Tz: TimeZone>(ctx: &Context<Tz>, event: &Event) -> CliResult<String> {
    let status = StatusLine::new(event, resolve_status(event, ctx.now, &ctx.tz));
    let renderer = ctx.renderer();
    let detail = renderer.event_detail(event, status);

    if ctx.json {
        renderer.json(&detail)
    } else {
        Ok(renderer.event_detail_text(&detail))
    }
}
