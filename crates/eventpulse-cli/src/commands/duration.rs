//! The `duration` command.

use chrono::TimeZone;
use eventpulse_core::calculate_duration;

use super::Context;
use crate::error::CliResult;
use crate::render::DurationOutput;

/// Renders the duration between two timestamps.
///
/// An unreadable or inverted pair still prints, as `N/A` with the reason.
pub fn run<Tz: TimeZone>(ctx: &Context<Tz>, start: &str, end: &str) -> CliResult<String> {
    let output = DurationOutput::new(start, end, calculate_duration(start, end, &ctx.tz));
    let renderer = ctx.renderer();
    if ctx.json {
        renderer.json(&output)
    } else {
        Ok(renderer.duration_text(&output))
    }
}
