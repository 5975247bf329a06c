//! Elapsed-duration strings ("1 hour 30 minutes").

use chrono::{Duration, TimeZone};
use thiserror::Error;

use super::NOT_AVAILABLE_SENTINEL;
use crate::event::Session;
use crate::time::{TimeParseError, TimeWindow, parse_timestamp};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Errors produced while computing a duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// One of the timestamps could not be parsed.
    #[error(transparent)]
    InvalidTimestamp(#[from] TimeParseError),

    /// The end precedes the start.
    #[error("end is {minutes} minutes before start")]
    Negative { minutes: i64 },
}

impl DurationError {
    /// Returns the sentinel string displayed in place of the value.
    pub fn sentinel(&self) -> &'static str {
        NOT_AVAILABLE_SENTINEL
    }
}

/// Renders a non-negative span as hours and minutes.
///
/// Spans under a minute render as `"Less than a minute"` (or `"0 minutes"`
/// when exactly zero). Longer spans are rounded to the nearest minute; hours
/// are not wrapped at 24.
pub fn format_duration(span: Duration) -> Result<String, DurationError> {
    let millis = span.num_milliseconds();
    if millis < 0 {
        return Err(DurationError::Negative {
            minutes: (-millis).div_euclid(MILLIS_PER_MINUTE),
        });
    }
    if millis == 0 {
        return Ok("0 minutes".to_string());
    }
    if millis < MILLIS_PER_MINUTE {
        return Ok("Less than a minute".to_string());
    }

    let total_minutes = (millis + MILLIS_PER_MINUTE / 2) / MILLIS_PER_MINUTE;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours != 1 { "s" } else { "" }));
    }
    if minutes > 0 {
        parts.push(format!(
            "{} minute{}",
            minutes,
            if minutes != 1 { "s" } else { "" }
        ));
    }
    Ok(parts.join(" "))
}

/// Computes the duration between two ISO-8601 timestamps.
///
/// # Errors
///
/// Returns [`DurationError::InvalidTimestamp`] for unparseable input and
/// [`DurationError::Negative`] when `end` precedes `start`.
pub fn calculate_duration<Tz: TimeZone>(
    start: &str,
    end: &str,
    tz: &Tz,
) -> Result<String, DurationError> {
    let start = parse_timestamp(start, tz)?;
    let end = parse_timestamp(end, tz)?;
    let window = TimeWindow::try_new(start, end).ok_or(DurationError::Negative {
        minutes: (start - end).num_minutes(),
    })?;
    format_duration(window.duration())
}

/// Computes the duration of a session.
pub fn calculate_session_duration<Tz: TimeZone>(
    session: &Session,
    tz: &Tz,
) -> Result<String, DurationError> {
    calculate_duration(&session.start, &session.end, tz)
}

/// Like [`calculate_duration`], substituting `"N/A"` on failure.
pub fn duration_display<Tz: TimeZone>(start: &str, end: &str, tz: &Tz) -> String {
    calculate_duration(start, end, tz).unwrap_or_else(|e| {
        tracing::warn!(start, end, error = %e, "cannot compute duration");
        e.sentinel().to_string()
    })
}
