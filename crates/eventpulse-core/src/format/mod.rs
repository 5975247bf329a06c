//! Display formatting for event dates, times and durations.
//!
//! Every formatter comes in two flavours:
//! - a `Result`-returning function for callers that want to handle failures,
//! - a `*_display` companion that never fails and substitutes the fixed
//!   sentinel strings the website renders in place of a value
//!   ([`INVALID_DATE_SENTINEL`], [`ERROR_SENTINEL`], [`NOT_AVAILABLE_SENTINEL`]).
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use eventpulse_core::format::{format_event_date_time, format_start_date_display};
//!
//! let formatted =
//!     format_event_date_time("2025-06-15T10:00:00Z", "2025-06-15T16:00:00Z", &Utc).unwrap();
//! assert_eq!(formatted.date_range, "June 15, 2025");
//! assert_eq!(formatted.time_range, "10:00 AM - 04:00 PM");
//!
//! assert_eq!(format_start_date_display("not-a-date", &Utc), "Invalid Date");
//! ```

mod duration;

use std::borrow::Cow;
use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::{TimeParseError, TimeWindow, parse_timestamp};

pub use duration::{
    DurationError, calculate_duration, calculate_session_duration, duration_display,
    format_duration,
};

/// Shown when a date cannot be parsed.
pub const INVALID_DATE_SENTINEL: &str = "Invalid Date";
/// Shown when rendering a parsed date fails.
pub const ERROR_SENTINEL: &str = "Error";
/// Shown when a duration cannot be computed.
pub const NOT_AVAILABLE_SENTINEL: &str = "N/A";

/// Long-form date, e.g. "June 15, 2025".
const LONG_DATE_LAYOUT: &str = "%B %-d, %Y";
/// 12-hour clock time, e.g. "04:00 PM".
const CLOCK_LAYOUT: &str = "%I:%M %p";
/// Weekday and long-form date, e.g. "Sunday, June 15, 2025".
const GROUP_DATE_LAYOUT: &str = "%A, %B %-d, %Y";

/// Errors produced while formatting dates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The input timestamp could not be parsed.
    #[error(transparent)]
    InvalidTimestamp(#[from] TimeParseError),

    /// The parsed value could not be rendered.
    #[error("failed to render date with layout {layout:?}")]
    Render { layout: &'static str },
}

impl FormatError {
    /// Returns the sentinel string displayed in place of the value.
    pub fn sentinel(&self) -> &'static str {
        match self {
            Self::InvalidTimestamp(_) => INVALID_DATE_SENTINEL,
            Self::Render { .. } => ERROR_SENTINEL,
        }
    }
}

/// Display strings for an event or session window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDateTime {
    /// "June 15, 2025" or "May 16, 2025 - June 6, 2025".
    pub date_range: String,
    /// "10:00 AM - 04:00 PM".
    pub time_range: String,
    /// Start time on a 12-hour clock.
    pub start_time: String,
    /// End time on a 12-hour clock.
    pub end_time: String,
}

/// Renders `instant` in `tz` with a chrono layout.
fn render<Tz: TimeZone>(
    instant: DateTime<Utc>,
    tz: &Tz,
    layout: &'static str,
) -> Result<String, FormatError> {
    let local = instant.with_timezone(tz).naive_local();
    let mut out = String::new();
    write!(out, "{}", local.format(layout)).map_err(|_| FormatError::Render { layout })?;
    Ok(out)
}

/// Formats the date range and time range of a start/end pair.
///
/// When both ends fall on the same day in `tz` the date range is a single
/// date; otherwise it is two dates joined by `" - "`.
///
/// # Errors
///
/// Returns [`FormatError::InvalidTimestamp`] if either timestamp cannot be
/// parsed.
pub fn format_event_date_time<Tz: TimeZone>(
    start: &str,
    end: &str,
    tz: &Tz,
) -> Result<EventDateTime, FormatError> {
    let start = parse_timestamp(start, tz)?;
    let end = parse_timestamp(end, tz)?;
    format_instants(start, end, tz)
}

/// Formats an already parsed window.
pub fn format_time_window<Tz: TimeZone>(
    window: &TimeWindow,
    tz: &Tz,
) -> Result<EventDateTime, FormatError> {
    format_instants(window.start, window.end, tz)
}

fn format_instants<Tz: TimeZone>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    tz: &Tz,
) -> Result<EventDateTime, FormatError> {
    let start_date = render(start, tz, LONG_DATE_LAYOUT)?;
    let date_range = if start.with_timezone(tz).date_naive() == end.with_timezone(tz).date_naive()
    {
        start_date
    } else {
        format!("{} - {}", start_date, render(end, tz, LONG_DATE_LAYOUT)?)
    };

    let start_time = render(start, tz, CLOCK_LAYOUT)?;
    let end_time = render(end, tz, CLOCK_LAYOUT)?;

    Ok(EventDateTime {
        date_range,
        time_range: format!("{} - {}", start_time, end_time),
        start_time,
        end_time,
    })
}

/// Formats a start timestamp as a long-form date ("June 15, 2025").
///
/// # Errors
///
/// Returns [`FormatError::InvalidTimestamp`] for unparseable input and
/// [`FormatError::Render`] if rendering fails.
pub fn format_start_date<Tz: TimeZone>(start: &str, tz: &Tz) -> Result<String, FormatError> {
    let instant = parse_timestamp(start, tz)?;
    render(instant, tz, LONG_DATE_LAYOUT)
}

/// Like [`format_start_date`], substituting the sentinel on failure.
///
/// Unparseable input yields `"Invalid Date"`; a rendering failure yields
/// `"Error"`.
pub fn format_start_date_display<Tz: TimeZone>(start: &str, tz: &Tz) -> String {
    format_start_date(start, tz).unwrap_or_else(|e| {
        tracing::warn!(value = start, error = %e, "cannot format start date");
        e.sentinel().to_string()
    })
}

/// Formats a day as a group header ("Sunday, June 15, 2025").
pub fn format_event_group_date(date: NaiveDate) -> String {
    date.format(GROUP_DATE_LAYOUT).to_string()
}

/// Truncates a string with an ellipsis if it exceeds `max_len` characters.
///
/// The result never exceeds `max_len` characters; limits too short for the
/// `...` suffix cut the string without it.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }

    if max_len <= 3 {
        return Cow::Owned(s.chars().take(max_len).collect());
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod event_date_time {
        use super::*;

        #[test]
        fn parsed_window_matches_strings() {
            let window =
                TimeWindow::parse("2025-06-15T10:00:00Z", "2025-06-16T11:30:00Z", &Utc).unwrap();
            let formatted = format_time_window(&window, &Utc).unwrap();
            assert_eq!(formatted.date_range, "June 15, 2025 - June 16, 2025");
            assert_eq!(formatted.time_range, "10:00 AM - 11:30 AM");
        }

        #[test]
        fn same_day() {
            let formatted =
                format_event_date_time("2025-06-15T10:00:00Z", "2025-06-15T16:00:00Z", &Utc)
                    .unwrap();
            assert_eq!(formatted.date_range, "June 15, 2025");
            assert_eq!(formatted.start_time, "10:00 AM");
            assert_eq!(formatted.end_time, "04:00 PM");
            assert_eq!(formatted.time_range, "10:00 AM - 04:00 PM");
        }

        #[test]
        fn multi_day() {
            let formatted =
                format_event_date_time("2025-05-16T09:00:00Z", "2025-06-06T17:30:00Z", &Utc)
                    .unwrap();
            assert_eq!(formatted.date_range, "May 16, 2025 - June 6, 2025");
            assert_eq!(formatted.time_range, "09:00 AM - 05:30 PM");
        }

        #[test]
        fn midnight_and_noon() {
            let formatted =
                format_event_date_time("2025-06-15T00:05:00Z", "2025-06-15T12:00:00Z", &Utc)
                    .unwrap();
            assert_eq!(formatted.start_time, "12:05 AM");
            assert_eq!(formatted.end_time, "12:00 PM");
        }

        #[test]
        fn day_comparison_uses_timezone() {
            // Same UTC day, but the end crosses midnight in UTC+3.
            let start = "2025-06-15T10:00:00Z";
            let end = "2025-06-15T22:00:00Z";
            let tz = FixedOffset::east_opt(3 * 3600).unwrap();

            let utc_view = format_event_date_time(start, end, &Utc).unwrap();
            assert_eq!(utc_view.date_range, "June 15, 2025");

            let shifted = format_event_date_time(start, end, &tz).unwrap();
            assert_eq!(shifted.date_range, "June 15, 2025 - June 16, 2025");
            assert_eq!(shifted.time_range, "01:00 PM - 01:00 AM");
        }

        #[test]
        fn invalid_input() {
            let err = format_event_date_time("nope", "2025-06-15T16:00:00Z", &Utc).unwrap_err();
            assert!(matches!(err, FormatError::InvalidTimestamp(_)));
            assert_eq!(err.sentinel(), INVALID_DATE_SENTINEL);
        }

        #[test]
        fn idempotent() {
            let a = format_event_date_time("2025-06-15T10:00:00Z", "2025-06-17T16:00:00Z", &Utc);
            let b = format_event_date_time("2025-06-15T10:00:00Z", "2025-06-17T16:00:00Z", &Utc);
            assert_eq!(a, b);
        }
    }

    mod start_date {
        use super::*;

        #[test]
        fn long_form() {
            assert_eq!(
                format_start_date("2025-06-05T10:00:00Z", &Utc).unwrap(),
                "June 5, 2025"
            );
            assert_eq!(
                format_start_date("2025-12-31", &Utc).unwrap(),
                "December 31, 2025"
            );
        }

        #[test]
        fn invalid_date_sentinel() {
            assert_eq!(format_start_date_display("not-a-date", &Utc), "Invalid Date");
            assert_eq!(format_start_date_display("", &Utc), "Invalid Date");
        }

        #[test]
        fn render_error_sentinel() {
            let err = FormatError::Render {
                layout: LONG_DATE_LAYOUT,
            };
            assert_eq!(err.sentinel(), ERROR_SENTINEL);
        }

        #[test]
        fn display_matches_result_on_success() {
            let input = "2025-06-15T10:00:00Z";
            assert_eq!(
                format_start_date_display(input, &Utc),
                format_start_date(input, &Utc).unwrap()
            );
        }
    }

    mod group_date {
        use super::*;

        #[test]
        fn weekday_and_date() {
            assert_eq!(
                format_event_group_date(date(2025, 6, 16)),
                "Monday, June 16, 2025"
            );
            assert_eq!(
                format_event_group_date(date(2025, 2, 5)),
                "Wednesday, February 5, 2025"
            );
        }
    }

    mod ellipsis {
        use super::*;

        #[test]
        fn short_string_unchanged() {
            assert_eq!(ellipsis("Rust 101", 20), "Rust 101");
        }

        #[test]
        fn exact_length_unchanged() {
            assert_eq!(ellipsis("Workshop", 8), "Workshop");
        }

        #[test]
        fn long_string_truncated() {
            assert_eq!(ellipsis("Advanced Ownership Patterns", 12), "Advanced ...");
        }

        #[test]
        fn zero_length() {
            assert_eq!(ellipsis("anything", 0), "");
        }

        #[test]
        fn tiny_limits_never_exceed_max() {
            for max in 1..=3 {
                let out = ellipsis("Career Talk", max);
                assert_eq!(out.chars().count(), max);
                assert_eq!(out, &"Career Talk"[..max]);
            }
            assert_eq!(ellipsis("Career Talk", 4), "C...");
        }
    }
}

#[cfg(test)]
mod golden_tests;
