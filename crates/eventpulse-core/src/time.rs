//! Time primitives for events and sessions.
//!
//! This module provides [`parse_timestamp`] for turning the ISO-8601 strings
//! stored on events into UTC instants under an explicit timezone, day
//! normalization helpers, and [`TimeWindow`] for half-open session intervals.
//!
//! Timestamps carrying an offset (`2025-06-15T10:00:00Z`,
//! `2025-06-15T10:00:00+02:00`) are absolute. Timestamps without one
//! (`2025-06-15T10:00:00`) and bare dates (`2025-06-15`, read as midnight) are
//! interpreted in the timezone passed by the caller.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Naive layouts accepted after RFC 3339 and the `FromStr` form have failed.
const NAIVE_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Errors produced while parsing an event timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// The field was empty or whitespace.
    #[error("timestamp is empty")]
    Empty,

    /// The text is not a recognised ISO-8601 timestamp or date.
    #[error("invalid timestamp: {value:?}")]
    Invalid { value: String },

    /// The local time does not exist in the timezone (DST gap).
    #[error("timestamp {value:?} does not exist in the target timezone")]
    Nonexistent { value: String },
}

/// Parses an ISO-8601 timestamp into a UTC instant.
///
/// Values without an offset are resolved in `tz`. When a local time is
/// ambiguous (DST fold) the earliest instant wins.
pub fn parse_timestamp<Tz: TimeZone>(
    value: &str,
    tz: &Tz,
) -> Result<DateTime<Utc>, TimeParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = value
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| {
            NAIVE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        })
        .or_else(|| {
            value
                .parse::<NaiveDate>()
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| TimeParseError::Invalid {
            value: value.to_string(),
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| TimeParseError::Nonexistent {
            value: value.to_string(),
        })
}

/// Returns the calendar day of `instant` as seen in `tz`.
pub fn day_in<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Returns the first instant of `date` in `tz`.
///
/// Returns `None` when midnight does not exist locally and no later instant of
/// the first hour does either.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    (0..2).find_map(|hour| {
        date.and_hms_opt(hour, 0, 0)
            .and_then(|naive| tz.from_local_datetime(&naive).earliest())
            .map(|dt| dt.with_timezone(&Utc))
    })
}

/// Truncates `instant` to the start of its day in `tz`.
pub fn normalize_to_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    start_of_day(day_in(instant, tz), tz).unwrap_or(instant)
}

/// A half-open interval `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(start <= end, "TimeWindow start must be <= end");
        Self { start, end }
    }

    /// Creates a time window, returning `None` when `end` precedes `start`.
    pub fn try_new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Parses both bounds with [`parse_timestamp`].
    ///
    /// An inverted pair is kept as-is: the window then contains no instant and
    /// counts as finished once `now` reaches `end`.
    pub fn parse<Tz: TimeZone>(start: &str, end: &str, tz: &Tz) -> Result<Self, TimeParseError> {
        Ok(Self {
            start: parse_timestamp(start, tz)?,
            end: parse_timestamp(end, tz)?,
        })
    }

    /// Returns the duration of this time window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if a datetime falls within this window.
    ///
    /// Uses half-open interval semantics: `[start, end)`.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt < self.end
    }

    /// Returns `true` once the window has started at `now`.
    pub fn has_started_at(&self, now: DateTime<Utc>) -> bool {
        self.start <= now
    }

    /// Returns `true` once `now` has reached the exclusive end.
    pub fn is_finished_at(&self, now: DateTime<Utc>) -> bool {
        self.end <= now
    }

    /// Returns `true` if both bounds fall on the same day in `tz`.
    pub fn is_single_day<Tz: TimeZone>(&self, tz: &Tz) -> bool {
        day_in(self.start, tz) == day_in(self.end, tz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod parsing {
        use super::*;

        #[test]
        fn rfc3339_utc() {
            let parsed = parse_timestamp("2025-06-15T10:00:00Z", &Utc).unwrap();
            assert_eq!(parsed, utc(2025, 6, 15, 10, 0, 0));
        }

        #[test]
        fn rfc3339_with_offset_ignores_target_timezone() {
            let tz = FixedOffset::east_opt(9 * 3600).unwrap();
            let parsed = parse_timestamp("2025-06-15T10:00:00+02:00", &tz).unwrap();
            assert_eq!(parsed, utc(2025, 6, 15, 8, 0, 0));
        }

        #[test]
        fn fractional_seconds() {
            let parsed = parse_timestamp("2025-06-15T10:00:00.000Z", &Utc).unwrap();
            assert_eq!(parsed, utc(2025, 6, 15, 10, 0, 0));
        }

        #[test]
        fn naive_datetime_uses_target_timezone() {
            let tz = FixedOffset::east_opt(2 * 3600).unwrap();
            let parsed = parse_timestamp("2025-06-15T10:00:00", &tz).unwrap();
            assert_eq!(parsed, utc(2025, 6, 15, 8, 0, 0));

            let parsed = parse_timestamp("2025-06-15T10:00", &tz).unwrap();
            assert_eq!(parsed, utc(2025, 6, 15, 8, 0, 0));

            let parsed = parse_timestamp("2025-06-15 10:00:00", &Utc).unwrap();
            assert_eq!(parsed, utc(2025, 6, 15, 10, 0, 0));
        }

        #[test]
        fn date_only_is_local_midnight() {
            let tz = FixedOffset::west_opt(5 * 3600).unwrap();
            let parsed = parse_timestamp("2025-06-15", &tz).unwrap();
            assert_eq!(parsed, utc(2025, 6, 15, 5, 0, 0));
        }

        #[test]
        fn surrounding_whitespace_is_trimmed() {
            let parsed = parse_timestamp("  2025-06-15T10:00:00Z\n", &Utc).unwrap();
            assert_eq!(parsed, utc(2025, 6, 15, 10, 0, 0));
        }

        #[test]
        fn empty_and_garbage_are_rejected() {
            assert_eq!(parse_timestamp("", &Utc), Err(TimeParseError::Empty));
            assert_eq!(parse_timestamp("   ", &Utc), Err(TimeParseError::Empty));
            assert_eq!(
                parse_timestamp("not-a-date", &Utc),
                Err(TimeParseError::Invalid {
                    value: "not-a-date".to_string()
                })
            );
            assert!(parse_timestamp("2025-13-40", &Utc).is_err());
        }
    }

    mod days {
        use super::*;

        #[test]
        fn day_in_respects_timezone() {
            let instant = utc(2025, 6, 15, 23, 30, 0);
            assert_eq!(day_in(instant, &Utc), date(2025, 6, 15));

            let tz = FixedOffset::east_opt(3600).unwrap();
            assert_eq!(day_in(instant, &tz), date(2025, 6, 16));
        }

        #[test]
        fn normalize_to_day_truncates() {
            let instant = utc(2025, 6, 15, 17, 45, 12);
            assert_eq!(normalize_to_day(instant, &Utc), utc(2025, 6, 15, 0, 0, 0));

            let tz = FixedOffset::east_opt(2 * 3600).unwrap();
            assert_eq!(normalize_to_day(instant, &tz), utc(2025, 6, 14, 22, 0, 0));
        }

        #[test]
        fn start_of_day_utc() {
            assert_eq!(
                start_of_day(date(2025, 2, 5), &Utc),
                Some(utc(2025, 2, 5, 0, 0, 0))
            );
        }
    }

    mod time_window {
        use super::*;

        #[test]
        fn creation() {
            let start = utc(2025, 2, 5, 9, 0, 0);
            let end = utc(2025, 2, 5, 17, 0, 0);
            let window = TimeWindow::new(start, end);
            assert_eq!(window.start, start);
            assert_eq!(window.end, end);
            assert_eq!(window.duration(), Duration::hours(8));
        }

        #[test]
        #[should_panic(expected = "start must be <= end")]
        fn invalid_window() {
            let start = utc(2025, 2, 5, 17, 0, 0);
            let end = utc(2025, 2, 5, 9, 0, 0);
            TimeWindow::new(start, end);
        }

        #[test]
        fn try_new_rejects_inverted() {
            let start = utc(2025, 2, 5, 17, 0, 0);
            let end = utc(2025, 2, 5, 9, 0, 0);
            assert!(TimeWindow::try_new(start, end).is_none());
            assert!(TimeWindow::try_new(end, start).is_some());
        }

        #[test]
        fn contains_datetime() {
            let window = TimeWindow::new(utc(2025, 2, 5, 9, 0, 0), utc(2025, 2, 5, 17, 0, 0));

            // Inside
            assert!(window.contains(utc(2025, 2, 5, 10, 0, 0)));
            assert!(window.contains(utc(2025, 2, 5, 16, 59, 59)));

            // Boundaries
            assert!(window.contains(utc(2025, 2, 5, 9, 0, 0))); // start inclusive
            assert!(!window.contains(utc(2025, 2, 5, 17, 0, 0))); // end exclusive

            // Outside
            assert!(!window.contains(utc(2025, 2, 5, 8, 59, 59)));
            assert!(!window.contains(utc(2025, 2, 5, 17, 0, 1)));
        }

        #[test]
        fn started_and_finished() {
            let window = TimeWindow::new(utc(2025, 2, 5, 9, 0, 0), utc(2025, 2, 5, 17, 0, 0));
            assert!(!window.has_started_at(utc(2025, 2, 5, 8, 0, 0)));
            assert!(window.has_started_at(utc(2025, 2, 5, 9, 0, 0)));
            assert!(!window.is_finished_at(utc(2025, 2, 5, 16, 59, 59)));
            assert!(window.is_finished_at(utc(2025, 2, 5, 17, 0, 0)));
        }

        #[test]
        fn parse_bounds() {
            let window =
                TimeWindow::parse("2025-02-05T09:00:00Z", "2025-02-06T17:00:00Z", &Utc).unwrap();
            assert_eq!(window.start, utc(2025, 2, 5, 9, 0, 0));
            assert!(!window.is_single_day(&Utc));

            assert!(TimeWindow::parse("bogus", "2025-02-06T17:00:00Z", &Utc).is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let window = TimeWindow::new(utc(2025, 2, 5, 9, 0, 0), utc(2025, 2, 5, 17, 0, 0));
            let json = serde_json::to_string(&window).unwrap();
            let parsed: TimeWindow = serde_json::from_str(&json).unwrap();
            assert_eq!(window, parsed);
        }
    }
}
