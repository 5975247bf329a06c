//! Session-based progress tracking for a member's events.
//!
//! Unlike [`crate::status`], which compares calendar days of the event window,
//! progress looks at the sessions themselves: an event is completed once its
//! last session has ended and in progress once its first session has begun.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::time::{TimeParseError, TimeWindow};

/// Progress classification of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// At least one session has started and not all have ended.
    OnProgress,
    /// Every session has ended.
    Completed,
    /// No session has started, or the sessions cannot be read.
    Upcoming,
}

impl ProgressStatus {
    /// Returns the display name for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnProgress => "On Progress",
            Self::Completed => "Completed",
            Self::Upcoming => "Upcoming",
        }
    }

    /// Position in the combined view: in progress first, upcoming last.
    fn rank(&self) -> u8 {
        match self {
            Self::OnProgress => 1,
            Self::Completed => 2,
            Self::Upcoming => 3,
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventProgress {
    /// The event ID.
    pub event_id: String,
    /// The event title.
    pub title: String,
    /// The classification.
    pub status: ProgressStatus,
    /// Percentage of sessions that have ended (0-100).
    pub percent: u8,
    /// Number of sessions on the event.
    pub total_sessions: usize,
    /// Number of sessions that have ended.
    pub finished_sessions: usize,
}

/// Which events to show in a progress list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressFilter {
    /// All events, in progress first, then completed, then upcoming.
    #[default]
    All,
    /// Only completed events.
    Completed,
    /// Only events in progress.
    OnProgress,
    /// Only upcoming events.
    Upcoming,
}

impl ProgressFilter {
    /// Applies the filter, keeping input order within a status.
    pub fn apply(&self, mut list: Vec<EventProgress>) -> Vec<EventProgress> {
        let wanted = match self {
            Self::All => {
                list.sort_by_key(|p| p.status.rank());
                return list;
            }
            Self::Completed => ProgressStatus::Completed,
            Self::OnProgress => ProgressStatus::OnProgress,
            Self::Upcoming => ProgressStatus::Upcoming,
        };
        list.retain(|p| p.status == wanted);
        list
    }
}

impl FromStr for ProgressFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "on-progress" | "on_progress" | "in-progress" => Ok(Self::OnProgress),
            "upcoming" => Ok(Self::Upcoming),
            other => Err(format!("unknown progress filter: {}", other)),
        }
    }
}

/// Totals across all of a member's events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Hours spent in sessions of completed events, rounded.
    pub hours_spent: i64,
    /// Number of completed events.
    pub completed: usize,
    /// Share of events (with sessions) currently in progress, in percent.
    pub in_progress_percent: u8,
    /// Number of events that have sessions.
    pub tracked_events: usize,
}

fn session_windows<Tz: TimeZone>(
    event: &Event,
    tz: &Tz,
) -> Result<Vec<TimeWindow>, TimeParseError> {
    event.sessions.iter().map(|s| s.window(tz)).collect()
}

fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let value = (part * 100 + total / 2) / total;
    u8::try_from(value.min(100)).unwrap_or(100)
}

/// Computes the progress of one event at `now`.
///
/// Events without sessions, or with a session that cannot be parsed, are
/// reported as upcoming with 0%.
pub fn event_progress<Tz: TimeZone>(
    event: &Event,
    now: DateTime<Utc>,
    tz: &Tz,
) -> EventProgress {
    let upcoming = |total_sessions| EventProgress {
        event_id: event.id.clone(),
        title: event.title.clone(),
        status: ProgressStatus::Upcoming,
        percent: 0,
        total_sessions,
        finished_sessions: 0,
    };

    let windows = match session_windows(event, tz) {
        Ok(windows) if !windows.is_empty() => windows,
        Ok(_) => {
            tracing::debug!(event_id = %event.id, "event has no sessions; treating as upcoming");
            return upcoming(0);
        }
        Err(e) => {
            tracing::warn!(event_id = %event.id, error = %e, "cannot compute progress");
            return upcoming(event.sessions.len());
        }
    };

    let total = windows.len();
    let finished = windows.iter().filter(|w| w.is_finished_at(now)).count();
    let started = windows.iter().any(|w| w.has_started_at(now));

    let (status, percent) = if finished == total {
        (ProgressStatus::Completed, 100)
    } else if started {
        (ProgressStatus::OnProgress, percent(finished, total))
    } else {
        (ProgressStatus::Upcoming, 0)
    };

    EventProgress {
        event_id: event.id.clone(),
        title: event.title.clone(),
        status,
        percent,
        total_sessions: total,
        finished_sessions: finished,
    }
}

/// Computes progress for every event, in input order.
pub fn progress_list<Tz: TimeZone>(
    events: &[Event],
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<EventProgress> {
    events.iter().map(|e| event_progress(e, now, tz)).collect()
}

/// Summarises progress across `events` at `now`.
///
/// Only events with sessions are tracked. An event whose sessions cannot be
/// parsed still counts towards `tracked_events` but contributes nothing else.
pub fn progress_summary<Tz: TimeZone>(
    events: &[Event],
    now: DateTime<Utc>,
    tz: &Tz,
) -> ProgressSummary {
    let mut summary = ProgressSummary::default();
    let mut in_progress = 0;
    let mut time_spent = Duration::zero();

    for event in events.iter().filter(|e| e.has_sessions()) {
        summary.tracked_events += 1;

        let windows = match session_windows(event, tz) {
            Ok(windows) => windows,
            Err(e) => {
                tracing::warn!(
                    event_id = %event.id,
                    error = %e,
                    "skipping event in progress summary"
                );
                continue;
            }
        };

        if windows.iter().all(|w| w.is_finished_at(now)) {
            summary.completed += 1;
            time_spent = windows
                .iter()
                .fold(time_spent, |acc, w| acc + w.duration());
        } else if windows.iter().any(|w| w.has_started_at(now)) {
            in_progress += 1;
        }
    }

    summary.hours_spent = (time_spent.num_milliseconds() as f64 / 3_600_000.0).round() as i64;
    summary.in_progress_percent = percent(in_progress, summary.tracked_events);
    summary
}
