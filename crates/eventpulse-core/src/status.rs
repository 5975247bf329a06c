//! Event status resolution.
//!
//! [`resolve_status`] classifies an [`Event`] as upcoming, ongoing or
//! finished at a given instant. Day-level checks compare calendar days in the
//! caller's timezone, inclusive of both the start and the end day. While an
//! event is ongoing, its sessions are laid out on a [`SessionTimeline`] to find
//! the topic to display.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{Event, Session};
use crate::time::{TimeParseError, TimeWindow, day_in};

/// Topic shown for an ongoing event when no session has started yet.
pub const IN_PROGRESS_TOPIC: &str = "In Progress";

/// Where an event stands relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Today is before the event's start day.
    Upcoming,
    /// Today is between the start and end day, inclusive.
    Ongoing,
    /// Today is after the event's end day.
    Finished,
}

impl EventStatus {
    /// Returns the display name for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Ongoing => "Ongoing",
            Self::Finished => "Finished",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The derived status of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStatusInfo {
    /// The classification.
    pub status: EventStatus,
    /// Topic of the current or most recent session; only set while ongoing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_lesson_topic: Option<String>,
}

impl EventStatusInfo {
    /// An upcoming status.
    pub fn upcoming() -> Self {
        Self {
            status: EventStatus::Upcoming,
            current_lesson_topic: None,
        }
    }

    /// A finished status.
    pub fn finished() -> Self {
        Self {
            status: EventStatus::Finished,
            current_lesson_topic: None,
        }
    }

    /// An ongoing status with the topic to display.
    pub fn ongoing(topic: impl Into<String>) -> Self {
        Self {
            status: EventStatus::Ongoing,
            current_lesson_topic: Some(topic.into()),
        }
    }
}

/// Errors that prevent an event from being classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    /// The event's start date could not be parsed.
    #[error("event {event_id} has an invalid start date: {source}")]
    InvalidStartDate {
        event_id: String,
        #[source]
        source: TimeParseError,
    },

    /// The event's end date could not be parsed.
    #[error("event {event_id} has an invalid end date: {source}")]
    InvalidEndDate {
        event_id: String,
        #[source]
        source: TimeParseError,
    },
}

impl StatusError {
    /// Returns the ID of the event that failed.
    pub fn event_id(&self) -> &str {
        match self {
            Self::InvalidStartDate { event_id, .. } | Self::InvalidEndDate { event_id, .. } => {
                event_id
            }
        }
    }
}

/// A session paired with its parsed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineSlot<'a> {
    /// The session this slot was built from.
    pub session: &'a Session,
    /// The parsed `[start, end)` interval.
    pub window: TimeWindow,
}

/// The position of an instant relative to an event's sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase<'a> {
    /// No session has started yet.
    NotStarted,
    /// This session's interval contains the instant.
    Active(&'a Session),
    /// Between sessions; `previous` is the last one to finish.
    Between { previous: &'a Session },
    /// Every session has finished; `last` is the final one.
    AllFinished { last: &'a Session },
}

impl SessionPhase<'_> {
    /// Returns the topic label this phase points at, if any.
    pub fn topic(&self) -> Option<String> {
        match self {
            Self::NotStarted => None,
            Self::Active(session)
            | Self::Between { previous: session }
            | Self::AllFinished { last: session } => Some(session.label()),
        }
    }
}

/// An event's sessions as an interval list sorted by start time.
#[derive(Debug, Clone, Default)]
pub struct SessionTimeline<'a> {
    slots: Vec<TimelineSlot<'a>>,
}

impl<'a> SessionTimeline<'a> {
    /// Builds a timeline from sessions in any order.
    ///
    /// Sessions whose timestamps cannot be parsed are left out. Sessions with
    /// the same start keep their input order.
    pub fn from_sessions<Tz: TimeZone>(sessions: &'a [Session], tz: &Tz) -> Self {
        let mut slots: Vec<TimelineSlot<'a>> = sessions
            .iter()
            .filter_map(|session| match session.window(tz) {
                Ok(window) => Some(TimelineSlot { session, window }),
                Err(e) => {
                    tracing::warn!(
                        session_id = %session.id,
                        error = %e,
                        "skipping session with invalid time"
                    );
                    None
                }
            })
            .collect();
        slots.sort_by_key(|slot| slot.window.start);
        Self { slots }
    }

    /// Returns the sorted slots.
    pub fn slots(&self) -> &[TimelineSlot<'a>] {
        &self.slots
    }

    /// Returns the number of usable sessions.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no session could be placed.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Locates `now` on the timeline.
    ///
    /// When sessions overlap, the earliest-starting one containing `now` is
    /// active. Otherwise the latest session (in start order) that began and
    /// ended before `now` is reported.
    pub fn phase_at(&self, now: DateTime<Utc>) -> SessionPhase<'a> {
        let started = self
            .slots
            .partition_point(|slot| slot.window.has_started_at(now));
        let candidates = &self.slots[..started];

        if let Some(slot) = candidates.iter().find(|slot| slot.window.contains(now)) {
            return SessionPhase::Active(slot.session);
        }

        match candidates
            .iter()
            .rev()
            .find(|slot| slot.window.is_finished_at(now))
        {
            Some(slot) if started == self.slots.len() => {
                SessionPhase::AllFinished { last: slot.session }
            }
            Some(slot) => SessionPhase::Between {
                previous: slot.session,
            },
            None => SessionPhase::NotStarted,
        }
    }
}

/// Classifies `event` at `now`, comparing calendar days in `tz`.
///
/// # Errors
///
/// Returns a [`StatusError`] when the event's start or end date cannot be
/// parsed.
pub fn resolve_status<Tz: TimeZone>(
    event: &Event,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<EventStatusInfo, StatusError> {
    let start = event
        .start(tz)
        .map_err(|source| StatusError::InvalidStartDate {
            event_id: event.id.clone(),
            source,
        })?;
    let end = event.end(tz).map_err(|source| StatusError::InvalidEndDate {
        event_id: event.id.clone(),
        source,
    })?;

    let today = day_in(now, tz);
    let start_day = day_in(start, tz);
    let end_day = day_in(end, tz);

    if today < start_day {
        return Ok(EventStatusInfo::upcoming());
    }

    if today <= end_day {
        let topic = SessionTimeline::from_sessions(&event.sessions, tz)
            .phase_at(now)
            .topic()
            .unwrap_or_else(|| IN_PROGRESS_TOPIC.to_string());
        return Ok(EventStatusInfo::ongoing(topic));
    }

    Ok(EventStatusInfo::finished())
}

/// Classifies `event` at `now`, treating unparseable dates as upcoming.
///
/// The failure is logged as a warning.
pub fn event_status_at<Tz: TimeZone>(
    event: &Event,
    now: DateTime<Utc>,
    tz: &Tz,
) -> EventStatusInfo {
    resolve_status(event, now, tz).unwrap_or_else(|e| {
        tracing::warn!(event_id = %e.event_id(), error = %e, "defaulting event status to upcoming");
        EventStatusInfo::upcoming()
    })
}

/// Classifies `event` against the wall clock in the local timezone.
pub fn event_status(event: &Event) -> EventStatusInfo {
    event_status_at(event, Utc::now(), &Local)
}
