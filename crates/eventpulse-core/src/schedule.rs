//! Day-by-day schedule built from event sessions.
//!
//! Each event contributes one [`DailyEntry`] per calendar day on which it has
//! sessions, spanning the earliest session start to the latest session end of
//! that day. Entries are then grouped under a day header for display.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::format::format_event_group_date;
use crate::time::{TimeWindow, day_in};

/// Header used for the group of today's entries.
pub const TODAY_LABEL: &str = "Today";

/// One event's sessions on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Stable key: `event-{event_id}-date-{YYYY-MM-DD}`.
    pub key: String,
    /// The event ID.
    pub event_id: String,
    /// The event title.
    pub event_title: String,
    /// The event type, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_kind: Option<String>,
    /// The event location, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// The calendar day of this entry.
    pub day: NaiveDate,
    /// Earliest session start to latest session end on this day.
    pub window: TimeWindow,
}

/// Entries sharing a day, with their display header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGroup {
    /// "Today" or the long weekday date.
    pub label: String,
    /// The day of every entry in this group.
    pub day: NaiveDate,
    /// Entries ordered by start time.
    pub entries: Vec<DailyEntry>,
}

/// Collapses every event's sessions into per-day entries.
///
/// Sessions are bucketed by the day they start on in `tz`. Sessions that
/// cannot be parsed are skipped. The result is ordered by day, then start.
pub fn daily_entries<Tz: TimeZone>(events: &[Event], tz: &Tz) -> Vec<DailyEntry> {
    let mut buckets: BTreeMap<(NaiveDate, usize), (DateTime<Utc>, DateTime<Utc>)> =
        BTreeMap::new();

    for (index, event) in events.iter().enumerate() {
        for session in &event.sessions {
            let window = match session.window(tz) {
                Ok(window) => window,
                Err(e) => {
                    tracing::warn!(
                        event_id = %event.id,
                        session_id = %session.id,
                        error = %e,
                        "skipping session in schedule"
                    );
                    continue;
                }
            };
            let day = day_in(window.start, tz);
            buckets
                .entry((day, index))
                .and_modify(|(start, end)| {
                    *start = (*start).min(window.start);
                    *end = (*end).max(window.end);
                })
                .or_insert((window.start, window.end));
        }
    }

    let mut entries: Vec<DailyEntry> = buckets
        .into_iter()
        .map(|((day, index), (start, end))| {
            let event = &events[index];
            DailyEntry {
                key: format!("event-{}-date-{}", event.id, day.format("%Y-%m-%d")),
                event_id: event.id.clone(),
                event_title: event.title.clone(),
                event_kind: event.kind.clone(),
                location: event.location.clone(),
                day,
                window: TimeWindow { start, end },
            }
        })
        .collect();
    entries.sort_by_key(|entry| (entry.day, entry.window.start));
    entries
}

/// Builds the grouped schedule shown on the dashboard.
///
/// With `selected` set, only that day's entries are kept. Otherwise entries
/// from today (in `tz`) onward are kept.
pub fn build_schedule<Tz: TimeZone>(
    events: &[Event],
    now: DateTime<Utc>,
    selected: Option<NaiveDate>,
    tz: &Tz,
) -> Vec<ScheduleGroup> {
    let today = day_in(now, tz);
    let entries = daily_entries(events, tz).into_iter().filter(|entry| match selected {
        Some(day) => entry.day == day,
        None => entry.day >= today,
    });

    let mut groups: Vec<ScheduleGroup> = Vec::new();
    for entry in entries {
        if let Some(group) = groups.last_mut().filter(|g| g.day == entry.day) {
            group.entries.push(entry);
            continue;
        }
        groups.push(ScheduleGroup {
            label: group_label(entry.day, today),
            day: entry.day,
            entries: vec![entry],
        });
    }
    groups
}

/// Returns the header for `day`.
pub fn group_label(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        TODAY_LABEL.to_string()
    } else {
        format_event_group_date(day)
    }
}

/// Returns every day that has at least one session, sorted and unique.
pub fn session_days<Tz: TimeZone>(events: &[Event], tz: &Tz) -> Vec<NaiveDate> {
    events
        .iter()
        .flat_map(|event| event.sessions.iter())
        .filter_map(|session| session.window(tz).ok())
        .map(|window| day_in(window.start, tz))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
