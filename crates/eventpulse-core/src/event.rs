//! Event types for the society calendar.
//!
//! This module provides the records the website API hands to the core:
//! - [`Event`]: a scheduled activity with an overall start/end window
//! - [`Session`]: a sub-interval of an event with its own topic
//!
//! Timestamps are kept as the raw ISO-8601 strings received from the API and
//! parsed on demand, so a single malformed field never prevents the rest of an
//! event from loading.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::time::{TimeParseError, TimeWindow, parse_timestamp};

/// A scheduled event (workshop, seminar, mentorship programme).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier for the event.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// The event title.
    #[serde(default)]
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Event category (e.g. "Workshop", "Seminar").
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Where the event takes place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Start of the event window, ISO-8601.
    pub start_date: String,
    /// End of the event window, ISO-8601.
    pub end_date: String,
    /// Sessions making up the event, in any order.
    #[serde(default)]
    pub sessions: Vec<Session>,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Event {
    /// Creates a new Event with required fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            kind: None,
            location: None,
            start_date: start_date.into(),
            end_date: end_date.into(),
            sessions: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Parses the start date in `tz`.
    pub fn start<Tz: TimeZone>(&self, tz: &Tz) -> Result<DateTime<Utc>, TimeParseError> {
        parse_timestamp(&self.start_date, tz)
    }

    /// Parses the end date in `tz`.
    pub fn end<Tz: TimeZone>(&self, tz: &Tz) -> Result<DateTime<Utc>, TimeParseError> {
        parse_timestamp(&self.end_date, tz)
    }

    /// Returns true if the event has at least one session.
    pub fn has_sessions(&self) -> bool {
        !self.sessions.is_empty()
    }

    /// Builder method to add a session.
    pub fn with_session(mut self, session: Session) -> Self {
        self.sessions.push(session);
        self
    }

    /// Builder method to set sessions.
    pub fn with_sessions(mut self, sessions: Vec<Session>) -> Self {
        self.sessions = sessions;
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the event type.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// One session of an event (a workshop day, a lesson).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for the session.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Session start, ISO-8601.
    pub start: String,
    /// Session end, ISO-8601.
    pub end: String,
    /// Topic shown while the session runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Longer description of the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Overrides the event location for this session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Session {
    /// Creates a new Session with required fields.
    pub fn new(id: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            topic: None,
            description: None,
            location: None,
        }
    }

    /// Builder method to set the topic.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns the label to display for this session.
    ///
    /// Falls back to `Session {id}` when the topic is missing or blank.
    pub fn label(&self) -> String {
        match self.topic.as_deref().map(str::trim) {
            Some(topic) if !topic.is_empty() => topic.to_string(),
            _ => format!("Session {}", self.id),
        }
    }

    /// Parses the session bounds in `tz`.
    pub fn window<Tz: TimeZone>(&self, tz: &Tz) -> Result<TimeWindow, TimeParseError> {
        TimeWindow::parse(&self.start, &self.end, tz)
    }
}

/// Accepts identifiers sent either as JSON strings or numbers.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
