//! Output rendering for the CLI.
//!
//! Every command builds plain data first (statuses, schedule groups, progress
//! rows) and hands it to a [`Renderer`], which produces either terminal text
//! or pretty-printed JSON. Rendering never touches stdout itself.

use std::borrow::Cow;

use chrono::TimeZone;
use eventpulse_core::format::INVALID_DATE_SENTINEL;
use eventpulse_core::{
    DurationError, Event, EventDateTime, EventProgress, EventStatus, EventStatusInfo,
    ProgressSummary, ScheduleGroup, StatusError, calculate_session_duration, ellipsis,
    format_event_date_time, format_start_date_display, format_time_window,
};
use serde::Serialize;

use crate::config::DisplaySettings;
use crate::error::CliResult;

/// Options that shape rendered output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum title length (truncated with ellipsis).
    pub max_title_length: Option<usize>,
    /// Text printed when a list is empty.
    pub no_events_text: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&DisplaySettings::default())
    }
}

impl From<&DisplaySettings> for RenderOptions {
    fn from(display: &DisplaySettings) -> Self {
        Self {
            max_title_length: display.max_title_length,
            no_events_text: display.no_events_text.clone(),
        }
    }
}

/// Status of one event, or why it could not be determined.
#[derive(Debug, Clone, Serialize)]
pub struct StatusLine {
    /// Event ID.
    pub id: String,
    /// Event title.
    pub title: String,
    /// The derived status; absent when the event dates are unreadable.
    pub status: Option<EventStatus>,
    /// Current session topic while ongoing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_lesson_topic: Option<String>,
    /// Why the status could not be determined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusLine {
    /// Builds a line from a status resolution result.
    pub fn new(event: &Event, resolved: Result<EventStatusInfo, StatusError>) -> Self {
        let (status, current_lesson_topic, error) = match resolved {
            Ok(info) => (Some(info.status), info.current_lesson_topic, None),
            Err(e) => (None, None, Some(e.to_string())),
        };
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            status,
            current_lesson_topic,
            error,
        }
    }
}

/// JSON output of the `status` command.
#[derive(Debug, Clone, Serialize)]
pub struct StatusOutput {
    /// One line per event, in feed order.
    pub events: Vec<StatusLine>,
    /// Number of events.
    pub count: usize,
}

/// JSON output of the `progress` command.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressOutput {
    /// Filtered progress rows.
    pub events: Vec<EventProgress>,
    /// Totals across every event in the feed.
    pub summary: ProgressSummary,
}

/// One session of an event in the `show` output.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetail {
    /// Session ID.
    pub id: String,
    /// Topic, or "Session {id}".
    pub label: String,
    /// Formatted date and time range; absent when unreadable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<EventDateTime>,
    /// Duration text, or "N/A".
    pub duration: String,
}

/// JSON output of the `show` command.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    /// Event ID.
    pub id: String,
    /// Event title.
    pub title: String,
    /// Event type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Event location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Status at the evaluation time.
    pub status: StatusLine,
    /// Long-form start date, or "Invalid Date".
    pub start_date: String,
    /// Formatted date and time range; absent when unreadable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<EventDateTime>,
    /// Sessions in feed order.
    pub sessions: Vec<SessionDetail>,
}

/// JSON output of the `duration` command.
#[derive(Debug, Clone, Serialize)]
pub struct DurationOutput {
    /// Start timestamp as given.
    pub start: String,
    /// End timestamp as given.
    pub end: String,
    /// Duration text, or "N/A".
    pub duration: String,
    /// Why the duration could not be computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DurationOutput {
    /// Builds the output from a duration result.
    pub fn new(start: &str, end: &str, result: Result<String, DurationError>) -> Self {
        let (duration, error) = match result {
            Ok(text) => (text, None),
            Err(e) => (e.sentinel().to_string(), Some(e.to_string())),
        };
        Self {
            start: start.to_string(),
            end: end.to_string(),
            duration,
            error,
        }
    }
}

/// Renders command results in the display timezone.
#[derive(Debug, Clone)]
pub struct Renderer<Tz: TimeZone> {
    options: RenderOptions,
    tz: Tz,
}

impl<Tz: TimeZone> Renderer<Tz> {
    /// Creates a renderer.
    pub fn new(options: RenderOptions, tz: Tz) -> Self {
        Self { options, tz }
    }

    /// Serializes `value` as pretty JSON.
    pub fn json<T: Serialize>(&self, value: &T) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Renders event statuses, one per line.
    pub fn status_text(&self, lines: &[StatusLine]) -> String {
        if lines.is_empty() {
            return self.options.no_events_text.clone();
        }

        lines
            .iter()
            .map(|line| self.status_line_text(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn status_line_text(&self, line: &StatusLine) -> String {
        let title = self.title(&line.title);
        match (&line.status, &line.error) {
            (Some(status), _) => {
                // Same lowercase names as the JSON status values.
                let label = status.as_str().to_lowercase();
                match &line.current_lesson_topic {
                    Some(topic) => format!("{:<8}  {}  ({})", label, title, topic),
                    None => format!("{:<8}  {}", label, title),
                }
            }
            (None, Some(error)) => format!("{:<8}  {}  [{}]", "error", title, error),
            (None, None) => format!("{:<8}  {}", "unknown", title),
        }
    }

    /// Renders the grouped schedule with a header per day.
    pub fn schedule_text(&self, groups: &[ScheduleGroup]) -> String {
        if groups.is_empty() {
            return self.options.no_events_text.clone();
        }

        let mut lines = Vec::new();
        for group in groups {
            lines.push(group.label.clone());
            for entry in &group.entries {
                let time_range = format_time_window(&entry.window, &self.tz)
                    .map(|when| when.time_range)
                    .unwrap_or_else(|e| e.sentinel().to_string());
                let mut line = format!("  {}  {}", time_range, self.title(&entry.event_title));
                if let Some(kind) = &entry.event_kind {
                    line.push_str(&format!(" ({})", kind));
                }
                if let Some(location) = &entry.location {
                    line.push_str(&format!(" @ {}", location));
                }
                lines.push(line);
            }
        }
        lines.join("\n")
    }

    /// Renders progress rows followed by the totals.
    pub fn progress_text(&self, rows: &[EventProgress], summary: &ProgressSummary) -> String {
        let mut lines: Vec<String> = if rows.is_empty() {
            vec![self.options.no_events_text.clone()]
        } else {
            rows.iter()
                .map(|row| {
                    format!(
                        "{:<11}  {:>3}%  {} ({}/{} sessions)",
                        row.status.as_str(),
                        row.percent,
                        self.title(&row.title),
                        row.finished_sessions,
                        row.total_sessions
                    )
                })
                .collect()
        };

        lines.push(String::new());
        lines.push(format!("Hours spent: {}", summary.hours_spent));
        lines.push(format!("Completed: {}", summary.completed));
        lines.push(format!("In progress: {}%", summary.in_progress_percent));
        lines.join("\n")
    }

    /// Collects the formatted details of one event.
    pub fn event_detail(&self, event: &Event, status: StatusLine) -> EventDetail {
        let sessions = event
            .sessions
            .iter()
            .map(|session| SessionDetail {
                id: session.id.clone(),
                label: session.label(),
                when: format_event_date_time(&session.start, &session.end, &self.tz).ok(),
                duration: calculate_session_duration(session, &self.tz)
                    .unwrap_or_else(|e| e.sentinel().to_string()),
            })
            .collect();

        EventDetail {
            id: event.id.clone(),
            title: event.title.clone(),
            kind: event.kind.clone(),
            location: event.location.clone(),
            status,
            start_date: format_start_date_display(&event.start_date, &self.tz),
            when: format_event_date_time(&event.start_date, &event.end_date, &self.tz).ok(),
            sessions,
        }
    }

    /// Renders the details of one event.
    pub fn event_detail_text(&self, detail: &EventDetail) -> String {
        let mut lines = vec![self.status_line_text(&detail.status)];

        match &detail.when {
            Some(when) => {
                lines.push(format!("Date: {}", when.date_range));
                lines.push(format!("Time: {}", when.time_range));
            }
            None => lines.push(format!("Date: {}", detail.start_date)),
        }
        if let Some(kind) = &detail.kind {
            lines.push(format!("Type: {}", kind));
        }
        if let Some(location) = &detail.location {
            lines.push(format!("Location: {}", location));
        }

        if !detail.sessions.is_empty() {
            lines.push("Sessions:".to_string());
            for session in &detail.sessions {
                let when = session
                    .when
                    .as_ref()
                    .map(|w| format!("{}, {}", w.date_range, w.time_range))
                    .unwrap_or_else(|| INVALID_DATE_SENTINEL.to_string());
                lines.push(format!("  - {}: {} [{}]", session.label, when, session.duration));
            }
        }
        lines.join("\n")
    }

    /// Renders a duration result.
    pub fn duration_text(&self, output: &DurationOutput) -> String {
        match &output.error {
            Some(error) => format!("{} ({})", output.duration, error),
            None => output.duration.clone(),
        }
    }

    fn title<'a>(&self, title: &'a str) -> Cow<'a, str> {
        match self.options.max_title_length {
            Some(max) => ellipsis(title, max),
            None => Cow::Borrowed(title),
        }
    }
}
