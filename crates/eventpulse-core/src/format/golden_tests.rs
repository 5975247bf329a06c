//! Golden tests for display formatting.
//!
//! These tests use insta inline snapshots to keep the rendered strings stable.
//! Run with `cargo insta review` to update snapshots after intentional changes.

use chrono::Utc;

use crate::event::{Event, Session};
use crate::format::{
    calculate_session_duration, duration_display, format_event_date_time,
    format_start_date_display,
};

/// A two-day workshop with a session per day and one broken session.
fn sample_event() -> Event {
    Event::new(
        "101",
        "Rust for Beginners",
        "2025-06-14T09:00:00Z",
        "2025-06-15T16:00:00Z",
    )
    .with_session(
        Session::new("1", "2025-06-14T09:00:00Z", "2025-06-14T12:30:00Z")
            .with_topic("Getting started"),
    )
    .with_session(Session::new(
        "2",
        "2025-06-15T13:00:00Z",
        "2025-06-15T16:00:00Z",
    ))
    .with_session(Session::new("3", "tbd", "tbd"))
}

/// Renders an event the way the event details page lays it out.
fn render_details(event: &Event) -> String {
    let mut lines = Vec::new();
    match format_event_date_time(&event.start_date, &event.end_date, &Utc) {
        Ok(when) => {
            lines.push(format!("Date: {}", when.date_range));
            lines.push(format!("Time: {}", when.time_range));
        }
        Err(e) => lines.push(format!("Date: {}", e.sentinel())),
    }
    for session in &event.sessions {
        let time_range = format_event_date_time(&session.start, &session.end, &Utc)
            .map(|when| when.time_range)
            .unwrap_or_else(|e| e.sentinel().to_string());
        let duration = calculate_session_duration(session, &Utc)
            .unwrap_or_else(|e| e.sentinel().to_string());
        lines.push(format!(
            "- {}: {} ({}) [{}]",
            session.label(),
            format_start_date_display(&session.start, &Utc),
            time_range,
            duration
        ));
    }
    lines.join("\n")
}

#[test]
fn golden_event_details() {
    let output = render_details(&sample_event());

    insta::assert_snapshot!(output, @r"
    Date: June 14, 2025 - June 15, 2025
    Time: 09:00 AM - 04:00 PM
    - Getting started: June 14, 2025 (09:00 AM - 12:30 PM) [3 hours 30 minutes]
    - Session 2: June 15, 2025 (01:00 PM - 04:00 PM) [3 hours]
    - Session 3: Invalid Date (Invalid Date) [N/A]
    ");
}

#[test]
fn golden_single_day_event() {
    let event = Event::new(
        "102",
        "Career Talk",
        "2025-06-15T10:00:00Z",
        "2025-06-15T11:45:00Z",
    );
    let output = render_details(&event);

    insta::assert_snapshot!(output, @r"
    Date: June 15, 2025
    Time: 10:00 AM - 11:45 AM
    ");
}

#[test]
fn golden_event_date_time_json() {
    let formatted =
        format_event_date_time("2025-05-16T09:00:00Z", "2025-06-06T17:00:00Z", &Utc).unwrap();

    insta::assert_json_snapshot!(formatted, @r#"
    {
      "date_range": "May 16, 2025 - June 6, 2025",
      "time_range": "09:00 AM - 05:00 PM",
      "start_time": "09:00 AM",
      "end_time": "05:00 PM"
    }
    "#);
}

#[test]
fn golden_durations() {
    let spans = [
        ("2025-06-15T10:00:00Z", "2025-06-15T10:00:00Z"),
        ("2025-06-15T10:00:00Z", "2025-06-15T10:00:30Z"),
        ("2025-06-15T10:00:00Z", "2025-06-15T10:01:00Z"),
        ("2025-06-15T10:00:00Z", "2025-06-15T12:00:00Z"),
        ("2025-06-15T10:00:00Z", "2025-06-16T10:00:00Z"),
        ("2025-06-15T10:00:00Z", "2025-06-15T09:00:00Z"),
    ];
    let output = spans
        .iter()
        .map(|(start, end)| duration_display(start, end, &Utc))
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(output, @r"
    0 minutes
    Less than a minute
    1 minute
    2 hours
    24 hours
    N/A
    ");
}
