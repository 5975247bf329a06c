//! Core types: events, sessions, status, schedule, progress, formatting

pub mod event;
pub mod format;
pub mod progress;
pub mod schedule;
pub mod status;
pub mod time;
pub mod tracing;

pub use event::{Event, Session};
pub use format::{
    DurationError, EventDateTime, FormatError, calculate_duration, calculate_session_duration,
    duration_display, ellipsis, format_event_date_time, format_event_group_date,
    format_start_date, format_start_date_display, format_time_window,
};
pub use progress::{
    EventProgress, ProgressFilter, ProgressStatus, ProgressSummary, event_progress,
    progress_list, progress_summary,
};
pub use schedule::{DailyEntry, ScheduleGroup, build_schedule, daily_entries, session_days};
pub use status::{
    EventStatus, EventStatusInfo, SessionPhase, SessionTimeline, StatusError, event_status,
    event_status_at, resolve_status,
};
pub use time::{TimeParseError, TimeWindow, normalize_to_day, parse_timestamp};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
