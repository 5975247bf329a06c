//! Loading event feeds.
//!
//! A feed is the JSON the website API returns: either a bare array of events
//! or an object with an `events` array. `-` reads from stdin.

use std::io::Read;
use std::path::Path;

use eventpulse_core::Event;
use serde::Deserialize;

use crate::error::{CliError, CliResult};

#[derive(Deserialize)]
#[serde(untagged)]
enum Feed {
    List(Vec<Event>),
    Wrapped { events: Vec<Event> },
}

impl From<Feed> for Vec<Event> {
    fn from(feed: Feed) -> Self {
        match feed {
            Feed::List(events) | Feed::Wrapped { events } => events,
        }
    }
}

/// Parses a feed from JSON text.
pub fn parse_events(path: &Path, content: &str) -> CliResult<Vec<Event>> {
    serde_json::from_str::<Feed>(content)
        .map(Vec::from)
        .map_err(|source| CliError::Feed {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads and parses the feed at `path`.
pub fn load_events(path: &Path) -> CliResult<Vec<Event>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::io(path, e))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?
    };

    let events = parse_events(path, &content)?;
    tracing::debug!(path = %path.display(), count = events.len(), "loaded event feed");
    Ok(events)
}

/// Finds an event by ID.
pub fn find_event<'a>(events: &'a [Event], event_id: &str) -> CliResult<&'a Event> {
    events
        .iter()
        .find(|e| e.id == event_id)
        .ok_or_else(|| CliError::NotFound {
            event_id: event_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ARRAY_FEED: &str = r#"[
        {"id": 1, "title": "Intro", "startDate": "2025-06-15", "endDate": "2025-06-15"},
        {"id": "2", "title": "Deep Dive", "startDate": "2025-06-16", "endDate": "2025-06-17"}
    ]"#;

    #[test]
    fn parses_bare_array() {
        let events = parse_events(Path::new("feed.json"), ARRAY_FEED).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "1");
    }

    #[test]
    fn parses_wrapped_object() {
        let content = format!(r#"{{"events": {}}}"#, ARRAY_FEED);
        let events = parse_events(Path::new("feed.json"), &content).unwrap();
        assert_eq!(events[1].title, "Deep Dive");
    }

    #[test]
    fn rejects_malformed_feed() {
        let err = parse_events(Path::new("feed.json"), r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, CliError::Feed { .. }));
        assert!(err.to_string().contains("feed.json"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ARRAY_FEED.as_bytes()).unwrap();

        let events = load_events(file.path()).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_events(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn find_by_id() {
        let events = parse_events(Path::new("feed.json"), ARRAY_FEED).unwrap();
        assert_eq!(find_event(&events, "2").unwrap().title, "Deep Dive");
        assert!(matches!(
            find_event(&events, "9"),
            Err(CliError::NotFound { .. })
        ));
    }
}
