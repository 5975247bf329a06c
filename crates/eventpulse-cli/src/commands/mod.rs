//! Command implementations.
//!
//! Each command receives a [`Context`] carrying the display timezone, the
//! evaluation instant and the loaded configuration, and returns the text to
//! print.

pub mod config;
pub mod duration;
pub mod progress;
pub mod schedule;
pub mod show;
pub mod status;

use chrono::{DateTime, TimeZone, Utc};

use crate::config::CliConfig;
use crate::render::{RenderOptions, Renderer};

/// Shared state for a single command invocation.
#[derive(Debug, Clone)]
pub struct Context<Tz: TimeZone> {
    /// Timezone used for calendar days and rendered times.
    pub tz: Tz,
    /// The instant statuses are evaluated at.
    pub now: DateTime<Utc>,
    /// Loaded configuration.
    pub config: CliConfig,
    /// Emit JSON instead of text.
    pub json: bool,
}

impl<Tz: TimeZone> Context<Tz> {
    /// Creates a context.
    pub fn new(tz: Tz, now: DateTime<Utc>, config: CliConfig, json: bool) -> Self {
        Self {
            tz,
            now,
            config,
            json,
        }
    }

    /// Returns a renderer for this context's display settings.
    pub fn renderer(&self) -> Renderer<Tz> {
        Renderer::new(RenderOptions::from(&self.config.display), self.tz.clone())
    }
}
