//! Transient status message shown under the active screen.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
    expires_at: Instant,
}

/// Holds at most one message.
///
/// A new message replaces the current one and restarts the display window,
/// so an older deadline can never clear a newer message.
#[derive(Debug, Clone)]
pub struct StatusLine {
    ttl: Duration,
    current: Option<StatusMessage>,
}

impl StatusLine {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn show(&mut self, text: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Some(StatusMessage {
            text: text.into(),
            severity,
            expires_at: now + self.ttl,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Drop the message once its window has passed.
    pub fn tick(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|message| now >= message.expires_at)
        {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }
}
