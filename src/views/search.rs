//! Debounced search input.
//!
//! The raw text follows every keystroke; the applied text (the one sent to
//! the server) only catches up once the input has been quiet for the
//! configured period. Clearing the box applies immediately.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Clone, Debug)]
pub struct SearchBox {
    raw: String,
    applied: String,
    quiet: Duration,
    /// When the pending raw value becomes applied. At most one at a time.
    deadline: Option<Instant>,
}

impl SearchBox {
    pub fn new(quiet: Duration) -> Self {
        Self {
            raw: String::new(),
            applied: String::new(),
            quiet,
            deadline: None,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn applied(&self) -> &str {
        &self.applied
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Record a keystroke at `now`. Returns `true` when the applied value changed right away
    /// (only on clearing).
    pub fn input(&mut self, text: impl Into<String>, now: Instant) -> bool {
        self.raw = text.into();
        if self.raw.is_empty() {
            self.deadline = None;
            return self.apply();
        }
        if self.raw == self.applied {
            self.deadline = None;
            return false;
        }
        self.deadline = Some(now + self.quiet);
        if self.quiet.is_zero() {
            return self.poll(now);
        }
        false
    }

    /// Apply the pending value if its quiet period has elapsed. Returns `true` when the
    /// applied value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                self.apply()
            }
            _ => false,
        }
    }

    /// Wait out the pending quiet period, then apply. Returns immediately when nothing is pending.
    pub async fn settle(&mut self) -> bool {
        let Some(at) = self.deadline else {
            return false;
        };
        tokio::time::sleep_until(at).await;
        self.poll(at)
    }

    fn apply(&mut self) -> bool {
        if self.applied == self.raw {
            return false;
        }
        self.applied = self.raw.clone();
        true
    }
}
