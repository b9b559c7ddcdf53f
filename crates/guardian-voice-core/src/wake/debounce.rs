use std::time::Duration;

use tokio::time::Instant;

/// Suppresses alerts that follow a previous one too closely.
#[derive(Debug)]
pub struct AlertDebounce {
    min_interval: Duration,
    last_alert_at: Option<Instant>,
}

impl AlertDebounce {
    /// Create a debounce with no alert recorded.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_alert_at: None,
        }
    }

    /// Record an alert at `now` unless one was recorded within the minimum
    /// interval (inclusive, including the same instant).
    pub fn try_fire(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_alert_at
            && now.saturating_duration_since(last) <= self.min_interval
        {
            return false;
        }
        self.last_alert_at = Some(now);
        true
    }

    /// When the last alert went out.
    pub fn last_alert_at(&self) -> Option<Instant> {
        self.last_alert_at
    }

    /// Forget the last alert.
    pub fn reset(&mut self) {
        self.last_alert_at = None;
    }
}
