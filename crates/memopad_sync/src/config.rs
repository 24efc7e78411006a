//! Configuration for the session controller.

use std::time::Duration;

/// Configuration for a memopad session.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// URL of the remote store endpoint.
    pub endpoint: String,
    /// Quiet period after the last edit before the autosave fires.
    pub debounce: Duration,
    /// Display time for the cache-loaded notice.
    pub notice_brief: Duration,
    /// Display time for short confirmations (saved, synced, already in sync).
    pub notice_short: Duration,
    /// Display time for the sync-skipped notice.
    pub notice_skip: Duration,
    /// Display time for errors and capacity notices.
    pub notice_long: Duration,
}

impl SyncConfig {
    /// Creates a configuration for the given endpoint with default timings.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            debounce: Duration::from_millis(800),
            notice_brief: Duration::from_millis(600),
            notice_short: Duration::from_millis(800),
            notice_skip: Duration::from_millis(1200),
            notice_long: Duration::from_millis(1500),
        }
    }

    /// Sets the autosave debounce interval.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the short-notice display time.
    #[must_use]
    pub fn with_notice_short(mut self, duration: Duration) -> Self {
        self.notice_short = duration;
        self
    }

    /// Sets the long-notice display time.
    #[must_use]
    pub fn with_notice_long(mut self, duration: Duration) -> Self {
        self.notice_long = duration;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new("")
    }
}
