//! Transient user-visible status notices.

use std::time::Duration;

/// A status message the host should display and then clear.
///
/// Notices are the only user-visible reporting channel: nothing in the
/// controller is fatal, so every noteworthy condition surfaces as one of
/// these, shown for a short while and then auto-cleared by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The cached document was loaded at startup.
    CacheLoaded,
    /// The remote document was adopted during reconciliation.
    Synced,
    /// Local and remote replicas were already identical.
    AlreadyInSync,
    /// Reconciliation was skipped because local edits are in progress.
    SyncSkipped,
    /// The remote fetch failed; the cached document stays in use.
    FetchFailed,
    /// The remote response was not valid JSON; the cached document stays in use.
    MalformedRemote,
    /// A user-initiated save reached the remote store.
    Saved,
    /// A user-initiated save did not reach the remote store.
    SaveFailed,
    /// The document is already at the page limit.
    AtCapacity,
    /// The last remaining page cannot be removed.
    LastPage,
}

impl Notice {
    /// Returns the display message for this notice.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Notice::CacheLoaded => "Loaded from local cache",
            Notice::Synced => "Synced with remote copy",
            Notice::AlreadyInSync => "Local and remote copies match",
            Notice::SyncSkipped => "Sync skipped while editing",
            Notice::FetchFailed => "Could not reach remote store, using local cache",
            Notice::MalformedRemote => "Remote data was malformed, using local cache",
            Notice::Saved => "Saved and synced",
            Notice::SaveFailed => "Save failed (network error)",
            Notice::AtCapacity => "Page limit reached",
            Notice::LastPage => "The last page cannot be removed",
        }
    }

    /// Returns true if this notice reports a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::FetchFailed
                | Notice::MalformedRemote
                | Notice::SaveFailed
                | Notice::AtCapacity
                | Notice::LastPage
        )
    }
}

/// A [`Notice`] together with how long the host should display it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransientNotice {
    /// The notice to display.
    pub notice: Notice,
    /// How long to display it before clearing.
    pub clear_after: Duration,
}

impl TransientNotice {
    /// Creates a transient notice.
    #[must_use]
    pub fn new(notice: Notice, clear_after: Duration) -> Self {
        Self {
            notice,
            clear_after,
        }
    }
}
