//! The session controller.

use crate::config::SyncConfig;
use crate::debounce::Debounce;
use crate::error::{SyncError, SyncResult};
use crate::notice::{Notice, TransientNotice};
use crate::transport::RemoteStore;
use memopad_core::{CoreError, Document};
use memopad_store::{CacheBackend, DocumentCache};
use std::time::Instant;
use tracing::{debug, info, warn};

/// The lifecycle state of a memo session.
///
/// ```text
/// Loading --initialize--> Locked --reconcile--> Ready
///                                                 |
///                                           (user edits,
///                                            later reconciles)
/// ```
///
/// While `Locked`, the startup reconciliation is outstanding and every
/// mutating operation is refused with [`SyncError::Locked`]; the host
/// should keep its editing controls disabled until the state is `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed but not yet initialized from the cache.
    Loading,
    /// Initialized; the startup pull-and-reconcile is outstanding.
    Locked,
    /// Fully interactive.
    Ready,
}

impl SessionState {
    /// Returns true if mutations are currently accepted.
    #[must_use]
    pub fn accepts_mutations(&self) -> bool {
        matches!(self, SessionState::Ready)
    }
}

/// What the host must do after a controller operation.
///
/// The controller performs cache writes and remote calls itself; rendering
/// and notice display stay with the host, which reads them off this value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The document changed in a way the host should re-render.
    pub render: bool,
    /// A transient status message to display and auto-clear.
    pub notice: Option<TransientNotice>,
}

impl Outcome {
    fn render() -> Self {
        Self {
            render: true,
            notice: None,
        }
    }

    fn notice(notice: TransientNotice) -> Self {
        Self {
            render: false,
            notice: Some(notice),
        }
    }

    fn render_with(notice: TransientNotice) -> Self {
        Self {
            render: true,
            notice: Some(notice),
        }
    }
}

/// Owns the in-memory document and keeps both replicas up to date.
///
/// Control flow per mutation: mutate in memory, write through to the local
/// cache synchronously, then push the whole document to the remote store
/// best-effort. Local state is the durable source of truth; a failed push
/// never rolls anything back.
///
/// The controller is single-threaded and event-driven. Network calls happen
/// inside [`MemoSyncController::reconcile`] and the push paths; a host that
/// must not block its event thread runs the pull itself and feeds the
/// outcome to [`MemoSyncController::reconcile_with`], or bridges the
/// supplied [`RemoteStore`] (it is `Send + Sync`) through its own executor.
/// Timer expiry is driven by polling
/// [`MemoSyncController::poll_autosave`].
pub struct MemoSyncController<B: CacheBackend, R: RemoteStore> {
    config: SyncConfig,
    cache: DocumentCache<B>,
    remote: R,
    document: Document,
    state: SessionState,
    edited_since_open: bool,
    autosave: Debounce,
}

impl<B: CacheBackend, R: RemoteStore> MemoSyncController<B, R> {
    /// Creates a controller in the `Loading` state.
    pub fn new(config: SyncConfig, cache: DocumentCache<B>, remote: R) -> Self {
        let autosave = Debounce::new(config.debounce);
        Self {
            config,
            cache,
            remote,
            document: Document::new(),
            state: SessionState::Loading,
            edited_since_open: false,
            autosave,
        }
    }

    /// Returns the current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the remote store this controller pushes to.
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Returns the current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns true if the user has edited since the session opened and the
    /// edit has not yet reached the remote store.
    pub fn edited_since_open(&self) -> bool {
        self.edited_since_open
    }

    /// Returns the pending autosave deadline, if any.
    ///
    /// Hosts with a real timer facility can arm it for this instant instead
    /// of polling.
    pub fn autosave_deadline(&self) -> Option<Instant> {
        self.autosave.deadline()
    }

    /// Loads the cached document for the first paint and locks the session
    /// for the startup reconciliation.
    ///
    /// Loading is lenient: missing or corrupt cache data silently degrades
    /// to a single empty page. The host should render the returned outcome
    /// immediately and then run [`MemoSyncController::reconcile`] in the
    /// background.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidState`] if called more than once.
    pub fn initialize(&mut self) -> SyncResult<Outcome> {
        if self.state != SessionState::Loading {
            return Err(self.invalid_state("initialize"));
        }
        self.document = self.cache.load();
        self.state = SessionState::Locked;
        debug!(pages = self.document.len(), "session initialized from cache");
        Ok(Outcome::render_with(self.transient(Notice::CacheLoaded)))
    }

    /// Pulls the remote copy and reconciles it against the local document.
    ///
    /// This is the blocking convenience: it suspends at the network
    /// boundary, then delegates to
    /// [`MemoSyncController::reconcile_with`]. Hosts that must not block
    /// their event thread perform the fetch themselves (against their own
    /// handle to the remote store) and feed the outcome to
    /// `reconcile_with` instead.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidState`] if the session was never
    /// initialized.
    pub fn reconcile(&mut self) -> SyncResult<Outcome> {
        if self.state == SessionState::Loading {
            return Err(self.invalid_state("reconcile"));
        }
        let fetched = self.remote.fetch();
        self.reconcile_with(fetched)
    }

    /// Reconciles a pull outcome obtained by the host.
    ///
    /// Policy (whole-document, last-writer-wins, with one guard):
    /// - fetch failure or malformed body: keep local, report transiently;
    /// - local edits since open: discard the pull entirely;
    /// - identical canonical forms: nothing to do, no re-render;
    /// - otherwise: adopt the remote copy wholesale and persist it.
    ///
    /// Always leaves the session `Ready`; failure never blocks editing.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidState`] if the session was never
    /// initialized.
    pub fn reconcile_with(&mut self, fetched: SyncResult<Document>) -> SyncResult<Outcome> {
        if self.state == SessionState::Loading {
            return Err(self.invalid_state("reconcile"));
        }
        self.state = SessionState::Ready;

        let remote_doc = match fetched {
            Ok(doc) => doc,
            Err(SyncError::MalformedResponse(e)) => {
                warn!(error = %e, "remote returned malformed data, keeping local copy");
                return Ok(Outcome::notice(self.transient(Notice::MalformedRemote)));
            }
            Err(e) => {
                warn!(error = %e, "remote fetch failed, keeping local copy");
                return Ok(Outcome::notice(self.transient(Notice::FetchFailed)));
            }
        };

        if self.edited_since_open {
            info!("local edits in progress, discarding pulled document");
            return Ok(Outcome::notice(self.transient(Notice::SyncSkipped)));
        }

        if self.document.canonical_json() == remote_doc.canonical_json() {
            debug!("local and remote replicas already match");
            return Ok(Outcome::notice(self.transient(Notice::AlreadyInSync)));
        }

        self.document = remote_doc;
        self.persist_local();
        info!(pages = self.document.len(), "adopted remote document");
        Ok(Outcome::render_with(self.transient(Notice::Synced)))
    }

    /// Writes `value` into the selected page's title and schedules the
    /// debounced autosave for `now + debounce`.
    ///
    /// `now` is the caller's clock, the same one later passed to
    /// [`MemoSyncController::poll_autosave`].
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Locked`] until the startup reconcile completes.
    pub fn edit_title(&mut self, value: impl Into<String>, now: Instant) -> SyncResult<Outcome> {
        self.guard_unlocked()?;
        self.document.set_title(value);
        self.note_edit(now);
        Ok(Outcome::default())
    }

    /// Writes `value` into the selected page's body and schedules the
    /// debounced autosave for `now + debounce`.
    ///
    /// `now` is the caller's clock, the same one later passed to
    /// [`MemoSyncController::poll_autosave`].
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Locked`] until the startup reconcile completes.
    pub fn edit_body(&mut self, value: impl Into<String>, now: Instant) -> SyncResult<Outcome> {
        self.guard_unlocked()?;
        self.document.set_body(value);
        self.note_edit(now);
        Ok(Outcome::default())
    }

    /// Switches the selection to `index`.
    ///
    /// Out-of-bounds and same-index calls are no-ops. A real switch counts
    /// as an edit, persists locally, and pushes best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Locked`] until the startup reconcile completes.
    pub fn select_page(&mut self, index: usize) -> SyncResult<Outcome> {
        self.guard_unlocked()?;
        match self.document.select(index) {
            Ok(true) => {}
            Ok(false) => return Ok(Outcome::default()),
            Err(CoreError::OutOfBounds { .. }) => return Ok(Outcome::default()),
            Err(e) => {
                debug!(error = %e, "unexpected selection failure");
                return Ok(Outcome::default());
            }
        }
        self.edited_since_open = true;
        self.persist_local();
        self.push_quiet();
        Ok(Outcome::render())
    }

    /// Appends an empty page and selects it.
    ///
    /// At the page limit the document is unchanged and a capacity notice is
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Locked`] until the startup reconcile completes.
    pub fn add_page(&mut self) -> SyncResult<Outcome> {
        self.guard_unlocked()?;
        if self.document.push_page().is_err() {
            return Ok(Outcome::notice(self.transient(Notice::AtCapacity)));
        }
        self.edited_since_open = true;
        self.persist_local();
        self.push_quiet();
        Ok(Outcome::render())
    }

    /// Removes the selected page, clamping the selection.
    ///
    /// With one page left the document is unchanged and a notice is
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Locked`] until the startup reconcile completes.
    pub fn remove_page(&mut self) -> SyncResult<Outcome> {
        self.guard_unlocked()?;
        if self.document.remove_selected().is_err() {
            return Ok(Outcome::notice(self.transient(Notice::LastPage)));
        }
        self.edited_since_open = true;
        self.persist_local();
        self.push_quiet();
        Ok(Outcome::render())
    }

    /// Explicit user-triggered save: persist locally, push, and report the
    /// push outcome.
    ///
    /// Cancels any pending autosave (the save supersedes it). Local state is
    /// committed regardless of the push result.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Locked`] until the startup reconcile completes.
    pub fn save_now(&mut self) -> SyncResult<Outcome> {
        self.guard_unlocked()?;
        self.edited_since_open = true;
        self.autosave.cancel();
        self.persist_local();

        match self.remote.push(&self.document) {
            Ok(()) => {
                self.edited_since_open = false;
                Ok(Outcome::notice(self.transient(Notice::Saved)))
            }
            Err(e) => {
                warn!(error = %e, "user-initiated push failed, local state kept");
                Ok(Outcome::notice(self.transient(Notice::SaveFailed)))
            }
        }
    }

    /// Fires the debounced autosave if its deadline has passed.
    ///
    /// The host calls this from its event loop (or when its timer armed for
    /// [`MemoSyncController::autosave_deadline`] expires). An expired
    /// deadline behaves like a silent save: persist, push, no notices.
    /// Returns true if an autosave ran.
    pub fn poll_autosave(&mut self, now: Instant) -> bool {
        if !self.autosave.fire_if_due(now) {
            return false;
        }
        debug!("autosave fired");
        self.persist_local();
        self.push_quiet();
        true
    }

    fn note_edit(&mut self, now: Instant) {
        self.edited_since_open = true;
        self.autosave.schedule(now);
    }

    fn guard_unlocked(&self) -> SyncResult<()> {
        if self.state.accepts_mutations() {
            Ok(())
        } else {
            Err(SyncError::Locked)
        }
    }

    fn invalid_state(&self, operation: &str) -> SyncError {
        SyncError::InvalidState {
            state: format!("{:?}", self.state),
            operation: operation.to_string(),
        }
    }

    /// Cache-write failure keeps the in-memory document authoritative.
    fn persist_local(&self) {
        if let Err(e) = self.cache.store(&self.document) {
            warn!(error = %e, "local cache write failed");
        }
    }

    /// Best-effort push; failures are logged, never surfaced.
    fn push_quiet(&mut self) {
        match self.remote.push(&self.document) {
            Ok(()) => {
                self.edited_since_open = false;
            }
            Err(e) => {
                warn!(error = %e, "background push failed");
            }
        }
    }

    fn transient(&self, notice: Notice) -> TransientNotice {
        let clear_after = match notice {
            Notice::CacheLoaded => self.config.notice_brief,
            Notice::Synced | Notice::AlreadyInSync | Notice::Saved => self.config.notice_short,
            Notice::SyncSkipped => self.config.notice_skip,
            Notice::FetchFailed
            | Notice::MalformedRemote
            | Notice::SaveFailed
            | Notice::AtCapacity
            | Notice::LastPage => self.config.notice_long,
        };
        TransientNotice::new(notice, clear_after)
    }
}
