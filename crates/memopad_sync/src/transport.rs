//! Remote store abstraction.

use crate::error::{SyncError, SyncResult};
use memopad_core::Document;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// A remote replica of the document.
///
/// This trait abstracts the network layer, allowing different
/// implementations (HTTP, loopback, mock for testing). The remote store is
/// a whole-document, last-writer-wins replica: `fetch` returns its current
/// copy, `push` overwrites it.
pub trait RemoteStore: Send + Sync {
    /// Fetches the remote copy of the document.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Transport`] for network failures and
    /// [`SyncError::MalformedResponse`] when the body is not valid JSON.
    fn fetch(&self) -> SyncResult<Document>;

    /// Replaces the remote copy with `document`.
    ///
    /// Success is solely the absence of a transport error; any response
    /// body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Transport`] for network failures.
    fn push(&self, document: &Document) -> SyncResult<()>;
}

/// A mock remote store for testing.
#[derive(Debug, Default)]
pub struct MockRemote {
    fetch_response: RwLock<Option<Result<Document, SyncError>>>,
    fail_pushes: AtomicBool,
    pushed: RwLock<Vec<Document>>,
    fetch_calls: AtomicU64,
    push_attempts: AtomicU64,
}

impl MockRemote {
    /// Creates a mock remote with no scripted fetch response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the document returned by subsequent fetches.
    pub fn set_fetch_document(&self, document: Document) {
        *self.fetch_response.write() = Some(Ok(document));
    }

    /// Scripts an error returned by subsequent fetches.
    pub fn set_fetch_error(&self, error: SyncError) {
        *self.fetch_response.write() = Some(Err(error));
    }

    /// Makes subsequent pushes fail with a transport error.
    pub fn set_fail_pushes(&self, fail: bool) {
        self.fail_pushes.store(fail, Ordering::SeqCst);
    }

    /// Returns every document pushed so far, in order.
    #[must_use]
    pub fn pushed(&self) -> Vec<Document> {
        self.pushed.read().clone()
    }

    /// Returns how many pushes have been attempted (including failures).
    #[must_use]
    pub fn push_attempts(&self) -> u64 {
        self.push_attempts.load(Ordering::SeqCst)
    }

    /// Returns how many fetches have been performed.
    #[must_use]
    pub fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Returns the most recently pushed document, if any.
    #[must_use]
    pub fn last_pushed(&self) -> Option<Document> {
        self.pushed.read().last().cloned()
    }
}

impl RemoteStore for MockRemote {
    fn fetch(&self) -> SyncResult<Document> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch_response
            .read()
            .clone()
            .unwrap_or_else(|| Err(SyncError::transport("no mock fetch response set")))
    }

    fn push(&self, document: &Document) -> SyncResult<()> {
        self.push_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_pushes.load(Ordering::SeqCst) {
            return Err(SyncError::transport("mock push failure"));
        }
        self.pushed.write().push(document.clone());
        Ok(())
    }
}
