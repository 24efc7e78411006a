//! The in-memory remote store.

use crate::error::{ServerError, ServerResult};
use memopad_core::{Document, DocumentPayload};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, warn};

/// A last-writer-wins in-memory replica of the document.
///
/// `handle_get` and `handle_post` mirror the semantics of the HTTP
/// endpoint: GET returns the current `{ pages, currentPage }` payload,
/// POST leniently parses the body and replaces the replica wholesale. No
/// merging, no versioning: the later successful POST wins.
///
/// Reads and writes can be scripted to fail for outage testing.
///
/// # Example
///
/// ```
/// use memopad_server::MemoServer;
///
/// let server = MemoServer::new();
/// server.handle_post(r#"{"pages":[{"title":"a","body":"b"}],"currentPage":0}"#).unwrap();
/// let body = server.handle_get().unwrap();
/// assert!(body.contains("\"title\":\"a\""));
/// ```
#[derive(Debug, Default)]
pub struct MemoServer {
    document: RwLock<Document>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    posts_accepted: AtomicU64,
}

impl MemoServer {
    /// Creates a server holding the default single-empty-page document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a server seeded with a document.
    #[must_use]
    pub fn with_document(document: Document) -> Self {
        Self {
            document: RwLock::new(document),
            ..Self::default()
        }
    }

    /// Returns a copy of the current replica.
    #[must_use]
    pub fn document(&self) -> Document {
        self.document.read().clone()
    }

    /// Returns how many POSTs have been accepted.
    #[must_use]
    pub fn posts_accepted(&self) -> u64 {
        self.posts_accepted.load(Ordering::SeqCst)
    }

    /// Makes subsequent GETs fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent POSTs fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Handles a GET: returns the serialized payload.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::ReadUnavailable`] when reads are scripted to
    /// fail.
    pub fn handle_get(&self) -> ServerResult<String> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ServerError::ReadUnavailable);
        }
        let body = self.document.read().canonical_json();
        debug!(bytes = body.len(), "served document");
        Ok(body)
    }

    /// Handles a POST: leniently parses `body` and replaces the replica.
    ///
    /// A body that is not JSON at all still overwrites the replica with the
    /// default document, matching the lenient decode used everywhere else;
    /// it is logged at `warn` level.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::WriteUnavailable`] when writes are scripted
    /// to fail.
    pub fn handle_post(&self, body: &str) -> ServerResult<String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServerError::WriteUnavailable);
        }

        let value: Value = serde_json::from_str(body).unwrap_or_else(|e| {
            warn!(error = %e, "POST body was not JSON, storing default document");
            Value::Null
        });
        let incoming = DocumentPayload::from_value(&value);

        *self.document.write() = incoming;
        self.posts_accepted.fetch_add(1, Ordering::SeqCst);
        Ok("{}".to_string())
    }
}
