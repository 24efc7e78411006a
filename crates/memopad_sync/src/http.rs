//! HTTP transport implementation.
//!
//! This module provides an HTTP-based [`RemoteStore`]. The actual HTTP
//! client is abstracted via a trait so the embedder can supply whichever
//! library its platform offers (reqwest, ureq, a browser fetch bridge).

use crate::error::{SyncError, SyncResult};
use crate::transport::RemoteStore;
use memopad_core::{Document, DocumentPayload};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual HTTP transport. Bodies are
/// UTF-8 JSON text on both sides; errors are plain messages the transport
/// wraps into [`SyncError::Transport`].
pub trait HttpClient: Send + Sync {
    /// Sends a GET request and returns the response body.
    fn get(&self, url: &str) -> Result<String, String>;

    /// Sends a POST request with the given body and returns the response body.
    fn post(&self, url: &str, body: String) -> Result<String, String>;

    /// Checks if the client is connected/healthy.
    fn is_healthy(&self) -> bool;
}

/// HTTP-based remote store.
///
/// `GET endpoint` returns `{ "pages": [...], "currentPage": n }`;
/// `POST endpoint` replaces the remote copy with the request body. The
/// response body of a POST is ignored: success is the absence of a
/// transport error.
pub struct HttpRemote<C: HttpClient> {
    /// Endpoint URL of the remote store.
    endpoint: String,
    /// HTTP client implementation.
    client: C,
    /// Connection state.
    connected: AtomicBool,
    /// Last error message.
    last_error: RwLock<Option<String>>,
}

impl<C: HttpClient> HttpRemote<C> {
    /// Creates a new HTTP remote store.
    pub fn new(endpoint: impl Into<String>, client: C) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
            connected: AtomicBool::new(true),
            last_error: RwLock::new(None),
        }
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the last transport error message, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    /// Returns true if the transport considers itself connected.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst) && self.client.is_healthy()
    }

    fn record_failure(&self, message: &str) -> SyncError {
        *self.last_error.write() = Some(message.to_string());
        SyncError::transport(message)
    }

    fn clear_error(&self) {
        *self.last_error.write() = None;
    }
}

impl<C: HttpClient> RemoteStore for HttpRemote<C> {
    fn fetch(&self) -> SyncResult<Document> {
        if !self.is_connected() {
            return Err(SyncError::NotConnected);
        }

        let body = self
            .client
            .get(&self.endpoint)
            .map_err(|e| self.record_failure(&e))?;
        self.clear_error();

        // Parse as text first: a misdeployed endpoint often answers with an
        // HTML error page, which must degrade to a malformed-response error
        // rather than a panic or a bogus document.
        let value: Value = serde_json::from_str(&body).map_err(|e| {
            debug!(head = %body.chars().take(80).collect::<String>(), "non-JSON remote response");
            SyncError::MalformedResponse(e.to_string())
        })?;

        Ok(DocumentPayload::from_value(&value))
    }

    fn push(&self, document: &Document) -> SyncResult<()> {
        if !self.is_connected() {
            return Err(SyncError::NotConnected);
        }

        let body = document.canonical_json();
        self.client
            .post(&self.endpoint, body)
            .map_err(|e| self.record_failure(&e))?;
        self.clear_error();
        Ok(())
    }
}

/// A loopback HTTP client that routes requests directly to a server value.
///
/// Useful for testing without network overhead.
pub struct LoopbackClient<S: LoopbackServer> {
    server: S,
}

impl<S: LoopbackServer> LoopbackClient<S> {
    /// Creates a new loopback client connected to the given server.
    pub fn new(server: S) -> Self {
        Self { server }
    }
}

/// Trait for servers that can handle loopback requests.
pub trait LoopbackServer: Send + Sync {
    /// Handles a GET request and returns the response body.
    fn handle_get(&self) -> Result<String, String>;

    /// Handles a POST request and returns the response body.
    fn handle_post(&self, body: &str) -> Result<String, String>;
}

impl<S: LoopbackServer> HttpClient for LoopbackClient<S> {
    fn get(&self, _url: &str) -> Result<String, String> {
        self.server.handle_get()
    }

    fn post(&self, _url: &str, body: String) -> Result<String, String> {
        self.server.handle_post(&body)
    }

    fn is_healthy(&self) -> bool {
        true
    }
}
