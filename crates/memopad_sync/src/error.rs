//! Error types for remote replication.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during replication or controller operations.
///
/// Nothing here is retried automatically; the next user action or session
/// reopen is the retry path.
#[derive(Debug, Clone, Error)]
pub enum SyncError {
    /// Network or transport error.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote response body was not valid JSON.
    #[error("malformed remote response: {0}")]
    MalformedResponse(String),

    /// Not connected to the remote store.
    #[error("not connected to remote store")]
    NotConnected,

    /// A mutation was attempted while the startup reconcile holds the lock.
    #[error("session is locked during reconciliation")]
    Locked,

    /// An operation was attempted in the wrong session state.
    #[error("invalid operation in state {state:?}: {operation}")]
    InvalidState {
        /// The session state at the time of the call.
        state: String,
        /// The attempted operation.
        operation: String,
    },
}

impl SyncError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}
