//! Error types for the reference server.

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors the reference server can report.
#[derive(Debug, Clone, Error)]
pub enum ServerError {
    /// The store is not serving reads.
    #[error("store unavailable for reads")]
    ReadUnavailable,

    /// The store is not serving writes.
    #[error("store unavailable for writes")]
    WriteUnavailable,
}
