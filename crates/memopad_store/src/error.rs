//! Error types for cache operations.

use std::io;
use thiserror::Error;

/// Result type for cache operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A key contained characters the backend cannot represent.
    #[error("invalid cache key: {0:?}")]
    InvalidKey(String),
}
