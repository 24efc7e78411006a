//! Error types for document operations.

use thiserror::Error;

/// Result type for document operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when mutating a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The document already holds the maximum number of pages.
    #[error("document is at capacity ({max} pages)")]
    AtCapacity {
        /// The page limit that was hit.
        max: usize,
    },

    /// The document holds only one page, which cannot be removed.
    #[error("cannot remove the last remaining page")]
    LastPage,

    /// A page index was outside the document.
    #[error("page index {index} out of bounds (document has {len} pages)")]
    OutOfBounds {
        /// The requested index.
        index: usize,
        /// The number of pages in the document.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CoreError::AtCapacity { max: 30 };
        assert_eq!(err.to_string(), "document is at capacity (30 pages)");

        let err = CoreError::OutOfBounds { index: 5, len: 2 };
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("2"));
    }
}
