//! Cache backend trait definition.

use crate::error::StoreResult;

/// A low-level cache backend for memopad.
///
/// Cache backends are **opaque string key-value stores**. They provide
/// simple get/set/remove operations and do not understand document
/// payloads; [`super::DocumentCache`] owns all interpretation.
///
/// # Invariants
///
/// - `get` returns exactly the value last passed to `set` for that key
/// - `set` is durable by the time it returns, to the extent the backend
///   supports durability at all
/// - Backends must be `Send + Sync` for concurrent access
///
/// # Implementors
///
/// - [`super::MemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait CacheBackend: Send + Sync {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or an I/O error occurs.
    /// A missing key is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the write fails.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes the value stored under `key`.
    ///
    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the removal fails.
    fn remove(&self, key: &str) -> StoreResult<()>;
}
