//! Document-aware layer over a cache backend.

use crate::backend::CacheBackend;
use crate::error::StoreResult;
use memopad_core::Document;
use serde_json::Value;
use tracing::{debug, warn};

/// Cache key holding the serialized page list.
pub const PAGES_KEY: &str = "pages";

/// Cache key holding the serialized selected-page index.
pub const INDEX_KEY: &str = "currentPageIndex";

/// Reads and writes a [`Document`] through a [`CacheBackend`].
///
/// The cache holds two keys: [`PAGES_KEY`] (a JSON array of pages) and
/// [`INDEX_KEY`] (a decimal integer). Loading is lenient: missing, corrupt,
/// or structurally invalid data degrades to the default single-empty-page
/// document rather than failing, so startup can always render something.
pub struct DocumentCache<B: CacheBackend> {
    backend: B,
}

impl<B: CacheBackend> DocumentCache<B> {
    /// Creates a document cache over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads the cached document.
    ///
    /// This never fails: backend errors and unparseable data fall back to
    /// [`Document::new`], logged at `warn` level. An index that does not
    /// parse or is out of range falls back to 0.
    pub fn load(&self) -> Document {
        let pages = match self.backend.get(PAGES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(error = %e, "cached pages are not valid JSON, using default");
                    Value::Null
                }
            },
            Ok(None) => {
                debug!("no cached pages, starting with default document");
                Value::Null
            }
            Err(e) => {
                warn!(error = %e, "cache read failed, using default document");
                Value::Null
            }
        };

        let index = match self.backend.get(INDEX_KEY) {
            Ok(Some(raw)) => raw.trim().parse::<i64>().ok(),
            _ => None,
        };

        Document::from_untrusted(&pages, index)
    }

    /// Writes the document to the cache (both keys).
    ///
    /// # Errors
    ///
    /// Propagates backend write failures. Callers treat these as non-fatal:
    /// the in-memory document remains the source of truth.
    pub fn store(&self, document: &Document) -> StoreResult<()> {
        // The pages array alone, not the full payload: the index lives
        // under its own key.
        let pages = serde_json::to_string(document.pages()).unwrap_or_else(|_| "[]".into());
        self.backend.set(PAGES_KEY, &pages)?;
        self.backend.set(INDEX_KEY, &document.selected().to_string())?;
        Ok(())
    }
}
