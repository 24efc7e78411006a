//! Wire and cache payload for a document.

use crate::document::Document;
use crate::page::Page;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The serialized shape shared by the local cache and the remote store:
/// `{ "pages": [...], "currentPage": n }`.
///
/// Field order is fixed, so serializing a payload always yields the same
/// bytes for the same document. Deserialization of untrusted data should go
/// through [`DocumentPayload::from_value`] instead of serde, which rejects
/// nothing and coerces everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPayload {
    /// Pages in order.
    pub pages: Vec<Page>,
    /// Selected page index.
    #[serde(rename = "currentPage")]
    pub current_page: usize,
}

impl DocumentPayload {
    /// Lenient decode: builds a valid document out of any JSON value.
    ///
    /// Missing or malformed `pages` becomes a single empty page; a missing,
    /// negative, or out-of-range `currentPage` becomes 0.
    #[must_use]
    pub fn from_value(value: &Value) -> Document {
        let pages = value.get("pages").unwrap_or(&Value::Null);
        let index = value.get("currentPage").and_then(Value::as_i64);
        Document::from_untrusted(pages, index)
    }
}

impl From<DocumentPayload> for Document {
    fn from(payload: DocumentPayload) -> Self {
        Document::from_parts(payload.pages, payload.current_page)
    }
}
