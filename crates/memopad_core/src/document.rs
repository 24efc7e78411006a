//! The memo document: an ordered list of pages plus a selected index.

use crate::error::{CoreError, CoreResult};
use crate::page::Page;
use crate::payload::DocumentPayload;
use serde_json::Value;

/// Minimum number of pages a document may hold.
pub const MIN_PAGES: usize = 1;

/// Maximum number of pages a document may hold.
pub const MAX_PAGES: usize = 30;

/// The full user-visible state: ordered pages plus the selected index.
///
/// # Invariants
///
/// - `MIN_PAGES <= pages.len() <= MAX_PAGES`
/// - `selected < pages.len()`
///
/// Every constructor and mutation upholds both: constructors sanitize and
/// clamp their input, mutations refuse operations that would violate the
/// bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pages: Vec<Page>,
    selected: usize,
}

impl Document {
    /// Creates a document with a single empty page, index 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pages: vec![Page::empty()],
            selected: 0,
        }
    }

    /// Builds a document from already-trusted parts, clamping the index.
    ///
    /// An empty or oversized page list is corrected: empty becomes a single
    /// empty page, excess pages beyond [`MAX_PAGES`] are dropped.
    #[must_use]
    pub fn from_parts(mut pages: Vec<Page>, selected: usize) -> Self {
        if pages.is_empty() {
            pages.push(Page::empty());
        }
        pages.truncate(MAX_PAGES);
        let selected = if selected < pages.len() { selected } else { 0 };
        Self { pages, selected }
    }

    /// Builds a document from an untrusted JSON page list and index.
    ///
    /// This is the lenient path used for cache and remote payloads: any
    /// shape of input yields a valid document. Non-array or empty input
    /// becomes a single empty page; entries that are not objects, or whose
    /// `title`/`body` are missing or not strings, have those fields coerced
    /// to the empty string.
    #[must_use]
    pub fn from_untrusted(pages: &Value, selected: Option<i64>) -> Self {
        let pages = sanitize_pages(pages);
        let selected = match selected {
            Some(i) if i >= 0 && (i as usize) < pages.len() => i as usize,
            _ => 0,
        };
        Self { pages, selected }
    }

    /// Returns the pages in order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Returns the number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false: a document holds at least one page.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the selected page index.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Returns the currently selected page.
    #[must_use]
    pub fn selected_page(&self) -> &Page {
        &self.pages[self.selected]
    }

    /// Overwrites the selected page's title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.pages[self.selected].title = title.into();
    }

    /// Overwrites the selected page's body.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.pages[self.selected].body = body.into();
    }

    /// Switches the selection to `index`.
    ///
    /// Returns `Ok(false)` if `index` is already selected (no change),
    /// `Ok(true)` if the selection moved.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfBounds`] if `index` is not a valid page.
    pub fn select(&mut self, index: usize) -> CoreResult<bool> {
        if index >= self.pages.len() {
            return Err(CoreError::OutOfBounds {
                index,
                len: self.pages.len(),
            });
        }
        if index == self.selected {
            return Ok(false);
        }
        self.selected = index;
        Ok(true)
    }

    /// Appends an empty page and selects it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AtCapacity`] at [`MAX_PAGES`]; the document is
    /// left unchanged.
    pub fn push_page(&mut self) -> CoreResult<()> {
        if self.pages.len() >= MAX_PAGES {
            return Err(CoreError::AtCapacity { max: MAX_PAGES });
        }
        self.pages.push(Page::empty());
        self.selected = self.pages.len() - 1;
        Ok(())
    }

    /// Removes the selected page, clamping the selection to the last page
    /// when the removed page was at the end.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LastPage`] when only one page remains; the
    /// document is left unchanged.
    pub fn remove_selected(&mut self) -> CoreResult<()> {
        if self.pages.len() <= MIN_PAGES {
            return Err(CoreError::LastPage);
        }
        self.pages.remove(self.selected);
        if self.selected >= self.pages.len() {
            self.selected = self.pages.len() - 1;
        }
        Ok(())
    }

    /// Returns the wire/cache payload for this document.
    #[must_use]
    pub fn payload(&self) -> DocumentPayload {
        DocumentPayload {
            pages: self.pages.clone(),
            current_page: self.selected,
        }
    }

    /// Returns the canonical serialized form.
    ///
    /// Two replicas hold the same state iff their canonical forms are
    /// byte-equal. Field order is fixed by [`DocumentPayload`], so this is
    /// stable across processes.
    #[must_use]
    pub fn canonical_json(&self) -> String {
        // Serialization of a plain struct with string/usize fields cannot fail.
        serde_json::to_string(&self.payload()).unwrap_or_default()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Coerces an untrusted JSON value into a valid page list.
fn sanitize_pages(value: &Value) -> Vec<Page> {
    let Value::Array(entries) = value else {
        return vec![Page::empty()];
    };
    if entries.is_empty() {
        return vec![Page::empty()];
    }
    entries
        .iter()
        .take(MAX_PAGES)
        .map(|entry| Page {
            title: string_field(entry, "title"),
            body: string_field(entry, "body"),
        })
        .collect()
}

fn string_field(entry: &Value, key: &str) -> String {
    match entry.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn new_document_is_single_empty_page() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.selected(), 0);
        assert!(doc.selected_page().is_empty());
    }

    #[test]
    fn from_parts_clamps_index() {
        let pages = vec![Page::new("a", "1"), Page::new("b", "2")];
        let doc = Document::from_parts(pages, 7);
        assert_eq!(doc.selected(), 0);
    }

    #[test]
    fn from_parts_empty_list_becomes_default() {
        let doc = Document::from_parts(Vec::new(), 3);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.selected(), 0);
    }

    #[test]
    fn from_untrusted_non_array() {
        for value in [json!(null), json!("pages"), json!(42), json!({})] {
            let doc = Document::from_untrusted(&value, Some(0));
            assert_eq!(doc.len(), 1);
            assert!(doc.selected_page().is_empty());
        }
    }

    #[test]
    fn from_untrusted_coerces_bad_fields() {
        let value = json!([
            { "title": "ok", "body": "fine" },
            { "title": 12, "body": null },
            { "body": "no title" },
            "not an object",
        ]);
        let doc = Document::from_untrusted(&value, Some(1));
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.pages()[0], Page::new("ok", "fine"));
        assert_eq!(doc.pages()[1], Page::empty());
        assert_eq!(doc.pages()[2], Page::new("", "no title"));
        assert_eq!(doc.pages()[3], Page::empty());
        assert_eq!(doc.selected(), 1);
    }

    #[test]
    fn from_untrusted_rejects_bad_index() {
        let value = json!([{ "title": "a", "body": "" }]);
        assert_eq!(Document::from_untrusted(&value, Some(5)).selected(), 0);
        assert_eq!(Document::from_untrusted(&value, Some(-1)).selected(), 0);
        assert_eq!(Document::from_untrusted(&value, None).selected(), 0);
    }

    #[test]
    fn select_same_index_is_noop() {
        let mut doc = Document::from_parts(vec![Page::empty(), Page::empty()], 0);
        assert_eq!(doc.select(0), Ok(false));
        assert_eq!(doc.select(1), Ok(true));
        assert_eq!(doc.selected(), 1);
    }

    #[test]
    fn select_out_of_bounds() {
        let mut doc = Document::new();
        assert_eq!(doc.select(1), Err(CoreError::OutOfBounds { index: 1, len: 1 }));
    }

    #[test]
    fn push_page_appends_and_selects() {
        let mut doc = Document::from_parts(vec![Page::new("A", "1")], 0);
        doc.push_page().unwrap();
        doc.push_page().unwrap();
        doc.push_page().unwrap();
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.selected(), 3);
        assert!(doc.pages()[1].is_empty());
        assert!(doc.pages()[3].is_empty());
    }

    #[test]
    fn push_page_refuses_at_capacity() {
        let mut doc = Document::from_parts(vec![Page::empty(); MAX_PAGES], 2);
        let before = doc.clone();
        assert_eq!(doc.push_page(), Err(CoreError::AtCapacity { max: MAX_PAGES }));
        assert_eq!(doc, before);
    }

    #[test]
    fn remove_selected_clamps_to_last() {
        let mut doc = Document::from_parts(vec![Page::new("a", ""), Page::new("b", "")], 1);
        doc.remove_selected().unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.selected(), 0);
        assert_eq!(doc.selected_page().title, "a");
    }

    #[test]
    fn remove_selected_middle_keeps_index() {
        let pages = vec![Page::new("a", ""), Page::new("b", ""), Page::new("c", "")];
        let mut doc = Document::from_parts(pages, 1);
        doc.remove_selected().unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.selected(), 1);
        assert_eq!(doc.selected_page().title, "c");
    }

    #[test]
    fn remove_selected_refuses_last_page() {
        let mut doc = Document::new();
        assert_eq!(doc.remove_selected(), Err(CoreError::LastPage));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn canonical_json_shape() {
        let doc = Document::from_parts(vec![Page::new("A", "1")], 0);
        assert_eq!(
            doc.canonical_json(),
            r#"{"pages":[{"title":"A","body":"1"}],"currentPage":0}"#
        );
    }

    #[test]
    fn canonical_json_equality_tracks_state() {
        let a = Document::from_parts(vec![Page::new("A", "1")], 0);
        let mut b = a.clone();
        assert_eq!(a.canonical_json(), b.canonical_json());
        b.set_body("2");
        assert_ne!(a.canonical_json(), b.canonical_json());
    }

    proptest! {
        #[test]
        fn sanitize_always_yields_valid_document(value in arb_json(), index in any::<i64>()) {
            let doc = Document::from_untrusted(&value, Some(index));
            prop_assert!(doc.len() >= MIN_PAGES);
            prop_assert!(doc.len() <= MAX_PAGES);
            prop_assert!(doc.selected() < doc.len());
        }

        #[test]
        fn mutations_keep_selection_in_bounds(
            count in 1usize..10,
            ops in prop::collection::vec(0u8..4, 0..40),
        ) {
            let mut doc = Document::from_parts(vec![Page::empty(); count], 0);
            for op in ops {
                match op {
                    0 => { let _ = doc.push_page(); }
                    1 => { let _ = doc.remove_selected(); }
                    2 => { let _ = doc.select(doc.len() - 1); }
                    _ => { let _ = doc.select(0); }
                }
                prop_assert!(doc.selected() < doc.len());
                prop_assert!(doc.len() >= MIN_PAGES);
                prop_assert!(doc.len() <= MAX_PAGES);
            }
        }
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 32, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
                prop::collection::hash_map("[a-z]{1,5}", inner, 0..4).prop_map(|m| {
                    Value::Object(m.into_iter().collect())
                }),
            ]
        })
    }
}
