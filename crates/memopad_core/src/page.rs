//! A single memo page.

use serde::{Deserialize, Serialize};

/// One memo unit: a title and a body of free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Short label shown on the page's tab.
    pub title: String,
    /// Free-form memo text.
    pub body: String,
}

impl Page {
    /// Creates a page with the given title and body.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Creates an empty page (both fields are the empty string).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if both title and body are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }
}
