//! Section representation for documentation pages.
//!
//! A section is one navigable heading within a page. Pages either declare
//! their sections explicitly through a `sections` export or, when enabled,
//! have them derived from their headings. Order within a page is document
//! order and drives the order of rendered navigation.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One heading entry used for in-page navigation.
pub struct Section {
    /// Anchor identifier, unique within its page.
    pub id: String,
    /// Heading text without markup symbols.
    pub title: String,
    /// Free-form badge attached to the heading (e.g. an HTTP verb).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Heading depth when the section was derived from a heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
}

impl Section {
    #[must_use]
    /// Creates a section with only an id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tag: None,
            level: None,
        }
    }
}

/// Returns the first id that appears more than once, if any.
pub(crate) fn first_duplicate_id(sections: &[Section]) -> Option<&str> {
    let mut seen = std::collections::HashSet::new();
    sections
        .iter()
        .map(|s| s.id.as_str())
        .find(|id| !seen.insert(*id))
}

/// Turns heading text into an anchor id.
///
/// ASCII alphanumerics are lowercased and kept; every other run of characters
/// collapses into a single `-`, with none at either end.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
