//! Search and category filtering over the catalog.
//!
//! A record is visible when it passes both gates:
//!
//! * the category gate: the selected category is `All` or equals the record's;
//! * the text gate: the search text is empty, or occurs case-insensitively in the
//!   title, the description, or at least one tag.
//!
//! Filtering is a stable linear scan; relative order of the source is kept.

use catalog_primitives::{Category, PromptRecord};
use serde::{Deserialize, Serialize};

/// Current search text and category selection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    search_text: String,
    #[serde(default)]
    category: Category,
}

impl FilterCriteria {
    /// Creates criteria from a search text and a category.
    #[must_use]
    pub fn new(search_text: impl Into<String>, category: Category) -> Self {
        Self {
            search_text: search_text.into(),
            category,
        }
    }

    /// Replaces the search text.
    #[must_use]
    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = search_text.into();
        self
    }

    /// Replaces the category selection.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Returns the raw search text.
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Returns the selected category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns `true` when `record` passes both gates.
    #[must_use]
    pub fn matches(&self, record: &PromptRecord) -> bool {
        Matcher::new(self).matches(record)
    }
}

/// Criteria with the search text folded once per scan.
struct Matcher {
    category: Category,
    needle: String,
}

impl Matcher {
    fn new(criteria: &FilterCriteria) -> Self {
        Self {
            category: criteria.category,
            needle: criteria.search_text.to_lowercase(),
        }
    }

    fn matches(&self, record: &PromptRecord) -> bool {
        self.category.admits(record.category()) && self.matches_text(record)
    }

    fn matches_text(&self, record: &PromptRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        self.occurs_in(record.title())
            || self.occurs_in(record.description())
            || record.tags().iter().any(|tag| self.occurs_in(tag))
    }

    fn occurs_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }
}

/// Returns the records matching `criteria`, preserving source order.
///
/// Accepts any iterator of record references so a previous result can be
/// filtered again.
pub fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a PromptRecord>
where
    I: IntoIterator<Item = &'a PromptRecord>,
{
    let matcher = Matcher::new(criteria);
    records
        .into_iter()
        .filter(|record| matcher.matches(record))
        .collect()
}
