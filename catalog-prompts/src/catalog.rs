//! The read-only prompt corpus.

use std::collections::HashSet;

use catalog_primitives::{Category, PromptId, PromptRecord};
use tracing::debug;

use crate::error::{PromptError, PromptResult};
use crate::filter::{FilterCriteria, filter};

const BUILTIN_CORPUS: &str = include_str!("../data/prompts.json");

/// Immutable list of prompt records.
///
/// Nothing inserts, updates, or removes records after construction.
#[derive(Clone, Debug)]
pub struct Catalog {
    records: Vec<PromptRecord>,
}

impl Catalog {
    /// Creates a catalog from already validated records.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::DuplicateId`] if two records share an identifier.
    pub fn new(records: Vec<PromptRecord>) -> PromptResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(PromptError::DuplicateId {
                    id: record.id().clone(),
                });
            }
        }
        Ok(Self { records })
    }

    /// Decodes a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Decode`] for malformed JSON or invalid records and
    /// [`PromptError::DuplicateId`] for repeated identifiers.
    pub fn from_json(text: &str) -> PromptResult<Self> {
        let records: Vec<PromptRecord> =
            serde_json::from_str(text).map_err(|err| PromptError::Decode {
                reason: err.to_string(),
            })?;
        let catalog = Self::new(records)?;
        debug!(records = catalog.len(), "prompt corpus loaded");
        Ok(catalog)
    }

    /// Loads the corpus shipped with the crate.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded corpus is corrupt.
    pub fn builtin() -> PromptResult<Self> {
        Self::from_json(BUILTIN_CORPUS)
    }

    /// Returns every record in source order.
    #[must_use]
    pub fn records(&self) -> &[PromptRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PromptRecord> {
        self.records.iter().find(|record| record.id().as_str() == id)
    }

    /// Looks up a record by typed identifier.
    #[must_use]
    pub fn get_by_id(&self, id: &PromptId) -> Option<&PromptRecord> {
        self.get(id.as_str())
    }

    /// Returns the records matching `criteria`, in source order.
    #[must_use]
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&PromptRecord> {
        filter(&self.records, criteria)
    }

    /// Returns the categories offered for selection, `All` first.
    #[must_use]
    pub const fn categories(&self) -> &'static [Category] {
        &Category::SELECTABLE
    }
}
