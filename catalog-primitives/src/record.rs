//! Prompt template records.

use serde::{Deserialize, Serialize};

use crate::{Category, Complexity, Error, PromptId, Result};

/// One static prompt template entry.
///
/// Records are immutable once built; the catalog hands out shared references
/// for the lifetime of the process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordData", rename_all = "camelCase")]
pub struct PromptRecord {
    id: PromptId,
    title: String,
    description: String,
    content: String,
    category: Category,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    complexity: Complexity,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    is_new: bool,
}

impl PromptRecord {
    /// Starts building a [`PromptRecord`].
    #[must_use]
    pub fn builder(id: PromptId) -> PromptRecordBuilder {
        PromptRecordBuilder {
            id,
            title: None,
            description: String::new(),
            content: None,
            category: None,
            tags: Vec::new(),
            complexity: Complexity::Intermediate,
            is_new: false,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> &PromptId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the short description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the literal template text, bracketed placeholders included.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the record category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the tag labels in their original order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the display complexity.
    #[must_use]
    pub const fn complexity(&self) -> Complexity {
        self.complexity
    }

    /// Returns the "new" display flag.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.is_new
    }
}

/// Builder for [`PromptRecord`].
#[derive(Debug)]
pub struct PromptRecordBuilder {
    id: PromptId,
    title: Option<String>,
    description: String,
    content: Option<String>,
    category: Option<Category>,
    tags: Vec<String>,
    complexity: Complexity,
    is_new: bool,
}

impl PromptRecordBuilder {
    /// Sets the display title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] when the title is blank.
    pub fn title(mut self, title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(Error::InvalidRecord {
                reason: format!("record `{}` title cannot be empty", self.id),
            });
        }
        self.title = Some(title);
        Ok(self)
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the template text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] when the content is blank.
    pub fn content(mut self, content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(Error::InvalidRecord {
                reason: format!("record `{}` content cannot be empty", self.id),
            });
        }
        self.content = Some(content);
        Ok(self)
    }

    /// Sets the category.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] for [`Category::All`] and
    /// [`Category::Unrecognized`], which are selectors rather than subjects.
    pub fn category(mut self, category: Category) -> Result<Self> {
        if !category.is_concrete() {
            return Err(Error::InvalidRecord {
                reason: format!(
                    "record `{}` cannot be filed under `{}`",
                    self.id,
                    category.key()
                ),
            });
        }
        self.category = Some(category);
        Ok(self)
    }

    /// Appends a tag. Duplicates are kept.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Replaces the tag list.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the complexity.
    #[must_use]
    pub const fn complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    /// Marks the record as new.
    #[must_use]
    pub const fn new_badge(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    /// Consumes the builder and returns the record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] if title, content, or category is missing.
    pub fn build(self) -> Result<PromptRecord> {
        let Self {
            id,
            title,
            description,
            content,
            category,
            tags,
            complexity,
            is_new,
        } = self;
        let missing = |field: &str| Error::InvalidRecord {
            reason: format!("record `{id}` {field} must be provided"),
        };
        let title = title.ok_or_else(|| missing("title"))?;
        let content = content.ok_or_else(|| missing("content"))?;
        let category = category.ok_or_else(|| missing("category"))?;

        Ok(PromptRecord {
            id,
            title,
            description,
            content,
            category,
            tags,
            complexity,
            is_new,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordData {
    id: PromptId,
    title: String,
    #[serde(default)]
    description: String,
    content: String,
    category: Category,
    #[serde(default)]
    tags: Vec<String>,
    complexity: Complexity,
    #[serde(default)]
    is_new: bool,
}

impl TryFrom<RecordData> for PromptRecord {
    type Error = Error;

    fn try_from(data: RecordData) -> Result<Self> {
        PromptRecord::builder(data.id)
            .title(data.title)?
            .description(data.description)
            .content(data.content)?
            .category(data.category)?
            .tags(data.tags)
            .complexity(data.complexity)
            .new_badge(data.is_new)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> PromptId {
        PromptId::new(value).expect("id")
    }

    #[test]
    fn builds_record() {
        let record = PromptRecord::builder(id("101"))
            .title("Cronograma de Estudos Inteligente")
            .unwrap()
            .description("Plano de estudos")
            .content("Crie um cronograma para [CARGO].")
            .unwrap()
            .category(Category::ExamPrep)
            .unwrap()
            .tag("Edital")
            .tag("Edital")
            .complexity(Complexity::Intermediate)
            .new_badge(true)
            .build()
            .unwrap();

        assert_eq!(record.id().as_str(), "101");
        assert_eq!(record.category(), Category::ExamPrep);
        assert_eq!(record.tags(), ["Edital", "Edital"]);
        assert!(record.is_new());
    }

    #[test]
    fn selectors_are_not_record_categories() {
        let all = PromptRecord::builder(id("1")).category(Category::All);
        assert!(matches!(all, Err(Error::InvalidRecord { .. })));
        let unknown = PromptRecord::builder(id("1")).category(Category::Unrecognized);
        assert!(unknown.is_err());
    }

    #[test]
    fn title_is_required() {
        let result = PromptRecord::builder(id("1")).build();
        assert!(result.is_err());
    }

    #[test]
    fn deserialization_goes_through_validation() {
        let json = r#"{
            "id": "4",
            "title": "E-mail Formal para Cliente",
            "description": "Explicação de andamento processual.",
            "content": "Escreva um e-mail.",
            "category": "client_comms",
            "tags": ["Comunicação"],
            "complexity": "Iniciante"
        }"#;
        let record: PromptRecord = serde_json::from_str(json).expect("record");
        assert_eq!(record.complexity(), Complexity::Beginner);
        assert!(!record.is_new());

        let invalid = json.replace("client_comms", "all");
        assert!(serde_json::from_str::<PromptRecord>(&invalid).is_err());
    }
}
