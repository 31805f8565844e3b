//! `{{variable}}` substitution for the built-in prompt library.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Result alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while rendering a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A required variable was not provided.
    #[error("missing required variable: {name}")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
    },

    /// The template text is malformed.
    #[error("malformed template: {reason}")]
    Malformed {
        /// Reason for the failure.
        reason: String,
    },
}

/// Prompt text with `{{name}}` slots.
///
/// Slots resolve from runtime values first, then from defaults set on the
/// template. An unresolved required slot is an error; an unresolved optional
/// slot renders as the empty string.
///
/// # Examples
///
/// ```
/// use catalog_prompts::template::PromptTemplate;
///
/// let template = PromptTemplate::builder("Explique {{topic}} de forma {{level}}.")
///     .with_required_variable("topic")
///     .with_variable("level", "intermediária")
///     .build()
///     .unwrap();
///
/// let rendered = template.render_pairs(&[("topic", "litisconsórcio")]).unwrap();
/// assert_eq!(rendered, "Explique litisconsórcio de forma intermediária.");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromptTemplate {
    template: String,
    defaults: HashMap<String, String>,
    required: Vec<String>,
}

impl PromptTemplate {
    /// Creates a template with no defaults and no required slots.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            defaults: HashMap::new(),
            required: Vec::new(),
        }
    }

    /// Returns a builder for constructing templates.
    #[must_use]
    pub fn builder(template: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder::new(template)
    }

    /// Sets a default value.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.defaults.insert(name.into(), value.into());
    }

    /// Renders with defaults only.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingVariable`] if a required slot has no value.
    pub fn render(&self) -> TemplateResult<String> {
        self.render_with(&HashMap::new())
    }

    /// Renders with runtime values given as name/value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingVariable`] if a required slot has no value.
    pub fn render_pairs(&self, pairs: &[(&str, &str)]) -> TemplateResult<String> {
        let runtime: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        self.render_with(&runtime)
    }

    /// Renders with runtime values that take precedence over defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingVariable`] if a required slot has no value.
    pub fn render_with(&self, runtime_vars: &HashMap<String, String>) -> TemplateResult<String> {
        let mut output = String::with_capacity(self.template.len());

        for segment in segments(&self.template) {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Slot(name) => {
                    let value = runtime_vars
                        .get(name)
                        .or_else(|| self.defaults.get(name));
                    match value {
                        Some(value) => output.push_str(value),
                        None if self.is_required(name) => {
                            return Err(TemplateError::MissingVariable {
                                name: name.to_owned(),
                            });
                        }
                        None => {}
                    }
                }
            }
        }

        Ok(output)
    }

    /// Returns the slot names in order of appearance.
    #[must_use]
    pub fn slots(&self) -> Vec<&str> {
        segments(&self.template)
            .filter_map(|segment| match segment {
                Segment::Slot(name) => Some(name),
                Segment::Text(_) => None,
            })
            .collect()
    }

    /// Returns the raw template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|required| required == name)
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Builder for [`PromptTemplate`].
#[derive(Debug)]
pub struct TemplateBuilder {
    template: String,
    defaults: HashMap<String, String>,
    required: Vec<String>,
}

impl TemplateBuilder {
    /// Creates a new builder with the supplied template text.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            defaults: HashMap::new(),
            required: Vec::new(),
        }
    }

    /// Sets a default value for a slot.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    /// Declares a slot that must be resolved at render time.
    #[must_use]
    pub fn with_required_variable(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Builds the template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Malformed`] if a `{{` is never closed or a slot
    /// name is empty.
    pub fn build(self) -> TemplateResult<PromptTemplate> {
        validate(&self.template)?;
        Ok(PromptTemplate {
            template: self.template,
            defaults: self.defaults,
            required: self.required,
        })
    }
}

enum Segment<'a> {
    Text(&'a str),
    Slot(&'a str),
}

fn segments(template: &str) -> impl Iterator<Item = Segment<'_>> {
    let mut rest = template;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find("{{") {
            Some(0) => {
                let after = &rest[2..];
                if let Some(close) = after.find("}}") {
                    let name = after[..close].trim();
                    rest = &after[close + 2..];
                    Some(Segment::Slot(name))
                } else {
                    let text = rest;
                    rest = "";
                    Some(Segment::Text(text))
                }
            }
            Some(open) => {
                let text = &rest[..open];
                rest = &rest[open..];
                Some(Segment::Text(text))
            }
            None => {
                let text = rest;
                rest = "";
                Some(Segment::Text(text))
            }
        }
    })
}

fn validate(template: &str) -> TemplateResult<()> {
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            return Err(TemplateError::Malformed {
                reason: format!("unclosed slot at byte {}", template.len() - rest.len() + open),
            });
        };
        if after[..close].trim().is_empty() {
            return Err(TemplateError::Malformed {
                reason: "empty slot name".into(),
            });
        }
        rest = &after[close + 2..];
    }
    Ok(())
}
