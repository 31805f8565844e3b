//! Prompt catalog utilities.
//!
//! Holds the static corpus of prompt templates, the search filter the view layer
//! recomputes on every input event, bracket placeholder scanning, and the
//! specialised prompt library used by the tutor and evaluator agents.

#![warn(missing_docs, clippy::pedantic)]

pub mod catalog;
pub mod error;
pub mod filter;
pub mod library;
pub mod placeholder;
pub mod template;

pub use catalog::Catalog;
pub use error::{PromptError, PromptResult};
pub use filter::{FilterCriteria, filter};
pub use placeholder::{placeholders, placeholders_of};
pub use template::{PromptTemplate, TemplateBuilder, TemplateError, TemplateResult};
