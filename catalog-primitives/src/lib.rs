//! Core shared types for the prompt catalog.

#![warn(missing_docs, clippy::pedantic)]

mod category;
mod error;
mod ids;
mod record;

/// Closed category and complexity enumerations.
pub use category::{Category, Complexity};
/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Identifiers for records and completion invocations.
pub use ids::{InvocationId, PromptId};
/// Immutable prompt template entries and their builder.
pub use record::{PromptRecord, PromptRecordBuilder};
