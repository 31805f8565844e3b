//! Shared error definitions for catalog primitives.

use thiserror::Error;
use uuid::Error as UuidError;

/// Result alias used throughout the catalog crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing catalog primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// The provided invocation identifier could not be parsed.
    #[error("invalid invocation id: {source}")]
    InvalidInvocationId {
        /// Source parsing error from the UUID library.
        #[from]
        source: UuidError,
    },

    /// Prompt identifier failed validation.
    #[error("invalid prompt id `{id}`: {reason}")]
    InvalidPromptId {
        /// The offending identifier string.
        id: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Prompt record failed validation.
    #[error("invalid prompt record: {reason}")]
    InvalidRecord {
        /// Human-readable reason for rejection.
        reason: String,
    },
}
