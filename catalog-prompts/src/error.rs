//! Errors raised while loading a catalog.

use catalog_primitives::PromptId;
use thiserror::Error;

/// Result alias for catalog operations.
pub type PromptResult<T> = Result<T, PromptError>;

/// Errors that can occur while assembling a catalog.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The corpus document could not be decoded.
    #[error("failed to decode prompt corpus: {reason}")]
    Decode {
        /// Decoder message.
        reason: String,
    },

    /// Two records share an identifier.
    #[error("duplicate prompt id `{id}`")]
    DuplicateId {
        /// The repeated identifier.
        id: PromptId,
    },
}
