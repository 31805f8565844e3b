//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings file {path:?}: {reason}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O message.
        reason: String,
    },

    /// The settings file is not valid JSON for the schema.
    #[error("failed to decode settings: {reason}")]
    Decode {
        /// Decoder message.
        reason: String,
    },

    /// A field holds an unusable value.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Offending field path.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
