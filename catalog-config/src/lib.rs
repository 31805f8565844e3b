//! Configuration management for the completion client.
//!
//! Settings are built once at startup by [`loader::ConfigLoader`] and handed to
//! the client by value; nothing reads process state afterwards.

#![warn(missing_docs, clippy::pedantic)]

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{API_KEY_ENV_VARS, ConfigLoader};
pub use schema::{
    GeminiSettings, GenerationSettings, InstructionContext, ModelSettings, SystemInstructions,
};
