//! Curated prompt catalog for Brazilian legal professionals and public-exam
//! candidates.
//!
//! This crate bundles the workspace crates behind feature flags. Every
//! feature is on by default; disable `kernel` and `adapters` to use the
//! catalog and filtering without any network stack.

#![warn(missing_docs, clippy::pedantic)]

/// Identifiers, categories, and prompt records.
pub use catalog_primitives as primitives;

/// Corpus loading, filtering, placeholders, and templates (enabled by `prompts` feature).
#[cfg(feature = "prompts")]
pub use catalog_prompts as prompts;

/// Gemini settings and loading (enabled by `config` feature).
#[cfg(feature = "config")]
pub use catalog_config as config;

/// Completion client and backends (enabled by `adapters` feature).
#[cfg(feature = "adapters")]
pub use catalog_adapters as adapters;

/// Browsing session, invocations, and agents (enabled by `kernel` feature).
#[cfg(feature = "kernel")]
pub use catalog_kernel as kernel;

/// Logging setup for binaries (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use catalog_telemetry as telemetry;
