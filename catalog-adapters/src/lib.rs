//! Completion client and the upstream backends it talks to.
//!
//! [`client::CompletionClient`] merges per-call options with the configured
//! defaults, performs exactly one round trip through a
//! [`traits::CompletionBackend`], and normalises every failure into
//! [`client::CompletionError`].

#![warn(missing_docs, clippy::pedantic)]

pub mod client;
pub mod gemini;
pub mod traits;

mod http_client;

pub use client::{AiResponse, CompletionClient, CompletionError, CompletionOptions, CompletionResult};
pub use traits::{
    BackendError, BackendResult, CompletionBackend, GenerateConfig, GenerateRequest,
    GenerateResponse, TokenUsage,
};
