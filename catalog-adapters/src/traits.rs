//! The completion API boundary: request/response shapes and the backend trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used by backends.
pub type BackendResult<T> = Result<T, BackendError>;

/// Failures reported by a backend. The client never lets these escape; it
/// folds them into [`crate::CompletionError`].
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend is misconfigured or missing credentials.
    #[error("backend not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// Network or protocol failure before a response arrived.
    #[error("transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The provider answered with an error status.
    #[error("upstream returned {status}: {reason}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Provider message, or the raw body when it carried none.
        reason: String,
    },

    /// The provider answered with something that could not be decoded.
    #[error("malformed response: {reason}")]
    Response {
        /// Decoder message.
        reason: String,
    },
}

impl BackendError {
    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }
}

/// Generation parameters attached to a request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConfig {
    /// Instruction steering the model.
    pub system_instruction: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Optional output token cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// One fully resolved request: `{ model, contents, config }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier.
    pub model: String,
    /// Prompt text sent as the single user turn.
    pub contents: String,
    /// Generation parameters.
    pub config: GenerateConfig,
}

/// Token accounting reported by the provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens generated.
    pub completion_tokens: u32,
    /// Total billed tokens.
    pub total_tokens: u32,
}

/// Provider answer: `{ text }`, plus usage when reported.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated text; `None` when the provider produced nothing.
    #[serde(default)]
    pub text: Option<String>,
    /// Token accounting, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Creates a response carrying `text`.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            usage: None,
        }
    }

    /// Creates a response without any text.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// An external text-generation API.
///
/// Implementations perform exactly one round trip per call. No retries, no
/// streaming.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Short provider name used in logs.
    fn provider(&self) -> &'static str;

    /// Sends one request and awaits one response.
    async fn generate(&self, request: GenerateRequest) -> BackendResult<GenerateResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_keeps_provider_message() {
        let err = BackendError::Upstream {
            status: 429,
            reason: "quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "upstream returned 429: quota exceeded");
    }

    #[test]
    fn request_shape_matches_boundary() {
        let request = GenerateRequest {
            model: "gemini-3-flash-preview".into(),
            contents: "oi".into(),
            config: GenerateConfig {
                system_instruction: "seja breve".into(),
                temperature: 0.5,
                max_output_tokens: None,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["config"]["systemInstruction"], "seja breve");
        assert!(json["config"].get("maxOutputTokens").is_none());
    }
}
