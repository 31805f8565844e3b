//! The completion client consumed by the view layer.

use std::fmt;
use std::sync::Arc;

use catalog_config::{GeminiSettings, InstructionContext};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::gemini::GeminiBackend;
use crate::traits::{
    BackendError, CompletionBackend, GenerateConfig, GenerateRequest, TokenUsage,
};

/// Result alias for completion calls.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// The single error kind callers see. The message always embeds the upstream
/// cause.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to communicate with the AI: {message}")]
pub struct CompletionError {
    message: String,
}

impl CompletionError {
    /// Returns the upstream cause.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<BackendError> for CompletionError {
    fn from(err: BackendError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Per-call overrides. Omitted fields fall back to the configured defaults.
///
/// Deserialisation ignores unknown keys.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompletionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl CompletionOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Supplies a system instruction.
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Caps the output length.
    #[must_use]
    pub const fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }
}

/// Generated text plus the model that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiResponse {
    /// Generated text, or the configured fallback when none was produced.
    pub content: String,
    /// Model identifier used for the call.
    pub model: String,
    /// Token accounting, when the provider reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// One-shot completion requests against a configured backend.
///
/// Cloning is cheap and clones share the backend. Calls are independent: no
/// conversation state, caching, or retries.
#[derive(Clone)]
pub struct CompletionClient {
    backend: Arc<dyn CompletionBackend>,
    settings: Arc<GeminiSettings>,
}

impl fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionClient")
            .field("provider", &self.backend.provider())
            .field("settings", &self.settings)
            .finish()
    }
}

impl CompletionClient {
    /// Creates a client over an arbitrary backend.
    #[must_use]
    pub fn new(settings: GeminiSettings, backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            settings: Arc::new(settings),
        }
    }

    /// Creates a client talking to the Gemini API.
    #[must_use]
    pub fn gemini(settings: GeminiSettings) -> Self {
        let backend = Arc::new(GeminiBackend::new(&settings));
        Self::new(settings, backend)
    }

    /// Returns the settings the client was built with.
    #[must_use]
    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    /// Returns `true` when a credential is configured. Makes no network call.
    #[must_use]
    pub fn is_credential_configured(&self) -> bool {
        self.settings.is_credential_configured()
    }

    /// Merges `options` with the configured defaults.
    #[must_use]
    pub fn prepare(&self, prompt_text: &str, options: &CompletionOptions) -> GenerateRequest {
        let model = options
            .model
            .clone()
            .unwrap_or_else(|| self.settings.models().default_model().to_owned());
        let system_instruction = options.system_instruction.clone().unwrap_or_else(|| {
            self.settings
                .system_instructions()
                .get(InstructionContext::General)
                .to_owned()
        });
        let temperature = options
            .temperature
            .unwrap_or_else(|| self.settings.generation().temperature());

        GenerateRequest {
            model,
            contents: prompt_text.to_owned(),
            config: GenerateConfig {
                system_instruction,
                temperature,
                max_output_tokens: options.max_tokens,
            },
        }
    }

    /// Sends `prompt_text` and returns the generated text.
    ///
    /// The caller validates the prompt; the client sends it as given. An empty
    /// upstream answer yields the configured fallback message.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] for any transport, credential, or upstream
    /// failure.
    pub async fn complete(
        &self,
        prompt_text: &str,
        options: &CompletionOptions,
    ) -> CompletionResult<String> {
        self.complete_with_metadata(prompt_text, options)
            .await
            .map(|response| response.content)
    }

    /// Like [`CompletionClient::complete`], also reporting model and usage.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] for any transport, credential, or upstream
    /// failure.
    pub async fn complete_with_metadata(
        &self,
        prompt_text: &str,
        options: &CompletionOptions,
    ) -> CompletionResult<AiResponse> {
        let request = self.prepare(prompt_text, options);
        let model = request.model.clone();
        debug!(
            provider = self.backend.provider(),
            model = %model,
            temperature = request.config.temperature,
            "sending completion request"
        );

        let response = self.backend.generate(request).await.map_err(|err| {
            warn!(provider = self.backend.provider(), model = %model, error = %err, "completion failed");
            CompletionError::from(err)
        })?;

        let content = match response.text {
            Some(text) if !text.is_empty() => text,
            _ => {
                debug!(model = %model, "upstream produced no text; using fallback");
                self.settings.fallback_message().to_owned()
            }
        };

        Ok(AiResponse {
            content,
            model,
            usage: response.usage,
        })
    }
}
