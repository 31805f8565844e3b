//! Strongly typed completion settings.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const DEFAULT_FALLBACK: &str = "Não foi possível gerar uma resposta. Tente novamente.";
const FLASH_MODEL: &str = "gemini-3-flash-preview";
const PRO_MODEL: &str = "gemini-3-pro-preview";

/// Everything the completion client needs: credential, models, generation
/// defaults, and system instructions.
///
/// Every field has a default, so a partial JSON document is a valid source.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GeminiSettings {
    #[serde(skip_serializing)]
    api_key: String,
    models: ModelSettings,
    generation: GenerationSettings,
    system_instructions: SystemInstructions,
    fallback_message: String,
    base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            models: ModelSettings::default(),
            generation: GenerationSettings::default(),
            system_instructions: SystemInstructions::default(),
            fallback_message: DEFAULT_FALLBACK.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("credential_configured", &self.is_credential_configured())
            .field("models", &self.models)
            .field("generation", &self.generation)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl GeminiSettings {
    /// Returns `true` when a non-empty credential is present.
    #[must_use]
    pub fn is_credential_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Returns the credential.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the model identifiers.
    #[must_use]
    pub const fn models(&self) -> &ModelSettings {
        &self.models
    }

    /// Returns the generation defaults.
    #[must_use]
    pub const fn generation(&self) -> &GenerationSettings {
        &self.generation
    }

    /// Returns the system instructions.
    #[must_use]
    pub const fn system_instructions(&self) -> &SystemInstructions {
        &self.system_instructions
    }

    /// Returns the text returned when the upstream produces no content.
    #[must_use]
    pub fn fallback_message(&self) -> &str {
        &self.fallback_message
    }

    /// Returns the API base URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the explicit request timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Supplies an explicit credential.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Replaces the default model identifier.
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.models.default = model.into();
        self
    }

    /// Replaces the default sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.generation.temperature = temperature;
        self
    }

    /// Replaces the text used when the upstream produces no content.
    #[must_use]
    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    /// Overrides the API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the URL has no http(s) scheme.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> ConfigResult<Self> {
        self.base_url = sanitize_base_url(base_url.as_ref())?;
        Ok(self)
    }

    /// Enforces a request timeout; without one the transport default applies.
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub(crate) fn set_api_key(&mut self, key: String) {
        self.api_key = key;
    }

    /// Checks every field and normalises the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(mut self) -> ConfigResult<Self> {
        let temperature = self.generation.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Invalid {
                field: "generation.temperature",
                reason: format!("{temperature} is outside 0.0..=2.0"),
            });
        }
        for (field, value) in [
            ("models.flash", &self.models.flash),
            ("models.pro", &self.models.pro),
            ("models.default", &self.models.default),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "model id cannot be empty".into(),
                });
            }
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                field: "timeoutSecs",
                reason: "timeout must be positive".into(),
            });
        }
        self.base_url = sanitize_base_url(&self.base_url)?;
        Ok(self)
    }
}

/// Model identifiers by purpose.
///
/// When `default` is omitted from a settings file it follows `flash`, so
/// overriding only the fast model also changes the default.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "ModelData")]
pub struct ModelSettings {
    flash: String,
    pro: String,
    default: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct ModelData {
    flash: Option<String>,
    pro: Option<String>,
    default: Option<String>,
}

impl From<ModelData> for ModelSettings {
    fn from(data: ModelData) -> Self {
        let flash = data.flash.unwrap_or_else(|| FLASH_MODEL.to_owned());
        Self {
            default: data.default.unwrap_or_else(|| flash.clone()),
            pro: data.pro.unwrap_or_else(|| PRO_MODEL.to_owned()),
            flash,
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            flash: FLASH_MODEL.to_owned(),
            pro: PRO_MODEL.to_owned(),
            default: FLASH_MODEL.to_owned(),
        }
    }
}

impl ModelSettings {
    /// Fast model for simple tasks.
    #[must_use]
    pub fn flash(&self) -> &str {
        &self.flash
    }

    /// Model for advanced reasoning.
    #[must_use]
    pub fn pro(&self) -> &str {
        &self.pro
    }

    /// Model used when a request names none.
    #[must_use]
    pub fn default_model(&self) -> &str {
        &self.default
    }
}

/// Sampling defaults.
///
/// Only `temperature` is sent by default; `max_tokens` applies when a caller
/// asks for a token cap. `top_p` and `top_k` are recorded for completeness.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationSettings {
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    top_k: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2048,
            top_p: 0.9,
            top_k: 40,
        }
    }
}

impl GenerationSettings {
    /// Default sampling temperature.
    #[must_use]
    pub const fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Token cap applied on request.
    #[must_use]
    pub const fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Nucleus sampling threshold.
    #[must_use]
    pub const fn top_p(&self) -> f32 {
        self.top_p
    }

    /// Top-k sampling width.
    #[must_use]
    pub const fn top_k(&self) -> u32 {
        self.top_k
    }
}

/// Context a system instruction is written for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstructionContext {
    /// Formal legal assistance.
    Legal,
    /// Exam preparation mentoring.
    ExamPrep,
    /// Legal drafting.
    Drafting,
    /// General-purpose assistance.
    General,
}

/// System instruction text per context.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemInstructions {
    legal: String,
    exam_prep: String,
    drafting: String,
    general: String,
}

impl Default for SystemInstructions {
    fn default() -> Self {
        Self {
            legal: "Você é um assistente jurídico experiente, preciso e formal. Responda em Português do Brasil.".to_owned(),
            exam_prep: "Você é um mentor especialista em concursos públicos brasileiros. Seja didático, objetivo e use exemplos práticos.".to_owned(),
            drafting: "Você é um redator jurídico especializado. Use linguagem técnica precisa e formatação adequada.".to_owned(),
            general: "Você é um assistente útil e prestativo. Responda em Português do Brasil.".to_owned(),
        }
    }
}

impl SystemInstructions {
    /// Returns the instruction for `context`.
    #[must_use]
    pub fn get(&self, context: InstructionContext) -> &str {
        match context {
            InstructionContext::Legal => &self.legal,
            InstructionContext::ExamPrep => &self.exam_prep,
            InstructionContext::Drafting => &self.drafting,
            InstructionContext::General => &self.general,
        }
    }
}

fn sanitize_base_url(input: &str) -> ConfigResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            field: "baseUrl",
            reason: "base URL must start with http:// or https://".into(),
        });
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_catalog_conventions() {
        let settings = GeminiSettings::default();
        assert!(!settings.is_credential_configured());
        assert_eq!(settings.models().default_model(), "gemini-3-flash-preview");
        assert_eq!(settings.models().pro(), "gemini-3-pro-preview");
        assert!((settings.generation().temperature() - 0.7).abs() < f32::EPSILON);
        assert_eq!(settings.generation().max_tokens(), 2048);
        assert!(settings.timeout().is_none());
        assert!(
            settings
                .system_instructions()
                .get(InstructionContext::General)
                .contains("Português do Brasil")
        );
    }

    #[test]
    fn default_model_follows_flash_override() {
        let settings: GeminiSettings =
            serde_json::from_str(r#"{"models": {"flash": "gemini-2.5-flash"}}"#).unwrap();
        assert_eq!(settings.models().flash(), "gemini-2.5-flash");
        assert_eq!(settings.models().default_model(), "gemini-2.5-flash");
        assert_eq!(settings.models().pro(), "gemini-3-pro-preview");
    }

    #[test]
    fn explicit_default_model_wins() {
        let settings: GeminiSettings = serde_json::from_str(
            r#"{"models": {"flash": "gemini-2.5-flash", "default": "gemini-3-pro-preview"}}"#,
        )
        .unwrap();
        assert_eq!(settings.models().default_model(), "gemini-3-pro-preview");
    }

    #[test]
    fn credential_predicate() {
        assert!(!GeminiSettings::default().with_api_key("").is_credential_configured());
        assert!(GeminiSettings::default().with_api_key("k").is_credential_configured());
    }

    #[test]
    fn debug_redacts_the_credential() {
        let settings = GeminiSettings::default().with_api_key("super-secret");
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("credential_configured: true"));
    }

    #[test]
    fn base_url_requires_scheme() {
        let err = GeminiSettings::default()
            .with_base_url("generativelanguage.googleapis.com")
            .expect_err("missing scheme should error");
        assert!(matches!(err, ConfigError::Invalid { field: "baseUrl", .. }));
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let settings = GeminiSettings::default()
            .with_base_url("https://example.com/gemini")
            .expect("valid URL");
        assert_eq!(settings.base_url(), "https://example.com/gemini/");
    }

    #[test]
    fn validation_rejects_out_of_range_temperature() {
        let err = GeminiSettings::default()
            .with_temperature(3.5)
            .validate()
            .expect_err("temperature too high");
        assert!(matches!(err, ConfigError::Invalid { field: "generation.temperature", .. }));
    }

    #[test]
    fn validation_rejects_empty_models() {
        let err = GeminiSettings::default()
            .with_default_model(" ")
            .validate()
            .expect_err("blank model");
        assert!(matches!(err, ConfigError::Invalid { field: "models.default", .. }));
    }

    #[test]
    fn partial_documents_fill_defaults() {
        let settings: GeminiSettings =
            serde_json::from_str(r#"{"models":{"default":"gemini-3-pro-preview"},"timeoutSecs":30}"#)
                .unwrap();
        assert_eq!(settings.models().default_model(), "gemini-3-pro-preview");
        assert_eq!(settings.models().flash(), "gemini-3-flash-preview");
        assert_eq!(settings.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn serialization_omits_the_credential() {
        let settings = GeminiSettings::default().with_api_key("super-secret");
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("super-secret"));
    }
}
