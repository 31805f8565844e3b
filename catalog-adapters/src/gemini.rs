//! Google Gemini backend over HTTPS.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use catalog_config::GeminiSettings;
use hyper::body::to_bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Request, Uri};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;

use crate::http_client::{HttpsClient, build_https_client};
use crate::traits::{
    BackendError, BackendResult, CompletionBackend, GenerateRequest, GenerateResponse, TokenUsage,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Calls `models/{model}:generateContent` on the Gemini API.
pub struct GeminiBackend {
    client: HttpsClient,
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiBackend {
    /// Creates a backend from validated settings.
    ///
    /// An empty credential is accepted; every call then fails locally with
    /// [`BackendError::Configuration`] without touching the network.
    #[must_use]
    pub fn new(settings: &GeminiSettings) -> Self {
        Self {
            client: build_https_client(),
            base_url: settings.base_url().to_owned(),
            api_key: settings.api_key().to_owned(),
            timeout: settings.timeout(),
        }
    }

    fn endpoint(&self, model: &str) -> BackendResult<Uri> {
        format!("{}v1beta/models/{model}:generateContent", self.base_url)
            .parse::<Uri>()
            .map_err(|err| BackendError::configuration(format!("invalid Gemini endpoint: {err}")))
    }
}

#[async_trait]
impl CompletionBackend for GeminiBackend {
    fn provider(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, request: GenerateRequest) -> BackendResult<GenerateResponse> {
        if self.api_key.is_empty() {
            return Err(BackendError::configuration("Gemini API key is not configured"));
        }

        let endpoint = self.endpoint(&request.model)?;
        let body = serde_json::to_vec(&build_payload(&request)).map_err(|err| {
            BackendError::transport(format!("failed to encode Gemini request: {err}"))
        })?;

        let req = Request::post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .body(Body::from(body))
            .map_err(|err| BackendError::transport(format!("failed to build Gemini request: {err}")))?;

        let pending = self.client.request(req);
        let response = match self.timeout {
            Some(limit) => timeout(limit, pending)
                .await
                .map_err(|_| BackendError::transport("Gemini request timed out"))?,
            None => pending.await,
        }
        .map_err(|err| BackendError::transport(format!("Gemini request failed: {err}")))?;

        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.map_err(|err| {
            BackendError::transport(format!("failed to read Gemini response: {err}"))
        })?;
        debug!(%status, bytes = bytes.len(), "Gemini response received");

        if !status.is_success() {
            return Err(BackendError::Upstream {
                status: status.as_u16(),
                reason: error_reason(&bytes),
            });
        }

        parse_response(&bytes)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: InstructionPayload<'a>,
    contents: Vec<ContentPayload<'a>>,
    generation_config: GenerationConfigPayload,
}

#[derive(Debug, Serialize)]
struct InstructionPayload<'a> {
    parts: Vec<PartPayload<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentPayload<'a> {
    role: &'static str,
    parts: Vec<PartPayload<'a>>,
}

#[derive(Debug, Serialize)]
struct PartPayload<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigPayload {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn build_payload(request: &GenerateRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        system_instruction: InstructionPayload {
            parts: vec![PartPayload {
                text: &request.config.system_instruction,
            }],
        },
        contents: vec![ContentPayload {
            role: "user",
            parts: vec![PartPayload {
                text: &request.contents,
            }],
        }],
        generation_config: GenerationConfigPayload {
            temperature: request.config.temperature,
            max_output_tokens: request.config.max_output_tokens,
        },
    }
}

/// Concatenates the text parts of the first candidate.
fn parse_response(bytes: &[u8]) -> BackendResult<GenerateResponse> {
    let response: GenerateContentResponse =
        serde_json::from_slice(bytes).map_err(|err| BackendError::Response {
            reason: format!("failed to decode Gemini response: {err}"),
        })?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .filter(|text| !text.is_empty());

    let usage = response.usage_metadata.map(|usage| TokenUsage {
        prompt_tokens: usage.prompt_token_count,
        completion_tokens: usage.candidates_token_count,
        total_tokens: usage.total_token_count,
    });

    Ok(GenerateResponse { text, usage })
}

fn error_reason(bytes: &[u8]) -> String {
    serde_json::from_slice::<ErrorEnvelope>(bytes).map_or_else(
        |_| String::from_utf8_lossy(bytes).trim().to_owned(),
        |envelope| envelope.error.message,
    )
}
