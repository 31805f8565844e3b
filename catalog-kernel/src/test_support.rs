use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use catalog_adapters::{
    BackendError, BackendResult, CompletionBackend, CompletionClient, GenerateRequest,
    GenerateResponse,
};
use catalog_config::GeminiSettings;

/// Replies with a fixed text, or fails with the given reason.
pub(crate) struct EchoBackend {
    reply: Result<&'static str, &'static str>,
    seen: Mutex<Vec<GenerateRequest>>,
}

impl EchoBackend {
    pub(crate) fn replying(text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing(reason: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(reason),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<GenerateRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for EchoBackend {
    fn provider(&self) -> &'static str {
        "echo"
    }

    async fn generate(&self, request: GenerateRequest) -> BackendResult<GenerateResponse> {
        self.seen.lock().unwrap().push(request);
        match self.reply {
            Ok(text) => Ok(GenerateResponse::text(text)),
            Err(reason) => Err(BackendError::Upstream {
                status: 500,
                reason: reason.to_owned(),
            }),
        }
    }
}

pub(crate) fn client_with(backend: Arc<EchoBackend>) -> CompletionClient {
    CompletionClient::new(GeminiSettings::default().with_api_key("test-key"), backend)
}

pub(crate) fn client_without_key(backend: Arc<EchoBackend>) -> CompletionClient {
    CompletionClient::new(GeminiSettings::default(), backend)
}
