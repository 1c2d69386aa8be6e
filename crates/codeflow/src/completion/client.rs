//! Chat-completion service boundary
//!
//! The session only ever sees [`CompletionService`]; the HTTP client is one
//! implementation, tests and hosts can provide others.

use async_trait::async_trait;
use tracing::{debug, error, info, Instrument};

#[cfg(not(target_arch = "wasm32"))]
use super::{parse_completion, ChatRequest, CompletionConfig, API_KEY_ENV};
use crate::core::CompletionError;
use crate::session::Action;

/// Anything that can turn a prompt into completion text
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Inputs for one "create item" action, captured when the user triggers it
///
/// Capturing up front lets overlapping requests finish in any order without
/// reading state that changed in the meantime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Prompt combined with uploaded file contents
    pub prompt: String,
    /// Name for the resulting item, if the user gave one
    pub name: Option<String>,
}

/// Run one completion and turn the answer into an [`Action::ItemCreated`]
///
/// Failures are logged here and returned; the caller simply does not
/// dispatch anything, so no state changes.
pub async fn request_item<S>(
    service: &S,
    request: CompletionRequest,
) -> Result<Action, CompletionError>
where
    S: CompletionService + ?Sized,
{
    let span = tracing::info_span!(
        "request_item",
        prompt_len = request.prompt.len(),
        name = request.name.as_deref().unwrap_or("")
    );

    async move {
        match service.complete(&request.prompt).await {
            Ok(completion) => {
                info!(completion_len = completion.len(), "Completion received");
                Ok(Action::ItemCreated {
                    name: request.name,
                    completion,
                })
            }
            Err(e) => {
                error!(error = %e, "Error fetching completion response");
                Err(e)
            }
        }
    }
    .instrument(span)
    .await
}

/// HTTP client for OpenAI-compatible chat-completion endpoints
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    config: CompletionConfig,
    http_client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpCompletionClient {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Client configured from the environment
    pub fn from_env() -> Self {
        Self::new(CompletionConfig::from_env())
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl CompletionService for HttpCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| CompletionError::missing_credential(API_KEY_ENV))?;

        let request = ChatRequest::new(&self.config, prompt);
        debug!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            max_tokens = self.config.max_tokens,
            "Sending completion request"
        );

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::network(e.to_string()))?;

        if !status.is_success() {
            return Err(CompletionError::http(status.as_u16(), body));
        }

        let content = parse_completion(&body)?;
        debug!(content_len = content.len(), "Parsed completion response");
        Ok(content)
    }
}
