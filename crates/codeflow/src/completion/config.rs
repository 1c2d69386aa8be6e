//! Completion endpoint configuration
//!
//! Built from defaults, then the environment, then explicit overrides.
//! The credential is never compiled in.

use tracing::{debug, warn};

/// Environment variable checked first for the bearer credential
pub const API_KEY_ENV: &str = "CODEFLOW_API_KEY";
/// Fallback credential variable
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Overrides the endpoint URL
pub const API_URL_ENV: &str = "CODEFLOW_API_URL";
/// Overrides the model name
pub const MODEL_ENV: &str = "CODEFLOW_MODEL";
/// Overrides the response token limit
pub const MAX_TOKENS_ENV: &str = "CODEFLOW_MAX_TOKENS";

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Provide your response in multiple code blocks if appropriate.";

/// Settings for the chat-completion request
#[derive(Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub system_prompt: String,
    pub api_key: Option<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            api_key: None,
        }
    }
}

// Keeps the credential out of debug logs
impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CompletionConfig {
    /// Defaults overlaid with whatever the environment provides
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`CompletionConfig::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.api_key = lookup(API_KEY_ENV)
            .or_else(|| lookup(OPENAI_API_KEY_ENV))
            .filter(|key| !key.trim().is_empty());

        if let Some(endpoint) = lookup(API_URL_ENV) {
            config.endpoint = endpoint;
        }
        if let Some(model) = lookup(MODEL_ENV) {
            config.model = model;
        }
        if let Some(raw) = lookup(MAX_TOKENS_ENV) {
            match raw.trim().parse() {
                Ok(max_tokens) => config.max_tokens = max_tokens,
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", MAX_TOKENS_ENV),
            }
        }

        debug!(?config, "Loaded completion config");
        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
