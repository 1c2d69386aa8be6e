//! Prompt composition and chat-completion wire types

use serde::{Deserialize, Serialize};

use super::CompletionConfig;
use crate::core::{CompletionError, UploadedFile};

/// Marker placed between the user's prompt and uploaded file contents
pub const FILE_CONTENTS_MARKER: &str = "File contents:";

/// Combine the prompt text with every uploaded file's content
///
/// The marker is always present, even with no uploads.
pub fn compose_prompt(prompt: &str, files: &[UploadedFile]) -> String {
    let contents = files
        .iter()
        .map(|file| file.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{}\n\n{}\n{}", prompt, FILE_CONTENTS_MARKER, contents)
}

/// Chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for the chat-completion endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// The system message followed by one user message
    pub fn new(config: &CompletionConfig, prompt: impl Into<String>) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![
                ChatMessage::system(config.system_prompt.clone()),
                ChatMessage::user(prompt),
            ],
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Pull `choices[0].message.content` out of a response body
pub fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::malformed(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::malformed("response has no choices"))?
        .message
        .content
        .ok_or_else(|| CompletionError::malformed("first choice has no content"))
}
