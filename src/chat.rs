//! Provider-agnostic chat model types
//!
//! This is the representation the model layer consumes and produces. It has
//! no notion of protocol roles beyond the three conversational positions.

use serde::{Deserialize, Serialize};

/// A chat message as the model sees it
///
/// Only the three conversational roles are constructible, so a message can
/// never disagree with its own role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "lowercase")]
pub enum ChatMessage {
    System(String),
    User(String),
    #[serde(rename = "ai")]
    Assistant(String),
}

impl ChatMessage {
    /// Get the message text
    pub fn text(&self) -> &str {
        match self {
            ChatMessage::System(text) | ChatMessage::User(text) | ChatMessage::Assistant(text) => {
                text
            }
        }
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolExecution,
    ContentFilter,
    Other,
}

/// Token counters reported by the model
///
/// Each counter is optional because providers do not always report all
/// three; whatever is reported is passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_token_count: Option<u32>,
    #[serde(default)]
    pub output_token_count: Option<u32>,
    #[serde(default)]
    pub total_token_count: Option<u32>,
}

impl TokenUsage {
    /// Create usage with all three counters present
    pub fn new(input: u32, output: u32, total: u32) -> Self {
        Self {
            input_token_count: Some(input),
            output_token_count: Some(output),
            total_token_count: Some(total),
        }
    }
}

/// Optional response metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

impl ResponseMetadata {
    /// Metadata carrying only an id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// A completed model response
///
/// `token_usage` is required: a model layer that cannot report usage must
/// still hand over an (empty) [`TokenUsage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
    #[serde(default)]
    pub metadata: Option<ResponseMetadata>,
    pub token_usage: TokenUsage,
}

impl ChatResponse {
    pub fn new(text: impl Into<String>, token_usage: TokenUsage) -> Self {
        Self {
            text: text.into(),
            metadata: None,
            token_usage,
        }
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: ResponseMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_text() {
        assert_eq!(ChatMessage::System("s".to_string()).text(), "s");
        assert_eq!(ChatMessage::User("u".to_string()).text(), "u");
        assert_eq!(ChatMessage::Assistant("a".to_string()).text(), "a");
    }

    #[test]
    fn test_chat_message_serializes_tagged() {
        let json = serde_json::to_value(ChatMessage::Assistant("hi".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"type": "ai", "text": "hi"}));
    }

    #[test]
    fn test_chat_response_requires_token_usage() {
        let json = r#"{"text": "hi"}"#;
        let result = serde_json::from_str::<ChatResponse>(json);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("token_usage"));
    }

    #[test]
    fn test_chat_response_deserialize_with_metadata() {
        let json = r#"{
            "text": "hi",
            "metadata": {"id": "abc", "finish_reason": "length"},
            "token_usage": {"input_token_count": 3, "output_token_count": 5, "total_token_count": 8}
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        let metadata = response.metadata.expect("metadata present");
        assert_eq!(metadata.id.as_deref(), Some("abc"));
        assert_eq!(metadata.finish_reason, Some(FinishReason::Length));
        assert_eq!(response.token_usage, TokenUsage::new(3, 5, 8));
    }
}
