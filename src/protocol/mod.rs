//! OpenAI-compatible chat completion protocol
//!
//! Wire-level request and response types. Nothing here knows about the
//! internal chat model; see [`crate::convert`] for the mapping.

pub mod types;

pub use types::{
    AssistantMessage, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    Choice, ContentPart, FinishReason, FunctionMessage, ImageUrl, Message, MessageBody,
    OBJECT_CHAT_COMPLETION, Role, SystemMessage, ToolMessage, Usage, UserContent, UserMessage,
};
