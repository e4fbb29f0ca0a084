//! Chat response to protocol response assembly

use crate::chat::{self, ChatResponse, TokenUsage};
use crate::protocol::{
    AssistantMessage, ChatCompletionRequest, ChatCompletionResponse, Choice, FinishReason,
    OBJECT_CHAT_COMPLETION, Usage,
};

/// Build the protocol response for a completed model call
///
/// The model name comes from the request because providers do not reliably
/// echo it. Exactly one choice is produced. The id is copied from the
/// response metadata when present and never synthesized.
///
/// # Examples
///
/// ```
/// use chatbridge::chat::{ChatResponse, ResponseMetadata, TokenUsage};
/// use chatbridge::convert::assemble;
/// use chatbridge::protocol::ChatCompletionRequest;
///
/// let request = ChatCompletionRequest::builder().model("gpt-x").build();
/// let response = ChatResponse::new("hi", TokenUsage::new(3, 5, 8))
///     .with_metadata(ResponseMetadata::with_id("abc"));
///
/// let assembled = assemble(&request, &response);
/// assert_eq!(assembled.model, "gpt-x");
/// assert_eq!(assembled.id.as_deref(), Some("abc"));
/// assert_eq!(assembled.choices.len(), 1);
/// ```
pub fn assemble(request: &ChatCompletionRequest, response: &ChatResponse) -> ChatCompletionResponse {
    let metadata = response.metadata.as_ref();

    ChatCompletionResponse {
        id: metadata.and_then(|m| m.id.clone()),
        object: OBJECT_CHAT_COMPLETION.to_string(),
        model: request.model().to_string(),
        choices: vec![Choice {
            index: 0,
            message: AssistantMessage::new(response.text.clone()),
            finish_reason: metadata
                .and_then(|m| m.finish_reason)
                .and_then(to_protocol_finish_reason),
        }],
        usage: to_usage(&response.token_usage),
    }
}

fn to_usage(token_usage: &TokenUsage) -> Usage {
    Usage {
        prompt_tokens: token_usage.input_token_count,
        completion_tokens: token_usage.output_token_count,
        total_tokens: token_usage.total_token_count,
    }
}

fn to_protocol_finish_reason(reason: chat::FinishReason) -> Option<FinishReason> {
    match reason {
        chat::FinishReason::Stop => Some(FinishReason::Stop),
        chat::FinishReason::Length => Some(FinishReason::Length),
        chat::FinishReason::ToolExecution => Some(FinishReason::ToolCalls),
        chat::FinishReason::ContentFilter => Some(FinishReason::ContentFilter),
        chat::FinishReason::Other => None,
    }
}
