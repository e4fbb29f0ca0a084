//! Protocol message to chat message conversion
//!
//! This is the boundary where untyped input becomes a [`ChatMessage`]. Two
//! checks run in order: the role must be one of system, user or assistant,
//! and the concrete body must be the one that role implies.

use crate::chat::ChatMessage;
use crate::error::ConversionError;
use crate::protocol::{ChatCompletionRequest, Message, MessageBody, Role};

/// Convert one protocol message into a chat message
///
/// # Errors
///
/// - [`ConversionError::InvalidRole`] if the role is not system, user or
///   assistant (checked before the body is looked at)
/// - [`ConversionError::RoleMismatch`] if the body does not match the role
///
/// # Examples
///
/// ```
/// use chatbridge::chat::ChatMessage;
/// use chatbridge::convert::convert;
/// use chatbridge::protocol::Message;
///
/// let converted = convert(&Message::user("Hello!")).unwrap();
/// assert_eq!(converted, ChatMessage::User("Hello!".to_string()));
/// ```
pub fn convert(message: &Message) -> Result<ChatMessage, ConversionError> {
    let role = message.role();
    if !matches!(role, Role::System | Role::User | Role::Assistant) {
        tracing::debug!(role = %role, "Rejecting message with unsupported role");
        return Err(ConversionError::InvalidRole {
            role: role.to_string(),
        });
    }

    match (role, message.body()) {
        (Role::Assistant, MessageBody::Assistant(assistant)) => Ok(ChatMessage::Assistant(
            assistant.content.clone().unwrap_or_default(),
        )),
        (Role::User, MessageBody::User(user)) => Ok(ChatMessage::User(user.content.to_text())),
        (Role::System, MessageBody::System(system)) => {
            Ok(ChatMessage::System(system.content.clone()))
        }
        (role, body) => {
            tracing::debug!(
                role = %role,
                instance = body.variant_name(),
                "Rejecting message whose body does not match its role"
            );
            Err(ConversionError::RoleMismatch {
                role: role.to_string(),
                instance: body.variant_name().to_string(),
            })
        }
    }
}

/// Convert messages in order, stopping at the first failure
pub fn convert_all(messages: &[Message]) -> Result<Vec<ChatMessage>, ConversionError> {
    messages.iter().map(convert).collect()
}

impl ChatCompletionRequest {
    /// Convert this request's messages into chat messages
    pub fn to_chat_messages(&self) -> Result<Vec<ChatMessage>, ConversionError> {
        convert_all(self.messages())
    }
}
