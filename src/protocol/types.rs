//! OpenAI-compatible request and response types
//!
//! These types follow the OpenAI Chat Completions API shape. A [`Message`]
//! keeps its declared [`Role`] separate from its concrete [`MessageBody`] so
//! that untyped input can be checked at the boundary; the typed constructors
//! always pair the two correctly.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// =============================================================================
// OpenAI API Object Type Constants
// =============================================================================

/// Object type for non-streaming chat completion responses
pub const OBJECT_CHAT_COMPLETION: &str = "chat.completion";

// =============================================================================
// Role
// =============================================================================

/// Message role in the conversation
///
/// Unrecognised role strings are kept verbatim in [`Role::Other`] instead of
/// failing deserialization, so the caller can report exactly which role was
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
    Function,
    Other(String),
}

impl Role {
    /// Parse a wire role name (case-sensitive, as OpenAI does)
    pub fn parse(name: &str) -> Self {
        match name {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "tool" => Role::Tool,
            "function" => Role::Function,
            other => Role::Other(other.to_string()),
        }
    }

    /// Wire name of the role
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
            Role::Function => "function",
            Role::Other(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Role::parse(&s))
    }
}

// =============================================================================
// Message Variants
// =============================================================================

/// System instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A single part of multi-part user content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

/// Image reference inside user content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// User content: plain text or an array of content parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl UserContent {
    /// Text view of the content
    ///
    /// Plain text is returned as-is. For content parts, the `text` parts are
    /// joined with a newline and every other part is skipped.
    pub fn to_text(&self) -> String {
        match self {
            UserContent::Text(text) => text.clone(),
            UserContent::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::ImageUrl { .. } => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl From<String> for UserContent {
    fn from(text: String) -> Self {
        UserContent::Text(text)
    }
}

impl From<&str> for UserContent {
    fn from(text: &str) -> Self {
        UserContent::Text(text.to_string())
    }
}

impl From<Vec<ContentPart>> for UserContent {
    fn from(parts: Vec<ContentPart>) -> Self {
        UserContent::Parts(parts)
    }
}

/// User input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub content: UserContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Assistant output
///
/// Content is optional because OpenAI allows `null` content on assistant
/// turns that only carry tool calls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AssistantMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            name: None,
        }
    }
}

/// Tool call result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    pub content: String,
    pub tool_call_id: String,
}

/// Legacy function call result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionMessage {
    pub name: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Concrete payload of a [`Message`]
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    System(SystemMessage),
    User(UserMessage),
    Assistant(AssistantMessage),
    Tool(ToolMessage),
    Function(FunctionMessage),
    /// Raw fields of a message whose role is not modelled here
    Unknown(serde_json::Map<String, serde_json::Value>),
}

impl MessageBody {
    /// Name of the concrete variant, used in diagnostics
    pub fn variant_name(&self) -> &'static str {
        match self {
            MessageBody::System(_) => "SystemMessage",
            MessageBody::User(_) => "UserMessage",
            MessageBody::Assistant(_) => "AssistantMessage",
            MessageBody::Tool(_) => "ToolMessage",
            MessageBody::Function(_) => "FunctionMessage",
            MessageBody::Unknown(_) => "UnknownMessage",
        }
    }
}

// =============================================================================
// Message
// =============================================================================

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    role: Role,
    body: MessageBody,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        SystemMessage {
            content: content.into(),
            name: None,
        }
        .into()
    }

    /// Create a user message from text or content parts
    pub fn user(content: impl Into<UserContent>) -> Self {
        UserMessage {
            content: content.into(),
            name: None,
        }
        .into()
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        AssistantMessage::new(content).into()
    }

    /// Create a tool result message
    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        ToolMessage {
            content: content.into(),
            tool_call_id: tool_call_id.into(),
        }
        .into()
    }

    /// Pair an arbitrary role with an arbitrary body
    ///
    /// This is the boundary constructor for input that has not been checked
    /// yet: nothing guarantees that `body` matches `role`.
    pub fn from_parts(role: Role, body: MessageBody) -> Self {
        Self { role, body }
    }

    /// Get the declared role
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Get the concrete body
    pub fn body(&self) -> &MessageBody {
        &self.body
    }
}

impl From<SystemMessage> for Message {
    fn from(message: SystemMessage) -> Self {
        Self::from_parts(Role::System, MessageBody::System(message))
    }
}

impl From<UserMessage> for Message {
    fn from(message: UserMessage) -> Self {
        Self::from_parts(Role::User, MessageBody::User(message))
    }
}

impl From<AssistantMessage> for Message {
    fn from(message: AssistantMessage) -> Self {
        Self::from_parts(Role::Assistant, MessageBody::Assistant(message))
    }
}

impl From<ToolMessage> for Message {
    fn from(message: ToolMessage) -> Self {
        Self::from_parts(Role::Tool, MessageBody::Tool(message))
    }
}

impl From<FunctionMessage> for Message {
    fn from(message: FunctionMessage) -> Self {
        Self::from_parts(Role::Function, MessageBody::Function(message))
    }
}

impl Serialize for Message {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Wire<'a, B: Serialize> {
            role: &'a Role,
            #[serde(flatten)]
            body: &'a B,
        }

        let role = &self.role;
        match &self.body {
            MessageBody::System(body) => Wire { role, body }.serialize(serializer),
            MessageBody::User(body) => Wire { role, body }.serialize(serializer),
            MessageBody::Assistant(body) => Wire { role, body }.serialize(serializer),
            MessageBody::Tool(body) => Wire { role, body }.serialize(serializer),
            MessageBody::Function(body) => Wire { role, body }.serialize(serializer),
            MessageBody::Unknown(body) => Wire { role, body }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawMessage {
            role: Role,
            #[serde(flatten)]
            fields: serde_json::Map<String, serde_json::Value>,
        }

        fn parse_body<T, E>(fields: serde_json::Map<String, serde_json::Value>) -> Result<T, E>
        where
            T: serde::de::DeserializeOwned,
            E: serde::de::Error,
        {
            serde_json::from_value(serde_json::Value::Object(fields)).map_err(E::custom)
        }

        let raw = RawMessage::deserialize(deserializer)?;

        // The role tag picks the body shape; unknown roles keep their raw fields
        let body = match &raw.role {
            Role::System => MessageBody::System(parse_body::<_, D::Error>(raw.fields)?),
            Role::User => MessageBody::User(parse_body::<_, D::Error>(raw.fields)?),
            Role::Assistant => MessageBody::Assistant(parse_body::<_, D::Error>(raw.fields)?),
            Role::Tool => MessageBody::Tool(parse_body::<_, D::Error>(raw.fields)?),
            Role::Function => MessageBody::Function(parse_body::<_, D::Error>(raw.fields)?),
            Role::Other(_) => MessageBody::Unknown(raw.fields),
        };

        Ok(Message {
            role: raw.role,
            body,
        })
    }
}

// =============================================================================
// Chat Completion Request
// =============================================================================

/// OpenAI-compatible chat completion request
///
/// Sampling parameters are carried through untouched; only the messages are
/// ever inspected, and only for role/variant consistency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

/// Builder for constructing [`ChatCompletionRequest`] programmatically
///
/// # Examples
///
/// ```
/// use chatbridge::protocol::ChatCompletionRequest;
///
/// let request = ChatCompletionRequest::builder()
///     .model("gemini-2.0-flash")
///     .system_message("You are helpful.")
///     .user_message("Hello!")
///     .temperature(0.7)
///     .build();
///
/// assert_eq!(request.messages().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ChatCompletionRequestBuilder {
    model: String,
    messages: Vec<Message>,
    stream: bool,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    top_p: Option<f64>,
    user: Option<String>,
}

impl ChatCompletionRequestBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Add a single message to the request
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Replace all messages with the provided vector
    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Add a system message (convenience method)
    pub fn system_message(self, content: impl Into<String>) -> Self {
        self.message(Message::system(content))
    }

    /// Add a user message (convenience method)
    pub fn user_message(self, content: impl Into<UserContent>) -> Self {
        self.message(Message::user(content))
    }

    /// Add an assistant message (convenience method)
    pub fn assistant_message(self, content: impl Into<String>) -> Self {
        self.message(Message::assistant(content))
    }

    /// Enable or disable streaming
    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set top_p
    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set the user identifier
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn build(self) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model,
            messages: self.messages,
            stream: self.stream,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
            user: self.user,
        }
    }
}

impl ChatCompletionRequest {
    /// Create a new builder for constructing a request programmatically
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::new()
    }

    /// Get the model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the messages in conversation order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Check if streaming is enabled
    pub fn stream(&self) -> bool {
        self.stream
    }

    /// Get temperature if set
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// Get max_tokens if set
    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    /// Get top_p if set
    pub fn top_p(&self) -> Option<f64> {
        self.top_p
    }

    /// Get the user identifier if set
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

// =============================================================================
// Chat Completion Response
// =============================================================================

/// Finish reason for a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
}

/// Usage statistics for a chat completion response
///
/// Counters are passed through from the model as-is. Nothing here checks
/// that `total_tokens` equals the sum of the other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u32>,
}

impl Usage {
    /// Create usage stats with all three counters present
    pub fn new(prompt_tokens: u32, completion_tokens: u32, total_tokens: u32) -> Self {
        Self {
            prompt_tokens: Some(prompt_tokens),
            completion_tokens: Some(completion_tokens),
            total_tokens: Some(total_tokens),
        }
    }
}

/// A single choice in the response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    #[serde(with = "assistant_wire")]
    pub message: AssistantMessage,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub object: String,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

/// Wire form of the assistant message inside a [`Choice`]
///
/// OpenAI repeats `"role": "assistant"` on every choice message.
mod assistant_wire {
    use super::{AssistantMessage, Role};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct Out<'a> {
        role: Role,
        #[serde(flatten)]
        message: &'a AssistantMessage,
    }

    #[derive(Deserialize)]
    struct In {
        #[serde(default)]
        role: Option<Role>,
        #[serde(flatten)]
        message: AssistantMessage,
    }

    pub fn serialize<S>(message: &AssistantMessage, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Out {
            role: Role::Assistant,
            message,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<AssistantMessage, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = In::deserialize(deserializer)?;
        match raw.role {
            None | Some(Role::Assistant) => Ok(raw.message),
            Some(other) => Err(serde::de::Error::custom(format!(
                "choice message must have role 'assistant', got '{}'",
                other
            ))),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
