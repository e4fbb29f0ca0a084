//! Gemini error body
//!
//! Gemini reports failures as `{"error": {"code": 429, "message": "...",
//! "status": "RESOURCE_EXHAUSTED"}}`. Some client libraries strip the outer
//! `error` wrapper, so the flat form is accepted as well.

use super::{ErrorMessage, ProviderErrorObject};
use serde::{Deserialize, Serialize};

/// Inner Gemini error fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeminiError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A parsed Gemini error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GeminiErrorWire")]
pub struct GeminiErrorObject {
    pub error: GeminiError,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GeminiErrorWire {
    Wrapped { error: GeminiError },
    Flat(GeminiError),
}

impl From<GeminiErrorWire> for GeminiErrorObject {
    fn from(wire: GeminiErrorWire) -> Self {
        match wire {
            GeminiErrorWire::Wrapped { error } | GeminiErrorWire::Flat(error) => Self { error },
        }
    }
}

impl ProviderErrorObject for GeminiErrorObject {
    const PROVIDER: &'static str = "gemini";

    /// Requires both a code that is a valid HTTP status number and a message.
    /// The Gemini `status` string becomes the details.
    fn to_error_message(&self) -> Option<ErrorMessage> {
        let code = u16::try_from(self.error.code?).ok()?;
        let message = self.error.message.clone()?;

        let error_message = ErrorMessage::new(code, message);
        Some(match &self.error.status {
            Some(status) => error_message.with_details(status.clone()),
            None => error_message,
        })
    }
}
