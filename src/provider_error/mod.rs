//! Structured provider errors
//!
//! Some providers embed a JSON error body inside otherwise free-form error
//! text. This module defines the client-facing [`ErrorMessage`], the
//! [`ProviderErrorObject`] seam each provider schema implements, and the
//! best-effort extractor that ties them together.

pub mod extractor;
pub mod gemini;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub use extractor::{
    PayloadError, extract_error_message, extract_from_message, extract_gemini_error,
    parse_error_payload,
};
pub use gemini::{GeminiError, GeminiErrorObject};

/// Client-facing error: a status code and a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorMessage {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach provider details (e.g. a status string)
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Generic 500 used when no structured error could be extracted
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), message)
    }
}

impl IntoResponse for ErrorMessage {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// A provider-specific error body that can be turned into an [`ErrorMessage`]
///
/// The extractor only needs to deserialize the body; what its fields mean
/// is up to the implementation.
pub trait ProviderErrorObject: DeserializeOwned {
    /// Provider name used in log output
    const PROVIDER: &'static str;

    /// Derive the client-facing message, if the body carries enough to do so
    fn to_error_message(&self) -> Option<ErrorMessage>;
}

/// Providers whose error text can carry a structured payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorProvider {
    #[default]
    Gemini,
}

impl ErrorProvider {
    /// Extract a structured error from raw error text using this provider's schema
    pub fn extract_from_message(&self, message: Option<&str>) -> Option<ErrorMessage> {
        match self {
            ErrorProvider::Gemini => extract_from_message::<GeminiErrorObject>(message),
        }
    }
}
