//! Best-effort extraction of structured errors from error text
//!
//! The payload is located by a plain scan: everything from the first `{` to
//! the end of the text is treated as the JSON candidate. There is no attempt
//! to find the matching closing brace, so text trailing a complete object
//! makes the parse fail and the extraction comes back empty.

use super::{ErrorMessage, ProviderErrorObject, gemini::GeminiErrorObject};
use thiserror::Error;

/// Why an error text yielded no payload
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("error carries no message text")]
    MissingMessage,

    #[error("embedded error payload could not be parsed: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Locate and parse the embedded payload
///
/// Returns `Ok(None)` when the text contains no `{` at all, which is the
/// ordinary "no structured payload" case rather than a failure.
///
/// # Errors
///
/// - [`PayloadError::MissingMessage`] if `message` is absent or empty
/// - [`PayloadError::Malformed`] if the candidate does not parse as `T`
pub fn parse_error_payload<T>(message: Option<&str>) -> Result<Option<T>, PayloadError>
where
    T: ProviderErrorObject,
{
    let message = message
        .filter(|m| !m.is_empty())
        .ok_or(PayloadError::MissingMessage)?;

    let Some(start) = message.find('{') else {
        return Ok(None);
    };

    serde_json::from_str(&message[start..])
        .map(Some)
        .map_err(PayloadError::Malformed)
}

/// Extract a client-facing error from raw error text
///
/// Never fails: a missing message or an unparseable payload is logged at
/// `warn` and yields `None`.
pub fn extract_from_message<T>(message: Option<&str>) -> Option<ErrorMessage>
where
    T: ProviderErrorObject,
{
    extract::<T>(message, None)
}

/// Extract a client-facing error from an error value's message
///
/// The error's `Display` text is scanned; an empty text counts as no message.
pub fn extract_error_message<T>(error: &(dyn std::error::Error + 'static)) -> Option<ErrorMessage>
where
    T: ProviderErrorObject,
{
    let text = error.to_string();
    extract::<T>(Some(&text), Some(error))
}

/// [`extract_error_message`] with the Gemini error schema
pub fn extract_gemini_error(error: &(dyn std::error::Error + 'static)) -> Option<ErrorMessage> {
    extract_error_message::<GeminiErrorObject>(error)
}

fn extract<T>(
    message: Option<&str>,
    origin: Option<&(dyn std::error::Error + 'static)>,
) -> Option<ErrorMessage>
where
    T: ProviderErrorObject,
{
    match parse_error_payload::<T>(message) {
        Ok(Some(payload)) => {
            let error_message = payload.to_error_message();
            tracing::debug!(
                provider = T::PROVIDER,
                converted = error_message.is_some(),
                "Parsed structured provider error"
            );
            error_message
        }
        Ok(None) => None,
        Err(PayloadError::MissingMessage) => {
            tracing::warn!(
                provider = T::PROVIDER,
                origin = ?origin,
                "Failed to parse provider error message: error carries no message text"
            );
            None
        }
        Err(err @ PayloadError::Malformed(_)) => {
            tracing::warn!(
                provider = T::PROVIDER,
                error = %err,
                origin = ?origin,
                message = message.unwrap_or_default(),
                "Failed to parse provider error message"
            );
            None
        }
    }
}
