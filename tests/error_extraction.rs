//! Integration tests for provider error extraction
//!
//! Every test runs under a capturing subscriber so the warnings the
//! extractor emits can be checked alongside its result.

use chatbridge::provider_error::{
    ErrorMessage, GeminiErrorObject, extract_from_message, extract_gemini_error,
};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Log sink shared between the subscriber and the test
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a subscriber that records everything, returning its logs
fn with_captured_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);

    let bytes = logs.0.lock().expect("log buffer poisoned").clone();
    (result, String::from_utf8(bytes).expect("logs are utf-8"))
}

#[derive(Debug)]
struct ProviderError(String);

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ProviderError {}

#[test]
fn test_plain_failure_without_braces_is_empty_and_quiet() {
    let (result, logs) = with_captured_logs(|| {
        extract_from_message::<GeminiErrorObject>(Some("plain failure, no braces"))
    });

    assert_eq!(result, None);
    assert!(!logs.contains("WARN"), "no warning expected, got: {}", logs);
}

#[test]
fn test_embedded_payload_is_extracted() {
    let (result, _) = with_captured_logs(|| {
        extract_from_message::<GeminiErrorObject>(Some(
            r#"call failed: {"code":429,"message":"rate limited"}"#,
        ))
    });

    assert_eq!(result, Some(ErrorMessage::new(429, "rate limited")));
}

#[test]
fn test_invalid_json_is_empty_and_warns() {
    let (result, logs) = with_captured_logs(|| {
        extract_from_message::<GeminiErrorObject>(Some("call failed: {not valid json"))
    });

    assert_eq!(result, None);
    assert!(logs.contains("WARN"), "expected a warning, got: {}", logs);
    assert!(
        logs.contains("Failed to parse provider error message"),
        "warning should describe the failure, got: {}",
        logs
    );
}

#[test]
fn test_missing_message_is_empty_and_warns() {
    let (result, logs) = with_captured_logs(|| extract_from_message::<GeminiErrorObject>(None));

    assert_eq!(result, None);
    assert!(logs.contains("WARN"), "expected a warning, got: {}", logs);
    assert!(logs.contains("no message text"), "got: {}", logs);
}

#[test]
fn test_error_with_empty_message_is_empty_and_warns() {
    let error = ProviderError(String::new());

    let (result, logs) = with_captured_logs(|| extract_gemini_error(&error));

    assert_eq!(result, None);
    assert!(logs.contains("WARN"), "expected a warning, got: {}", logs);
}

#[test]
fn test_parse_failure_warning_includes_original_error() {
    let error = ProviderError("gemini returned 500: {\"error\": oops".to_string());

    let (result, logs) = with_captured_logs(|| extract_gemini_error(&error));

    assert_eq!(result, None);
    assert!(
        logs.contains("gemini returned 500"),
        "warning should carry the original error, got: {}",
        logs
    );
}

#[test]
fn test_gemini_wrapped_payload_from_error_value() {
    let error = ProviderError(
        r#"{"error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}}"#
            .to_string(),
    );

    let (result, _) = with_captured_logs(|| extract_gemini_error(&error));

    assert_eq!(
        result,
        Some(ErrorMessage::new(503, "The model is overloaded.").with_details("UNAVAILABLE"))
    );
}

#[test]
fn test_gemini_array_wrapped_payload_is_not_recovered() {
    // Gemini sometimes wraps the body in a JSON array; the trailing `]`
    // after the object makes the first-brace-to-end candidate invalid.
    let (result, logs) = with_captured_logs(|| {
        extract_from_message::<GeminiErrorObject>(Some(
            r#"status 429: [{"error": {"code": 429, "message": "quota", "status": "RESOURCE_EXHAUSTED"}}]"#,
        ))
    });

    assert_eq!(result, None);
    assert!(logs.contains("WARN"), "expected a warning, got: {}", logs);
}
