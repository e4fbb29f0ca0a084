//! Integration tests for CLI commands
//!
//! Tests file I/O for the `chatbridge` subcommands: template generation,
//! config loading, and the JSON-in/JSON-out data commands.

use chatbridge::cli::{Command, execute, generate_config_template};
use chatbridge::config::Config;
use chatbridge::error::AppError;
use std::fs;
use tempfile::TempDir;

/// Helper to create temporary directory for file operations
fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write file");
    path.display().to_string()
}

#[test]
fn test_generated_template_creates_valid_config_file() {
    let temp_dir = create_temp_dir();
    let config_path = write_file(&temp_dir, "chatbridge.toml", generate_config_template());

    let config =
        Config::from_file(&config_path).expect("Generated template should load as valid Config");

    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn test_missing_config_file_falls_back_to_defaults() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("absent.toml");

    let config = Config::load_or_default(&config_path).expect("defaults expected");

    assert_eq!(config.errors.fallback_message, "internal server error");
}

#[test]
fn test_invalid_config_file_reports_path() {
    let temp_dir = create_temp_dir();
    let config_path = write_file(&temp_dir, "bad.toml", "[observability\nlog_level = ");

    let err = Config::from_file(&config_path).unwrap_err();

    assert!(matches!(err, AppError::ConfigParseFailed { .. }));
    assert!(err.to_string().contains("bad.toml"), "got: {}", err);
}

#[test]
fn test_normalize_command_outputs_chat_messages() {
    let temp_dir = create_temp_dir();
    let request = write_file(
        &temp_dir,
        "request.json",
        r#"{
            "model": "gemini-2.0-flash",
            "messages": [
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": "Hi"}
            ]
        }"#,
    );

    let output = execute(&Command::Normalize { request }, &Config::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(
        value,
        serde_json::json!([
            {"type": "system", "text": "Be brief."},
            {"type": "user", "text": "Hi"}
        ])
    );
}

#[test]
fn test_normalize_command_rejects_bad_role() {
    let temp_dir = create_temp_dir();
    let request = write_file(
        &temp_dir,
        "request.json",
        r#"{"model": "m", "messages": [{"role": "developer", "content": "x"}]}"#,
    );

    let err = execute(&Command::Normalize { request }, &Config::default()).unwrap_err();

    assert!(matches!(err, AppError::Conversion(_)));
    assert!(err.to_string().contains("unexpected role 'developer'"));
}

#[test]
fn test_normalize_command_rejects_invalid_json() {
    let temp_dir = create_temp_dir();
    let request = write_file(&temp_dir, "request.json", "{not json");

    let err = execute(&Command::Normalize { request }, &Config::default()).unwrap_err();

    assert!(matches!(err, AppError::InputParse { .. }));
}

#[test]
fn test_assemble_command_outputs_protocol_response() {
    let temp_dir = create_temp_dir();
    let request = write_file(
        &temp_dir,
        "request.json",
        r#"{"model": "gpt-x", "messages": [{"role": "user", "content": "Hi"}]}"#,
    );
    let response = write_file(
        &temp_dir,
        "response.json",
        r#"{
            "text": "hi",
            "metadata": {"id": "abc"},
            "token_usage": {"input_token_count": 3, "output_token_count": 5, "total_token_count": 8}
        }"#,
    );

    let output = execute(&Command::Assemble { request, response }, &Config::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["model"], "gpt-x");
    assert_eq!(value["id"], "abc");
    assert_eq!(value["choices"][0]["message"]["content"], "hi");
    assert_eq!(value["usage"]["prompt_tokens"], 3);
    assert_eq!(value["usage"]["completion_tokens"], 5);
    assert_eq!(value["usage"]["total_tokens"], 8);
}

#[test]
fn test_extract_error_command_uses_configured_fallback() {
    let config: Config = "[errors]\nfallback_message = \"model unavailable\"\n"
        .parse()
        .unwrap();

    let output = execute(
        &Command::ExtractError {
            text: "socket closed".to_string(),
        },
        &config,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value, serde_json::json!({"code": 500, "message": "model unavailable"}));
}

#[test]
fn test_extract_error_command_outputs_structured_error() {
    let output = execute(
        &Command::ExtractError {
            text: r#"call failed: {"code":429,"message":"rate limited"}"#.to_string(),
        },
        &Config::default(),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value, serde_json::json!({"code": 429, "message": "rate limited"}));
}
