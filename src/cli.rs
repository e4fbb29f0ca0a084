//! Command-line interface for chatbridge
//!
//! Provides argument parsing and subcommand handling for the chatbridge binary.

use crate::chat::ChatResponse;
use crate::config::Config;
use crate::convert::{assemble, convert_all};
use crate::error::{AppError, AppResult};
use crate::protocol::ChatCompletionRequest;
use crate::provider_error::ErrorMessage;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Bridge OpenAI-style chat completions to a provider-agnostic chat model
#[derive(Parser)]
#[command(name = "chatbridge")]
#[command(version)]
#[command(about = "Bridge OpenAI-style chat completions to a provider-agnostic chat model")]
#[command(
    long_about = "chatbridge converts OpenAI-style chat completion requests into internal chat \
    messages, assembles model responses back into the protocol shape, and extracts structured \
    errors from provider error text."
)]
pub struct Cli {
    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "chatbridge.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Convert the messages of a chat completion request into chat messages
    Normalize {
        /// Chat completion request JSON file
        request: String,
    },

    /// Assemble a chat completion response from a request and a model response
    Assemble {
        /// Chat completion request JSON file
        #[arg(long)]
        request: String,
        /// Model response JSON file
        #[arg(long)]
        response: String,
    },

    /// Extract a structured error from provider error text
    ExtractError {
        /// Raw error text as reported by the provider client
        text: String,
    },
}

/// Run a data subcommand and return its JSON output
///
/// `Command::Config` is handled by the binary since it writes files.
pub fn execute(command: &Command, config: &Config) -> AppResult<String> {
    match command {
        Command::Config { .. } => Ok(generate_config_template().to_string()),
        Command::Normalize { request } => {
            let request: ChatCompletionRequest = read_json(request)?;
            let messages = convert_all(request.messages())?;
            tracing::info!(
                model = request.model(),
                message_count = messages.len(),
                "Normalized request messages"
            );
            to_json(&messages)
        }
        Command::Assemble { request, response } => {
            let request: ChatCompletionRequest = read_json(request)?;
            let response: ChatResponse = read_json(response)?;
            to_json(&assemble(&request, &response))
        }
        Command::ExtractError { text } => {
            let error_message = config
                .errors
                .provider
                .extract_from_message(Some(text.as_str()))
                .unwrap_or_else(|| {
                    tracing::info!("No structured error found, using fallback message");
                    ErrorMessage::internal(config.errors.fallback_message.clone())
                });
            to_json(&error_message)
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> AppResult<T> {
    let content = std::fs::read_to_string(Path::new(path)).map_err(|source| {
        AppError::InputRead {
            path: path.to_string(),
            source,
        }
    })?;

    serde_json::from_str(&content).map_err(|source| AppError::InputParse {
        path: path.to_string(),
        source,
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize output: {}", e)))
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# chatbridge Configuration
# ==========================
#
# Every section is optional. Missing values take the defaults shown here.

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
# RUST_LOG takes precedence when set
log_level = "info"

# ─────────────────────────────────────────────────────────────────────────────
# PROVIDER ERRORS
# ─────────────────────────────────────────────────────────────────────────────

[errors]
# Schema used to read JSON payloads embedded in provider error text
# Options: "gemini"
provider = "gemini"

# Message returned (with status 500) when no structured error is found
fallback_message = "internal server error"
"#
}
