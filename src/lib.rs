//! chatbridge - OpenAI-style chat completions to a provider-agnostic chat model
//!
//! This library converts chat completion requests into internal chat
//! messages, assembles internal responses back into the protocol shape, and
//! extracts structured errors that providers embed in error text.

pub mod chat;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod protocol;
pub mod provider_error;
pub mod telemetry;
