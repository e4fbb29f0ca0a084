//! Mapping between the chat completion protocol and the chat model
//!
//! - [`convert`] / [`convert_all`]: protocol messages to chat messages
//! - [`assemble`]: chat response plus original request to protocol response
//!
//! All functions are pure and hold no state.

pub mod messages;
pub mod response;

pub use messages::{convert, convert_all};
pub use response::assemble;
