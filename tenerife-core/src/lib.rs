//! Shared foundation for the Tenerife tourism assistant.
//!
//! This crate defines the contracts the other workspace members plug into:
//!
//! - [`Message`] and friends — the chat message model in OpenAI wire shape
//! - [`Llm`] — the language-model provider trait
//! - [`Tool`] — the callable-tool trait and its declaration format
//! - [`AssistantError`] — the top-level error taxonomy

pub mod error;
pub mod llm;
pub mod message;
pub mod tool;

pub use error::{AssistantError, Result};
pub use llm::{CompletionResponse, Llm};
pub use message::{FunctionCall, Message, Role, ToolCall};
pub use tool::{error_payload, is_error_payload, Tool};
