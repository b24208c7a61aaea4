//! OpenAI-compatible chat-completion client.
//!
//! [`OpenAiChatClient`] implements [`tenerife_core::Llm`] over the
//! `/v1/chat/completions` endpoint, including function-tool declarations and
//! tool-call extraction. Requests are plain request/response: no streaming,
//! no retries.

pub mod client;
pub mod config;

pub use client::OpenAiChatClient;
pub use config::{ModelConfig, ModelConfigBuilder};
