//! Language-model provider trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::message::{Message, ToolCall};

/// The outcome of a single model call.
#[derive(Debug, Clone, Default)]
pub struct CompletionResponse {
    /// Text content, if the model produced any.
    pub content: Option<String>,
    /// Tool calls the model wants executed, in the order it emitted them.
    pub tool_calls: Vec<ToolCall>,
    /// Provider finish reason (`"stop"`, `"tool_calls"`, ...), if reported.
    pub finish_reason: Option<String>,
}

impl CompletionResponse {
    /// Consume the response, returning its text content or an empty string.
    pub fn into_text(self) -> String {
        self.content.unwrap_or_default()
    }
}

/// A chat-completion provider.
///
/// `tools` carries function-tool declarations (see [`crate::tool`]) passed
/// verbatim to the provider; an empty slice requests a plain completion.
/// Calls are synchronous from the caller's point of view: no retries or
/// timeouts beyond what the underlying client enforces.
#[async_trait]
pub trait Llm: Send + Sync {
    /// A short name for the backing model, used in logs.
    fn name(&self) -> &str;

    /// Request a completion for the given conversation.
    async fn complete(&self, messages: &[Message], tools: &[Value]) -> Result<CompletionResponse>;
}
