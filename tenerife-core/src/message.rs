//! Chat message model in OpenAI wire shape.
//!
//! Messages serialize directly into the body of a chat-completions request,
//! so the orchestrator can build the whole conversation (system instructions,
//! history, context, tool exchanges) without a separate conversion layer.

use serde::{Deserialize, Serialize};

/// The author of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    /// Text content. `None` for assistant messages that carry only tool calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool calls requested by the assistant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// For `Role::Tool` messages, the id of the call this result answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    /// A system-instructions message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::text(Role::System, content)
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::text(Role::User, content)
    }

    /// An assistant text message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text(Role::Assistant, content)
    }

    /// An assistant message carrying tool calls and no text.
    pub fn assistant_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self { role: Role::Assistant, content: None, tool_calls, tool_call_id: None }
    }

    /// A tool-result message answering the call identified by `tool_call_id`.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    fn text(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: Some(content.into()), tool_calls: Vec::new(), tool_call_id: None }
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call identifier, echoed back in the result message.
    pub id: String,
    /// Call type; the chat-completions API currently only emits `"function"`.
    #[serde(rename = "type", default = "function_type")]
    pub kind: String,
    pub function: FunctionCall,
}

/// The function half of a [`ToolCall`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// Arguments as a raw JSON string, exactly as the model produced them.
    /// Parsing and validation happen at dispatch time.
    pub arguments: String,
}

fn function_type() -> String {
    "function".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_serializes_without_tool_fields() {
        let json = serde_json::to_value(Message::user("hola")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hola"}));
    }

    #[test]
    fn tool_result_carries_call_id() {
        let json = serde_json::to_value(Message::tool_result("call_1", "{}")).unwrap();
        assert_eq!(json["role"], "tool");
        assert_eq!(json["tool_call_id"], "call_1");
    }

    #[test]
    fn assistant_tool_call_round_trips() {
        let call = ToolCall {
            id: "call_9".into(),
            kind: "function".into(),
            function: FunctionCall {
                name: "get_weather".into(),
                arguments: r#"{"date":"2025-06-15"}"#.into(),
            },
        };
        let message = Message::assistant_tool_calls(vec![call]);
        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("\"content\""));

        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.tool_calls.len(), 1);
        assert_eq!(parsed.tool_calls[0].function.name, "get_weather");
    }
}
