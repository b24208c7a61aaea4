//! Callable-tool contract.
//!
//! A [`Tool`] exposes a declarative schema the model uses to decide when to
//! call it, and an invocation handler. Handlers are infallible at the type
//! level: validation failures, out-of-range inputs, and internal errors all
//! come back as [`error_payload`]-shaped values so the orchestrator can feed
//! them to the model instead of aborting the turn.

use async_trait::async_trait;
use serde_json::{json, Value};

/// A tool the language model may call during a conversation.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as the model addresses it.
    fn name(&self) -> &str;

    /// Natural-language description of when to use the tool.
    fn description(&self) -> &str;

    /// JSON-schema parameters object (`{"type": "object", "properties": ...}`).
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with parsed arguments.
    ///
    /// Returns either a success payload or an [`error_payload`].
    async fn invoke(&self, args: Value) -> Value;

    /// The function-tool declaration passed verbatim to the model.
    fn declaration(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description(),
                "parameters": self.parameters_schema(),
            }
        })
    }
}

/// Build the structured error payload tools and the dispatcher return on
/// failure. The shape is stable so the model can recognize it.
pub fn error_payload(message: impl Into<String>) -> Value {
    json!({ "error": true, "message": message.into() })
}

/// Whether a tool result payload reports an error.
pub fn is_error_payload(value: &Value) -> bool {
    value.get("error").and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": { "text": { "type": "string" } },
                "required": ["text"]
            })
        }

        async fn invoke(&self, args: Value) -> Value {
            args
        }
    }

    #[test]
    fn declaration_has_function_tool_shape() {
        let declaration = Echo.declaration();
        assert_eq!(declaration["type"], "function");
        assert_eq!(declaration["function"]["name"], "echo");
        assert_eq!(declaration["function"]["parameters"]["required"][0], "text");
    }

    #[test]
    fn error_payload_is_recognizable() {
        let payload = error_payload("boom");
        assert!(is_error_payload(&payload));
        assert_eq!(payload["message"], "boom");
        assert!(!is_error_payload(&json!({"condition": "Sunny"})));
    }
}
