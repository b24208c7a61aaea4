//! Tool registry and dispatch.
//!
//! Dispatch is an explicit name → handler lookup. It never fails: malformed
//! argument JSON, unknown tool names, and tool-reported failures all come
//! back as error payloads the orchestrator hands to the model.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use tenerife_core::{error_payload, Tool};

/// A lookup table of callable tools, keyed by tool name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its declared name, replacing any previous
    /// registration with that name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Declarations for every registered tool, passed verbatim to the model.
    pub fn declarations(&self) -> Vec<Value> {
        self.tools.values().map(|tool| tool.declaration()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a model-requested tool call.
    ///
    /// `raw_args` is the argument payload exactly as the model produced it.
    pub async fn dispatch(&self, name: &str, raw_args: &str) -> Value {
        let args: Value = match serde_json::from_str(raw_args) {
            Ok(args) => args,
            Err(e) => {
                warn!(tool = name, error = %e, "malformed tool call arguments");
                return error_payload(format!("Malformed tool arguments: {e}"));
            }
        };

        let Some(tool) = self.tools.get(name) else {
            warn!(tool = name, "model requested an unknown tool");
            return error_payload(format!("Unknown function: {name}"));
        };

        info!(tool = name, "dispatching tool call");
        tool.invoke(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use tenerife_core::is_error_payload;

    struct Upper;

    #[async_trait]
    impl Tool for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn description(&self) -> &str {
            "Uppercase a string"
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": { "text": { "type": "string" } },
                "required": ["text"]
            })
        }

        async fn invoke(&self, args: Value) -> Value {
            match args.get("text").and_then(Value::as_str) {
                Some(text) => json!({ "result": text.to_uppercase() }),
                None => error_payload("Missing required 'text' parameter."),
            }
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Upper));
        registry
    }

    #[tokio::test]
    async fn dispatch_runs_the_named_tool() {
        let result = registry().dispatch("upper", r#"{"text":"teide"}"#).await;
        assert_eq!(result["result"], "TEIDE");
    }

    #[tokio::test]
    async fn unknown_tool_yields_error_payload() {
        let result = registry().dispatch("lower", "{}").await;
        assert!(is_error_payload(&result));
        assert!(result["message"].as_str().unwrap().contains("lower"));
    }

    #[tokio::test]
    async fn malformed_arguments_yield_error_payload() {
        let result = registry().dispatch("upper", r#"{"text": "#).await;
        assert!(is_error_payload(&result));
    }

    #[tokio::test]
    async fn tool_level_validation_errors_pass_through() {
        let result = registry().dispatch("upper", "{}").await;
        assert!(is_error_payload(&result));
    }

    #[test]
    fn declarations_cover_registered_tools() {
        let declarations = registry().declarations();
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0]["function"]["name"], "upper");
    }
}
