//! The chat-completions client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use tenerife_core::{AssistantError, CompletionResponse, Llm, Message, Result, ToolCall};

use crate::config::ModelConfig;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// A chat-completion client for the OpenAI API and compatible endpoints.
///
/// Tool declarations from the registry are forwarded verbatim; tool calls in
/// the response come back on [`CompletionResponse::tool_calls`] with their
/// raw argument strings for the orchestrator to dispatch.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    config: ModelConfig,
}

impl OpenAiChatClient {
    /// Create a new client with the given API key and default config.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(AssistantError::Config("API key must not be empty".to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            config: ModelConfig::default(),
        })
    }

    /// Create a new client using the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AssistantError::Config("OPENAI_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    /// Replace the generation config.
    pub fn with_config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the API base URL (OpenAI-compatible endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Issue a minimal completion to verify connectivity and credentials.
    pub async fn ping(&self) -> bool {
        match self.complete(&[Message::user("Say OK")], &[]).await {
            Ok(_) => {
                info!(model = %self.config.model, "connection test successful");
                true
            }
            Err(e) => {
                error!(error = %e, "connection test failed");
                false
            }
        }
    }
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    #[serde(skip_serializing_if = "<[Value]>::is_empty")]
    tools: &'a [Value],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: u64,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[async_trait]
impl Llm for OpenAiChatClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, messages: &[Message], tools: &[Value]) -> Result<CompletionResponse> {
        debug!(
            model = %self.config.model,
            message_count = messages.len(),
            tool_count = tools.len(),
            "requesting completion"
        );

        let request_body = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
            tools,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "completion request failed");
                AssistantError::Model(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!(%status, "chat completions API error");
            return Err(AssistantError::Model(format!("API returned {status}: {detail}")));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to parse completion response");
            AssistantError::Model(format!("failed to parse response: {e}"))
        })?;

        if let Some(usage) = &chat_response.usage {
            info!(total_tokens = usage.total_tokens, "completion received");
        }

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AssistantError::Model("API returned no choices".to_string()))?;

        Ok(CompletionResponse {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls,
            finish_reason: choice.finish_reason,
        })
    }
}
