//! Model configuration.

use serde::{Deserialize, Serialize};

use tenerife_core::{AssistantError, Result};

/// Generation parameters for chat completions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate per completion.
    pub max_tokens: u32,
    /// Nucleus sampling threshold.
    pub top_p: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { model: "gpt-4o-mini".to_string(), temperature: 0.3, max_tokens: 1024, top_p: 0.9 }
    }
}

impl ModelConfig {
    /// Create a new builder for constructing a [`ModelConfig`].
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`ModelConfig`].
#[derive(Debug, Clone, Default)]
pub struct ModelConfigBuilder {
    config: ModelConfig,
}

impl ModelConfigBuilder {
    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the maximum tokens per completion.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set the nucleus sampling threshold.
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.config.top_p = top_p;
        self
    }

    /// Build the [`ModelConfig`], validating parameter ranges.
    pub fn build(self) -> Result<ModelConfig> {
        if self.config.model.is_empty() {
            return Err(AssistantError::Config("model name must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.config.temperature) {
            return Err(AssistantError::Config(format!(
                "temperature {} out of range [0, 2]",
                self.config.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.config.top_p) {
            return Err(AssistantError::Config(format!(
                "top_p {} out of range [0, 1]",
                self.config.top_p
            )));
        }
        if self.config.max_tokens == 0 {
            return Err(AssistantError::Config("max_tokens must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_settings() {
        let config = ModelConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.top_p, 0.9);
    }

    #[test]
    fn builder_rejects_out_of_range_temperature() {
        assert!(ModelConfig::builder().temperature(3.0).build().is_err());
    }
}
