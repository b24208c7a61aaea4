//! Environment-driven settings for the console binary.

use anyhow::{bail, Context};

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub doc_path: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub max_history: usize,
    pub top_k: usize,
    /// Optional path to a file overriding the built-in system prompt.
    pub system_prompt_path: Option<String>,
}

impl Settings {
    /// Read settings from the environment. `OPENAI_API_KEY` is required;
    /// everything else falls back to the defaults below.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => bail!(
                "OPENAI_API_KEY must be set.\n\
                 Create a key at https://platform.openai.com/api-keys"
            ),
        };

        let settings = Self {
            api_key,
            doc_path: std::env::var("TENERIFE_DOC_PATH")
                .unwrap_or_else(|_| "data/tenerife.txt".to_string()),
            chunk_size: env_usize("TENERIFE_CHUNK_SIZE", 1000)?,
            chunk_overlap: env_usize("TENERIFE_CHUNK_OVERLAP", 200)?,
            max_history: env_usize("TENERIFE_MAX_HISTORY", 5)?,
            top_k: env_usize("TENERIFE_TOP_K", 3)?,
            system_prompt_path: std::env::var("SYSTEM_PROMPT_PATH").ok(),
        };

        if settings.top_k == 0 {
            bail!("TENERIFE_TOP_K must be greater than zero");
        }
        Ok(settings)
    }
}

fn env_usize(name: &str, default: usize) -> anyhow::Result<usize> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<usize>()
            .with_context(|| format!("{name} must be a non-negative integer, got {value:?}")),
        Err(_) => Ok(default),
    }
}
