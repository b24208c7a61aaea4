//! Error types for the retrieval core.

use thiserror::Error;

/// Errors that can occur while indexing or searching.
#[derive(Debug, Error)]
pub enum RagError {
    /// The embedding provider failed.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// `search` was called before a successful `build`.
    #[error("Vector index not initialized. Call build() with a non-empty page set first.")]
    NotInitialized,

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<RagError> for tenerife_core::AssistantError {
    fn from(err: RagError) -> Self {
        match err {
            RagError::Config(message) => tenerife_core::AssistantError::Config(message),
            other => tenerife_core::AssistantError::Retrieval(other.to_string()),
        }
    }
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
