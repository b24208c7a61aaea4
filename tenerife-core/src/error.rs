//! Error types shared across the assistant workspace.

use thiserror::Error;

/// Errors that can abort an assistant operation.
///
/// Locally recoverable failures (malformed tool arguments, out-of-range
/// forecast dates, unknown tools) never surface here: they are returned as
/// structured payloads by [`crate::tool`] and fed back to the model. This
/// enum covers the fatal paths only.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Invalid or missing configuration, fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A language-model request failed.
    #[error("Model error: {0}")]
    Model(String),

    /// Retrieval failed (embedding, search, or an unbuilt index).
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// A tool could not be set up (not a tool call failure, which is
    /// recovered locally).
    #[error("Tool error: {0}")]
    Tool(String),

    /// An I/O failure, e.g. a missing reference document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience result type for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
