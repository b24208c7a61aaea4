//! Conversation orchestration for the Tenerife tourism assistant.
//!
//! [`RagChain`] ties the pieces together: it retrieves context from the
//! vector index, prompts the model with context plus conversation history,
//! dispatches tool calls through the [`ToolRegistry`], folds tool results
//! back into a second model call, and maintains a bounded history.

pub mod chain;
pub mod registry;

pub use chain::{ChainResponse, RagChain, RagChainBuilder, Source, Turn};
pub use registry::ToolRegistry;
