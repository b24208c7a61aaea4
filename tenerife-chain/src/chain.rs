//! The RAG conversation chain.
//!
//! One [`RagChain`] instance owns one conversation: its history is plain
//! instance state, so parallel conversations use independent chains sharing
//! a single [`VectorIndex`]. A query runs as one strictly sequential unit:
//! retrieve → build context → call model → maybe dispatch a tool and call
//! the model again → update history.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tenerife_core::{AssistantError, Llm, Message, Result};
use tenerife_rag::{Chunk, VectorIndex};

use crate::registry::ToolRegistry;

/// Separator between labeled chunks in the context block.
const CONTEXT_DELIMITER: &str = "\n\n---\n\n";

/// Length of the per-source text preview, in characters.
const PREVIEW_CHARS: usize = 100;

/// One user question paired with its assistant answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub question: String,
    pub answer: String,
}

/// A citation for one retrieved chunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    /// Page index of the originating chunk.
    pub page: usize,
    /// The first characters of the chunk text.
    pub preview: String,
}

/// The outcome of one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainResponse {
    pub question: String,
    pub answer: String,
    pub sources: Vec<Source>,
    /// Whether a tool was consulted while producing the answer.
    pub tool_called: bool,
}

/// Combines vector retrieval, the language model, and tool dispatch into a
/// conversational question-answering chain.
pub struct RagChain {
    llm: Arc<dyn Llm>,
    index: Arc<VectorIndex>,
    tools: ToolRegistry,
    system_prompt: String,
    history: VecDeque<Turn>,
    max_history: usize,
}

impl RagChain {
    /// Create a new [`RagChainBuilder`].
    pub fn builder() -> RagChainBuilder {
        RagChainBuilder::default()
    }

    /// Answer `question` using the top `k` retrieved chunks as context.
    ///
    /// Retrieval or model failures abort the query with no partial answer
    /// and leave the history untouched. Tool failures do not: the error
    /// payload is fed back to the model, which answers around it.
    pub async fn query(&mut self, question: &str, k: usize) -> Result<ChainResponse> {
        // 1. Retrieve. The raw question is the search query; history is not
        //    used for query expansion.
        let chunks = self.index.search(question, k).await.map_err(AssistantError::from)?;
        info!(retrieved = chunks.len(), k, "retrieved context chunks");

        // 2. Build the labeled context block.
        let context = build_context(&chunks);

        // 3. Assemble the prompt: system, prior turns, then context plus
        //    question as a single user turn. The context block is rebuilt
        //    fresh every query and never enters stored history.
        let mut messages = Vec::with_capacity(self.history.len() * 2 + 2);
        messages.push(Message::system(&self.system_prompt));
        for turn in &self.history {
            messages.push(Message::user(&turn.question));
            messages.push(Message::assistant(&turn.answer));
        }
        messages.push(Message::user(format!("CONTEXT:\n{context}\n\nQUESTION: {question}")));

        // 4. First model call, with tool declarations attached.
        let declarations = self.tools.declarations();
        let response = self.llm.complete(&messages, &declarations).await?;

        // 5. Branch on tool calls. Only the first requested call is honored
        //    per turn; a fuller implementation would loop over all of them.
        let mut tool_called = false;
        let answer = if let Some(call) = response.tool_calls.first() {
            if response.tool_calls.len() > 1 {
                debug!(
                    requested = response.tool_calls.len(),
                    "model requested multiple tool calls; honoring the first"
                );
            }
            tool_called = true;
            info!(tool = %call.function.name, "model requested a tool call");

            let result = self.tools.dispatch(&call.function.name, &call.function.arguments).await;

            // The model must see its own call and the result as turns
            // before producing the user-facing answer. This exchange stays
            // internal to the query and is not stored in history.
            messages.push(Message::assistant_tool_calls(vec![call.clone()]));
            messages.push(Message::tool_result(&call.id, result.to_string()));

            self.llm.complete(&messages, &[]).await?.into_text()
        } else {
            response.into_text()
        };

        // 6. Record the turn and trim, oldest first.
        self.history.push_back(Turn { question: question.to_string(), answer: answer.clone() });
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }

        info!(answer_len = answer.len(), tool_called, "generated answer");

        Ok(ChainResponse {
            question: question.to_string(),
            answer,
            sources: chunks.iter().map(source_for).collect(),
            tool_called,
        })
    }

    /// Drop all stored conversation turns.
    pub fn clear_history(&mut self) {
        self.history.clear();
        info!("conversation history cleared");
    }

    /// A read-only snapshot of the stored turns, oldest first.
    pub fn history(&self) -> Vec<Turn> {
        self.history.iter().cloned().collect()
    }
}

/// Concatenate retrieved chunks into a labeled context block, preserving
/// retrieval order.
fn build_context(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .map(|chunk| format!("[Source: page {}]\n{}", chunk.page, chunk.text))
        .collect::<Vec<_>>()
        .join(CONTEXT_DELIMITER)
}

fn source_for(chunk: &Chunk) -> Source {
    Source { page: chunk.page, preview: chunk.text.chars().take(PREVIEW_CHARS).collect() }
}

/// Builder for constructing a [`RagChain`].
#[derive(Default)]
pub struct RagChainBuilder {
    llm: Option<Arc<dyn Llm>>,
    index: Option<Arc<VectorIndex>>,
    tools: ToolRegistry,
    system_prompt: Option<String>,
    max_history: Option<usize>,
}

impl RagChainBuilder {
    /// Set the language-model provider.
    pub fn llm(mut self, llm: Arc<dyn Llm>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Set the vector index to retrieve from.
    pub fn index(mut self, index: Arc<VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Register a callable tool.
    pub fn tool(mut self, tool: Arc<dyn tenerife_core::Tool>) -> Self {
        self.tools.register(tool);
        self
    }

    /// Set the system instructions.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the maximum number of stored turns (default 5).
    pub fn max_history(mut self, max_history: usize) -> Self {
        self.max_history = Some(max_history);
        self
    }

    /// Build the [`RagChain`], validating that required parts are present.
    pub fn build(self) -> Result<RagChain> {
        let llm = self
            .llm
            .ok_or_else(|| AssistantError::Config("llm is required".to_string()))?;
        let index = self
            .index
            .ok_or_else(|| AssistantError::Config("index is required".to_string()))?;
        let system_prompt = self
            .system_prompt
            .ok_or_else(|| AssistantError::Config("system_prompt is required".to_string()))?;

        Ok(RagChain {
            llm,
            index,
            tools: self.tools,
            system_prompt,
            history: VecDeque::new(),
            max_history: self.max_history.unwrap_or(5),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(page: usize, text: &str) -> Chunk {
        Chunk { id: format!("page{page}_0"), text: text.to_string(), page, embedding: Vec::new() }
    }

    #[test]
    fn context_labels_chunks_with_their_page() {
        let context = build_context(&[chunk(2, "beach info"), chunk(5, "teide info")]);
        assert_eq!(context, "[Source: page 2]\nbeach info\n\n---\n\n[Source: page 5]\nteide info");
    }

    #[test]
    fn previews_are_bounded_to_one_hundred_chars() {
        let long = "x".repeat(300);
        let source = source_for(&chunk(0, &long));
        assert_eq!(source.preview.chars().count(), 100);
    }

    #[test]
    fn builder_requires_its_parts() {
        assert!(RagChain::builder().build().is_err());
    }
}
