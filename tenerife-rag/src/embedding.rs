//! Embedding provider trait.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that turns text into vector embeddings.
///
/// The index uses the same provider for chunks and for queries, which keeps
/// both in the same vector space. The default
/// [`embed_batch`](EmbeddingProvider::embed_batch) implementation calls
/// [`embed`](EmbeddingProvider::embed) sequentially; backends with native
/// batching should override it.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}
