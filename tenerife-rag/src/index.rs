//! The in-memory vector index.
//!
//! [`VectorIndex`] owns the chunk table: [`build`](VectorIndex::build) runs
//! chunk → embed → swap, and [`search`](VectorIndex::search) answers top-k
//! similarity queries. The whole table lives under one `RwLock`, so a rebuild
//! is an atomic swap serialized against in-flight searches; readers see
//! either the previous table or the new one, never a mix.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::chunking::RecursiveChunker;
use crate::config::RagConfig;
use crate::document::{Chunk, ChunkStats, Page, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// An in-memory similarity index over document chunks.
///
/// Search scores are cosine distances (lower = more similar); results come
/// back in ascending score order with ties broken by chunk insertion order.
pub struct VectorIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    chunker: RecursiveChunker,
    /// `None` until a successful, non-empty build.
    chunks: RwLock<Option<Vec<Chunk>>>,
}

impl VectorIndex {
    /// Create an empty index. Searching before [`build`](Self::build)
    /// returns [`RagError::NotInitialized`].
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, config: RagConfig) -> Self {
        Self { embedder, chunker: RecursiveChunker::from_config(&config), chunks: RwLock::new(None) }
    }

    /// Chunk and embed `pages`, replacing any previous index contents.
    ///
    /// Returns the number of chunks indexed. An empty page set (or pages
    /// with no text) clears the index and leaves it uninitialized.
    ///
    /// Embedding happens before the write lock is taken, so concurrent
    /// searches keep seeing the old table until the swap.
    pub async fn build(&self, pages: &[Page]) -> Result<usize> {
        let mut chunks = self.chunker.split_pages(pages);
        if chunks.is_empty() {
            warn!(page_count = pages.len(), "no chunks produced; index left uninitialized");
            *self.chunks.write().await = None;
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        let chunk_count = chunks.len();
        *self.chunks.write().await = Some(chunks);
        info!(chunk_count, page_count = pages.len(), "vector index built");
        Ok(chunk_count)
    }

    /// Return the `k` chunks most similar to `query`.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<Chunk>> {
        let results = self.search_with_scores(query, k).await?;
        Ok(results.into_iter().map(|r| r.chunk).collect())
    }

    /// Return the `k` chunks most similar to `query`, with distance scores.
    ///
    /// `k` is expected to be at least 1; 0 is treated as 1.
    pub async fn search_with_scores(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        if k == 0 {
            debug!("search called with k = 0; clamping to 1");
        }
        let k = k.max(1);

        let query_embedding = self.embedder.embed(query).await?;

        let chunks = self.chunks.read().await;
        let chunks = chunks.as_ref().ok_or(RagError::NotInitialized)?;

        let mut scored: Vec<SearchResult> = chunks
            .iter()
            .map(|chunk| SearchResult {
                chunk: chunk.clone(),
                score: cosine_distance(&chunk.embedding, &query_embedding),
            })
            .collect();

        // Stable sort keeps insertion order for equal scores.
        scored.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        debug!(query_len = query.len(), result_count = scored.len(), "similarity search");
        Ok(scored)
    }

    /// Whether a successful build has populated the index.
    pub async fn is_ready(&self) -> bool {
        self.chunks.read().await.is_some()
    }

    /// Summary statistics over the current chunk table.
    pub async fn stats(&self) -> ChunkStats {
        match self.chunks.read().await.as_ref() {
            Some(chunks) => ChunkStats::from_chunks(chunks),
            None => ChunkStats::default(),
        }
    }
}

/// Cosine distance: `1 - cos(a, b)`. Vectors with zero magnitude are treated
/// as maximally distant.
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_have_zero_distance() {
        let v = [0.6f32, 0.8, 0.0];
        assert!(cosine_distance(&v, &v).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_have_unit_distance() {
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_is_maximally_distant() {
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }
}
