//! Data types for pages, chunks, and search results.

use serde::{Deserialize, Serialize};

/// One page of the source document, as produced by the external loader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    /// Zero-based page index.
    pub index: usize,
    /// Raw page text.
    pub text: String,
}

impl Page {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self { index, text: text.into() }
    }
}

/// A contiguous substring of a page, the unit of retrieval.
///
/// Chunks are immutable once created and owned by the index; a rebuild
/// replaces them wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Identifier of the form `page{P}_{i}`.
    pub id: String,
    /// The chunk text.
    pub text: String,
    /// Index of the originating page, kept for citations.
    pub page: usize,
    /// The embedding vector for this chunk's text.
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Chunk length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A retrieved [`Chunk`] paired with its distance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Cosine distance to the query (lower is more similar).
    pub score: f32,
}

/// Summary statistics over the indexed chunks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkStats {
    pub num_chunks: usize,
    pub avg_chunk_size: usize,
    pub min_chunk_size: usize,
    pub max_chunk_size: usize,
}

impl ChunkStats {
    /// Compute stats over a chunk table. Returns the zero value for an
    /// empty table.
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        if chunks.is_empty() {
            return Self::default();
        }
        let lengths: Vec<usize> = chunks.iter().map(Chunk::char_len).collect();
        let total: usize = lengths.iter().sum();
        Self {
            num_chunks: chunks.len(),
            avg_chunk_size: total / chunks.len(),
            min_chunk_size: *lengths.iter().min().unwrap_or(&0),
            max_chunk_size: *lengths.iter().max().unwrap_or(&0),
        }
    }
}
