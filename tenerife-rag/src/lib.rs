//! Retrieval core for the Tenerife tourism assistant.
//!
//! This crate turns the pages of a reference document into a searchable
//! in-memory vector index:
//!
//! - [`RecursiveChunker`] — splits page text into overlapping chunks using a
//!   prioritized separator list
//! - [`EmbeddingProvider`] — the embedding backend trait, with
//!   [`OpenAiEmbeddingProvider`] as the hosted implementation
//! - [`VectorIndex`] — builds the chunk table atomically and answers top-k
//!   similarity queries over it

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod openai;

pub use chunking::RecursiveChunker;
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, ChunkStats, Page, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use index::VectorIndex;
pub use openai::OpenAiEmbeddingProvider;
