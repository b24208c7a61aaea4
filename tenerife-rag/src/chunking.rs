//! Recursive document chunking.
//!
//! [`RecursiveChunker`] splits page text with a prioritized separator list:
//! paragraph breaks first, then line breaks, sentence ends, spaces, and a
//! raw character window as a last resort. A piece is only split with a finer
//! separator when it still exceeds the configured chunk size. The trailing
//! `chunk_overlap` characters of each chunk are re-included at the head of
//! the next chunk from the same page.
//!
//! All sizes are measured in characters, not bytes, so multi-byte text never
//! splits mid-character.

use crate::config::RagConfig;
use crate::document::{Chunk, Page};

/// Separators in priority order, coarsest first.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Splits pages into bounded, overlapping chunks.
///
/// The splitter is deterministic: the same pages and settings always produce
/// the same chunk boundaries.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveChunker {
    /// Create a new `RecursiveChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `chunk_overlap` — number of overlapping characters between
    ///   consecutive chunks from the same page
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }

    /// Create a chunker from a validated [`RagConfig`].
    pub fn from_config(config: &RagConfig) -> Self {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Split every page into chunks, preserving page order.
    ///
    /// Chunk IDs are `page{P}_{i}`, and each chunk records its originating
    /// page index for citation purposes. Blank pages produce no chunks.
    /// Embeddings are attached later by the index.
    pub fn split_pages(&self, pages: &[Page]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for page in pages {
            if page.text.trim().is_empty() {
                continue;
            }
            for (i, text) in self.split_text(&page.text).into_iter().enumerate() {
                chunks.push(Chunk {
                    id: format!("page{}_{i}", page.index),
                    text,
                    page: page.index,
                    embedding: Vec::new(),
                });
            }
        }
        chunks
    }

    /// Split a single text into bounded pieces.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        split_and_merge(text, self.chunk_size, self.chunk_overlap, &SEPARATORS)
    }
}

/// Split text by the coarsest separator, then merge segments into chunks that
/// respect `chunk_size`. A merged run that still exceeds `chunk_size` is
/// split again with the remaining, finer separators.
fn split_and_merge(
    text: &str,
    chunk_size: usize,
    chunk_overlap: usize,
    separators: &[&str],
) -> Vec<String> {
    if char_len(text) <= chunk_size {
        return vec![text.to_string()];
    }
    let Some((separator, remaining)) = separators.split_first() else {
        return split_by_size(text, chunk_size, chunk_overlap);
    };

    let segments = split_keeping_separator(text, separator);
    if segments.len() <= 1 {
        // Separator absent at this level; try the next finer one.
        return split_and_merge(text, chunk_size, chunk_overlap, remaining);
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for segment in segments {
        if current.is_empty() {
            current = segment.to_string();
        } else if char_len(&current) + char_len(segment) <= chunk_size {
            current.push_str(segment);
        } else {
            flush(&mut chunks, std::mem::take(&mut current), chunk_size, chunk_overlap, remaining);
            // Seed the next chunk with the overlap tail of the last emitted
            // one; the tail ends exactly where `segment` begins, so the seeded
            // chunk stays a contiguous substring of the page.
            let seed = chunks
                .last()
                .map(|last| tail_chars(last, chunk_overlap).to_string())
                .unwrap_or_default();
            current = seed + segment;
        }
    }

    if !current.is_empty() {
        flush(&mut chunks, current, chunk_size, chunk_overlap, remaining);
    }

    chunks
}

/// Emit a completed run, recursing with finer separators if it is oversized.
fn flush(
    chunks: &mut Vec<String>,
    run: String,
    chunk_size: usize,
    chunk_overlap: usize,
    separators: &[&str],
) {
    if char_len(&run) > chunk_size {
        chunks.extend(split_and_merge(&run, chunk_size, chunk_overlap, separators));
    } else {
        chunks.push(run);
    }
}

/// Split text at a separator while keeping the separator attached to the
/// preceding segment.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut result = Vec::new();
    let mut start = 0;

    while let Some(pos) = text[start..].find(separator) {
        let end = start + pos + separator.len();
        result.push(&text[start..end]);
        start = end;
    }

    if start < text.len() {
        result.push(&text[start..]);
    }

    result
}

/// Character-window splitting with overlap, the last-resort level.
fn split_by_size(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let step = chunk_size.saturating_sub(chunk_overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The last `n` characters of `text` (or all of it if shorter).
fn tail_chars(text: &str, n: usize) -> &str {
    let len = char_len(text);
    if len <= n {
        return text;
    }
    let start = text
        .char_indices()
        .nth(len - n)
        .map(|(byte_index, _)| byte_index)
        .unwrap_or(0);
    &text[start..]
}
