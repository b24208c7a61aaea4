//! Configuration for chunking and indexing.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Parameters controlling how the reference document is chunked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RagConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self { chunk_size: 1000, chunk_overlap: 200 }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `chunk_size` is zero or
    /// `chunk_overlap >= chunk_size`.
    pub fn build(self) -> Result<RagConfig> {
        if self.config.chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_settings() {
        let config = RagConfig::default();
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.chunk_overlap, 200);
    }

    #[test]
    fn rejects_overlap_not_below_size() {
        let result = RagConfig::builder().chunk_size(100).chunk_overlap(100).build();
        assert!(matches!(result, Err(RagError::Config(_))));
    }

    #[test]
    fn rejects_zero_chunk_size() {
        let result = RagConfig::builder().chunk_size(0).chunk_overlap(0).build();
        assert!(matches!(result, Err(RagError::Config(_))));
    }
}
