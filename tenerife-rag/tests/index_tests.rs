//! Behavior tests for the in-memory vector index, using a deterministic
//! embedding stub.

use std::sync::Arc;

use async_trait::async_trait;
use tenerife_rag::config::RagConfig;
use tenerife_rag::document::Page;
use tenerife_rag::embedding::EmbeddingProvider;
use tenerife_rag::error::RagError;
use tenerife_rag::index::VectorIndex;

/// Letter-frequency embeddings: deterministic, and similar texts land close
/// together, which is all these tests need.
struct LetterFrequencyEmbedder;

#[async_trait]
impl EmbeddingProvider for LetterFrequencyEmbedder {
    async fn embed(&self, text: &str) -> tenerife_rag::Result<Vec<f32>> {
        let mut vector = vec![0.0f32; 26];
        for c in text.chars() {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() {
                vector[(c as u8 - b'a') as usize] += 1.0;
            }
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        26
    }
}

fn make_index() -> VectorIndex {
    VectorIndex::new(
        Arc::new(LetterFrequencyEmbedder),
        RagConfig::builder().chunk_size(200).chunk_overlap(20).build().unwrap(),
    )
}

fn sample_pages() -> Vec<Page> {
    vec![
        Page::new(0, "The beaches have golden sand and calm water for swimming."),
        Page::new(1, "Mount Teide is a volcano with hiking trails above the clouds."),
        Page::new(2, "Local restaurants serve papas arrugadas with mojo sauce."),
    ]
}

#[tokio::test]
async fn search_before_build_is_not_initialized() {
    let index = make_index();
    let result = index.search("beaches", 3).await;
    assert!(matches!(result, Err(RagError::NotInitialized)));
}

#[tokio::test]
async fn empty_build_leaves_index_uninitialized() {
    let index = make_index();
    assert_eq!(index.build(&[]).await.unwrap(), 0);
    assert!(!index.is_ready().await);
    assert!(matches!(index.search("anything", 1).await, Err(RagError::NotInitialized)));

    // Pages with only whitespace count as empty too.
    assert_eq!(index.build(&[Page::new(0, "  \n ")]).await.unwrap(), 0);
    assert!(!index.is_ready().await);
}

#[tokio::test]
async fn search_returns_at_most_k_results() {
    let index = make_index();
    let built = index.build(&sample_pages()).await.unwrap();
    assert_eq!(built, 3);

    assert_eq!(index.search("sand", 2).await.unwrap().len(), 2);
    // Fewer results only when the index holds fewer chunks than k.
    assert_eq!(index.search("sand", 10).await.unwrap().len(), 3);
}

#[tokio::test]
async fn results_are_ordered_by_ascending_distance() {
    let index = make_index();
    index.build(&sample_pages()).await.unwrap();

    let results = index.search_with_scores("golden sand beaches swimming", 3).await.unwrap();
    assert_eq!(results[0].chunk.page, 0, "beach chunk should rank first");
    for pair in results.windows(2) {
        assert!(pair[0].score <= pair[1].score);
    }
}

#[tokio::test]
async fn rebuild_is_deterministic_and_replaces_contents() {
    let index = make_index();
    let first = index.build(&sample_pages()).await.unwrap();
    let ids_before: Vec<String> =
        index.search("food", 10).await.unwrap().into_iter().map(|c| c.id).collect();

    // Same pages, same settings: same chunk count and boundaries.
    let second = index.build(&sample_pages()).await.unwrap();
    let mut ids_after: Vec<String> =
        index.search("food", 10).await.unwrap().into_iter().map(|c| c.id).collect();
    assert_eq!(first, second);
    ids_after.sort();
    let mut sorted_before = ids_before.clone();
    sorted_before.sort();
    assert_eq!(sorted_before, ids_after);

    // A rebuild with different pages replaces the table wholesale.
    index.build(&[Page::new(7, "Carnival parades fill the streets in February.")]).await.unwrap();
    let chunks = index.search("carnival", 10).await.unwrap();
    assert!(chunks.iter().all(|c| c.page == 7));
}

#[tokio::test]
async fn stats_reflect_the_current_table() {
    let index = make_index();
    assert_eq!(index.stats().await.num_chunks, 0);

    index.build(&sample_pages()).await.unwrap();
    let stats = index.stats().await;
    assert_eq!(stats.num_chunks, 3);
    assert!(stats.min_chunk_size <= stats.avg_chunk_size);
    assert!(stats.avg_chunk_size <= stats.max_chunk_size);
}

#[tokio::test]
async fn zero_k_is_clamped_to_one() {
    let index = make_index();
    index.build(&sample_pages()).await.unwrap();
    assert_eq!(index.search("teide", 0).await.unwrap().len(), 1);
}
