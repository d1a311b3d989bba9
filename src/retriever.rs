//! Top-k retrieval over a fixed index snapshot.

use std::sync::Arc;

use tracing::debug;

use crate::document::SearchResult;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::index::VectorIndex;

/// A thin wrapper fixing a top-k over one [`VectorIndex`] snapshot.
///
/// Retrieval is a pure function of the question, the index the retriever was
/// constructed with, and its fixed `top_k`. The pipeline constructs a fresh
/// retriever per question against the current index snapshot, so an index
/// swap during a rebuild never affects an in-flight retrieval.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<VectorIndex>,
    top_k: usize,
}

impl Retriever {
    /// Create a retriever over the given index snapshot.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<VectorIndex>, top_k: usize) -> Self {
        Self { embedder, index, top_k }
    }

    /// Embed the question and return its `top_k` nearest chunks, ordered by
    /// descending similarity.
    ///
    /// # Errors
    ///
    /// - [`RagError::Embedding`](crate::RagError::Embedding) if the provider
    ///   fails to embed the question.
    /// - [`RagError::DimensionMismatch`](crate::RagError::DimensionMismatch)
    ///   if the query embedding does not match the indexed dimensionality.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(question).await?;

        debug!(
            question_len = question.len(),
            dimensions = query_embedding.len(),
            top_k = self.top_k,
            "retrieving nearest chunks"
        );

        self.index.search(&query_embedding, self.top_k)
    }
}
