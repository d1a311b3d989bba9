//! RAG pipeline orchestrator.
//!
//! The [`RagPipeline`] coordinates the full build-then-query workflow by
//! composing an [`EmbeddingProvider`], a [`GenerationProvider`], the
//! [`FixedSizeChunker`], and a swappable [`VectorIndex`] slot.
//!
//! # Example
//!
//! ```rust,ignore
//! use ragkit::{RagConfig, RagPipeline};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(embedder))
//!     .generation_provider(Arc::new(generator))
//!     .build()?;
//!
//! pipeline.build_index(&documents).await?;
//! let result = pipeline.answer_question("What is machine learning?").await?;
//! println!("{} (sources: {:?})", result.answer, result.sources);
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use crate::chunking::FixedSizeChunker;
use crate::config::RagConfig;
use crate::document::{AnswerResult, Document};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::GenerationProvider;
use crate::index::VectorIndex;
use crate::retriever::Retriever;
use crate::synthesizer::AnswerSynthesizer;

/// The RAG pipeline facade.
///
/// Holds the current [`VectorIndex`] in a single swappable slot: a rebuild
/// constructs and persists a complete new index, then replaces the slot
/// atomically. Questions answered concurrently keep reading the snapshot
/// they started with, so a rebuild never interleaves with a search.
///
/// Construct one via [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    chunker: FixedSizeChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    synthesizer: AnswerSynthesizer,
    index: RwLock<Option<Arc<VectorIndex>>>,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Build the vector index from a corpus snapshot and persist it.
    ///
    /// Chunks every document, embeds all chunks in one ordered batch, builds
    /// a fresh [`VectorIndex`], saves it to the configured index directory,
    /// and only then swaps it in as the current index. A failure anywhere
    /// leaves both the current index and the persisted index untouched.
    ///
    /// Returns the number of indexed chunks.
    ///
    /// # Errors
    ///
    /// - [`RagError::Config`] if the corpus is empty. No embedding calls are
    ///   made in that case.
    /// - [`RagError::Embedding`] if the embedding provider fails.
    /// - [`RagError::DimensionMismatch`] if the provider returns vectors that
    ///   disagree with its declared dimensionality.
    /// - [`RagError::Pipeline`] if persisting the index fails.
    pub async fn build_index(&self, documents: &[Document]) -> Result<usize> {
        if documents.is_empty() {
            return Err(RagError::Config("no documents found in corpus".to_string()));
        }

        let chunks = self.chunker.chunk_all(documents);
        if chunks.is_empty() {
            return Err(RagError::Config("corpus documents contain no text".to_string()));
        }

        info!(document_count = documents.len(), chunk_count = chunks.len(), "chunked corpus");

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await.inspect_err(|e| {
            error!(error = %e, "embedding failed during index build");
        })?;

        let declared = self.embedder.dimensions();
        if let Some(first) = embeddings.first()
            && first.len() != declared
        {
            return Err(RagError::DimensionMismatch { expected: declared, actual: first.len() });
        }

        let index =
            VectorIndex::build(chunks, embeddings, self.config.embedding_model.clone())?;
        index.save(&self.config.index_dir)?;

        let chunk_count = index.len();
        *self.index.write().await = Some(Arc::new(index));

        info!(chunk_count, index_dir = %self.config.index_dir.display(), "index built");

        Ok(chunk_count)
    }

    /// Load a previously persisted index and make it current.
    ///
    /// # Errors
    ///
    /// - [`RagError::IndexUnavailable`] if the persisted index is missing,
    ///   corrupt, or written by an incompatible version.
    /// - [`RagError::DimensionMismatch`] if the loaded index's vectors do not
    ///   match the configured embedding provider's dimensionality.
    /// - [`RagError::Config`] if the loaded index was built with a different
    ///   embedding model than the one configured.
    pub async fn load_index(&self) -> Result<()> {
        let index = VectorIndex::load(&self.config.index_dir)?;

        if index.dimensions() != self.embedder.dimensions() {
            return Err(RagError::DimensionMismatch {
                expected: index.dimensions(),
                actual: self.embedder.dimensions(),
            });
        }
        if index.embedding_model() != self.config.embedding_model {
            return Err(RagError::Config(format!(
                "index was built with embedding model '{}' but '{}' is configured",
                index.embedding_model(),
                self.config.embedding_model
            )));
        }

        *self.index.write().await = Some(Arc::new(index));
        Ok(())
    }

    /// Answer a question from the current index.
    ///
    /// Retrieves the top-k nearest chunks, synthesizes a grounded answer
    /// from them, and returns it together with the deduplicated,
    /// lexicographically sorted source identifiers of the retrieved chunks.
    /// Retrieving zero chunks is not an error; the synthesizer is invoked
    /// with empty context and states that it has no information.
    ///
    /// No partial result is ever returned: the call yields either a complete
    /// [`AnswerResult`] or a single error.
    ///
    /// # Errors
    ///
    /// - [`RagError::IndexUnavailable`] if no index has been built or loaded.
    /// - [`RagError::Embedding`] / [`RagError::DimensionMismatch`] from the
    ///   retrieval step.
    /// - [`RagError::Generation`] from the synthesis step.
    pub async fn answer_question(&self, question: &str) -> Result<AnswerResult> {
        let index = self.current_index().await?;

        let retriever = Retriever::new(Arc::clone(&self.embedder), index, self.config.top_k);
        let results = retriever.retrieve(question).await?;

        let answer = self.synthesizer.synthesize(question, &results).await?;

        let sources: BTreeSet<String> =
            results.iter().map(|r| r.chunk.source_id.clone()).collect();
        let sources: Vec<String> = sources.into_iter().collect();

        info!(
            question_len = question.len(),
            retrieved = results.len(),
            source_count = sources.len(),
            "answered question"
        );

        Ok(AnswerResult { answer, sources })
    }

    /// Answer a question, degrading any failure into a caller-visible result.
    ///
    /// On error the returned [`AnswerResult`] carries the error description
    /// as its answer and an empty source list, so a UI layer never has to
    /// handle a pipeline failure specially.
    pub async fn answer_or_error(&self, question: &str) -> AnswerResult {
        match self.answer_question(question).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "question failed, degrading to error answer");
                AnswerResult { answer: format!("An error occurred: {e}"), sources: Vec::new() }
            }
        }
    }

    /// Snapshot the current index, or fail if none has been built or loaded.
    async fn current_index(&self) -> Result<Arc<VectorIndex>> {
        self.index.read().await.clone().ok_or_else(|| RagError::IndexUnavailable {
            path: self.config.index_dir.clone(),
            message: "no index is loaded; build or load one first".to_string(),
        })
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// All fields are required. Call [`build()`](RagPipelineBuilder::build) to
/// validate and produce the pipeline.
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    generation_provider: Option<Arc<dyn GenerationProvider>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the generation provider.
    pub fn generation_provider(mut self, provider: Arc<dyn GenerationProvider>) -> Self {
        self.generation_provider = Some(provider);
        self
    }

    /// Build the [`RagPipeline`], validating that all required pieces are
    /// present and consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any required field is missing, if the
    /// chunk parameters are invalid, or if either provider's model does not
    /// match the configured model identifier. The model check makes a
    /// build-time/query-time model mismatch impossible to set up silently.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::Config("config is required".to_string()))?;
        let embedder = self
            .embedding_provider
            .ok_or_else(|| RagError::Config("embedding_provider is required".to_string()))?;
        let generator = self
            .generation_provider
            .ok_or_else(|| RagError::Config("generation_provider is required".to_string()))?;

        if embedder.model() != config.embedding_model {
            return Err(RagError::Config(format!(
                "embedding provider model '{}' does not match configured '{}'",
                embedder.model(),
                config.embedding_model
            )));
        }
        if generator.model() != config.generation_model {
            return Err(RagError::Config(format!(
                "generation provider model '{}' does not match configured '{}'",
                generator.model(),
                config.generation_model
            )));
        }

        let chunker = FixedSizeChunker::new(config.chunk_size, config.chunk_overlap)?;
        let synthesizer = AnswerSynthesizer::new(generator);

        Ok(RagPipeline {
            config,
            chunker,
            embedder,
            synthesizer,
            index: RwLock::new(None),
        })
    }
}
