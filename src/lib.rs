//! # ragkit
//!
//! Retrieval-augmented question answering over a local text corpus.
//!
//! ## Overview
//!
//! `ragkit` implements a one-shot build-then-query RAG pipeline:
//!
//! - [`load_corpus`] reads `.txt` files into [`Document`]s
//! - [`FixedSizeChunker`] splits them into overlapping windows
//! - an [`EmbeddingProvider`] turns chunk text into vectors
//! - [`VectorIndex`] stores the vectors and answers top-k cosine searches,
//!   with save/load persistence
//! - [`RagPipeline`] ties it together and, per question, retrieves the
//!   nearest chunks and synthesizes a grounded answer through a
//!   [`GenerationProvider`], returning the answer plus the deduplicated,
//!   sorted source identifiers
//!
//! The embedding and generation capabilities are traits, so concrete
//! providers are swappable without touching the pipeline. The [`mock`]
//! module ships deterministic stubs that need no network or credentials;
//! the `openai` feature adds providers for the OpenAI API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ragkit::{RagConfig, RagPipeline, load_corpus};
//! use ragkit::openai::{OpenAIEmbeddingProvider, OpenAIGenerationProvider};
//!
//! let config = RagConfig::default();
//! let pipeline = RagPipeline::builder()
//!     .config(config)
//!     .embedding_provider(Arc::new(OpenAIEmbeddingProvider::from_env()?))
//!     .generation_provider(Arc::new(OpenAIGenerationProvider::from_env()?))
//!     .build()?;
//!
//! let documents = load_corpus(std::path::Path::new("data/raw"))?;
//! pipeline.build_index(&documents).await?;
//!
//! let result = pipeline.answer_question("What is machine learning?").await?;
//! println!("{}\nSources: {:?}", result.answer, result.sources);
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod index;
pub mod loader;
pub mod mock;
#[cfg(feature = "openai")]
pub mod openai;
pub mod pipeline;
pub mod retriever;
pub mod synthesizer;

pub use chunking::FixedSizeChunker;
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{AnswerResult, Chunk, Document, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use generation::GenerationProvider;
pub use index::VectorIndex;
pub use loader::load_corpus;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use retriever::Retriever;
pub use synthesizer::AnswerSynthesizer;
