//! Error types for the `ragkit` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building an index or answering a question.
#[derive(Debug, Error)]
pub enum RagError {
    /// A configuration validation error.
    ///
    /// Covers invalid chunk parameters, missing builder fields, and an empty
    /// corpus at build time. Never retryable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The persisted index could not be loaded.
    ///
    /// The path may not exist (the index was never built), or the file on
    /// disk is corrupt or written by an incompatible version. The caller can
    /// recover by rebuilding the index.
    #[error("Index unavailable at {}: {message}", path.display())]
    IndexUnavailable {
        /// The index location that failed to load.
        path: PathBuf,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during answer generation.
    ///
    /// Kept separate from [`RagError::Embedding`] so callers can tell a
    /// retrieval-side failure from a synthesis-side failure.
    #[error("Generation error ({provider}): {message}")]
    Generation {
        /// The generation provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A vector's dimensionality does not match the index.
    ///
    /// Indicates the embedding model used at query time differs from the one
    /// used at build time. This is a configuration bug, not a transient
    /// failure.
    #[error("Dimension mismatch: index has {expected} dimensions, got {actual}")]
    DimensionMismatch {
        /// Dimensionality of the indexed vectors.
        expected: usize,
        /// Dimensionality of the offending vector.
        actual: usize,
    },

    /// An error in the pipeline orchestration.
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
