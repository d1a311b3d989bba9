//! Data types for documents, chunks, retrieval results, and answers.

use serde::{Deserialize, Serialize};

/// A source document supplied by the corpus loader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// The full text content of the document.
    pub text: String,
    /// Stable identifier of the source this document came from,
    /// typically the corpus file name.
    pub source_id: String,
}

impl Document {
    /// Create a new document from text and its source identifier.
    pub fn new(text: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self { text: text.into(), source_id: source_id.into() }
    }
}

/// A bounded text window derived from exactly one [`Document`].
///
/// Every chunk retains its parent document's `source_id`; chunks are never
/// merged across documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The text content of the chunk.
    pub text: String,
    /// The `source_id` of the parent [`Document`].
    pub source_id: String,
}

/// A retrieved [`Chunk`] paired with a similarity score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The cosine similarity score (higher is more similar).
    pub score: f32,
}

/// The result of answering a question: the synthesized answer plus the
/// deduplicated, lexicographically sorted identifiers of the sources the
/// retrieved context came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerResult {
    /// The synthesized answer text.
    pub answer: String,
    /// Source identifiers of the retrieved chunks, deduplicated and sorted.
    pub sources: Vec<String>,
}
