//! The vector index: owned chunk/embedding storage with k-nearest-neighbor
//! search and disk persistence.
//!
//! A [`VectorIndex`] is built once per corpus snapshot and is read-only
//! afterwards. It owns every `(chunk, embedding)` pair plus the metadata
//! needed to detect incompatibility at load time: a format version, the
//! embedding model identifier, and the vector dimensionality. Searches rank
//! by cosine similarity.
//!
//! The persisted form is a directory containing a single self-describing
//! `index.json` file. Saving is all-or-nothing: the file is written to a
//! temporary name and renamed into place, so a failed save never leaves a
//! partial index behind.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};

/// File name of the persisted index inside the index directory.
const INDEX_FILE: &str = "index.json";

/// Version of the on-disk format. Bump on any incompatible change.
const FORMAT_VERSION: u32 = 1;

/// An immutable vector index over a chunked corpus.
///
/// # Example
///
/// ```rust,ignore
/// use ragkit::VectorIndex;
///
/// let index = VectorIndex::build(chunks, embeddings, "text-embedding-3-small")?;
/// let results = index.search(&query_embedding, 4)?;
/// index.save(Path::new("artifacts/index"))?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorIndex {
    format_version: u32,
    embedding_model: String,
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

/// One indexed chunk with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct IndexEntry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

impl VectorIndex {
    /// Construct an index from parallel chunk and embedding slices.
    ///
    /// `embedding_model` records which model produced the vectors, so that a
    /// later [`load`](VectorIndex::load) can be cross-checked against the
    /// configured embedder.
    ///
    /// # Errors
    ///
    /// - [`RagError::Config`] if `chunks` is empty (there is no corpus to
    ///   index) or any embedding is zero-length.
    /// - [`RagError::Pipeline`] if `chunks` and `embeddings` differ in length.
    /// - [`RagError::DimensionMismatch`] if the embeddings do not all share
    ///   one dimensionality.
    pub fn build(
        chunks: Vec<Chunk>,
        embeddings: Vec<Vec<f32>>,
        embedding_model: impl Into<String>,
    ) -> Result<Self> {
        if chunks.is_empty() {
            return Err(RagError::Config(
                "cannot build an index from an empty corpus".to_string(),
            ));
        }
        if chunks.len() != embeddings.len() {
            return Err(RagError::Pipeline(format!(
                "chunk/embedding count mismatch: {} chunks, {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let dimensions = embeddings[0].len();
        if dimensions == 0 {
            return Err(RagError::Config("embeddings must not be zero-length".to_string()));
        }
        for embedding in &embeddings {
            if embedding.len() != dimensions {
                return Err(RagError::DimensionMismatch {
                    expected: dimensions,
                    actual: embedding.len(),
                });
            }
        }

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect::<Vec<_>>();

        info!(entry_count = entries.len(), dimensions, "built vector index");

        Ok(Self {
            format_version: FORMAT_VERSION,
            embedding_model: embedding_model.into(),
            dimensions,
            entries,
        })
    }

    /// Return up to `top_k` entries most similar to `query`, ordered by
    /// descending cosine similarity.
    ///
    /// Every stored entry is scored at most once, so the result never
    /// contains duplicates. Ties keep index order, which makes repeated
    /// searches with the same query fully deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if `query` does not match the
    /// indexed dimensionality.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        if query.len() != self.dimensions {
            return Err(RagError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut scored: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(&entry.embedding, query),
            })
            .collect();

        // sort_by is stable, so equal scores keep insertion order.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        debug!(result_count = scored.len(), top_k, "index search completed");

        Ok(scored)
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries. Always `false` for an index that
    /// came out of [`build`](VectorIndex::build).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimensionality of the indexed vectors.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Identifier of the embedding model that produced the indexed vectors.
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    /// Persist the index to `dir`, creating the directory if needed.
    ///
    /// The index is serialized to a temporary file and renamed into place so
    /// that a failed save cannot leave a truncated index on disk.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Pipeline`] if serialization or any filesystem
    /// operation fails.
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| {
            RagError::Pipeline(format!("failed to create index directory {}: {e}", dir.display()))
        })?;

        let bytes = serde_json::to_vec(self)
            .map_err(|e| RagError::Pipeline(format!("failed to serialize index: {e}")))?;

        let final_path = dir.join(INDEX_FILE);
        let tmp_path = dir.join(format!("{INDEX_FILE}.tmp"));

        fs::write(&tmp_path, &bytes).map_err(|e| {
            RagError::Pipeline(format!("failed to write {}: {e}", tmp_path.display()))
        })?;
        fs::rename(&tmp_path, &final_path).map_err(|e| {
            RagError::Pipeline(format!("failed to move index into place: {e}"))
        })?;

        info!(path = %final_path.display(), entry_count = self.entries.len(), "saved vector index");

        Ok(())
    }

    /// Load a previously saved index from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexUnavailable`] if the index file does not
    /// exist (the index was never built), cannot be parsed, was written by an
    /// incompatible format version, or holds no entries. The caller recovers
    /// by rebuilding.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(INDEX_FILE);

        let bytes = fs::read(&path).map_err(|e| RagError::IndexUnavailable {
            path: path.clone(),
            message: if e.kind() == std::io::ErrorKind::NotFound {
                "no index file found; build the index first".to_string()
            } else {
                format!("failed to read index file: {e}")
            },
        })?;

        let index: VectorIndex =
            serde_json::from_slice(&bytes).map_err(|e| RagError::IndexUnavailable {
                path: path.clone(),
                message: format!("index file is corrupt: {e}"),
            })?;

        if index.format_version != FORMAT_VERSION {
            return Err(RagError::IndexUnavailable {
                path,
                message: format!(
                    "unsupported index format version {} (expected {FORMAT_VERSION})",
                    index.format_version
                ),
            });
        }
        if index.entries.is_empty() {
            return Err(RagError::IndexUnavailable {
                path,
                message: "index file holds no entries".to_string(),
            });
        }

        info!(
            path = %path.display(),
            entry_count = index.entries.len(),
            dimensions = index.dimensions,
            model = %index.embedding_model,
            "loaded vector index"
        );

        Ok(index)
    }

    /// Path of the index file a [`save`](VectorIndex::save) to `dir` writes.
    pub fn file_path(dir: &Path) -> PathBuf {
        dir.join(INDEX_FILE)
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
