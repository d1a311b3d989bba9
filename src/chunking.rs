//! Fixed-size document chunking.
//!
//! Splits each document into overlapping character windows, preserving the
//! parent document's source identifier on every chunk. Chunking is fully
//! deterministic: the same document and parameters always produce the same
//! chunk sequence, which is what makes index rebuilds reproducible.

use crate::document::{Chunk, Document};
use crate::error::{RagError, Result};

/// Splits documents into fixed-size character windows with overlap.
///
/// Windows advance by `chunk_size - chunk_overlap` characters and stop as
/// soon as a window reaches the end of the text, so a document of `L`
/// characters yields `ceil((L - overlap) / (size - overlap))` chunks, or a
/// single chunk when `L <= size`.
///
/// Offsets are measured in characters and sliced on character boundaries, so
/// multi-byte text never splits inside a code point.
///
/// # Example
///
/// ```rust,ignore
/// use ragkit::FixedSizeChunker;
///
/// let chunker = FixedSizeChunker::new(800, 200)?;
/// let chunks = chunker.chunk_all(&documents);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new chunker.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `chunk_size` is zero or if
    /// `chunk_overlap >= chunk_size` (the window would never advance).
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be greater than zero".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }

    /// Split a single document into chunks.
    ///
    /// Returns an empty `Vec` if the document text is empty. Chunk order
    /// follows text order within the document.
    pub fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every char boundary, plus the end of the text, so
        // char-indexed windows can slice the original string directly.
        let boundaries: Vec<usize> = document
            .text
            .char_indices()
            .map(|(byte_idx, _)| byte_idx)
            .chain(std::iter::once(document.text.len()))
            .collect();
        let char_len = boundaries.len() - 1;

        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.chunk_size).min(char_len);
            chunks.push(Chunk {
                text: document.text[boundaries[start]..boundaries[end]].to_string(),
                source_id: document.source_id.clone(),
            });
            if end == char_len {
                break;
            }
            start += step;
        }

        chunks
    }

    /// Split every document in a corpus, concatenating the per-document
    /// chunk sequences in corpus order.
    pub fn chunk_all(&self, documents: &[Document]) -> Vec<Chunk> {
        documents.iter().flat_map(|doc| self.chunk(doc)).collect()
    }
}
