//! Corpus loader: reads raw text files into [`Document`]s.
//!
//! The loader scans a single directory for `.txt` files and uses each file
//! name as the document's source identifier. Files are visited in name order
//! so repeated loads of the same corpus produce the same document sequence.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::document::Document;
use crate::error::{RagError, Result};

/// Load all `.txt` files from `dir` as documents.
///
/// Non-`.txt` entries and subdirectories are skipped. The file name (not the
/// full path) becomes the document's `source_id`.
///
/// # Errors
///
/// - [`RagError::Config`] if the directory yields zero usable files.
/// - [`RagError::Pipeline`] if the directory cannot be read or a file cannot
///   be decoded as UTF-8 text.
pub fn load_corpus(dir: &Path) -> Result<Vec<Document>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        RagError::Pipeline(format!("failed to read corpus directory {}: {e}", dir.display()))
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path).map_err(|e| {
            RagError::Pipeline(format!("failed to read corpus file {}: {e}", path.display()))
        })?;
        let source_id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        documents.push(Document { text, source_id });
    }

    if documents.is_empty() {
        return Err(RagError::Config(format!(
            "no .txt documents found in {}",
            dir.display()
        )));
    }

    info!(document_count = documents.len(), dir = %dir.display(), "loaded corpus");

    Ok(documents)
}
