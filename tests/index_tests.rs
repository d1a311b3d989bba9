//! Tests for the vector index: build preconditions, search bounds, and
//! save/load persistence.

use std::fs;

use ragkit::{Chunk, RagError, VectorIndex};

const MODEL: &str = "text-embedding-3-small";

fn chunk(text: &str, source_id: &str) -> Chunk {
    Chunk { text: text.to_string(), source_id: source_id.to_string() }
}

fn sample_index() -> VectorIndex {
    let chunks = vec![
        chunk("east", "a.txt"),
        chunk("north", "a.txt"),
        chunk("northeast", "b.txt"),
    ];
    let embeddings = vec![
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![0.7, 0.7],
    ];
    VectorIndex::build(chunks, embeddings, MODEL).unwrap()
}

#[test]
fn build_from_empty_corpus_fails() {
    let result = VectorIndex::build(Vec::new(), Vec::new(), MODEL);
    assert!(matches!(result, Err(RagError::Config(_))));
}

#[test]
fn build_with_count_mismatch_fails() {
    let result = VectorIndex::build(vec![chunk("one", "a.txt")], Vec::new(), MODEL);
    assert!(matches!(result, Err(RagError::Pipeline(_))));
}

#[test]
fn build_with_ragged_embeddings_fails() {
    let chunks = vec![chunk("one", "a.txt"), chunk("two", "a.txt")];
    let embeddings = vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]];
    let result = VectorIndex::build(chunks, embeddings, MODEL);
    assert!(matches!(
        result,
        Err(RagError::DimensionMismatch { expected: 2, actual: 3 })
    ));
}

#[test]
fn search_ranks_by_descending_similarity() {
    let index = sample_index();
    let results = index.search(&[1.0, 0.0], 3).unwrap();

    let texts: Vec<&str> = results.iter().map(|r| r.chunk.text.as_str()).collect();
    assert_eq!(texts, vec!["east", "northeast", "north"]);
    for window in results.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
}

#[test]
fn search_returns_at_most_k_results() {
    let index = sample_index();
    assert_eq!(index.search(&[1.0, 0.0], 2).unwrap().len(), 2);
    assert_eq!(index.search(&[1.0, 0.0], 1).unwrap().len(), 1);
}

#[test]
fn search_with_k_beyond_index_size_returns_all_without_duplicates() {
    let index = sample_index();
    let results = index.search(&[0.5, 0.5], 10).unwrap();

    assert_eq!(results.len(), index.len());
    let mut texts: Vec<&str> = results.iter().map(|r| r.chunk.text.as_str()).collect();
    texts.sort_unstable();
    texts.dedup();
    assert_eq!(texts.len(), index.len());
}

#[test]
fn search_with_wrong_dimensionality_fails() {
    let index = sample_index();
    let result = index.search(&[1.0, 0.0, 0.0], 2);
    assert!(matches!(
        result,
        Err(RagError::DimensionMismatch { expected: 2, actual: 3 })
    ));
}

#[test]
fn loaded_index_searches_identically() {
    let dir = tempfile::tempdir().unwrap();
    let index = sample_index();
    index.save(dir.path()).unwrap();

    let loaded = VectorIndex::load(dir.path()).unwrap();
    assert_eq!(loaded.dimensions(), index.dimensions());
    assert_eq!(loaded.embedding_model(), MODEL);

    for query in [[1.0, 0.0], [0.0, 1.0], [0.6, 0.8]] {
        let before = index.search(&query, 3).unwrap();
        let after = loaded.search(&query, 3).unwrap();
        assert_eq!(before, after);
    }
}

#[test]
fn save_is_idempotent_over_existing_index() {
    let dir = tempfile::tempdir().unwrap();
    let index = sample_index();
    index.save(dir.path()).unwrap();
    index.save(dir.path()).unwrap();

    assert_eq!(VectorIndex::load(dir.path()).unwrap(), index);
}

#[test]
fn load_from_missing_path_is_index_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let result = VectorIndex::load(&dir.path().join("never-built"));
    assert!(matches!(result, Err(RagError::IndexUnavailable { .. })));
}

#[test]
fn load_from_corrupt_file_is_index_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(VectorIndex::file_path(dir.path()), b"not json at all").unwrap();

    let result = VectorIndex::load(dir.path());
    assert!(matches!(result, Err(RagError::IndexUnavailable { .. })));
}

#[test]
fn load_from_unknown_format_version_is_index_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let future_index = format!(
        r#"{{"format_version":99,"embedding_model":"{MODEL}","dimensions":2,
            "entries":[{{"chunk":{{"text":"t","source_id":"a.txt"}},"embedding":[1.0,0.0]}}]}}"#
    );
    fs::write(VectorIndex::file_path(dir.path()), future_index).unwrap();

    let result = VectorIndex::load(dir.path());
    assert!(matches!(result, Err(RagError::IndexUnavailable { .. })));
}

#[test]
fn search_ties_are_deterministic_across_calls() {
    let chunks = vec![chunk("first", "a.txt"), chunk("second", "b.txt")];
    let embeddings = vec![vec![1.0, 0.0], vec![1.0, 0.0]];
    let index = VectorIndex::build(chunks, embeddings, MODEL).unwrap();

    let first = index.search(&[1.0, 0.0], 2).unwrap();
    let second = index.search(&[1.0, 0.0], 2).unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0].chunk.text, "first");
}
