//! Tests for the corpus loader.

use std::fs;

use ragkit::{RagError, load_corpus};

#[test]
fn loads_txt_files_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), "second file").unwrap();
    fs::write(dir.path().join("a.txt"), "first file").unwrap();

    let documents = load_corpus(dir.path()).unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].source_id, "a.txt");
    assert_eq!(documents[0].text, "first file");
    assert_eq!(documents[1].source_id, "b.txt");
    assert_eq!(documents[1].text, "second file");
}

#[test]
fn skips_entries_that_are_not_txt_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.md"), "markdown").unwrap();
    fs::write(dir.path().join("corpus.txt"), "text").unwrap();
    fs::create_dir(dir.path().join("nested.txt")).unwrap();

    let documents = load_corpus(dir.path()).unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].source_id, "corpus.txt");
}

#[test]
fn empty_directory_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_corpus(dir.path());
    assert!(matches!(result, Err(RagError::Config(_))));
}

#[test]
fn directory_with_no_txt_files_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.md"), "markdown").unwrap();

    let result = load_corpus(dir.path());
    assert!(matches!(result, Err(RagError::Config(_))));
}

#[test]
fn missing_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_corpus(&dir.path().join("does-not-exist"));
    assert!(matches!(result, Err(RagError::Pipeline(_))));
}
