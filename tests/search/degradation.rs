//! Search keeps working when the semantic index doesn't.

use std::fs;

use dokan::{RebuildReport, Record};

use crate::common::{context_in, fresh_context, ids, make_record, sample_catalog};

#[test]
fn test_never_built_is_lexical_only() {
    let (_dir, context) = fresh_context();
    let results = context.search(&sample_catalog(), "rod");

    assert_eq!(ids(&results)[0], 3);
    assert!(results.iter().all(|r| r.semantic_score == 0.0));
    assert!(results.iter().all(|r| r.fused_score == r.lexical_score));
}

#[test]
fn test_corrupt_index_is_lexical_only() {
    let (dir, context) = fresh_context();
    context.rebuild_index(&sample_catalog()).unwrap();

    let matrix = dir.path().join("gen-1").join("matrix.bin");
    let mut bytes = fs::read(&matrix).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xFF;
    fs::write(&matrix, bytes).unwrap();

    // A new context has to load from disk and finds the damage.
    let reader = context_in(dir.path());
    let results = reader.search(&sample_catalog(), "rod");
    assert_eq!(ids(&results)[0], 3);
    assert!(results.iter().all(|r| r.semantic_score == 0.0));
    assert!(reader.semantic_index().is_none());
}

#[test]
fn test_empty_rebuild_is_not_an_error() {
    let (dir, context) = fresh_context();
    let blank = vec![make_record(1, " ", ""), make_record(2, "a", "b")];

    let report = context.rebuild_index(&blank).unwrap();
    assert_eq!(report, RebuildReport::SkippedEmpty);
    assert!(!dir.path().join("CURRENT").exists());

    let results = context.search(&sample_catalog(), "pharmacy");
    assert_eq!(ids(&results)[0], 4);
    assert!(results.iter().all(|r| r.semantic_score == 0.0));
}

#[test]
fn test_empty_rebuild_keeps_previous_index() {
    let (dir, context) = fresh_context();
    context.rebuild_index(&sample_catalog()).unwrap();

    let report = context.rebuild_index(&Vec::<Record>::new()).unwrap();
    assert_eq!(report, RebuildReport::SkippedEmpty);

    let reader = context_in(dir.path());
    assert_eq!(reader.semantic_index().unwrap().generation(), 1);
}

#[test]
fn test_empty_and_degenerate_queries() {
    let (_dir, context) = fresh_context();
    context.rebuild_index(&sample_catalog()).unwrap();

    assert!(context.search(&sample_catalog(), "").is_empty());
    assert!(context.search(&sample_catalog(), " \t\n ").is_empty());
    assert!(context.search(&sample_catalog(), "?!").is_empty());
    assert!(context.search(&[], "bakery").is_empty());
}
