//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::path::Path;

use dokan::{Analyzer, Record, SearchConfig, SearchContext, Tag};
use tempfile::TempDir;

// Re-export canonical test utilities from dokan::testing
pub use dokan::testing::{make_record, make_record_with_tags, sample_catalog};

/// A context whose artifacts live in `dir`, with the built-in synonyms.
pub fn context_in(dir: &Path) -> SearchContext {
    SearchContext::with_analyzer(
        SearchConfig::default().with_artifact_dir(dir),
        Analyzer::default(),
    )
}

/// A fresh artifact directory and a context pointing at it.
pub fn fresh_context() -> (TempDir, SearchContext) {
    let dir = TempDir::new().unwrap();
    let context = context_in(dir.path());
    (dir, context)
}

/// The two-record bakery catalog: one tagged, one that only mentions it.
pub fn bakery_catalog() -> Vec<Record> {
    vec![
        make_record_with_tags(1, "Alpha Foods", "bread cake", &["bakery"]),
        make_record(2, "Beta Store", "bakery supplies"),
    ]
}

/// Catalog where one record can only be reached through its tag text.
pub fn semantic_only_catalog() -> Vec<Record> {
    vec![
        make_record_with_tags(1, "Alpha", "", &["fresh bread bakery"]),
        make_record(2, "Cake House", "cake, pastry"),
        make_record(3, "Iron House", "rod cement"),
    ]
}

pub fn tagged(id: u64, name: &str, products: &str, tags: Vec<Tag>) -> Record {
    Record {
        tags,
        ..make_record(id, name, products)
    }
}

/// Record ids in result order.
pub fn ids(results: &[dokan::ScoredResult]) -> Vec<u64> {
    results.iter().map(|r| r.record_id).collect()
}
