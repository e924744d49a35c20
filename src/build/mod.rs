// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index building from a catalog snapshot.
//!
//! Records become corpus documents (name, products, tag names and aliases),
//! documents become token sequences through the shared [`Analyzer`], and the
//! token sequences are fitted into a [`SemanticIndex`]. Tokenizing is the
//! expensive part and runs in parallel with the `parallel` feature.
//!
//! Building never touches disk. Persisting is the artifact layer's job, and
//! an empty build is not persisted at all.

pub mod catalog;

use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::SemanticConfig;
use crate::semantic::{fit, SemanticIndex};
use crate::text::Analyzer;
use crate::types::{Record, RecordId};

pub use catalog::{derive_tags, parse_catalog, CatalogSource, JsonCatalog};

/// Result of a build.
#[derive(Debug, Clone)]
pub enum BuildOutcome {
    Built(SemanticIndex),
    /// No record produced a usable document. Nothing to persist.
    Empty,
}

/// Text the semantic index sees for one record.
///
/// Name, products, tag names and tag aliases joined by single spaces. `None`
/// when that comes out blank.
pub fn corpus_document(record: &Record) -> Option<String> {
    let parts = std::iter::once(record.name.as_str())
        .chain(std::iter::once(record.products.as_str()))
        .chain(record.tags.iter().flat_map(|t| t.labels()))
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let joined = parts.collect::<Vec<_>>().join(" ");
    if joined.trim().is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Fit a semantic index over `records`.
pub fn build_semantic_index(
    records: &[Record],
    analyzer: &Analyzer,
    config: &SemanticConfig,
) -> BuildOutcome {
    let tokenize = |record: &Record| {
        corpus_document(record).map(|doc| (record.id, analyzer.tokens(&doc)))
    };

    #[cfg(feature = "parallel")]
    let docs: Vec<(RecordId, Vec<String>)> = records.par_iter().filter_map(tokenize).collect();
    #[cfg(not(feature = "parallel"))]
    let docs: Vec<(RecordId, Vec<String>)> = records.iter().filter_map(tokenize).collect();

    tracing::debug!(
        records = records.len(),
        documents = docs.len(),
        "Tokenized corpus"
    );

    match fit(&docs, analyzer.synonyms().version(), config.max_features) {
        Some(index) => BuildOutcome::Built(index),
        None => BuildOutcome::Empty,
    }
}

/// Word counts over record names and products, most frequent first.
///
/// Surface tokens only (no synonym expansion). Ties are ordered by term.
/// Useful for spotting spellings that deserve a synonym entry.
pub fn term_frequencies(records: &[Record], analyzer: &Analyzer) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        for field in [&record.name, &record.products] {
            for token in analyzer.plain_tokens(field) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
    }

    let mut terms: Vec<(String, usize)> = counts.into_iter().collect();
    terms.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    terms
}
