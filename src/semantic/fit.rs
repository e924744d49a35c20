// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fitting the TF-IDF model.
//!
//! Unigram counts, smoothed IDF, L2-normalized rows:
//!
//! ```text
//! idf(t)   = ln((1 + n) / (1 + df(t))) + 1
//! w(d, t)  = count(d, t) × idf(t)
//! row(d)   = w(d, ·) / ‖w(d, ·)‖₂
//! ```
//!
//! The smoothing acts as if one extra document contained every term once, so
//! no term gets an infinite or zero IDF.

use std::collections::{BTreeMap, HashMap};

use super::{SemanticIndex, SparseRow};
use crate::types::RecordId;

/// Fit an index over tokenized documents.
///
/// `max_features` caps the vocabulary to the terms with the highest corpus
/// frequency (ties broken by term). Zero disables the cap. Returns `None`
/// when there is nothing to fit: no documents, or no tokens in any of them.
///
/// Documents whose tokens all fell outside the vocabulary keep an empty row,
/// so rows and record ids stay aligned.
pub fn fit(
    docs: &[(RecordId, Vec<String>)],
    synonyms_version: u32,
    max_features: usize,
) -> Option<SemanticIndex> {
    if docs.is_empty() {
        return None;
    }

    // Corpus frequency and document frequency per term.
    let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    for (_, tokens) in docs {
        let mut seen: Vec<&str> = Vec::with_capacity(tokens.len());
        for token in tokens {
            *corpus_freq.entry(token.as_str()).or_insert(0) += 1;
            seen.push(token.as_str());
        }
        seen.sort_unstable();
        seen.dedup();
        for term in seen {
            *doc_freq.entry(term).or_insert(0) += 1;
        }
    }

    if corpus_freq.is_empty() {
        return None;
    }

    let mut selected: Vec<(&str, usize)> = corpus_freq.into_iter().collect();
    if max_features > 0 && selected.len() > max_features {
        selected.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        selected.truncate(max_features);
    }
    let mut terms: Vec<String> = selected.into_iter().map(|(t, _)| t.to_string()).collect();
    terms.sort_unstable();

    let n = docs.len() as f64;
    let idf64: Vec<f64> = terms
        .iter()
        .map(|t| {
            let df = doc_freq.get(t.as_str()).copied().unwrap_or(0) as f64;
            ((1.0 + n) / (1.0 + df)).ln() + 1.0
        })
        .collect();

    let lookup: HashMap<&str, u32> = terms
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), i as u32))
        .collect();

    let rows: Vec<SparseRow> = docs
        .iter()
        .map(|(_, tokens)| weigh_row(tokens, &lookup, &idf64))
        .collect();

    let record_ids = docs.iter().map(|(id, _)| *id).collect();
    let idf = idf64.iter().map(|&v| v as f32).collect();

    match SemanticIndex::from_parts(terms, idf, rows, record_ids, synonyms_version) {
        Ok(index) => Some(index),
        Err(e) => {
            tracing::error!(error = %e, "Fitted semantic index failed validation");
            None
        }
    }
}

fn weigh_row(tokens: &[String], lookup: &HashMap<&str, u32>, idf: &[f64]) -> SparseRow {
    let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
    for token in tokens {
        if let Some(&col) = lookup.get(token.as_str()) {
            *counts.entry(col).or_insert(0) += 1;
        }
    }

    let weighted: Vec<(u32, f64)> = counts
        .into_iter()
        .map(|(col, count)| (col, count as f64 * idf[col as usize]))
        .collect();
    let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm == 0.0 {
        return SparseRow::default();
    }

    let (cols, weights) = weighted
        .into_iter()
        .map(|(col, w)| (col, (w / norm) as f32))
        .unzip();
    SparseRow { cols, weights }
}
