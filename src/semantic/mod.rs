// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! TF-IDF vector space over the corpus documents.
//!
//! The index is three aligned pieces:
//!
//! ```text
//! terms[c], idf[c]          vocabulary, sorted; column c is the term's position
//! rows[r]                   sparse L2-normalized weights, ascending columns
//! record_ids[r]             which record row r came from
//! ```
//!
//! A query is projected into the same space (unknown terms contribute
//! nothing), normalized, and dotted with every row. Since both sides are unit
//! vectors the dot product is the cosine.
//!
//! The index is immutable once built. Rebuilding produces a new one.

mod fit;

use std::cmp::Ordering;
use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::SemanticConfig;
use crate::error::ArtifactError;
use crate::types::{RecordId, SemanticHit};

pub use fit::fit;

/// One matrix row in sparse form. `cols` is strictly ascending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseRow {
    pub cols: Vec<u32>,
    pub weights: Vec<f32>,
}

impl SparseRow {
    pub fn nnz(&self) -> usize {
        self.cols.len()
    }

    /// Dot product with a sparse query sorted by column.
    fn dot(&self, query: &[(u32, f64)]) -> f64 {
        let mut sum = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.cols.len() && j < query.len() {
            match self.cols[i].cmp(&query[j].0) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += self.weights[i] as f64 * query[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// A fitted TF-IDF index.
#[derive(Debug, Clone)]
pub struct SemanticIndex {
    terms: Vec<String>,
    idf: Vec<f32>,
    rows: Vec<SparseRow>,
    record_ids: Vec<RecordId>,
    synonyms_version: u32,
    generation: u64,
    lookup: HashMap<String, u32>,
}

impl PartialEq for SemanticIndex {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
            && self.idf == other.idf
            && self.rows == other.rows
            && self.record_ids == other.record_ids
            && self.synonyms_version == other.synonyms_version
    }
}

impl SemanticIndex {
    /// Assemble an index from its parts, checking the structural invariants.
    ///
    /// The error names the first violation found. Used by `fit` and by the
    /// artifact decoder, where a violation means the blobs are corrupt.
    pub fn from_parts(
        terms: Vec<String>,
        idf: Vec<f32>,
        rows: Vec<SparseRow>,
        record_ids: Vec<RecordId>,
        synonyms_version: u32,
    ) -> Result<Self, ArtifactError> {
        if terms.len() != idf.len() {
            return Err(ArtifactError::Corrupt(format!(
                "{} terms but {} idf values",
                terms.len(),
                idf.len()
            )));
        }
        if let Some(pos) = terms.windows(2).position(|w| w[0] >= w[1]) {
            return Err(ArtifactError::Corrupt(format!(
                "vocabulary not sorted at term {}",
                pos + 1
            )));
        }
        if rows.len() != record_ids.len() {
            return Err(ArtifactError::Corrupt(format!(
                "{} matrix rows but {} record ids",
                rows.len(),
                record_ids.len()
            )));
        }

        let vocab_len = terms.len() as u64;
        for (r, row) in rows.iter().enumerate() {
            if row.cols.len() != row.weights.len() {
                return Err(ArtifactError::Corrupt(format!(
                    "row {} has mismatched columns and weights",
                    r
                )));
            }
            if let Some(&col) = row.cols.iter().find(|&&c| c as u64 >= vocab_len) {
                return Err(ArtifactError::Corrupt(format!(
                    "row {} references column {} outside vocabulary of {}",
                    r, col, vocab_len
                )));
            }
            if row.cols.windows(2).any(|w| w[0] >= w[1]) {
                return Err(ArtifactError::Corrupt(format!(
                    "row {} columns not ascending",
                    r
                )));
            }
        }

        let lookup = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();

        Ok(Self {
            terms,
            idf,
            rows,
            record_ids,
            synonyms_version,
            generation: 0,
            lookup,
        })
    }

    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    pub fn rows(&self) -> &[SparseRow] {
        &self.rows
    }

    pub fn record_ids(&self) -> &[RecordId] {
        &self.record_ids
    }

    pub fn synonyms_version(&self) -> u32 {
        self.synonyms_version
    }

    /// Generation this index was saved as. Zero if never saved.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column of `term`, if it is in the vocabulary.
    pub fn column(&self, term: &str) -> Option<u32> {
        self.lookup.get(term).copied()
    }

    /// Project analyzed query tokens into the vocabulary.
    ///
    /// Sorted by column and L2-normalized. Empty when no token is known.
    pub fn query_vector(&self, tokens: &[String]) -> Vec<(u32, f64)> {
        let mut counts: HashMap<u32, u32> = HashMap::new();
        for token in tokens {
            if let Some(col) = self.column(token) {
                *counts.entry(col).or_insert(0) += 1;
            }
        }

        let mut vector: Vec<(u32, f64)> = counts
            .into_iter()
            .map(|(col, count)| (col, count as f64 * self.idf[col as usize] as f64))
            .collect();
        vector.sort_unstable_by_key(|&(col, _)| col);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Vec::new();
        }
        for (_, w) in &mut vector {
            *w /= norm;
        }
        vector
    }

    /// Top-K rows by cosine similarity to the query tokens.
    ///
    /// Sorted by similarity descending, then row order. Similarities at or
    /// below `config.min_similarity` are dropped.
    pub fn search(&self, tokens: &[String], config: &SemanticConfig) -> Vec<SemanticHit> {
        let query = self.query_vector(tokens);
        if query.is_empty() || config.top_k == 0 {
            return Vec::new();
        }

        let score = |(r, row): (usize, &SparseRow)| {
            let similarity = row.dot(&query);
            (similarity > config.min_similarity).then_some((r, similarity))
        };

        #[cfg(feature = "parallel")]
        let mut scored: Vec<(usize, f64)> = self.rows.par_iter().enumerate().filter_map(score).collect();
        #[cfg(not(feature = "parallel"))]
        let mut scored: Vec<(usize, f64)> = self.rows.iter().enumerate().filter_map(score).collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(config.top_k);

        scored
            .into_iter()
            .map(|(r, similarity)| SemanticHit {
                record_id: self.record_ids[r],
                similarity: similarity.min(1.0),
            })
            .collect()
    }
}
