// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text analysis: normalization, tokenization, synonyms.
//!
//! The [`Analyzer`] is the one path text takes into the search core. The
//! semantic index is fitted with it and queried with it, so vocabulary terms
//! and query tokens always line up.

mod normalize;
mod synonyms;
mod tokenize;

use std::sync::Arc;

pub use normalize::{compact, fold_digit, fold_digits, normalize, NormalizedText};
pub use synonyms::SynonymTable;
pub use tokenize::{split_tokens, tokenize, tokenize_grouped, TokenGroup, SEPARATORS};

/// Normalize → fold digits → tokenize with synonyms.
///
/// Cheap to clone; the synonym table is shared.
#[derive(Debug, Clone)]
pub struct Analyzer {
    synonyms: Arc<SynonymTable>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(SynonymTable::builtin())
    }
}

impl Analyzer {
    pub fn new(synonyms: SynonymTable) -> Self {
        Self {
            synonyms: Arc::new(synonyms),
        }
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Canonical, digit-folded form of arbitrary text.
    pub fn prepare(&self, raw: &str) -> String {
        fold_digits(&normalize(raw))
    }

    /// Flat token sequence with synonym expansions.
    pub fn tokens(&self, raw: &str) -> Vec<String> {
        tokenize(&self.prepare(raw), &self.synonyms)
    }

    /// Surface tokens only.
    pub fn plain_tokens(&self, raw: &str) -> Vec<String> {
        split_tokens(&self.prepare(raw))
    }

    /// Analyze a query once so every record can be scored against it.
    pub fn prepare_query(&self, raw: &str) -> PreparedQuery {
        let normalized = NormalizedText::new(raw);
        let groups = tokenize_grouped(&normalized.folded, &self.synonyms);
        let tokens = groups
            .iter()
            .flat_map(|g| g.forms().map(str::to_string))
            .collect();
        let compact = Some(compact(&normalized.folded))
            .filter(|c| !c.is_empty() && c.bytes().all(|b| b.is_ascii_digit()));
        PreparedQuery {
            normalized,
            compact,
            groups,
            tokens,
        }
    }
}

/// A query after analysis.
#[derive(Debug, Clone, Default)]
pub struct PreparedQuery {
    /// Canonical and digit-folded text.
    pub normalized: NormalizedText,
    /// Digit-folded text without spaces or hyphens, only when what's left
    /// is a number. Phone numbers are typed with arbitrary grouping.
    pub compact: Option<String>,
    /// Surface tokens with their expansions.
    pub groups: Vec<TokenGroup>,
    /// Flattened `groups`, the sequence the semantic index sees.
    pub tokens: Vec<String>,
}

impl PreparedQuery {
    /// Nothing left after normalization.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}
