// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of catalog search.
//!
//! Records come from the store, hits come out of the semantic index, and
//! scored results come out of fusion. Nothing here is persisted by the search
//! core except through the semantic index artifact.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **ScoredResult**: `fused_score > 0` for anything returned by a search.
//!   Zero means "excluded", and excluded records never leave the engine.
//!
//! - **ScoredResult**: `lexical_score` and `semantic_score` both live in the
//!   0–100 band, so the fused score is directly comparable across records.
//!
//! - **SemanticHit**: `0 < similarity <= 1`. Cosine over non-negative TF-IDF
//!   weights can't go negative, and hits at or under the minimum similarity
//!   are dropped before they get here.

use serde::{Deserialize, Serialize};

/// Identifier of a record in the external store.
pub type RecordId = u64;

/// A searchable label attached to a record.
///
/// `name` is the canonical form. `alias` is the localized spelling (e.g. the
/// Bengali name of an English category), when the store has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn with_alias(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    /// Canonical name followed by the alias, if any.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.alias.as_deref())
    }
}

/// A business record as the search core sees it.
///
/// The store owns these. The search core only reads them: per search for
/// lexical scoring, and in bulk when the semantic index is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    /// Free-text product or service description.
    #[serde(default)]
    pub products: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// One row of the semantic index matched by a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SemanticHit {
    pub record_id: RecordId,
    /// Cosine similarity in `(0, 1]`.
    pub similarity: f64,
}

/// The ranking payload for one record.
///
/// Ranking-only: it is built per search and thrown away with the response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredResult {
    pub record_id: RecordId,
    /// Lexical score, 0–100.
    pub lexical_score: f64,
    /// Semantic similarity rescaled to 0–100.
    pub semantic_score: f64,
    /// Result of fusion. Strictly positive for returned results.
    pub fused_score: f64,
}
