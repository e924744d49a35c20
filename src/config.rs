// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search configuration.
//!
//! Every knob that shapes ranking lives here rather than as a bare constant
//! in the scorer: field weights, the semantic cut-offs and the fusion bonus.
//! All fields default, so a TOML file only needs the values it changes:
//!
//! ```toml
//! artifact_dir = "/var/lib/dokan/index"
//! max_results = 50
//!
//! [fusion]
//! agreement_bonus = 25.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration for a [`SearchContext`](crate::SearchContext).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Directory holding the semantic index generations.
    pub artifact_dir: PathBuf,

    /// Replacement synonym table (JSON). The built-in table is used if unset.
    pub synonyms_path: Option<PathBuf>,

    /// Maximum results returned by a search.
    pub max_results: usize,

    pub lexical: LexicalWeights,
    pub semantic: SemanticConfig,
    pub fusion: FusionConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from("./data/semantic_index"),
            synonyms_path: None,
            max_results: 100,
            lexical: LexicalWeights::default(),
            semantic: SemanticConfig::default(),
            fusion: FusionConfig::default(),
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

/// Field weights of the lexical scorer.
///
/// | Rule                                    | Default |
/// |-----------------------------------------|---------|
/// | Query equals a tag name or alias        | 60      |
/// | Query is a substring of a tag           | 40      |
/// | Query tokens found in the name          | 30 × fraction |
/// | Query tokens found in the products      | 20 × fraction |
/// | Cap                                     | 100     |
///
/// With the defaults `tag_exact > name_overlap + product_overlap`: an exact
/// tag hit outranks a record that only mentions the word in its text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalWeights {
    pub tag_exact: f64,
    pub tag_substring: f64,
    pub name_overlap: f64,
    pub product_overlap: f64,
    pub max_score: f64,
}

impl Default for LexicalWeights {
    fn default() -> Self {
        Self {
            tag_exact: 60.0,
            tag_substring: 40.0,
            name_overlap: 30.0,
            product_overlap: 20.0,
            max_score: 100.0,
        }
    }
}

/// Semantic index fitting and querying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticConfig {
    /// Vocabulary cap: the most frequent terms across the corpus survive.
    /// Zero disables the cap.
    pub max_features: usize,
    /// Rows returned per query before fusion.
    pub top_k: usize,
    /// Similarities at or below this are dropped.
    pub min_similarity: f64,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            max_features: 10_000,
            top_k: 20,
            min_similarity: 0.001,
        }
    }
}

/// Fusion of the lexical and rescaled semantic scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Added when both signals agree a record is relevant.
    pub agreement_bonus: f64,
    /// A semantic-only match must clear this (0–100 band) to be returned.
    pub semantic_floor: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            agreement_bonus: 20.0,
            semantic_floor: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = SearchConfig::from_toml_str("").unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_only_named_fields() {
        let config = SearchConfig::from_toml_str(
            r#"
            artifact_dir = "/tmp/idx"
            max_results = 7

            [fusion]
            agreement_bonus = 25.0

            [semantic]
            top_k = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.artifact_dir, PathBuf::from("/tmp/idx"));
        assert_eq!(config.max_results, 7);
        assert_eq!(config.fusion.agreement_bonus, 25.0);
        assert_eq!(config.fusion.semantic_floor, 5.0);
        assert_eq!(config.semantic.top_k, 5);
        assert_eq!(config.semantic.max_features, 10_000);
        assert_eq!(config.lexical, LexicalWeights::default());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(SearchConfig::from_toml_str("max_results = \"many\"").is_err());
    }

    #[test]
    fn test_tag_exact_outranks_full_field_overlap() {
        let w = LexicalWeights::default();
        assert!(w.tag_exact > w.product_overlap);
        assert!(w.tag_exact > w.name_overlap);
    }
}
