// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Score fusion: one number per record from two signals.
//!
//! The semantic similarity is rescaled to the lexical band first
//! (`Ssc = S × 100`), then:
//!
//! | Lexical `L` | Semantic `Ssc`        | Fused                  |
//! |-------------|-----------------------|------------------------|
//! | `> 0`       | `> 0`                 | `L + Ssc + bonus`      |
//! | `= 0`       | `> floor`             | `Ssc`                  |
//! | `> 0`       | `= 0`                 | `L`                    |
//! | `= 0`       | `<= floor`            | excluded               |
//!
//! The order of the rules matters: agreement is checked before either
//! single-signal case. The lexical-only row is what keeps search working
//! when the semantic index is missing or a record fell outside the top-K.

use crate::config::FusionConfig;

/// Which fusion rule applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionBranch {
    /// Both signals fired.
    Agreement,
    /// Only the semantic signal fired, above the floor.
    SemanticOnly,
    /// Only the lexical signal fired.
    LexicalOnly,
    /// Neither fired strongly enough. Not returned.
    Excluded,
}

/// Map a cosine similarity onto the 0–100 lexical band.
#[inline]
pub fn rescale_similarity(similarity: f64) -> f64 {
    (similarity * 100.0).clamp(0.0, 100.0)
}

pub fn classify(lexical: f64, semantic: f64, config: &FusionConfig) -> FusionBranch {
    if lexical > 0.0 && semantic > 0.0 {
        FusionBranch::Agreement
    } else if lexical <= 0.0 && semantic > config.semantic_floor {
        FusionBranch::SemanticOnly
    } else if lexical > 0.0 {
        FusionBranch::LexicalOnly
    } else {
        FusionBranch::Excluded
    }
}

/// Fuse a lexical score and a rescaled semantic score. Zero means excluded.
pub fn fuse(lexical: f64, semantic: f64, config: &FusionConfig) -> f64 {
    match classify(lexical, semantic, config) {
        FusionBranch::Agreement => lexical + semantic + config.agreement_bonus,
        FusionBranch::SemanticOnly => semantic,
        FusionBranch::LexicalOnly => lexical,
        FusionBranch::Excluded => 0.0,
    }
}
