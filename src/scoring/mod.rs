// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! Lexical scoring looks at a record's own fields. Fusion folds in the
//! semantic similarity. Ranking sorts what survives fusion.

pub mod fusion;
pub mod lexical;
pub mod ranking;

pub use fusion::{classify, fuse, rescale_similarity, FusionBranch};
pub use lexical::{best_tag_match, lexical_score, overlap_fraction, tag_match, TagMatch};
pub use ranking::{compare_results, rank_results};
