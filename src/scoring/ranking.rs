// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored records get sorted.
//!
//! Fused score decides. When two records tie, the record name breaks the
//! tie, and the record id breaks whatever is left, so the same catalog and
//! the same query always give the same list.

use std::cmp::Ordering;

use crate::types::{Record, ScoredResult};

/// Compare two scored records for ranking.
///
/// Sort order:
/// 1. **Fused score** - descending
/// 2. **Name** - ascending, byte order
/// 3. **Record id** - ascending, final tiebreaker
pub fn compare_results(a: &ScoredResult, a_name: &str, b: &ScoredResult, b_name: &str) -> Ordering {
    match b.fused_score.total_cmp(&a.fused_score) {
        Ordering::Equal => match a_name.cmp(b_name) {
            Ordering::Equal => a.record_id.cmp(&b.record_id),
            ord => ord,
        },
        ord => ord,
    }
}

/// Drop excluded results, sort the rest, keep at most `limit`.
pub fn rank_results(mut scored: Vec<(ScoredResult, &Record)>, limit: usize) -> Vec<ScoredResult> {
    scored.retain(|(result, _)| result.fused_score > 0.0);
    scored.sort_by(|(a, ra), (b, rb)| compare_results(a, &ra.name, b, &rb.name));
    scored.truncate(limit);
    scored.into_iter().map(|(result, _)| result).collect()
}
