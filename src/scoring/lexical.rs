// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lexical scoring: how well a record's own words match the query.
//!
//! Three fields, three rules, added together and capped:
//!
//! ```text
//! tags      query == tag          → tag_exact       (best tag only)
//!           query ⊂ tag           → tag_substring
//! name      matched / query terms → name_overlap × fraction
//! products  matched / query terms → product_overlap × fraction
//! ```
//!
//! The only match primitives are equality and containment. No edit
//! distance, no prefixes: a typo scores zero here and is left to the
//! semantic side (which won't help much either, and that's fine).
//!
//! Tags are compared as canonical text and as digit-folded text. A query
//! that is a number once spaces and hyphens are removed is also compared in
//! that form, which is what makes `০১৭১১-২২৩৩৪৪` find a record tagged
//! `01711223344`. Words are never compared with their spaces removed.

use std::collections::HashSet;

use crate::config::LexicalWeights;
use crate::text::{compact, Analyzer, NormalizedText, PreparedQuery, TokenGroup};
use crate::types::{Record, Tag};

/// How a single tag label relates to the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TagMatch {
    None,
    Substring,
    Exact,
}

/// Compare one tag label against the query.
pub fn tag_match(label: &str, query: &PreparedQuery) -> TagMatch {
    let label = NormalizedText::new(label);
    if label.is_empty() || query.is_empty() {
        return TagMatch::None;
    }
    let q = &query.normalized;
    let label_compact = query.compact.as_ref().map(|_| compact(&label.folded));
    let compact_pair = query.compact.as_deref().zip(label_compact.as_deref());

    if label.text == q.text
        || label.folded == q.folded
        || compact_pair.is_some_and(|(qc, lc)| lc == qc)
    {
        return TagMatch::Exact;
    }

    // Single characters are contained in nearly everything.
    let long_enough = |s: &str| s.chars().count() > 1;

    if (long_enough(q.text.as_str()) && label.text.contains(q.text.as_str()))
        || (long_enough(q.folded.as_str()) && label.folded.contains(q.folded.as_str()))
        || compact_pair.is_some_and(|(qc, lc)| long_enough(qc) && lc.contains(qc))
    {
        TagMatch::Substring
    } else {
        TagMatch::None
    }
}

/// Best match across all labels (name and alias) of all tags.
pub fn best_tag_match(tags: &[Tag], query: &PreparedQuery) -> TagMatch {
    let mut best = TagMatch::None;
    for label in tags.iter().flat_map(Tag::labels) {
        best = best.max(tag_match(label, query));
        if best == TagMatch::Exact {
            break;
        }
    }
    best
}

/// Fraction of distinct surface query tokens found in `field`.
///
/// A surface token is found if it or any of its synonym expansions is in
/// the field's token set.
pub fn overlap_fraction(groups: &[TokenGroup], field: &HashSet<String>) -> f64 {
    if field.is_empty() {
        return 0.0;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut matched = 0usize;
    for group in groups {
        if !seen.insert(group.surface.as_str()) {
            continue;
        }
        if group.forms().any(|form| field.contains(form)) {
            matched += 1;
        }
    }

    if seen.is_empty() {
        0.0
    } else {
        matched as f64 / seen.len() as f64
    }
}

fn field_tokens(analyzer: &Analyzer, text: &str) -> HashSet<String> {
    analyzer.tokens(text).into_iter().collect()
}

/// Lexical score of `record` for `query`, in `[0, weights.max_score]`.
///
/// Zero means no lexical match. Pure function of its inputs.
pub fn lexical_score(
    record: &Record,
    query: &PreparedQuery,
    analyzer: &Analyzer,
    weights: &LexicalWeights,
) -> f64 {
    if query.is_empty() {
        return 0.0;
    }

    let tag = match best_tag_match(&record.tags, query) {
        TagMatch::Exact => weights.tag_exact,
        TagMatch::Substring => weights.tag_substring,
        TagMatch::None => 0.0,
    };

    let (name, products) = if query.groups.is_empty() {
        (0.0, 0.0)
    } else {
        (
            overlap_fraction(&query.groups, &field_tokens(analyzer, &record.name)),
            overlap_fraction(&query.groups, &field_tokens(analyzer, &record.products)),
        )
    };

    let score = tag + name * weights.name_overlap + products * weights.product_overlap;
    score.clamp(0.0, weights.max_score)
}
