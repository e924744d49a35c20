// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenization with synonym expansion.
//!
//! Input is already normalized. Tokens are split on whitespace and a fixed
//! punctuation set, anything of one character or less is dropped, and each
//! surface token is followed by its synonym expansions:
//!
//! ```text
//! "rod, cement ltd"  →  rod রড cement সিমেন্ট ltd limited
//! ```
//!
//! Order is preserved and duplicates are kept: the semantic index counts
//! term frequency, so `"rod rod"` must produce two `rod` tokens.

use super::synonyms::SynonymTable;

/// Punctuation that separates tokens, in addition to whitespace.
///
/// `।` is the Bengali danda (full stop). Hyphen is not a separator:
/// phone numbers and compound words keep their hyphens.
pub const SEPARATORS: [char; 15] = [
    ',', ';', '.', '(', ')', '[', ']', '।', '/', '|', ':', '!', '?', '"', '\'',
];

#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATORS.contains(&c)
}

/// Split text into lowercased tokens longer than one character.
///
/// No synonym expansion. Used for synonym table keys and for frequency
/// reports, where expansions would double-count.
pub fn split_tokens(text: &str) -> Vec<String> {
    text.split(is_separator)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .filter(|t| t.chars().count() > 1)
        .collect()
}

/// A surface token and the canonical tokens it expands to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGroup {
    pub surface: String,
    pub expansions: Vec<String>,
}

impl TokenGroup {
    /// Surface token first, then expansions.
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.surface.as_str()).chain(self.expansions.iter().map(String::as_str))
    }
}

/// Tokenize and keep each surface token grouped with its expansions.
///
/// The lexical scorer needs the grouping: a query token counts as matched
/// if any of its forms matches, and the match fraction is computed over
/// surface tokens only.
pub fn tokenize_grouped(text: &str, synonyms: &SynonymTable) -> Vec<TokenGroup> {
    split_tokens(text)
        .into_iter()
        .map(|surface| {
            let expansions = synonyms.expansions(&surface).to_vec();
            TokenGroup {
                surface,
                expansions,
            }
        })
        .collect()
}

/// Tokenize into a flat sequence: each surface token followed by its
/// expansions.
pub fn tokenize(text: &str, synonyms: &SynonymTable) -> Vec<String> {
    let mut tokens = Vec::new();
    for surface in split_tokens(text) {
        let expansions = synonyms.expansions(&surface);
        tokens.push(surface);
        tokens.extend(expansions.iter().cloned());
    }
    tokens
}
