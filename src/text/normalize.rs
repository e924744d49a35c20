// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Canonical text forms.
//!
//! The catalog is typed by hand in two scripts, so the same word shows up in
//! several byte sequences: precomposed vs. decomposed Bengali nukta letters,
//! `০১৭১১` vs. `01711`, `Bakery` vs. `bakery`. Everything that gets compared
//! goes through here first.
//!
//! Both functions are idempotent: `normalize(normalize(x)) == normalize(x)`
//! and the same for `fold_digits`.

use unicode_normalization::UnicodeNormalization;

/// Normalize a string for matching: NFC, lowercase, collapsed whitespace.
///
/// NFC runs on both sides of the lowercase so that case mappings which
/// produce combining sequences end up composed again.
///
/// ```ignore
/// assert_eq!(normalize("  Rahim   TRADERS "), "rahim traders");
/// ```
pub fn normalize(value: &str) -> String {
    value
        .nfc()
        .collect::<String>()
        .to_lowercase()
        .nfc()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Zero code points of the decimal digit blocks we fold to ASCII.
const DIGIT_ZEROS: [u32; 14] = [
    0x0660, // Arabic-Indic
    0x06F0, // Extended Arabic-Indic
    0x0966, // Devanagari
    0x09E6, // Bengali
    0x0A66, // Gurmukhi
    0x0AE6, // Gujarati
    0x0B66, // Oriya
    0x0BE6, // Tamil
    0x0C66, // Telugu
    0x0CE6, // Kannada
    0x0D66, // Malayalam
    0x0E50, // Thai
    0x1040, // Myanmar
    0xFF10, // Fullwidth
];

/// Map a non-Latin decimal digit to its ASCII counterpart.
#[inline]
pub fn fold_digit(c: char) -> Option<char> {
    let cp = c as u32;
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| cp >= zero && cp <= zero + 9)
        .and_then(|&zero| char::from_digit(cp - zero, 10))
}

/// Replace every non-Latin decimal digit with its ASCII digit.
///
/// This is the parallel numeral representation used for phone numbers and
/// any other numeric token: `"০১৭১১-২২"` becomes `"01711-22"`.
pub fn fold_digits(value: &str) -> String {
    value.chars().map(|c| fold_digit(c).unwrap_or(c)).collect()
}

/// Drop spaces and hyphens. Phone numbers are written with arbitrary
/// grouping, so they're compared in this form as well.
pub fn compact(value: &str) -> String {
    value.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// Both representations of a query: canonical text and numeral-folded text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    pub text: String,
    pub folded: String,
}

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        let text = normalize(raw);
        let folded = fold_digits(&text);
        Self { text, folded }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
