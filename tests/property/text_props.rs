//! Normalizer and tokenizer properties.

use dokan::text::{fold_digits, normalize, split_tokens, tokenize, SynonymTable, SEPARATORS};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Mixed Latin/Bengali text with digits, punctuation and messy whitespace.
fn messy_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9০-৯অ-হা-ৌ়ং ,.;:!?()/|\t\n-]{0,40}").unwrap()
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_normalize_idempotent(raw in messy_text()) {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prop_fold_digits_idempotent(raw in messy_text()) {
        let once = fold_digits(&raw);
        prop_assert_eq!(fold_digits(&once), once.clone());
        prop_assert!(!once.chars().any(|c| ('০'..='৯').contains(&c)));
    }

    #[test]
    fn prop_normalized_has_no_edge_or_double_spaces(raw in messy_text()) {
        let text = normalize(&raw);
        prop_assert!(!text.starts_with(' ') && !text.ends_with(' '));
        prop_assert!(!text.contains("  "));
        prop_assert!(!text.contains('\n') && !text.contains('\t'));
    }

    #[test]
    fn prop_tokens_longer_than_one_char(raw in messy_text()) {
        for token in split_tokens(&normalize(&raw)) {
            prop_assert!(token.chars().count() > 1, "token {:?}", token);
        }
    }

    #[test]
    fn prop_tokens_lowercase_without_separators(raw in messy_text()) {
        for token in split_tokens(&raw) {
            prop_assert_eq!(token.to_lowercase(), token.clone());
            prop_assert!(!token.chars().any(|c| c.is_whitespace() || SEPARATORS.contains(&c)));
        }
    }

    #[test]
    fn prop_tokenize_deterministic(raw in messy_text()) {
        let table = SynonymTable::builtin();
        let text = normalize(&raw);
        prop_assert_eq!(tokenize(&text, &table), tokenize(&text, &table));
    }

    #[test]
    fn prop_expansion_only_adds_tokens(raw in messy_text()) {
        let table = SynonymTable::builtin();
        let text = normalize(&raw);
        let plain = split_tokens(&text);
        let expanded = tokenize(&text, &table);
        prop_assert!(expanded.len() >= plain.len());

        // Surface tokens survive in order.
        let mut rest = expanded.iter();
        for token in &plain {
            prop_assert!(rest.any(|t| t == token), "lost {:?}", token);
        }
    }
}
