//! Ranking and fusion properties.

use dokan::scoring::{fuse, lexical_score};
use dokan::{Analyzer, FusionConfig, LexicalWeights, Record, SynonymTable};
use proptest::prelude::*;

use crate::common::{fresh_context, make_record_with_tags};

// ============================================================================
// STRATEGIES
// ============================================================================

const WORDS: [&str; 10] = [
    "bakery", "bread", "cake", "rod", "cement", "iron", "house", "store", "বেকারি", "রড",
];

fn word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(WORDS.to_vec())
}

fn phrase(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 0..max).prop_map(|w| w.join(" "))
}

fn record(id: u64) -> impl Strategy<Value = Record> {
    (phrase(3), phrase(4), prop::collection::vec(word(), 0..2)).prop_map(
        move |(name, products, tags)| make_record_with_tags(id, &name, &products, &tags),
    )
}

fn catalog() -> impl Strategy<Value = Vec<Record>> {
    (1usize..12).prop_flat_map(|n| {
        (0..n as u64)
            .map(|id| record(id + 1))
            .collect::<Vec<_>>()
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_lexical_score_bounded(records in catalog(), query in phrase(3)) {
        let analyzer = Analyzer::new(SynonymTable::builtin());
        let prepared = analyzer.prepare_query(&query);
        let weights = LexicalWeights::default();
        for record in &records {
            let score = lexical_score(record, &prepared, &analyzer, &weights);
            prop_assert!((0.0..=weights.max_score).contains(&score));
        }
    }

    #[test]
    fn prop_fuse_never_negative(l in 0.0f64..=100.0, s in 0.0f64..=100.0) {
        let fused = fuse(l, s, &FusionConfig::default());
        prop_assert!(fused >= 0.0);
        if l > 0.0 {
            prop_assert!(fused >= l);
        }
    }

    #[test]
    fn prop_results_sorted_and_positive(records in catalog(), query in phrase(3)) {
        let (_dir, context) = fresh_context();
        context.rebuild_index(&records).unwrap();

        let results = context.search(&records, &query);
        prop_assert!(results.len() <= records.len());
        for r in &results {
            prop_assert!(r.fused_score > 0.0);
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].fused_score >= pair[1].fused_score);
        }
    }

    #[test]
    fn prop_search_deterministic(records in catalog(), query in phrase(3)) {
        let (_dir, context) = fresh_context();
        context.rebuild_index(&records).unwrap();
        prop_assert_eq!(context.search(&records, &query), context.search(&records, &query));
    }
}
