//! Ranking order and tie-breaking.

use crate::common::{fresh_context, ids, make_record, sample_catalog};

#[test]
fn test_scores_non_increasing() {
    let (_dir, context) = fresh_context();
    context.rebuild_index(&sample_catalog()).unwrap();

    for query in ["cake", "bakery", "rod cement", "বেকারি", "house"] {
        let results = context.search(&sample_catalog(), query);
        for pair in results.windows(2) {
            assert!(
                pair[0].fused_score >= pair[1].fused_score,
                "{:?} ranked above {:?} for {}",
                pair[0],
                pair[1],
                query
            );
        }
        assert!(results.iter().all(|r| r.fused_score > 0.0));
    }
}

#[test]
fn test_ties_broken_by_name_then_id() {
    // No index built: purely lexical, so equal records tie exactly.
    let (_dir, context) = fresh_context();
    let records = vec![
        make_record(9, "Beta Store", "bread"),
        make_record(5, "Alpha Store", "bread"),
        make_record(3, "Alpha Store", "bread"),
    ];

    let results = context.search(&records, "bread");
    assert_eq!(ids(&results), vec![3, 5, 9]);
    assert!(results.iter().all(|r| r.fused_score == results[0].fused_score));
}

#[test]
fn test_same_query_same_order() {
    let (_dir, context) = fresh_context();
    context.rebuild_index(&sample_catalog()).unwrap();

    let first = context.search(&sample_catalog(), "cake bakery");
    for _ in 0..5 {
        assert_eq!(context.search(&sample_catalog(), "cake bakery"), first);
    }
}

#[test]
fn test_record_order_does_not_matter() {
    let (_dir, context) = fresh_context();
    context.rebuild_index(&sample_catalog()).unwrap();

    let mut reversed = sample_catalog();
    reversed.reverse();
    assert_eq!(
        context.search(&sample_catalog(), "cake"),
        context.search(&reversed, "cake")
    );
}

#[test]
fn test_exact_tag_ranks_first() {
    let (_dir, context) = fresh_context();
    let results = context.search(&sample_catalog(), "tailor");
    assert_eq!(ids(&results)[0], 5);
}
