//! End-to-end scenarios over small catalogs.

use crate::common::{bakery_catalog, fresh_context, ids, sample_catalog};

#[test]
fn test_tagged_bakery_ranks_above_mention() {
    let (_dir, context) = fresh_context();
    let records = bakery_catalog();
    context.rebuild_index(&records).unwrap();

    let results = context.search(&records, "bakery");
    assert_eq!(ids(&results), vec![1, 2]);

    // Both share vocabulary with the query; the tag decides.
    assert!(results.iter().all(|r| r.semantic_score > 0.0));
    assert!(results[0].lexical_score > results[1].lexical_score);
}

#[test]
fn test_bengali_query_matches_tag_and_alias() {
    let (_dir, context) = fresh_context();
    let records = sample_catalog();
    context.rebuild_index(&records).unwrap();

    // Record 1 is tagged বেকারি with the English alias "bakery" and has the
    // word in its name; record 2 only mentions bakery items in its products.
    for query in ["বেকারি", "bakery"] {
        let results = context.search(&records, query);
        assert_eq!(ids(&results)[..2], [1, 2], "query {}", query);
        assert_eq!(results[0].lexical_score, 60.0 + 30.0);
        assert_eq!(results[1].lexical_score, 20.0);
    }
}

#[test]
fn test_phone_number_in_bengali_digits() {
    let (_dir, context) = fresh_context();
    let results = context.search(&sample_catalog(), "০১৭১১-২২৩৩৪৪");
    assert_eq!(ids(&results), vec![1]);
    assert_eq!(results[0].lexical_score, 60.0);
}

#[test]
fn test_alias_match() {
    let (_dir, context) = fresh_context();
    let results = context.search(&sample_catalog(), "Hardware");
    assert_eq!(ids(&results)[0], 3);
}

#[test]
fn test_case_and_spacing_do_not_matter() {
    let (_dir, context) = fresh_context();
    context.rebuild_index(&sample_catalog()).unwrap();

    assert_eq!(
        context.search(&sample_catalog(), "  IRON   house "),
        context.search(&sample_catalog(), "iron house")
    );
}
