//! Fusion rules as seen through a full search.

use dokan::scoring::{classify, fuse, FusionBranch};
use dokan::FusionConfig;

use crate::common::{fresh_context, semantic_only_catalog};

#[test]
fn test_documented_examples() {
    let config = FusionConfig::default();
    assert_eq!(fuse(40.0, 30.0, &config), 90.0);
    assert_eq!(fuse(0.0, 60.0, &config), 60.0);
    assert_eq!(fuse(0.0, 3.0, &config), 0.0);
}

#[test]
fn test_semantic_only_record_returned_with_semantic_score() {
    let (_dir, context) = fresh_context();
    let records = semantic_only_catalog();
    context.rebuild_index(&records).unwrap();

    let results = context.search(&records, "bread cake");
    let alpha = results
        .iter()
        .find(|r| r.record_id == 1)
        .expect("record reachable through its tag text");

    assert_eq!(alpha.lexical_score, 0.0);
    assert!(alpha.semantic_score > 5.0);
    assert_eq!(alpha.fused_score, alpha.semantic_score);
}

#[test]
fn test_agreement_gets_bonus() {
    let (_dir, context) = fresh_context();
    let records = semantic_only_catalog();
    context.rebuild_index(&records).unwrap();

    let results = context.search(&records, "bread cake");
    let cake = results.iter().find(|r| r.record_id == 2).unwrap();
    assert!(cake.lexical_score > 0.0 && cake.semantic_score > 0.0);
    assert_eq!(
        classify(cake.lexical_score, cake.semantic_score, &FusionConfig::default()),
        FusionBranch::Agreement
    );
    assert!((cake.fused_score - (cake.lexical_score + cake.semantic_score + 20.0)).abs() < 1e-9);
}

#[test]
fn test_unrelated_record_excluded() {
    let (_dir, context) = fresh_context();
    let records = semantic_only_catalog();
    context.rebuild_index(&records).unwrap();

    let results = context.search(&records, "bread cake");
    assert!(results.iter().all(|r| r.record_id != 3));
}
