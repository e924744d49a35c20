//! Semantic index save/load.

use std::fs;

use dokan::artifact::{self, load, save, CURRENT_FILE, MATRIX_FILE, RECORD_IDS_FILE};
use dokan::binary;
use dokan::build::build_semantic_index;
use dokan::{Analyzer, BuildOutcome, SemanticConfig, SemanticIndex};
use tempfile::TempDir;

use crate::common::sample_catalog;

fn built() -> (Analyzer, SemanticIndex) {
    let analyzer = Analyzer::default();
    match build_semantic_index(&sample_catalog(), &analyzer, &SemanticConfig::default()) {
        BuildOutcome::Built(index) => (analyzer, index),
        BuildOutcome::Empty => panic!("sample catalog should build"),
    }
}

const QUERIES: [&str; 6] = ["bakery", "বেকারি cake", "rod cement", "medicine", "suit shirt", "house"];

#[test]
fn test_roundtrip_gives_identical_similarities() {
    let dir = TempDir::new().unwrap();
    let (analyzer, fresh) = built();
    save(&fresh, dir.path()).unwrap();
    let loaded = load(dir.path()).unwrap();

    assert_eq!(loaded.terms(), fresh.terms());
    assert_eq!(loaded.record_ids(), fresh.record_ids());

    let config = SemanticConfig::default();
    for query in QUERIES {
        let tokens = analyzer.tokens(query);
        let a = fresh.search(&tokens, &config);
        let b = loaded.search(&tokens, &config);
        assert_eq!(a.len(), b.len(), "query {}", query);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.record_id, y.record_id);
            assert_eq!(x.similarity.to_bits(), y.similarity.to_bits(), "query {}", query);
        }
    }
}

#[test]
fn test_generations_advance_and_prune() {
    let dir = TempDir::new().unwrap();
    let (_, index) = built();

    assert_eq!(save(&index, dir.path()).unwrap(), 1);
    assert_eq!(save(&index, dir.path()).unwrap(), 2);
    assert_eq!(save(&index, dir.path()).unwrap(), 3);

    assert_eq!(artifact::list_generations(dir.path()).unwrap(), vec![2, 3]);
    assert_eq!(
        fs::read_to_string(dir.path().join(CURRENT_FILE)).unwrap(),
        "gen-3"
    );
    assert_eq!(load(dir.path()).unwrap().generation(), 3);
}

#[test]
fn test_no_pointer_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let err = load(dir.path()).unwrap_err();
    assert!(!err.is_corrupt(), "{}", err);
}

#[test]
fn test_flipped_byte_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let (_, index) = built();
    save(&index, dir.path()).unwrap();

    let path = dir.path().join("gen-1").join(MATRIX_FILE);
    let mut bytes = fs::read(&path).unwrap();
    let last_payload = bytes.len() - 9;
    bytes[last_payload] ^= 0x10;
    fs::write(&path, bytes).unwrap();

    let err = load(dir.path()).unwrap_err();
    assert!(err.is_corrupt(), "{}", err);
    assert!(err.to_string().contains("checksum"));
}

#[test]
fn test_blobs_from_different_generations_are_corrupt() {
    let dir = TempDir::new().unwrap();
    let (_, index) = built();
    save(&index, dir.path()).unwrap();
    save(&index, dir.path()).unwrap();

    fs::copy(
        dir.path().join("gen-1").join(RECORD_IDS_FILE),
        dir.path().join("gen-2").join(RECORD_IDS_FILE),
    )
    .unwrap();

    let err = load(dir.path()).unwrap_err();
    assert!(err.is_corrupt());
    assert!(err.to_string().contains("generation mismatch"));
}

#[test]
fn test_pointer_to_missing_generation_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let (_, index) = built();
    save(&index, dir.path()).unwrap();
    fs::write(dir.path().join(CURRENT_FILE), "gen-9").unwrap();

    assert!(load(dir.path()).unwrap_err().is_corrupt());
}

#[test]
fn test_truncated_blob_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let (_, index) = built();
    save(&index, dir.path()).unwrap();

    let path = dir.path().join("gen-1").join(RECORD_IDS_FILE);
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    assert!(load(dir.path()).unwrap_err().is_corrupt());
}

#[test]
fn test_record_ids_shorter_than_matrix_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let (_, index) = built();
    let generation = save(&index, dir.path()).unwrap();

    // Well-formed blob for the right generation, one id short.
    let short = &index.record_ids()[..index.record_ids().len() - 1];
    fs::write(
        dir.path().join("gen-1").join(RECORD_IDS_FILE),
        binary::encode_record_ids(short, generation),
    )
    .unwrap();

    let err = load(dir.path()).unwrap_err();
    assert!(err.is_corrupt(), "{}", err);
    assert!(err.to_string().contains("5 matrix rows but 4 record ids"), "{}", err);
}
