//! Catalog export loading.

use std::fs;

use dokan::{CatalogError, CatalogSource, JsonCatalog, RebuildReport};
use tempfile::TempDir;

use crate::common::{fresh_context, ids};

const EXPORT: &str = r#"{
    "categories": [
        {"id": 1, "name": "বেকারি", "name_english": "Bakery"},
        {"id": 2, "name": "হার্ডওয়্যার", "name_english": "Hardware"}
    ],
    "shops": [
        {"name": "Rahim Bakery", "products": "bread, cake", "mobile": "01711-223344", "category_id": 1},
        {"name": "Iron House", "products": "rod, cement", "mobile": "01811 000111", "category_id": 2},
        {"id": 40, "name": "Modern Tailors", "products": "shirt, pant", "mobile": null}
    ]
}"#;

fn write_export(dir: &TempDir) -> JsonCatalog {
    let path = dir.path().join("catalog.json");
    fs::write(&path, EXPORT).unwrap();
    JsonCatalog::new(path)
}

#[test]
fn test_export_loads_with_derived_tags() {
    let dir = TempDir::new().unwrap();
    let records = write_export(&dir).load_records().unwrap();

    assert_eq!(ids_of(&records), vec![1, 2, 40]);
    let bakery = &records[0];
    assert_eq!(bakery.tags[0].name, "বেকারি");
    assert_eq!(bakery.tags[0].alias.as_deref(), Some("bakery"));
    assert!(bakery.tags.iter().any(|t| t.name == "01711223344"));
    assert!(bakery.tags.iter().any(|t| t.name == "cake"));
}

#[test]
fn test_rebuild_from_export_then_search_by_phone() {
    let dir = TempDir::new().unwrap();
    let catalog = write_export(&dir);
    let (_artifacts, context) = fresh_context();

    let report = context.rebuild_index(&catalog).unwrap();
    assert!(matches!(report, RebuildReport::Rebuilt { documents: 3, .. }));

    let records = catalog.load_records().unwrap();
    let results = context.search(&records, "০১৮১১০০০১১১");
    assert_eq!(ids(&results)[0], 2);
}

#[test]
fn test_category_alias_search() {
    let dir = TempDir::new().unwrap();
    let records = write_export(&dir).load_records().unwrap();
    let (_artifacts, context) = fresh_context();

    let results = context.search(&records, "hardware");
    assert_eq!(ids(&results)[0], 2);
}

#[test]
fn test_invalid_export_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"shops\": [").unwrap();

    let err = JsonCatalog::new(&path).load_records().unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
}

#[test]
fn test_missing_export_surfaces_from_rebuild() {
    let (_artifacts, context) = fresh_context();
    let err = context
        .rebuild_index(&JsonCatalog::new("/no/such/catalog.json"))
        .unwrap_err();
    assert!(err.to_string().contains("catalog"));
}

fn ids_of(records: &[dokan::Record]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}
