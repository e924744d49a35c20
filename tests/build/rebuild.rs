//! Rebuilding through the search context.

use dokan::RebuildReport;

use crate::common::{context_in, fresh_context, make_record, sample_catalog};

#[test]
fn test_rebuild_report_counts() {
    let (_dir, context) = fresh_context();
    let mut records = sample_catalog();
    records.push(make_record(99, " ", ""));

    match context.rebuild_index(&records).unwrap() {
        RebuildReport::Rebuilt {
            generation,
            documents,
            terms,
        } => {
            assert_eq!(generation, 1);
            assert_eq!(documents, 5);
            assert!(terms > 10);
        }
        RebuildReport::SkippedEmpty => panic!("expected a rebuild"),
    }
}

#[test]
fn test_rebuild_visible_to_new_contexts() {
    let (dir, context) = fresh_context();
    context.rebuild_index(&sample_catalog()).unwrap();
    context.rebuild_index(&sample_catalog()).unwrap();

    let reader = context_in(dir.path());
    let index = reader.semantic_index().unwrap();
    assert_eq!(index.generation(), 2);
    assert_eq!(index.record_ids(), &[1, 2, 3, 4, 5]);
}

#[test]
fn test_searches_keep_old_snapshot_across_rebuild() {
    let (_dir, context) = fresh_context();
    context.rebuild_index(&sample_catalog()).unwrap();

    let before = context.semantic_index().unwrap();
    context
        .rebuild_index(&vec![make_record(1, "Only Bakery", "bread")])
        .unwrap();
    let after = context.semantic_index().unwrap();

    assert_eq!(before.len(), 5);
    assert_eq!(after.len(), 1);
}

#[test]
fn test_config_file_drives_context() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("dokan.toml");
    std::fs::write(
        &config_path,
        format!(
            "artifact_dir = {:?}\nmax_results = 2\n",
            dir.path().join("index").display().to_string()
        ),
    )
    .unwrap();

    let config = dokan::SearchConfig::from_path(&config_path).unwrap();
    let context = dokan::SearchContext::new(config).unwrap();
    context.rebuild_index(&sample_catalog()).unwrap();

    assert!(dir.path().join("index").join("CURRENT").exists());
    assert!(context.search(&sample_catalog(), "cake bakery").len() <= 2);
}
