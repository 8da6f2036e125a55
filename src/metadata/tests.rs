use super::*;
use crate::schema::{
    CHEMPREP_FORMAT_VERSION, KEY_DATASET, KEY_FORMAT_VERSION, KEY_PROCESSING_HISTORY,
};

fn sample_history() -> ProcessingHistory {
    let mut history = ProcessingHistory::new();
    let join = history
        .next_step("reference join")
        .with_parameter("matched", 90)
        .with_parameter("unmatched", 10);
    history.add_step(join);
    let filter = history
        .next_step("validity filter")
        .with_parameter("min_replicates", 6);
    history.add_step(filter);
    history
}

#[test]
fn test_processing_steps_are_numbered() {
    let history = sample_history();
    assert_eq!(history.steps.len(), 2);
    assert_eq!(history.steps[0].order, 1);
    assert_eq!(history.steps[1].order, 2);
    assert_eq!(history.steps[0].software, "chemprep");
    assert_eq!(
        history.step("validity filter").unwrap().parameters["min_replicates"],
        "6"
    );
    assert!(history.step("split").is_none());
}

#[test]
fn test_history_json_roundtrip() {
    let history = sample_history();
    let json = history.to_json().unwrap();
    let restored = ProcessingHistory::from_json(&json).unwrap();
    assert_eq!(restored, history);
}

#[test]
fn test_parquet_metadata_roundtrip() {
    let mut metadata = PrepMetadata::for_dataset("lincs");
    metadata
        .source_files
        .push(SourceFileInfo::new("lincs_full.parquet", "observations"));
    metadata.processing_history = Some(sample_history());

    let kv = metadata.to_parquet_metadata().unwrap();
    assert_eq!(kv[KEY_FORMAT_VERSION], CHEMPREP_FORMAT_VERSION);
    assert_eq!(kv[KEY_DATASET], "lincs");
    assert!(kv.contains_key(KEY_PROCESSING_HISTORY));

    let restored = PrepMetadata::from_parquet_metadata(&kv).unwrap();
    assert_eq!(restored.dataset.as_deref(), Some("lincs"));
    assert_eq!(restored.source_files, metadata.source_files);
    assert_eq!(restored.processing_history, metadata.processing_history);
    assert_eq!(restored.format_version.as_deref(), Some(CHEMPREP_FORMAT_VERSION));
    assert!(restored.created_at.is_some());
}

#[test]
fn test_corrupt_history_is_an_error() {
    let mut kv = std::collections::HashMap::new();
    kv.insert(KEY_PROCESSING_HISTORY.to_string(), "{not json".to_string());
    assert!(matches!(
        PrepMetadata::from_parquet_metadata(&kv).unwrap_err(),
        MetadataError::CorruptFooter { ref key, .. } if key == KEY_PROCESSING_HISTORY
    ));
}
