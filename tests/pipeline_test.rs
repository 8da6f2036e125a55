//! End-to-end preparation of a LINCS-like dataset.

mod common;

use std::collections::{BTreeSet, HashMap};

use chemprep::pipeline::{run_pipeline, PipelineConfig, PipelineError};
use chemprep::reader::read_prepared;
use chemprep::schema::{CANONICAL_SMILES, CONTROL, DRUG_DOSE_NAME, SPLIT_OOD, SPLIT_RANDOM};
use chemprep::smiles;
use chemprep::split::{ShrinkThresholds, SplitSummary};
use chemprep::validator::{validate_prepared_file, ValidationOptions};
use tempfile::tempdir;

use common::*;

fn lincs_config(dir: &std::path::Path) -> PipelineConfig {
    let (obs, reference) = write_lincs_fixture(dir);
    let mut config = PipelineConfig::new("lincs", obs, dir.join("out/lincs.parquet"))
        .with_reference(reference);
    config.covariate_column = Some("cell_id".to_string());
    config.filter.dose_column = Some("pert_dose".to_string());
    config.filter.perturbation_column = Some("pert_iname".to_string());
    config.filter.control_values = vec!["DMSO".to_string()];
    config.split.shrink = ShrinkThresholds {
        min_identity_count: 5,
        min_covariate_count: 1,
    };
    config
}

#[test]
fn test_prepare_lincs_dataset() {
    let dir = tempdir().unwrap();
    let config = lincs_config(dir.path());
    let report = run_pipeline(&config).unwrap();

    assert_eq!(report.rows_read, 203);
    let join = report.join.unwrap();
    assert_eq!(join.matched, 187);
    assert_eq!(join.unmatched, 16);

    let filter = report.filter;
    assert_eq!(filter.controls_assigned, 8);
    assert_eq!(filter.removed_sentinel, 24);
    assert_eq!(filter.removed_invalid, 8);
    assert_eq!(filter.invalid_identities, 1);
    assert_eq!(filter.removed_dose, 0);
    assert_eq!(filter.removed_replicates, 3);
    assert_eq!(filter.rows_out, 168);
    assert_eq!(report.distinct_identities, VALID_COMPOUNDS + 1);

    assert_eq!(report.identity_split.total(), 168);
    assert_eq!(report.random_split.total(), 168);
    assert_eq!(report.writer.rows_written, 168);
    assert!(config.output.exists());
}

#[test]
fn test_prepared_file_round_trip() {
    let dir = tempdir().unwrap();
    let config = lincs_config(dir.path());
    let report = run_pipeline(&config).unwrap();

    let prepared = read_prepared(&config.output).unwrap();
    let table = &prepared.table;
    assert_eq!(table.num_rows(), 168);
    assert_eq!(
        SplitSummary::from_table(table, SPLIT_OOD).unwrap(),
        report.identity_split
    );
    assert_eq!(
        SplitSummary::from_table(table, SPLIT_RANDOM).unwrap(),
        report.random_split
    );

    let identities: Vec<String> = table
        .string_values(CANONICAL_SMILES)
        .unwrap()
        .into_iter()
        .map(Option::unwrap)
        .collect();
    assert!(identities.contains(&"CCO".to_string()));
    assert!(!identities.contains(&"OCC".to_string()));
    for identity in &identities {
        assert!(smiles::is_valid(identity), "{}", identity);
    }

    let controls = table.bool_values(CONTROL).unwrap();
    assert_eq!(controls.iter().filter(|c| **c).count(), 8);

    let labels = table.string_values(DRUG_DOSE_NAME).unwrap();
    assert!(labels.contains(&Some("CCO_10.0".to_string())));

    let prep = prepared.metadata.prep_metadata.unwrap();
    assert_eq!(prep.dataset.as_deref(), Some("lincs"));
    assert_eq!(prep.source_files.len(), 2);
    let history = prep.processing_history.unwrap();
    let steps: Vec<&str> = history
        .steps
        .iter()
        .map(|s| s.processing_type.as_str())
        .collect();
    assert_eq!(
        steps,
        vec!["reference join", "validity filter", "identity split", "random split"]
    );
}

#[test]
fn test_identity_split_has_no_leakage() {
    let dir = tempdir().unwrap();
    let config = lincs_config(dir.path());
    run_pipeline(&config).unwrap();

    let table = read_prepared(&config.output).unwrap().table;
    let identities = table.string_values(CANONICAL_SMILES).unwrap();
    let labels = table.string_values(SPLIT_OOD).unwrap();
    let mut seen: HashMap<String, BTreeSet<String>> = HashMap::new();
    for (identity, label) in identities.into_iter().zip(labels) {
        seen.entry(identity.unwrap()).or_default().insert(label.unwrap());
    }
    assert!(seen.values().all(|labels| labels.len() == 1));
}

#[test]
fn test_prepared_file_validates() {
    let dir = tempdir().unwrap();
    let config = lincs_config(dir.path());
    run_pipeline(&config).unwrap();

    let options = ValidationOptions {
        min_replicates: Some(6),
        ..ValidationOptions::default()
    };
    let report = validate_prepared_file(&config.output, &options).unwrap();
    assert!(!report.has_failures(), "{}", report);
}

#[test]
fn test_same_seed_same_output() {
    let dir = tempdir().unwrap();
    let first = lincs_config(dir.path());
    let mut second = first.clone();
    second.output = dir.path().join("out/again.parquet");

    run_pipeline(&first).unwrap();
    run_pipeline(&second).unwrap();

    let a = read_prepared(&first.output).unwrap().table;
    let b = read_prepared(&second.output).unwrap().table;
    for column in [SPLIT_OOD, SPLIT_RANDOM] {
        assert_eq!(
            a.string_values(column).unwrap(),
            b.string_values(column).unwrap()
        );
    }
}

#[test]
fn test_missing_key_column() {
    let dir = tempdir().unwrap();
    let mut config = lincs_config(dir.path());
    config.key_column = "sig_id".to_string();
    let err = run_pipeline(&config).unwrap_err();
    assert!(matches!(err, PipelineError::MissingColumn(ref c) if c == "sig_id"));
    assert!(!config.output.exists());
}

#[test]
fn test_everything_filtered_is_an_error() {
    let dir = tempdir().unwrap();
    let mut config = lincs_config(dir.path());
    config.filter.min_replicates = 100;
    let err = run_pipeline(&config).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyAfterFilter(_)));
    assert!(!config.output.exists());
}
