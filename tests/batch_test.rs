//! Batch preparation: failures are isolated per dataset.

mod common;

use std::fs;

use chemprep::pipeline::{run_batch, PipelineConfig};
use tempfile::tempdir;

use common::write_lincs_fixture;

fn job(dir: &std::path::Path, name: &str) -> PipelineConfig {
    let data = dir.join(name);
    fs::create_dir_all(&data).unwrap();
    let (obs, reference) = write_lincs_fixture(&data);
    PipelineConfig::new(name, obs, dir.join(format!("out/{}.parquet", name)))
        .with_reference(reference)
}

#[test]
fn test_batch_continues_after_failure() {
    let dir = tempdir().unwrap();
    let good = job(dir.path(), "lincs");
    let mut broken = job(dir.path(), "broken");
    broken.input = dir.path().join("does_not_exist.csv");
    let other = job(dir.path(), "sciplex");

    let report = run_batch(&[good.clone(), broken.clone(), other.clone()]);

    assert!(!report.is_success());
    assert_eq!(report.completed.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "broken");
    assert!(good.output.exists());
    assert!(other.output.exists());
    assert!(!broken.output.exists());

    let names: Vec<&str> = report.completed.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["lincs", "sciplex"]);
    assert!(format!("{}", report).contains("broken"));
}

#[test]
fn test_duplicate_outputs_fail_later_jobs() {
    let dir = tempdir().unwrap();
    let first = job(dir.path(), "lincs");
    let mut second = job(dir.path(), "lincs_copy");
    second.output = first.output.clone();

    let report = run_batch(&[first, second]);
    assert_eq!(report.completed.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "lincs_copy");
}

#[test]
fn test_differently_spelled_duplicate_outputs_fail() {
    let dir = tempdir().unwrap();
    let first = job(dir.path(), "lincs");
    let mut dotted = job(dir.path(), "lincs_dotted");
    dotted.output = dir.path().join("out").join(".").join("lincs.parquet");
    let mut parent = job(dir.path(), "lincs_parent");
    parent.output = dir.path().join("lincs").join("..").join("out").join("lincs.parquet");

    let report = run_batch(&[first.clone(), dotted, parent]);
    assert_eq!(report.completed.len(), 1);
    let failed: Vec<&str> = report.failed.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(failed, vec!["lincs_dotted", "lincs_parent"]);
    assert!(first.output.exists());
}

#[test]
fn test_empty_batch_succeeds() {
    let report = run_batch(&[]);
    assert!(report.is_success());
    assert!(report.completed.is_empty());
}
