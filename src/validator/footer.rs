use std::path::Path;

use anyhow::Result;

use crate::reader::{read_prepared, PreparedFile};
use crate::schema::CHEMPREP_FORMAT_VERSION;

use super::{ValidationCheck, ValidationReport};

/// Check that the file exists and decodes as a prepared table
pub(super) fn check_file(path: &Path, report: &mut ValidationReport) -> Result<Option<PreparedFile>> {
    if !path.exists() {
        report.add_check(ValidationCheck::failed("File exists", "Path does not exist"));
        return Ok(None);
    }
    if !path.is_file() {
        report.add_check(ValidationCheck::failed("File exists", "Path is not a file"));
        return Ok(None);
    }
    report.add_check(ValidationCheck::ok("File exists"));

    match read_prepared(path) {
        Ok(prepared) => {
            report.add_check(ValidationCheck::ok(format!(
                "Parquet readable ({} rows, {} columns)",
                prepared.table.num_rows(),
                prepared.table.num_columns()
            )));
            Ok(Some(prepared))
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed("Parquet readable", e.to_string()));
            Ok(None)
        }
    }
}

/// Footer metadata checks
pub(super) fn check_footer(prepared: &PreparedFile, report: &mut ValidationReport) {
    let metadata = &prepared.metadata;

    let Some(prep) = &metadata.prep_metadata else {
        report.add_check(ValidationCheck::failed(
            "Format version",
            "Footer has no chemprep metadata",
        ));
        return;
    };

    if metadata.format_version == CHEMPREP_FORMAT_VERSION {
        report.add_check(ValidationCheck::ok(format!(
            "Format version {}",
            metadata.format_version
        )));
    } else {
        report.add_check(ValidationCheck::warning(
            "Format version",
            format!(
                "File declares {}, this build writes {}",
                metadata.format_version, CHEMPREP_FORMAT_VERSION
            ),
        ));
    }

    match &prep.dataset {
        Some(name) => report.add_check(ValidationCheck::ok(format!("Dataset name: {}", name))),
        None => report.add_check(ValidationCheck::warning("Dataset name", "Not recorded")),
    }

    match &prep.processing_history {
        Some(history) if !history.steps.is_empty() => {
            report.add_check(ValidationCheck::ok(format!(
                "Processing history ({} steps)",
                history.steps.len()
            )));
        }
        _ => report.add_check(ValidationCheck::warning(
            "Processing history",
            "No processing steps recorded",
        )),
    }

    let rows = prepared.table.num_rows() as i64;
    if rows == metadata.total_rows {
        report.add_check(ValidationCheck::ok("Row count matches footer"));
    } else {
        report.add_check(ValidationCheck::failed(
            "Row count matches footer",
            format!("Footer declares {} rows, read {}", metadata.total_rows, rows),
        ));
    }
}
