//! # Prepared Table Validation
//!
//! Integrity checks for a prepared Parquet table, run after preparation or
//! on files produced elsewhere.
//!
//! ## Validation Checklist
//!
//! 1. **Footer**: format version, dataset name and processing history
//! 2. **Columns**: the identity and split columns exist
//! 3. **Identities**: no nulls, no placeholder markers, every value parses
//!    as SMILES and is already in canonical form
//! 4. **Splits**: labels are known, partitions cover every row, and no
//!    identity appears in more than one partition of the identity split
//! 5. **Replicates** (optional): every identity keeps the minimum count
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chemprep::validator::{validate_prepared_file, ValidationOptions};
//! use std::path::Path;
//!
//! let report = validate_prepared_file(Path::new("lincs.parquet"), &ValidationOptions::default());
//! match report {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::path::Path;

use anyhow::Result;

use crate::filter::SentinelSet;
use crate::schema::{CANONICAL_SMILES, SPLIT_OOD, SPLIT_RANDOM};
use crate::table::ObsTable;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

mod columns;
mod data;
mod footer;
mod report;

/// What a prepared table is checked against
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Column holding canonical SMILES
    pub identity_column: String,
    /// Identity-grouped split column (must be leak-free)
    pub split_column: String,
    /// Row-level split column; checked only if present
    pub random_split_column: String,
    /// Markers that must not survive preparation
    pub sentinels: SentinelSet,
    /// Minimum observations per identity, if enforced
    pub min_replicates: Option<usize>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            identity_column: CANONICAL_SMILES.to_string(),
            split_column: SPLIT_OOD.to_string(),
            random_split_column: SPLIT_RANDOM.to_string(),
            sentinels: SentinelSet::identity_defaults(),
            min_replicates: None,
        }
    }
}

/// Validate a prepared Parquet file.
///
/// Returns `Err` only when the file cannot be opened or decoded at all;
/// every content problem is reported as a failed check.
pub fn validate_prepared_file(path: &Path, options: &ValidationOptions) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(path.display().to_string());

    let Some(prepared) = footer::check_file(path, &mut report)? else {
        return Ok(report);
    };
    footer::check_footer(&prepared, &mut report);
    check_table(&prepared.table, options, &mut report);

    Ok(report)
}

/// Run the column, identity and split checks on an in-memory table
pub fn validate_table(table: &ObsTable, options: &ValidationOptions) -> ValidationReport {
    let mut report = ValidationReport::new("<in-memory table>");
    check_table(table, options, &mut report);
    report
}

fn check_table(table: &ObsTable, options: &ValidationOptions, report: &mut ValidationReport) {
    if !columns::check_columns(table, options, report) {
        return;
    }
    data::check_identities(table, options, report);
    data::check_split_column(table, &options.split_column, report);
    data::check_leakage(table, options, report);
    if table.has_column(&options.random_split_column) {
        data::check_split_column(table, &options.random_split_column, report);
    }
    if let Some(min) = options.min_replicates {
        data::check_replicates(table, &options.identity_column, min, report);
    }
}
