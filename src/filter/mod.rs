//! # Validity Filter
//!
//! Removes observations whose chemical identity cannot be used for training
//! and rewrites the surviving identities into canonical SMILES.
//!
//! [`ValidityFilter::apply`] runs these stages in order:
//!
//! 1. **Controls** (optional): rows whose perturbation name is a control
//!    value receive the vehicle SMILES and a `control` flag.
//! 2. **Sentinels**: rows with a null identity or a placeholder marker
//!    (`-666`, `restricted`, `nan`, empty) are dropped.
//! 3. **Canonicalization**: each distinct identity is parsed once; rows that
//!    fail to parse are dropped, the rest get the canonical form.
//! 4. **Dose sentinels** (optional): rows whose dose is a marker are dropped.
//! 5. **Replicates**: identities seen fewer than `min_replicates` times are
//!    dropped entirely.
//!
//! Every stage returns a new table; row counts never increase.
//!
//! ## Example
//!
//! ```rust
//! use chemprep::filter::{FilterConfig, ValidityFilter};
//! use chemprep::table::ObsTable;
//!
//! let smiles = ["OCC", "CCO", "-666", "restricted"];
//! let table = ObsTable::from_string_columns(vec![(
//!     "canonical_smiles".to_string(),
//!     smiles.iter().map(|s| Some(s.to_string())).collect(),
//! )])?;
//!
//! let config = FilterConfig { min_replicates: 2, ..FilterConfig::default() };
//! let (filtered, stats) = ValidityFilter::new(config).apply(&table)?;
//! assert_eq!(filtered.num_rows(), 2);
//! assert_eq!(stats.removed_sentinel, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod derived;
mod error;
mod sentinel;
mod stages;

#[cfg(test)]
mod tests;

use std::fmt;

use log::{info, warn};

use crate::reference::{JoinStats, ReferenceTable};
use crate::schema::CANONICAL_SMILES;
use crate::table::ObsTable;

pub use derived::add_condition_columns;
pub use error::FilterError;
pub use sentinel::{SentinelSet, DEFAULT_DOSE_SENTINELS, DEFAULT_IDENTITY_SENTINELS};

/// Vehicle SMILES given to control rows (DMSO)
pub const DEFAULT_CONTROL_SMILES: &str = "CS(C)=O";

/// Default minimum number of rows per identity
pub const DEFAULT_MIN_REPLICATES: usize = 6;

/// Left-join a reference table onto `table`, writing identities to `output_column`
pub fn join_reference(
    table: &ObsTable,
    reference: &ReferenceTable,
    key_column: &str,
    output_column: &str,
) -> Result<(ObsTable, JoinStats), FilterError> {
    Ok(reference.join(table, key_column, output_column)?)
}

/// Configuration for the validity filter
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Column holding the identity string
    pub identity_column: String,
    /// Identity values treated as missing
    pub identity_sentinels: SentinelSet,
    /// Dose column; the dose stage is skipped when unset or absent
    pub dose_column: Option<String>,
    /// Dose values treated as missing
    pub dose_sentinels: SentinelSet,
    /// Minimum rows per identity
    pub min_replicates: usize,
    /// Perturbation name column used to recognise controls
    pub perturbation_column: Option<String>,
    /// Perturbation names marking control rows; empty disables control assignment
    pub control_values: Vec<String>,
    /// Identity assigned to control rows
    pub control_smiles: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            identity_column: CANONICAL_SMILES.to_string(),
            identity_sentinels: SentinelSet::identity_defaults(),
            dose_column: None,
            dose_sentinels: SentinelSet::dose_defaults(),
            min_replicates: DEFAULT_MIN_REPLICATES,
            perturbation_column: None,
            control_values: Vec::new(),
            control_smiles: DEFAULT_CONTROL_SMILES.to_string(),
        }
    }
}

/// Row counts through each filter stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Rows entering the filter
    pub rows_in: usize,
    /// Rows recognised as controls
    pub controls_assigned: usize,
    /// Rows dropped for a null or sentinel identity
    pub removed_sentinel: usize,
    /// Rows dropped because their identity failed to parse
    pub removed_invalid: usize,
    /// Distinct identity strings that failed to parse
    pub invalid_identities: usize,
    /// Rows dropped for a sentinel dose
    pub removed_dose: usize,
    /// Rows dropped by the replicate threshold
    pub removed_replicates: usize,
    /// Rows leaving the filter
    pub rows_out: usize,
}

impl FilterStats {
    /// Total rows removed
    pub fn removed(&self) -> usize {
        self.rows_in - self.rows_out
    }
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} rows (sentinel: {}, invalid: {}, dose: {}, replicates: {})",
            self.rows_in,
            self.rows_out,
            self.removed_sentinel,
            self.removed_invalid,
            self.removed_dose,
            self.removed_replicates
        )
    }
}

/// Applies the validity filter stages to observation tables
#[derive(Debug, Clone, Default)]
pub struct ValidityFilter {
    config: FilterConfig,
}

impl ValidityFilter {
    /// Create a filter with the given configuration
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Filter configuration
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Run all stages, returning the retained rows and per-stage counts
    pub fn apply(&self, table: &ObsTable) -> Result<(ObsTable, FilterStats), FilterError> {
        let config = &self.config;
        let identity = config.identity_column.as_str();
        let mut stats = FilterStats {
            rows_in: table.num_rows(),
            ..FilterStats::default()
        };

        let mut current = table.clone();

        if !config.control_values.is_empty() {
            match config.perturbation_column.as_deref() {
                Some(perturbation) => {
                    let (next, assigned) = stages::assign_controls(
                        &current,
                        perturbation,
                        identity,
                        &config.control_values,
                        &config.control_smiles,
                    )?;
                    stats.controls_assigned = assigned;
                    current = next;
                }
                None => warn!("Control values configured without a perturbation column"),
            }
        }

        let (next, removed) =
            stages::drop_sentinel_identities(&current, identity, &config.identity_sentinels)?;
        stats.removed_sentinel = removed;
        current = next;

        let (next, removed, invalid) = stages::canonicalize_identities(&current, identity)?;
        stats.removed_invalid = removed;
        stats.invalid_identities = invalid;
        current = next;

        if let Some(dose) = config.dose_column.as_deref() {
            if current.has_column(dose) {
                let (next, removed) =
                    stages::drop_sentinel_doses(&current, dose, &config.dose_sentinels)?;
                stats.removed_dose = removed;
                current = next;
            } else {
                warn!("Dose column '{}' not found; dose filter skipped", dose);
            }
        }

        let (next, removed) =
            stages::filter_min_replicates(&current, identity, config.min_replicates)?;
        stats.removed_replicates = removed;
        current = next;

        stats.rows_out = current.num_rows();
        info!("Validity filter: {}", stats);
        Ok((current, stats))
    }
}
