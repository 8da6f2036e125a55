//! # Prepared Table Schema
//!
//! Column names, split labels and Parquet footer keys shared by the
//! preparation pipeline, the writer and the validator.
//!
//! A prepared table keeps every input column and adds:
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | canonical_smiles | Utf8 | Canonical identity of the perturbation |
//! | control | Boolean | Vehicle control flag (when control assignment is configured) |
//! | split_ood | Utf8 | `train` / `test` / `ood`, grouped by identity |
//! | split_random | Utf8 | `train` / `test` / `ood`, per row |
//! | drug_dose_name | Utf8 | `<identity>_<dose>` |
//! | cov_drug_dose_name | Utf8 | `<covariate>_<identity>_<dose>` |
//!
//! ## File Footer Metadata
//!
//! - `chemprep:format_version`: Format version string
//! - `chemprep:created_at`: RFC 3339 timestamp of the write
//! - `chemprep:tool_info`: Name and version of the writing tool
//! - `chemprep:dataset`: Dataset name
//! - `chemprep:source_files`: Input and reference paths
//! - `chemprep:processing_history`: Ordered preparation steps with parameters

/// Prepared table column name constants.
pub mod columns;
mod validation;

pub use columns::*;
pub use validation::{require_columns, SchemaValidationError};

/// chemprep format version - follows semantic versioning
pub const CHEMPREP_FORMAT_VERSION: &str = "1.0.0";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "chemprep:format_version";

/// Metadata key for write timestamp
pub const KEY_CREATED_AT: &str = "chemprep:created_at";

/// Metadata key for writing software info
pub const KEY_TOOL_INFO: &str = "chemprep:tool_info";

/// Metadata key for the dataset name
pub const KEY_DATASET: &str = "chemprep:dataset";

/// Metadata key for source file information
pub const KEY_SOURCE_FILES: &str = "chemprep:source_files";

/// Metadata key for data processing history
pub const KEY_PROCESSING_HISTORY: &str = "chemprep:processing_history";
