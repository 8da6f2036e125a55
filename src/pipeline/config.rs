use std::path::PathBuf;

use crate::filter::FilterConfig;
use crate::reference::ReferenceOptions;
use crate::schema::{DEFAULT_KEY, SPLIT_OOD, SPLIT_RANDOM};
use crate::split::{ShrinkThresholds, SplitProportions, DEFAULT_SEED};
use crate::writer::WriterConfig;

/// Reference file and the columns to read from it
#[derive(Debug, Clone)]
pub struct ReferenceSource {
    /// Path of the delimited reference file
    pub path: PathBuf,
    /// Key/value column selection
    pub options: ReferenceOptions,
}

/// Split assignment settings
#[derive(Debug, Clone, PartialEq)]
pub struct SplitConfig {
    /// Seed for both the identity and the random split
    pub seed: u64,
    /// Fractions of identities per partition
    pub identity_proportions: SplitProportions,
    /// Fractions of rows per partition for the random split
    pub random_proportions: SplitProportions,
    /// Shrink-back thresholds for the identity split
    pub shrink: ShrinkThresholds,
    /// Output column of the identity split
    pub identity_column: String,
    /// Output column of the random split
    pub random_column: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            identity_proportions: SplitProportions::identity_default(),
            random_proportions: SplitProportions::random_default(),
            shrink: ShrinkThresholds::default(),
            identity_column: SPLIT_OOD.to_string(),
            random_column: SPLIT_RANDOM.to_string(),
        }
    }
}

/// Everything needed to prepare one dataset.
///
/// All paths and thresholds are explicit; nothing is read from global state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Dataset name used in logs and footer metadata
    pub name: String,
    /// Observation table (Parquet, CSV or TSV)
    pub input: PathBuf,
    /// Reference mapping; when absent the input must already carry identities
    pub reference: Option<ReferenceSource>,
    /// Destination of the prepared Parquet table
    pub output: PathBuf,
    /// Observation column joined against the reference key
    pub key_column: String,
    /// Covariate (cell line) column used by shrink-back and condition labels
    pub covariate_column: Option<String>,
    /// Validity filter settings
    pub filter: FilterConfig,
    /// Split settings
    pub split: SplitConfig,
    /// Output file settings
    pub writer: WriterConfig,
}

impl PipelineConfig {
    /// Configuration with default columns, thresholds and splits
    pub fn new(name: &str, input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            input: input.into(),
            reference: None,
            output: output.into(),
            key_column: DEFAULT_KEY.to_string(),
            covariate_column: None,
            filter: FilterConfig::default(),
            split: SplitConfig::default(),
            writer: WriterConfig::default(),
        }
    }

    /// Join identities from a reference file using default column names
    pub fn with_reference(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference = Some(ReferenceSource {
            path: path.into(),
            options: ReferenceOptions::default(),
        });
        self
    }
}
