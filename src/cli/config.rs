//! TOML configuration for the `prepare` and `batch` commands.
//!
//! ```toml
//! # lincs.toml
//! [dataset]
//! name = "lincs"
//! input = "data/lincs_obs.csv"
//! reference = "data/GSE92742_Broad_LINCS_pert_info.txt"
//! output = "data/lincs_prepared.parquet"
//!
//! [columns]
//! key = "pert_id"
//! dose = "pert_dose"
//! covariate = "cell_id"
//!
//! [filter]
//! min_replicates = 6
//!
//! [split]
//! seed = 42
//! identity_proportions = [0.8, 0.1, 0.1]
//! ```
//!
//! A batch file holds the same tables under `[[datasets]]`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use chemprep::filter::SentinelSet;
use chemprep::pipeline::{PipelineConfig, ReferenceSource};
use chemprep::reference::ReferenceOptions;
use chemprep::split::SplitProportions;

use crate::cli::Profile;

/// Root of a single-dataset configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrepConfig {
    /// Dataset paths and name.
    #[serde(default)]
    pub dataset: DatasetSection,

    /// Column names.
    #[serde(default)]
    pub columns: ColumnsSection,

    /// Validity filter settings.
    #[serde(default)]
    pub filter: FilterSection,

    /// Split settings.
    #[serde(default)]
    pub split: SplitSection,

    /// Output file settings.
    #[serde(default)]
    pub output: OutputSection,
}

/// Input, reference and output locations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetSection {
    /// Name recorded in logs and footer metadata (defaults to the input file stem).
    pub name: Option<String>,

    /// Observation table.
    pub input: Option<PathBuf>,

    /// Delimited key-to-SMILES reference file.
    pub reference: Option<PathBuf>,

    /// Prepared Parquet output.
    pub output: Option<PathBuf>,
}

/// Column names in the observation and reference tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnsSection {
    /// Observation column joined against the reference.
    pub key: Option<String>,

    /// Key column of the reference file.
    pub reference_key: Option<String>,

    /// SMILES column of the reference file.
    pub reference_value: Option<String>,

    /// Column holding identities after the join.
    pub identity: Option<String>,

    /// Dose column.
    pub dose: Option<String>,

    /// Covariate (cell line) column.
    pub covariate: Option<String>,

    /// Perturbation name column used to recognise controls.
    pub perturbation: Option<String>,
}

/// Validity filter settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterSection {
    /// Minimum rows per identity.
    pub min_replicates: Option<usize>,

    /// Identity placeholder markers.
    pub identity_sentinels: Option<Vec<String>>,

    /// Dose placeholder markers.
    pub dose_sentinels: Option<Vec<String>>,

    /// Perturbation names marking control rows.
    pub control_values: Option<Vec<String>>,

    /// SMILES assigned to control rows.
    pub control_smiles: Option<String>,
}

/// Split settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SplitSection {
    /// Seed for both splits.
    pub seed: Option<u64>,

    /// Train/test/ood fractions of identities.
    pub identity_proportions: Option<[f64; 3]>,

    /// Train/test/ood fractions of rows.
    pub random_proportions: Option<[f64; 3]>,

    /// Rows an identity needs to stay held out.
    pub min_identity_count: Option<usize>,

    /// Rows a covariate value needs to stay held out.
    pub min_covariate_count: Option<usize>,

    /// Identity split column name.
    pub identity_column: Option<String>,

    /// Random split column name.
    pub random_column: Option<String>,
}

/// Output file settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSection {
    /// Writer profile (fast, balanced, max-compression).
    pub profile: Option<String>,

    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Rows per Parquet row group.
    pub row_group_size: Option<usize>,
}

/// Root of a batch configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchConfig {
    /// One entry per dataset.
    #[serde(default)]
    pub datasets: Vec<PrepConfig>,
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))
}

impl PrepConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_str(&read_file(path)?)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Resolve into a pipeline configuration.
    ///
    /// `profile` overrides `[output].profile` when given.
    pub fn to_pipeline_config(&self, profile: Option<Profile>) -> Result<PipelineConfig> {
        let Some(input) = &self.dataset.input else {
            bail!("[dataset] input is required");
        };
        let Some(output) = &self.dataset.output else {
            bail!("[dataset] output is required");
        };
        let name = match &self.dataset.name {
            Some(name) => name.clone(),
            None => input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "dataset".to_string()),
        };

        let mut config = PipelineConfig::new(&name, input, output);
        let columns = &self.columns;

        if let Some(path) = &self.dataset.reference {
            let mut options = ReferenceOptions::default();
            if let Some(key) = &columns.reference_key {
                options.key_column = key.clone();
            }
            if let Some(value) = &columns.reference_value {
                options.value_column = value.clone();
            }
            config.reference = Some(ReferenceSource {
                path: path.clone(),
                options,
            });
        }
        if let Some(key) = &columns.key {
            config.key_column = key.clone();
        }
        config.covariate_column = columns.covariate.clone();

        let filter = &mut config.filter;
        if let Some(identity) = &columns.identity {
            filter.identity_column = identity.clone();
        }
        filter.dose_column = columns.dose.clone();
        filter.perturbation_column = columns.perturbation.clone();
        if let Some(min) = self.filter.min_replicates {
            filter.min_replicates = min;
        }
        if let Some(markers) = &self.filter.identity_sentinels {
            filter.identity_sentinels = SentinelSet::new(markers);
        }
        if let Some(markers) = &self.filter.dose_sentinels {
            filter.dose_sentinels = SentinelSet::new(markers);
        }
        if let Some(values) = &self.filter.control_values {
            filter.control_values = values.clone();
        }
        if let Some(smiles) = &self.filter.control_smiles {
            filter.control_smiles = smiles.clone();
        }

        let split = &mut config.split;
        if let Some(seed) = self.split.seed {
            split.seed = seed;
        }
        if let Some(p) = self.split.identity_proportions {
            split.identity_proportions =
                SplitProportions::try_from(p).context("Invalid identity_proportions")?;
        }
        if let Some(p) = self.split.random_proportions {
            split.random_proportions =
                SplitProportions::try_from(p).context("Invalid random_proportions")?;
        }
        if let Some(min) = self.split.min_identity_count {
            split.shrink.min_identity_count = min;
        }
        if let Some(min) = self.split.min_covariate_count {
            split.shrink.min_covariate_count = min;
        }
        if let Some(column) = &self.split.identity_column {
            split.identity_column = column.clone();
        }
        if let Some(column) = &self.split.random_column {
            split.random_column = column.clone();
        }

        let profile = match (profile, &self.output.profile) {
            (Some(profile), _) => profile,
            (None, Some(name)) => name.parse().map_err(anyhow::Error::msg)?,
            (None, None) => Profile::default(),
        };
        config.writer =
            profile.writer_config_with(self.output.compression_level, self.output.row_group_size);

        Ok(config)
    }
}

impl BatchConfig {
    /// Load a batch configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_str(&read_file(path)?)
    }

    /// Parse a batch configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML batch configuration")
    }

    /// Resolve every dataset; fails on the first incomplete entry.
    pub fn to_pipeline_configs(&self, profile: Option<Profile>) -> Result<Vec<PipelineConfig>> {
        self.datasets
            .iter()
            .enumerate()
            .map(|(i, dataset)| {
                dataset
                    .to_pipeline_config(profile)
                    .with_context(|| format!("Dataset #{} in batch configuration", i + 1))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemprep::writer::{CompressionType, WriterConfig};

    const LINCS: &str = r#"
        [dataset]
        name = "lincs"
        input = "data/lincs_obs.csv"
        reference = "data/pert_info.txt"
        output = "out/lincs.parquet"

        [columns]
        key = "pert_id"
        reference_value = "canonical_smiles"
        dose = "pert_dose"
        covariate = "cell_id"
        perturbation = "pert_iname"

        [filter]
        min_replicates = 4
        control_values = ["DMSO"]

        [split]
        seed = 7
        identity_proportions = [0.7, 0.15, 0.15]
        min_identity_count = 3

        [output]
        profile = "fast"
        compression_level = 5
    "#;

    #[test]
    fn test_parse_config() {
        let config = PrepConfig::from_str(LINCS).unwrap();
        assert_eq!(config.dataset.name.as_deref(), Some("lincs"));
        assert_eq!(config.columns.dose.as_deref(), Some("pert_dose"));
        assert_eq!(config.filter.min_replicates, Some(4));
        assert_eq!(config.split.identity_proportions, Some([0.7, 0.15, 0.15]));
        assert_eq!(config.output.profile.as_deref(), Some("fast"));
    }

    #[test]
    fn test_to_pipeline_config() {
        let pipeline = PrepConfig::from_str(LINCS)
            .unwrap()
            .to_pipeline_config(None)
            .unwrap();
        assert_eq!(pipeline.name, "lincs");
        assert_eq!(pipeline.key_column, "pert_id");
        assert_eq!(pipeline.covariate_column.as_deref(), Some("cell_id"));
        assert!(pipeline.reference.is_some());
        assert_eq!(pipeline.filter.min_replicates, 4);
        assert_eq!(pipeline.filter.control_values, vec!["DMSO".to_string()]);
        assert_eq!(pipeline.filter.dose_column.as_deref(), Some("pert_dose"));
        assert_eq!(pipeline.split.seed, 7);
        assert_eq!(pipeline.split.identity_proportions.train, 0.7);
        assert_eq!(pipeline.split.shrink.min_identity_count, 3);
        assert_eq!(pipeline.split.shrink.min_covariate_count, 20);
        assert_eq!(pipeline.writer.compression, CompressionType::Zstd(5));
    }

    #[test]
    fn test_cli_profile_wins() {
        let pipeline = PrepConfig::from_str(LINCS)
            .unwrap()
            .to_pipeline_config(Some(Profile::MaxCompression))
            .unwrap();
        assert_eq!(
            pipeline.writer.row_group_size,
            WriterConfig::max_compression().row_group_size
        );
    }

    #[test]
    fn test_name_defaults_to_input_stem() {
        let toml = r#"
            [dataset]
            input = "data/sciplex.parquet"
            output = "out/sciplex_prepared.parquet"
        "#;
        let pipeline = PrepConfig::from_str(toml)
            .unwrap()
            .to_pipeline_config(None)
            .unwrap();
        assert_eq!(pipeline.name, "sciplex");
        assert!(pipeline.reference.is_none());
        assert_eq!(pipeline.writer, WriterConfig::default());
    }

    #[test]
    fn test_missing_paths() {
        let config = PrepConfig::from_str("[dataset]\ninput = \"a.csv\"\n").unwrap();
        assert!(config.to_pipeline_config(None).is_err());
        let config = PrepConfig::from_str("").unwrap();
        assert!(config.to_pipeline_config(None).is_err());
    }

    #[test]
    fn test_invalid_proportions() {
        let toml = r#"
            [dataset]
            input = "a.csv"
            output = "b.parquet"
            [split]
            random_proportions = [0.5, 0.5, 0.5]
        "#;
        let config = PrepConfig::from_str(toml).unwrap();
        assert!(config.to_pipeline_config(None).is_err());
    }

    #[test]
    fn test_batch_config() {
        let toml = r#"
            [[datasets]]
            [datasets.dataset]
            name = "lincs"
            input = "lincs.csv"
            output = "lincs.parquet"

            [[datasets]]
            [datasets.dataset]
            name = "sciplex"
            input = "sciplex.csv"
            output = "sciplex.parquet"
            [datasets.filter]
            min_replicates = 2
        "#;
        let batch = BatchConfig::from_str(toml).unwrap();
        let configs = batch.to_pipeline_configs(None).unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[1].name, "sciplex");
        assert_eq!(configs[1].filter.min_replicates, 2);
        assert_eq!(configs[0].filter.min_replicates, 6);
    }
}
