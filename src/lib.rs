//! # chemprep - Perturbation Dataset Preparation
//!
//! `chemprep` turns raw single-cell perturbation annotation tables (LINCS,
//! sci-Plex) into training-ready tables for chemical perturbation models:
//! every observation carries a canonical SMILES identity and leak-free
//! train/test/ood split labels.
//!
//! ## Key Features
//!
//! - **Reference join**: maps perturbation keys (`pert_id`) to SMILES from a
//!   delimited reference file.
//!
//! - **Validity filtering**: drops placeholder identities (`-666`,
//!   `restricted`), unparsable SMILES and under-replicated compounds, and
//!   canonicalizes what remains so equivalent spellings group together.
//!
//! - **Identity-grouped splits**: whole compounds are held out as test or
//!   out-of-distribution sets, with sparsely supported groups moved back
//!   into training.
//!
//! - **Parquet output**: prepared tables are written atomically with their
//!   provenance and processing history in the file footer.
//!
//! - **Sweep definitions**: hyperparameter sweeps over the prepared data are
//!   validated and expanded into concrete runs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chemprep::pipeline::{run_pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::new("lincs", "lincs_obs.csv", "lincs_prepared.parquet")
//!     .with_reference("GSE92742_Broad_LINCS_pert_info.txt");
//! let report = run_pipeline(&config)?;
//! println!("{}", report);
//! # Ok::<(), chemprep::pipeline::PipelineError>(())
//! ```
//!
//! ## Reading Prepared Tables
//!
//! Prepared tables are plain Parquet files:
//!
//! ```python
//! # Python
//! import pandas as pd
//! obs = pd.read_parquet("lincs_prepared.parquet")
//! train = obs[obs.split_ood == "train"]
//! ```
//!
//! ```sql
//! -- DuckDB
//! SELECT canonical_smiles, count(*) FROM read_parquet('lincs_prepared.parquet')
//! WHERE split_ood = 'ood' GROUP BY 1;
//! ```
//!
//! ## Architecture
//!
//! - [`smiles`]: SMILES parsing, sanitization and canonical writing
//! - [`table`]: Arrow-backed observation table
//! - [`reference`]: key-to-SMILES reference tables and the left join
//! - [`filter`]: validity filter and derived condition columns
//! - [`split`]: identity-grouped and random splits, shrink-back
//! - [`pipeline`]: single-dataset and batch preparation
//! - [`schema`], [`metadata`], [`writer`], [`reader`]: the prepared file format
//! - [`validator`]: integrity checks for prepared files
//! - [`sweep`]: hyperparameter sweep definitions

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![allow(clippy::too_many_arguments)]

pub mod filter;
pub mod metadata;
pub mod pipeline;
pub mod reader;
pub mod reference;
pub mod schema;
pub mod smiles;
pub mod split;
pub mod sweep;
pub mod table;
pub mod validator;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::filter::{FilterConfig, FilterStats, SentinelSet, ValidityFilter};
    pub use crate::metadata::{PrepMetadata, ProcessingHistory, ProcessingStep, SourceFileInfo};
    pub use crate::pipeline::{
        run_batch, run_pipeline, BatchReport, PipelineConfig, PipelineError, PipelineReport,
    };
    pub use crate::reader::{read_obs_table, read_prepared, FileMetadata, PreparedFile};
    pub use crate::reference::{JoinStats, ReferenceOptions, ReferenceTable};
    pub use crate::schema::{columns, CHEMPREP_FORMAT_VERSION};
    pub use crate::split::{SplitLabel, SplitProportions, SplitSummary};
    pub use crate::sweep::{RunConfig, SweepDefinition};
    pub use crate::table::ObsTable;
    pub use crate::validator::{validate_prepared_file, ValidationOptions, ValidationReport};
    pub use crate::writer::{write_prepared_table, CompressionType, WriterConfig, WriterStats};
}
