//! # Preparation Pipeline
//!
//! Runs the full preparation of a dataset as a straight line of pure
//! transformations over [`ObsTable`](crate::table::ObsTable) values:
//!
//! ```text
//! read -> reference join -> validity filter -> identity split -> shrink-back
//!      -> random split -> condition labels -> atomic write
//! ```
//!
//! [`run_batch`] prepares several datasets, isolating failures so that one
//! broken input does not stop the others.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chemprep::pipeline::{run_pipeline, PipelineConfig};
//!
//! let mut config = PipelineConfig::new("lincs", "lincs_obs.csv", "lincs_prepared.parquet")
//!     .with_reference("GSE92742_Broad_LINCS_pert_info.txt");
//! config.covariate_column = Some("cell_id".to_string());
//!
//! let report = run_pipeline(&config)?;
//! println!("{}", report);
//! # Ok::<(), chemprep::pipeline::PipelineError>(())
//! ```

mod batch;
mod config;
mod error;
mod report;
mod run;

pub use batch::run_batch;
pub use config::{PipelineConfig, ReferenceSource, SplitConfig};
pub use error::PipelineError;
pub use report::{BatchReport, DatasetFailure, PipelineReport};
pub use run::run_pipeline;
