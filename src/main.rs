//! # chemprep
//!
//! Command-line front end for preparing perturbation datasets.
//!
//! ## Usage
//!
//! ```bash
//! # Prepare one dataset
//! chemprep prepare --config configs/lincs.toml
//!
//! # Prepare several datasets, skipping the ones that fail
//! chemprep batch --config configs/batch.toml
//!
//! # Inspect and check a prepared table
//! chemprep info data/lincs_prepared.parquet
//! chemprep validate data/lincs_prepared.parquet --min-replicates 6
//!
//! # Expand a hyperparameter sweep
//! chemprep sweep configs/sweep.yaml --count
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
