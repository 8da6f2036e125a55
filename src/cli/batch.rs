use anyhow::Result;
use log::info;
use std::path::PathBuf;

use chemprep::pipeline::run_batch;

use super::config::BatchConfig;
use super::Profile;

/// Prepare every dataset of a batch config; exits 1 if any dataset failed
pub fn run(config_path: PathBuf, profile: Option<Profile>) -> Result<()> {
    let configs = BatchConfig::from_file(&config_path)?.to_pipeline_configs(profile)?;
    if configs.is_empty() {
        anyhow::bail!("No [[datasets]] in {}", config_path.display());
    }

    info!("chemprep - batch of {} datasets", configs.len());
    let report = run_batch(&configs);
    println!("{}", report);

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
