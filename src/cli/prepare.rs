use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use chemprep::pipeline::{run_pipeline, ReferenceSource};
use chemprep::reference::ReferenceOptions;

use super::config::PrepConfig;
use super::Profile;

/// Prepare one dataset from a TOML config, with command-line overrides
pub fn run(
    config_path: Option<PathBuf>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    reference: Option<PathBuf>,
    seed: Option<u64>,
    profile: Option<Profile>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => PrepConfig::from_file(path)?,
        None => PrepConfig::default(),
    };
    if input.is_some() {
        config.dataset.input = input;
    }
    if output.is_some() {
        config.dataset.output = output;
    }
    if seed.is_some() {
        config.split.seed = seed;
    }

    let mut pipeline = config.to_pipeline_config(profile)?;
    if let Some(path) = reference {
        let options = pipeline
            .reference
            .take()
            .map(|r| r.options)
            .unwrap_or_else(ReferenceOptions::default);
        pipeline.reference = Some(ReferenceSource { path, options });
    }

    if !pipeline.input.exists() {
        anyhow::bail!("Input file does not exist: {}", pipeline.input.display());
    }

    info!("chemprep - prepare");
    info!("==================");
    info!("Dataset: {}", pipeline.name);
    info!("Input:   {}", pipeline.input.display());
    if let Some(reference) = &pipeline.reference {
        info!("Reference: {}", reference.path.display());
    }
    info!("Output:  {}", pipeline.output.display());
    info!("Seed:    {}", pipeline.split.seed);

    let report = run_pipeline(&pipeline)
        .with_context(|| format!("Failed to prepare dataset '{}'", pipeline.name))?;
    println!("{}", report);
    Ok(())
}
