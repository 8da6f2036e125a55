use anyhow::{Context, Result};
use std::path::PathBuf;

use chemprep::sweep::SweepDefinition;

/// Validate a sweep definition and print its expanded runs
pub fn run(
    file: PathBuf,
    samples: Option<usize>,
    seed: Option<u64>,
    count_only: bool,
) -> Result<()> {
    let sweep = SweepDefinition::from_file(&file)
        .with_context(|| format!("Failed to load sweep definition {}", file.display()))?;
    let runs = sweep
        .expand(samples, seed)
        .context("Invalid sweep definition")?;

    if count_only {
        println!("{}", runs.len());
    } else {
        println!("{}", serde_json::to_string_pretty(&runs)?);
    }
    Ok(())
}
