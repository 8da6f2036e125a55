use anyhow::{Context, Result};
use std::path::PathBuf;

use chemprep::reader::read_prepared;
use chemprep::schema::{SPLIT_OOD, SPLIT_RANDOM};
use chemprep::split::SplitSummary;

/// Longest footer value printed in full
const PREVIEW_LEN: usize = 100;

fn preview(value: &str) -> String {
    if value.len() > PREVIEW_LEN {
        let mut end = PREVIEW_LEN;
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... ({} bytes)", &value[..end], value.len())
    } else {
        value.to_string()
    }
}

/// Display information about a prepared table
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }
    let prepared = read_prepared(&file).context("Failed to read prepared table")?;
    let metadata = &prepared.metadata;
    let table = &prepared.table;

    println!("chemprep File Information");
    println!("=========================");
    println!("File: {}", file.display());
    println!();

    println!("File Statistics:");
    println!("  Format version: {}", metadata.format_version);
    println!("  Row groups: {}", metadata.num_row_groups);
    println!("  Total rows: {}", metadata.total_rows);
    println!("  Columns: {}", table.num_columns());
    println!();

    if !metadata.key_value_metadata.is_empty() {
        println!("Metadata Keys:");
        let mut keys: Vec<_> = metadata.key_value_metadata.iter().collect();
        keys.sort();
        for (key, value) in keys {
            println!("  {}: {}", key, preview(value));
        }
        println!();
    }

    println!("Schema:");
    for (i, field) in metadata.schema.fields().iter().enumerate() {
        println!("  {:3}. {} ({})", i + 1, field.name(), field.data_type());
    }

    for column in [SPLIT_OOD, SPLIT_RANDOM] {
        if table.has_column(column) {
            let summary = SplitSummary::from_table(table, column)
                .with_context(|| format!("Failed to summarise '{}'", column))?;
            println!();
            println!("{}", summary);
        }
    }

    Ok(())
}
