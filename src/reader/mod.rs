//! # Reader Module
//!
//! Loads observation tables from disk. Parquet files are read through the
//! Arrow reader with their column types intact; CSV and TSV files are read
//! as nullable text columns. Prepared tables written by
//! [`crate::writer`] can be read back together with their footer metadata.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chemprep::reader::{read_obs_table, read_prepared};
//!
//! let obs = read_obs_table("lincs_full.parquet")?;
//! println!("{} observations", obs.num_rows());
//!
//! let prepared = read_prepared("lincs_prepared.parquet")?;
//! println!("Format version: {}", prepared.metadata.format_version);
//! # Ok::<(), chemprep::reader::ReaderError>(())
//! ```

mod delimited;
mod error;
mod metadata;
mod parquet_file;


use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;

use crate::table::ObsTable;

pub use delimited::read_delimited;
pub use error::ReaderError;
pub use metadata::FileMetadata;

/// A prepared table and its footer metadata
#[derive(Debug, Clone)]
pub struct PreparedFile {
    /// Table contents
    pub table: ObsTable,
    /// Footer metadata
    pub metadata: FileMetadata,
}

/// Input formats recognised by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Apache Parquet
    Parquet,
    /// Delimited text with the given field separator
    Delimited(u8),
}

impl InputFormat {
    /// Detect the format from the file extension.
    ///
    /// `.parquet`/`.pq` are Parquet, `.csv` is comma separated, and anything
    /// else (`.tsv`, `.txt`, ...) is treated as tab separated.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "parquet" | "pq" => Self::Parquet,
            _ => Self::Delimited(delimiter_for_path(path)),
        }
    }
}

/// Field delimiter implied by a file extension: `,` for `.csv`, tab otherwise
pub fn delimiter_for_path(path: &Path) -> u8 {
    match path.extension().map(|e| e.to_string_lossy().to_lowercase()) {
        Some(ext) if ext == "csv" => b',',
        _ => b'\t',
    }
}

/// Load an observation table from a Parquet, CSV or TSV file
pub fn read_obs_table<P: AsRef<Path>>(path: P) -> Result<ObsTable, ReaderError> {
    let path = path.as_ref();
    let table = match InputFormat::from_path(path) {
        InputFormat::Parquet => parquet_file::read_parquet_table(path)?,
        InputFormat::Delimited(delimiter) => {
            let file = File::open(path)?;
            read_delimited(BufReader::new(file), delimiter)?
        }
    };
    info!(
        "Loaded {} observations with {} columns from {}",
        table.num_rows(),
        table.num_columns(),
        path.display()
    );
    Ok(table)
}

/// Read a prepared Parquet table with its footer metadata
pub fn read_prepared<P: AsRef<Path>>(path: P) -> Result<PreparedFile, ReaderError> {
    let path = path.as_ref();
    if InputFormat::from_path(path) != InputFormat::Parquet {
        return Err(ReaderError::InvalidFormat(format!(
            "prepared tables are Parquet files: {}",
            path.display()
        )));
    }
    let (table, metadata) = parquet_file::read_parquet_with_metadata(path)?;
    Ok(PreparedFile { table, metadata })
}
