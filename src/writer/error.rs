use std::path::PathBuf;

/// Errors raised while writing a prepared table
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error creating or syncing the output
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error while handling record batches
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet encoding error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Footer metadata could not be encoded
    #[error("Metadata error: {0}")]
    MetadataError(#[from] crate::metadata::MetadataError),

    /// A table's columns differ from the schema the writer was opened with
    #[error("Table columns {found:?} do not match writer columns {expected:?}")]
    SchemaMismatch {
        /// Columns the writer expects
        expected: Vec<String>,
        /// Columns of the rejected table
        found: Vec<String>,
    },

    /// The finished temporary file could not be moved into place
    #[error("Failed to move output into place at {path}: {source}")]
    Persist {
        /// Destination path
        path: PathBuf,
        /// Underlying rename failure
        source: std::io::Error,
    },
}
