/// Errors that can occur while loading or joining a reference table
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// I/O error reading the reference file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Missing required column in the reference file
    #[error("Missing required reference column: {0}")]
    MissingColumn(String),

    /// Error reading or extending the observation table
    #[error("Table error: {0}")]
    TableError(#[from] crate::table::TableError),
}
