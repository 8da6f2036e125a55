/// Errors raised by observation table operations
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// A referenced column does not exist
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A new column does not match the table's row count
    #[error("Column '{column}' has {actual} values, table has {expected} rows")]
    LengthMismatch {
        /// Name of the offending column
        column: String,
        /// Row count of the table
        expected: usize,
        /// Length of the supplied values
        actual: usize,
    },

    /// Tables need at least one column
    #[error("Table has no columns")]
    NoColumns,
}
