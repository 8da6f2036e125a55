use std::fmt;

/// Statistics from a completed write operation
#[derive(Debug, Clone)]
pub struct WriterStats {
    /// Number of rows written to the file
    pub rows_written: usize,
    /// Number of columns per row
    pub columns: usize,
    /// Number of Parquet row groups written
    pub row_groups_written: usize,
    /// Total file size in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} rows x {} columns in {} row groups",
            self.rows_written, self.columns, self.row_groups_written
        )
    }
}
