/// Errors raised while assigning splits
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// Error reading or extending the observation table
    #[error("Table error: {0}")]
    TableError(#[from] crate::table::TableError),

    /// Proportions are negative or do not sum to one
    #[error("Invalid split proportions: {0}")]
    InvalidProportions(String),

    /// A row has no identity to group by
    #[error("Row {row} has a null identity")]
    NullIdentity {
        /// Index of the offending row
        row: usize,
    },

    /// A split column holds something other than train/test/ood
    #[error("Unknown split label: {0:?}")]
    UnknownLabel(String),
}
