/// Errors raised while filtering observations
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// Error reading or rebuilding the observation table
    #[error("Table error: {0}")]
    TableError(#[from] crate::table::TableError),

    /// Error joining the reference table
    #[error("Reference error: {0}")]
    ReferenceError(#[from] crate::reference::ReferenceError),
}
