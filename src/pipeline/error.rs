/// Errors that stop the preparation of one dataset
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Reading the observation table failed
    #[error("Failed to read observations: {0}")]
    ReaderError(#[from] crate::reader::ReaderError),

    /// Loading the reference table failed
    #[error("Failed to load reference: {0}")]
    ReferenceError(#[from] crate::reference::ReferenceError),

    /// The validity filter failed
    #[error("Filter error: {0}")]
    FilterError(#[from] crate::filter::FilterError),

    /// Split assignment failed
    #[error("Split error: {0}")]
    SplitError(#[from] crate::split::SplitError),

    /// Adding derived columns failed
    #[error("Table error: {0}")]
    TableError(#[from] crate::table::TableError),

    /// Writing the prepared table failed
    #[error("Failed to write output: {0}")]
    WriterError(#[from] crate::writer::WriterError),

    /// A column required by the configuration is missing
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// No observations survived filtering
    #[error("No observations left after filtering dataset '{0}'")]
    EmptyAfterFilter(String),

    /// Another job in the same batch already writes this output
    #[error("Output {0} is shared with another dataset in the batch")]
    DuplicateOutput(String),
}
