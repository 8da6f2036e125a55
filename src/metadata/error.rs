/// Errors raised while encoding or decoding provenance metadata
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// A metadata value could not be serialized to JSON
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A footer entry holds JSON that does not decode
    #[error("Corrupt footer entry '{key}': {source}")]
    CorruptFooter {
        /// Footer key of the bad entry
        key: String,
        /// Decoding failure
        source: serde_json::Error,
    },
}
