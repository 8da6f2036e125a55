//! # Metadata Module
//!
//! Provenance written into the footer of every prepared table: the dataset
//! name, the files it was prepared from, and an ordered processing history
//! recording each preparation stage with its parameters and row counts.
//!
//! Everything is serialized to JSON strings under `chemprep:*` keys of the
//! Parquet key-value metadata (see [`crate::schema`]), so any Parquet tool
//! can inspect it without this crate.

mod error;
mod prep;
mod processing;
mod source;

#[cfg(test)]
mod tests;

pub use error::MetadataError;
pub use prep::PrepMetadata;
pub use processing::{ProcessingHistory, ProcessingStep};
pub use source::SourceFileInfo;
