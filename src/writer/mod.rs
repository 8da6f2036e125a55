//! # Writer Module
//!
//! Persists prepared observation tables as Parquet with preparation
//! provenance embedded in the footer's key_value_metadata.
//!
//! [`write_prepared_table`] is the entry point used by the pipeline: it
//! writes to a temporary file next to the destination and renames it into
//! place, so an interrupted run never leaves a truncated table behind.
//! [`ObsTableWriter`] is the lower-level streaming writer over any
//! `Write` sink.
//!
//! Compression defaults to ZSTD; label and identity columns are
//! dictionary encoded.

mod config;
mod error;
mod stats;
mod writer_impl;


pub use config::{CompressionType, WriterConfig};
pub use error::WriterError;
pub use stats::WriterStats;
pub use writer_impl::{write_prepared_table, ObsTableWriter};
