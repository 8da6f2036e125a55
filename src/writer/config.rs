use std::collections::HashMap;

use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

use crate::schema::columns;

/// Compression codec for prepared tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD at the given level (1-22)
    Zstd(i32),
    /// Snappy
    Snappy,
    /// No compression
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::balanced()
    }
}

impl CompressionType {
    /// Smallest files
    pub fn max_compression() -> Self {
        Self::Zstd(19)
    }

    /// Default ZSTD level
    pub fn balanced() -> Self {
        Self::Zstd(6)
    }

    /// Fastest codec that still compresses
    pub fn fast() -> Self {
        Self::Snappy
    }

    fn to_parquet(self) -> Compression {
        match self {
            Self::Zstd(level) => Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default()),
            Self::Snappy => Compression::SNAPPY,
            Self::Uncompressed => Compression::UNCOMPRESSED,
        }
    }
}

/// Derived columns whose values repeat across many rows
const LABEL_COLUMNS: [&str; 6] = [
    columns::CANONICAL_SMILES,
    columns::CONTROL,
    columns::SPLIT_OOD,
    columns::SPLIT_RANDOM,
    columns::DRUG_DOSE_NAME,
    columns::COV_DRUG_DOSE_NAME,
];

/// Configuration for the prepared table writer
#[derive(Debug, Clone, PartialEq)]
pub struct WriterConfig {
    /// Compression codec
    pub compression: CompressionType,

    /// Maximum rows per row group
    pub row_group_size: usize,

    /// Whether to write column chunk statistics
    pub write_statistics: bool,

    /// Columns written with dictionary encoding
    pub dictionary_columns: Vec<String>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::balanced(),
            // Observation tables are narrow; 256k rows keeps row groups a few MB
            row_group_size: 256 * 1024,
            write_statistics: true,
            dictionary_columns: LABEL_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl WriterConfig {
    /// Smallest files, one large row group per million rows
    pub fn max_compression() -> Self {
        Self {
            compression: CompressionType::max_compression(),
            row_group_size: 1024 * 1024,
            ..Self::default()
        }
    }

    /// Snappy with small row groups and no statistics
    pub fn fast_write() -> Self {
        Self {
            compression: CompressionType::fast(),
            row_group_size: 64 * 1024,
            write_statistics: false,
            ..Self::default()
        }
    }

    /// Same as [`WriterConfig::default`]
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Also dictionary-encode `column` (e.g. a covariate such as `cell_id`)
    pub fn with_dictionary_column(mut self, column: &str) -> Self {
        if !self.dictionary_columns.iter().any(|c| c == column) {
            self.dictionary_columns.push(column.to_string());
        }
        self
    }

    /// Parquet writer properties carrying `metadata` in the footer
    pub(super) fn to_writer_properties(
        &self,
        metadata: &HashMap<String, String>,
    ) -> WriterProperties {
        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(self.compression.to_parquet())
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size)
            .set_dictionary_enabled(false);

        for column in &self.dictionary_columns {
            builder = builder
                .set_column_dictionary_enabled(ColumnPath::new(vec![column.clone()]), true);
        }

        // Sorted so identical inputs produce identical footers
        let mut entries: Vec<(&String, &String)> = metadata.iter().collect();
        entries.sort();
        let kv_metadata = entries
            .into_iter()
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect();

        builder.set_key_value_metadata(Some(kv_metadata)).build()
    }
}
