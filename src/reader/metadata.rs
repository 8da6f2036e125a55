use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::datatypes::Schema;
use parquet::file::reader::{ChunkReader, FileReader, SerializedFileReader};

use crate::metadata::PrepMetadata;
use crate::schema::KEY_FORMAT_VERSION;

use super::ReaderError;

/// Metadata extracted from a prepared Parquet file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Format version string
    pub format_version: String,
    /// Total number of rows in the file
    pub total_rows: i64,
    /// Number of row groups
    pub num_row_groups: usize,
    /// Schema of the Parquet file
    pub schema: Arc<Schema>,
    /// Raw key-value metadata from Parquet footer
    pub key_value_metadata: HashMap<String, String>,
    /// Parsed preparation metadata (if the footer carries it)
    pub prep_metadata: Option<PrepMetadata>,
}

impl FileMetadata {
    /// Read only the footer of a Parquet file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        Self::from_reader(&reader)
    }

    /// Extract metadata from a Parquet reader
    pub(super) fn from_reader<R: ChunkReader + 'static>(
        reader: &SerializedFileReader<R>,
    ) -> Result<Self, ReaderError> {
        let parquet_metadata = reader.metadata();
        let file_meta = parquet_metadata.file_metadata();
        let schema = parquet::arrow::parquet_to_arrow_schema(
            file_meta.schema_descr(),
            file_meta.key_value_metadata(),
        )?;

        let mut kv_metadata = HashMap::new();
        if let Some(kv_list) = file_meta.key_value_metadata() {
            for kv in kv_list {
                if let Some(value) = &kv.value {
                    kv_metadata.insert(kv.key.clone(), value.clone());
                }
            }
        }

        let format_version = kv_metadata
            .get(KEY_FORMAT_VERSION)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let prep_metadata = if kv_metadata.contains_key(KEY_FORMAT_VERSION) {
            Some(PrepMetadata::from_parquet_metadata(&kv_metadata)?)
        } else {
            None
        };

        let total_rows: i64 = (0..parquet_metadata.num_row_groups())
            .map(|i| parquet_metadata.row_group(i).num_rows())
            .sum();

        Ok(FileMetadata {
            format_version,
            total_rows,
            num_row_groups: parquet_metadata.num_row_groups(),
            schema: Arc::new(schema),
            key_value_metadata: kv_metadata,
            prep_metadata,
        })
    }
}
