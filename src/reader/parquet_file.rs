use std::fs::File;
use std::path::Path;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::SerializedFileReader;

use crate::table::ObsTable;

use super::{FileMetadata, ReaderError};

/// Rows decoded per Arrow batch
const READ_BATCH_SIZE: usize = 64 * 1024;

/// Read every row group of a Parquet file into one table
pub(super) fn read_parquet_table(path: &Path) -> Result<ObsTable, ReaderError> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.with_batch_size(READ_BATCH_SIZE).build()?;

    let batches: Vec<RecordBatch> = reader.collect::<Result<_, _>>()?;
    debug!("Read {} record batches from {}", batches.len(), path.display());

    let batch = concat_batches(&schema, &batches)?;
    Ok(ObsTable::new(batch))
}

/// Read a table together with its footer metadata
pub(super) fn read_parquet_with_metadata(
    path: &Path,
) -> Result<(ObsTable, FileMetadata), ReaderError> {
    let metadata = {
        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        FileMetadata::from_reader(&reader)?
    };
    let table = read_parquet_table(path)?;
    Ok((table, metadata))
}
