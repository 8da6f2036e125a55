use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use arrow::datatypes::SchemaRef;
use log::{debug, info};
use parquet::arrow::ArrowWriter;
use tempfile::NamedTempFile;

use crate::metadata::PrepMetadata;
use crate::table::ObsTable;

use super::config::WriterConfig;
use super::error::WriterError;
use super::stats::WriterStats;

/// Writer for prepared observation tables.
///
/// All tables written through one writer must share its schema. Footer
/// metadata is fixed when the writer is created.
pub struct ObsTableWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: SchemaRef,
    rows_written: usize,
}

impl ObsTableWriter<File> {
    /// Create a new writer to a file path
    pub fn new_file<P: AsRef<Path>>(
        path: P,
        schema: SchemaRef,
        metadata: &PrepMetadata,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        Self::new(file, schema, metadata, config)
    }
}

impl<W: Write + Send> ObsTableWriter<W> {
    /// Create a new writer to any Write implementation
    pub fn new(
        writer: W,
        schema: SchemaRef,
        metadata: &PrepMetadata,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        let parquet_metadata = metadata.to_parquet_metadata()?;
        let props = config.to_writer_properties(&parquet_metadata);

        let arrow_writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;

        Ok(Self {
            writer: arrow_writer,
            schema,
            rows_written: 0,
        })
    }

    /// Append all rows of a table
    pub fn write_table(&mut self, table: &ObsTable) -> Result<(), WriterError> {
        if table.schema().fields() != self.schema.fields() {
            return Err(WriterError::SchemaMismatch {
                expected: self.schema.fields().iter().map(|f| f.name().clone()).collect(),
                found: table.column_names(),
            });
        }
        self.writer.write(table.record_batch())?;
        self.rows_written += table.num_rows();
        Ok(())
    }

    /// Flush any buffered data and finalize the file
    pub fn finish(self) -> Result<WriterStats, WriterError> {
        let columns = self.schema.fields().len();
        let file_metadata = self.writer.close()?;

        Ok(WriterStats {
            rows_written: self.rows_written,
            columns,
            row_groups_written: file_metadata.row_groups.len(),
            file_size_bytes: file_metadata
                .row_groups
                .iter()
                .map(|rg| rg.total_byte_size as u64)
                .sum(),
        })
    }

    /// Flush any buffered data, finalize the file, and return the underlying writer
    pub fn finish_into_inner(self) -> Result<W, WriterError> {
        let inner = self.writer.into_inner()?;
        Ok(inner)
    }
}

/// Write a prepared table to `path` so that readers never see a partial file.
///
/// The file is written to a temporary sibling in the destination directory
/// and renamed over `path` once complete. On error the destination is left
/// untouched.
pub fn write_prepared_table<P: AsRef<Path>>(
    path: P,
    table: &ObsTable,
    metadata: &PrepMetadata,
    config: WriterConfig,
) -> Result<WriterStats, WriterError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    debug!("Writing {} rows to {}", table.num_rows(), temp.path().display());

    let mut writer = ObsTableWriter::new(temp.as_file_mut(), table.schema(), metadata, config)?;
    writer.write_table(table)?;
    let mut stats = writer.finish()?;
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| WriterError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    stats.file_size_bytes = fs::metadata(path)?.len();

    info!("{} to {}", stats, path.display());
    Ok(stats)
}
