//! # Observation Table
//!
//! [`ObsTable`] is the per-observation annotation table that flows through
//! the preparation pipeline: one row per measured cell or sample, with
//! arbitrary named columns. It wraps an Arrow [`RecordBatch`] and is
//! immutable; every filtering or column operation returns a new table.
//!
//! Column values are read back as text through [`ObsTable::string_values`],
//! which casts numeric, boolean and dictionary-encoded columns to strings so
//! that identity and dose handling does not depend on how the source file
//! typed them.

mod error;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, BooleanArray, StringArray};
use arrow::compute::{cast, filter_record_batch};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

pub use error::TableError;

/// Immutable table of per-observation annotations
#[derive(Debug, Clone)]
pub struct ObsTable {
    batch: RecordBatch,
}

impl ObsTable {
    /// Wrap an existing record batch
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// Build a table of nullable text columns.
    ///
    /// All columns must have the same length.
    pub fn from_string_columns(
        columns: Vec<(String, Vec<Option<String>>)>,
    ) -> Result<Self, TableError> {
        let Some(expected) = columns.first().map(|(_, values)| values.len()) else {
            return Err(TableError::NoColumns);
        };

        let mut fields = Vec::with_capacity(columns.len());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            if values.len() != expected {
                return Err(TableError::LengthMismatch {
                    column: name,
                    expected,
                    actual: values.len(),
                });
            }
            fields.push(Field::new(name, DataType::Utf8, true));
            arrays.push(Arc::new(StringArray::from(values)));
        }

        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
        Ok(Self { batch })
    }

    /// Number of observations
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Arrow schema of the table
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// Whether a column with this name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.batch.schema().index_of(name).is_ok()
    }

    /// Raw Arrow array for a column
    pub fn column(&self, name: &str) -> Result<&ArrayRef, TableError> {
        self.batch
            .column_by_name(name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// Column values as text, `None` for nulls.
    ///
    /// Non-string columns are cast to UTF-8 first.
    pub fn string_values(&self, name: &str) -> Result<Vec<Option<String>>, TableError> {
        let array = self.column(name)?;
        let text = cast(array, &DataType::Utf8)?;
        let strings = text.as_string::<i32>();
        Ok((0..strings.len())
            .map(|i| {
                if strings.is_null(i) {
                    None
                } else {
                    Some(strings.value(i).to_string())
                }
            })
            .collect())
    }

    /// Boolean column values; nulls read as `false`.
    pub fn bool_values(&self, name: &str) -> Result<Vec<bool>, TableError> {
        let array = self.column(name)?;
        let flags = cast(array, &DataType::Boolean)?;
        let flags = flags.as_boolean();
        Ok((0..flags.len())
            .map(|i| flags.is_valid(i) && flags.value(i))
            .collect())
    }

    /// Keep the rows whose mask entry is `true`
    pub fn filter(&self, keep: &[bool]) -> Result<ObsTable, TableError> {
        if keep.len() != self.num_rows() {
            return Err(TableError::LengthMismatch {
                column: "<row mask>".to_string(),
                expected: self.num_rows(),
                actual: keep.len(),
            });
        }
        let mask = BooleanArray::from(keep.to_vec());
        Ok(Self {
            batch: filter_record_batch(&self.batch, &mask)?,
        })
    }

    /// Table with a text column added, or replaced if the name exists
    pub fn with_string_column(
        &self,
        name: &str,
        values: Vec<Option<String>>,
    ) -> Result<ObsTable, TableError> {
        self.check_len(name, values.len())?;
        self.with_array(
            Field::new(name, DataType::Utf8, true),
            Arc::new(StringArray::from(values)),
        )
    }

    /// Table with a boolean column added, or replaced if the name exists
    pub fn with_bool_column(&self, name: &str, values: Vec<bool>) -> Result<ObsTable, TableError> {
        self.check_len(name, values.len())?;
        self.with_array(
            Field::new(name, DataType::Boolean, false),
            Arc::new(BooleanArray::from(values)),
        )
    }

    /// Occurrences of each non-null value of a column
    pub fn value_counts(&self, name: &str) -> Result<BTreeMap<String, usize>, TableError> {
        let mut counts = BTreeMap::new();
        for value in self.string_values(name)?.into_iter().flatten() {
            *counts.entry(value).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Number of distinct non-null values of a column
    pub fn distinct_count(&self, name: &str) -> Result<usize, TableError> {
        Ok(self.value_counts(name)?.len())
    }

    /// Borrow the underlying record batch
    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    fn check_len(&self, name: &str, actual: usize) -> Result<(), TableError> {
        if actual != self.num_rows() {
            return Err(TableError::LengthMismatch {
                column: name.to_string(),
                expected: self.num_rows(),
                actual,
            });
        }
        Ok(())
    }

    fn with_array(&self, field: Field, array: ArrayRef) -> Result<ObsTable, TableError> {
        let schema = self.batch.schema();
        let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
        let mut columns: Vec<ArrayRef> = self.batch.columns().to_vec();

        match schema.index_of(field.name()) {
            Ok(index) => {
                fields[index] = field;
                columns[index] = array;
            }
            Err(_) => {
                fields.push(field);
                columns.push(array);
            }
        }

        let schema = Schema::new_with_metadata(fields, schema.metadata().clone());
        let batch = RecordBatch::try_new(Arc::new(schema), columns)?;
        Ok(Self { batch })
    }
}

impl From<RecordBatch> for ObsTable {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}
