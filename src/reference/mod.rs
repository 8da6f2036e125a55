//! # Reference Table
//!
//! A reference table maps an observation key (for LINCS, `pert_id`) to the
//! chemical identity string of the perturbation. It is loaded from a
//! delimited text file and left-joined onto the observation table: rows
//! whose key is absent, or whose reference value is empty, receive a null
//! identity and are removed later by the validity filter.
//!
//! When a key occurs more than once in the reference file, the first
//! occurrence wins and the duplicate is counted.

mod error;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info};

use crate::reader::delimiter_for_path;
use crate::schema::{CANONICAL_SMILES, DEFAULT_KEY};
use crate::table::ObsTable;

pub use error::ReferenceError;

/// Column selection for a reference file
#[derive(Debug, Clone)]
pub struct ReferenceOptions {
    /// Header of the key column
    pub key_column: String,
    /// Header of the identity column
    pub value_column: String,
    /// Field delimiter; inferred from the file extension when `None`
    pub delimiter: Option<u8>,
}

impl Default for ReferenceOptions {
    fn default() -> Self {
        Self {
            key_column: DEFAULT_KEY.to_string(),
            value_column: CANONICAL_SMILES.to_string(),
            delimiter: None,
        }
    }
}

/// Key to identity lookup loaded from a reference file
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: HashMap<String, Option<String>>,
    duplicate_keys: usize,
}

/// Outcome of a left join
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    /// Rows whose key was found with a non-empty value
    pub matched: usize,
    /// Rows left with a null identity
    pub unmatched: usize,
}

impl ReferenceTable {
    /// Build a reference table from key/value pairs; the first occurrence of a key wins
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        let mut table = Self::default();
        for (key, value) in pairs {
            table.insert(key.into(), value);
        }
        table
    }

    /// Parse a reference table from a CSV or TSV file
    pub fn from_delimited_file<P: AsRef<Path>>(
        path: P,
        options: &ReferenceOptions,
    ) -> Result<Self, ReferenceError> {
        let path = path.as_ref();
        let delimiter = options.delimiter.unwrap_or_else(|| delimiter_for_path(path));
        let file = File::open(path)?;
        let table = Self::from_reader(
            BufReader::new(file),
            &options.key_column,
            &options.value_column,
            delimiter,
        )?;
        info!(
            "Loaded {} reference entries from {} ({} duplicate keys ignored)",
            table.len(),
            path.display(),
            table.duplicate_keys
        );
        Ok(table)
    }

    /// Parse a reference table from a reader
    pub fn from_reader<R: Read>(
        reader: R,
        key_column: &str,
        value_column: &str,
        delimiter: u8,
    ) -> Result<Self, ReferenceError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_lowercase())
            .collect();

        let find = |name: &str| {
            let wanted = name.trim().to_lowercase();
            headers
                .iter()
                .position(|h| *h == wanted)
                .ok_or_else(|| ReferenceError::MissingColumn(name.to_string()))
        };
        let key_index = find(key_column)?;
        let value_index = find(value_column)?;

        let mut table = Self::default();
        for record in csv_reader.records() {
            let record = record?;
            let Some(key) = record.get(key_index).map(str::trim) else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            let value = record
                .get(value_index)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            table.insert(key.to_string(), value);
        }
        Ok(table)
    }

    fn insert(&mut self, key: String, value: Option<String>) {
        if self.entries.contains_key(&key) {
            debug!("Duplicate reference key '{}' ignored", key);
            self.duplicate_keys += 1;
        } else {
            self.entries.insert(key, value);
        }
    }

    /// Identity recorded for a key, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|v| v.as_deref())
    }

    /// Whether the key is present, even with an empty value
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rows dropped because their key was already present
    pub fn duplicate_keys(&self) -> usize {
        self.duplicate_keys
    }

    /// Left join onto `table` by `key_column`, writing identities to `output_column`.
    ///
    /// Row count and order are preserved.
    pub fn join(
        &self,
        table: &ObsTable,
        key_column: &str,
        output_column: &str,
    ) -> Result<(ObsTable, JoinStats), ReferenceError> {
        let keys = table.string_values(key_column)?;
        let mut stats = JoinStats::default();
        let identities: Vec<Option<String>> = keys
            .iter()
            .map(|key| {
                let value = key
                    .as_deref()
                    .and_then(|k| self.get(k.trim()))
                    .map(str::to_string);
                if value.is_some() {
                    stats.matched += 1;
                } else {
                    stats.unmatched += 1;
                }
                value
            })
            .collect();

        let joined = table.with_string_column(output_column, identities)?;
        info!(
            "Joined reference on '{}': {} matched, {} without identity",
            key_column, stats.matched, stats.unmatched
        );
        Ok((joined, stats))
    }
}
