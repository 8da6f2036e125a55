use std::io::Read;

use crate::table::ObsTable;

use super::ReaderError;

/// Parse delimited text into a table of nullable text columns.
///
/// Empty fields become nulls; short records are padded with nulls. Blank
/// header cells (such as a pandas index column) are named `unnamed_<i>`.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<ObsTable, ReaderError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = h.trim();
            if h.is_empty() {
                format!("unnamed_{}", i)
            } else {
                h.to_string()
            }
        })
        .collect();
    if headers.is_empty() {
        return Err(ReaderError::InvalidFormat("missing header row".to_string()));
    }

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in csv_reader.records() {
        let record = record?;
        for (i, column) in columns.iter_mut().enumerate() {
            let value = record
                .get(i)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            column.push(value);
        }
    }

    Ok(ObsTable::from_string_columns(
        headers.into_iter().zip(columns).collect(),
    )?)
}
