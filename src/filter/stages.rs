//! The individual filter stages. Each takes a table and returns a new one
//! together with the number of rows it affected.

use std::collections::{BTreeSet, HashMap};

use log::{debug, info};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::schema::CONTROL;
use crate::smiles::{self, SmilesError};
use crate::table::{ObsTable, TableError};

use super::SentinelSet;

/// Give control rows the vehicle identity and append the `control` flag
pub(crate) fn assign_controls(
    table: &ObsTable,
    perturbation_column: &str,
    identity_column: &str,
    control_values: &[String],
    control_smiles: &str,
) -> Result<(ObsTable, usize), TableError> {
    let perturbations = table.string_values(perturbation_column)?;
    let mut identities = if table.has_column(identity_column) {
        table.string_values(identity_column)?
    } else {
        vec![None; table.num_rows()]
    };

    let mut flags = Vec::with_capacity(perturbations.len());
    for (row, perturbation) in perturbations.iter().enumerate() {
        let is_control = perturbation.as_deref().is_some_and(|p| {
            control_values
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(p.trim()))
        });
        if is_control {
            identities[row] = Some(control_smiles.to_string());
        }
        flags.push(is_control);
    }

    let assigned = flags.iter().filter(|f| **f).count();
    let table = table
        .with_string_column(identity_column, identities)?
        .with_bool_column(CONTROL, flags)?;
    Ok((table, assigned))
}

/// Drop rows whose identity is null or a sentinel marker
pub(crate) fn drop_sentinel_identities(
    table: &ObsTable,
    identity_column: &str,
    sentinels: &SentinelSet,
) -> Result<(ObsTable, usize), TableError> {
    let keep: Vec<bool> = table
        .string_values(identity_column)?
        .iter()
        .map(|v| v.as_deref().is_some_and(|s| !sentinels.contains(s)))
        .collect();
    retain(table, &keep)
}

fn canonicalize_all(distinct: &[String]) -> Vec<Result<String, SmilesError>> {
    #[cfg(feature = "parallel")]
    {
        distinct.par_iter().map(|s| smiles::canonicalize(s)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        distinct.iter().map(|s| smiles::canonicalize(s)).collect()
    }
}

/// Replace identities by their canonical SMILES, dropping rows that fail to parse.
///
/// Each distinct string is parsed once. Returns the new table, the number of
/// rows removed and the number of distinct invalid strings.
pub(crate) fn canonicalize_identities(
    table: &ObsTable,
    identity_column: &str,
) -> Result<(ObsTable, usize, usize), TableError> {
    let identities = table.string_values(identity_column)?;
    let distinct: Vec<String> = identities
        .iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut canonical: HashMap<&str, String> = HashMap::with_capacity(distinct.len());
    let mut invalid = 0;
    for (raw, result) in distinct.iter().zip(canonicalize_all(&distinct)) {
        match result {
            Ok(form) => {
                canonical.insert(raw.as_str(), form);
            }
            Err(err) => {
                debug!("Dropping invalid identity {:?}: {}", raw, err);
                invalid += 1;
            }
        }
    }

    let keep: Vec<bool> = identities
        .iter()
        .map(|v| v.as_deref().is_some_and(|s| canonical.contains_key(s)))
        .collect();
    let replaced: Vec<Option<String>> = identities
        .iter()
        .map(|v| v.as_deref().and_then(|s| canonical.get(s).cloned()))
        .collect();

    let table = table.with_string_column(identity_column, replaced)?;
    let (table, removed) = retain(&table, &keep)?;
    if invalid > 0 {
        info!(
            "Removed {} rows with {} distinct invalid identities",
            removed, invalid
        );
    }
    Ok((table, removed, invalid))
}

/// Drop rows whose dose is a sentinel marker; null doses are kept
pub(crate) fn drop_sentinel_doses(
    table: &ObsTable,
    dose_column: &str,
    sentinels: &SentinelSet,
) -> Result<(ObsTable, usize), TableError> {
    let keep: Vec<bool> = table
        .string_values(dose_column)?
        .iter()
        .map(|v| !v.as_deref().is_some_and(|s| sentinels.contains(s)))
        .collect();
    retain(table, &keep)
}

/// Drop every row of identities seen fewer than `min_replicates` times
pub(crate) fn filter_min_replicates(
    table: &ObsTable,
    identity_column: &str,
    min_replicates: usize,
) -> Result<(ObsTable, usize), TableError> {
    let counts = table.value_counts(identity_column)?;
    let keep: Vec<bool> = table
        .string_values(identity_column)?
        .iter()
        .map(|v| {
            v.as_ref()
                .and_then(|s| counts.get(s))
                .is_some_and(|count| *count >= min_replicates)
        })
        .collect();
    retain(table, &keep)
}

fn retain(table: &ObsTable, keep: &[bool]) -> Result<(ObsTable, usize), TableError> {
    let removed = keep.iter().filter(|k| !**k).count();
    if removed == 0 {
        return Ok((table.clone(), 0));
    }
    Ok((table.filter(keep)?, removed))
}
