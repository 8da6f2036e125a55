use std::collections::HashMap;

use log::info;

use crate::table::ObsTable;

use super::label::{self, SplitLabel};
use super::SplitError;

/// Minimum support a held-out group needs to keep its rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShrinkThresholds {
    /// Rows an identity needs within its split
    pub min_identity_count: usize,
    /// Rows a covariate value needs within the split
    pub min_covariate_count: usize,
}

impl Default for ShrinkThresholds {
    fn default() -> Self {
        Self {
            min_identity_count: 5,
            min_covariate_count: 20,
        }
    }
}

/// Rows moved back into training
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShrinkStats {
    /// Rows relabelled from test to train
    pub moved_from_test: usize,
    /// Rows relabelled from ood to train
    pub moved_from_ood: usize,
}

impl ShrinkStats {
    /// Total rows relabelled
    pub fn moved(&self) -> usize {
        self.moved_from_test + self.moved_from_ood
    }
}

fn counts_by<'a>(
    labels: &[SplitLabel],
    keys: impl Iterator<Item = Option<&'a str>>,
) -> HashMap<(SplitLabel, &'a str), usize> {
    let mut counts = HashMap::new();
    for (label, key) in labels.iter().zip(keys) {
        if let Some(key) = key {
            *counts.entry((*label, key)).or_insert(0) += 1;
        }
    }
    counts
}

/// Move poorly supported test and ood rows back to train.
///
/// Counts are taken once over the input labels; a held-out row moves when its
/// identity count or its covariate count within that split is below the
/// threshold. The pass is not repeated, so a move never triggers another.
///
/// Rows with a null covariate are not counted toward any covariate value and
/// are judged on their identity count alone.
pub fn shrink_back_labels(
    labels: &[SplitLabel],
    identities: &[String],
    covariates: Option<&[Option<String>]>,
    thresholds: &ShrinkThresholds,
) -> (Vec<SplitLabel>, ShrinkStats) {
    let identity_counts = counts_by(labels, identities.iter().map(|id| Some(id.as_str())));
    let covariate_counts =
        covariates.map(|values| counts_by(labels, values.iter().map(Option::as_deref)));

    let mut stats = ShrinkStats::default();
    let shrunk = labels
        .iter()
        .enumerate()
        .map(|(row, label)| {
            if *label == SplitLabel::Train {
                return SplitLabel::Train;
            }
            let identity_count = identity_counts[&(*label, identities[row].as_str())];
            let covariate_short = match (&covariate_counts, covariates) {
                (Some(counts), Some(values)) => match values[row].as_deref() {
                    Some(value) => counts[&(*label, value)] < thresholds.min_covariate_count,
                    None => false,
                },
                _ => false,
            };
            if identity_count < thresholds.min_identity_count || covariate_short {
                match label {
                    SplitLabel::Test => stats.moved_from_test += 1,
                    _ => stats.moved_from_ood += 1,
                }
                SplitLabel::Train
            } else {
                *label
            }
        })
        .collect();
    (shrunk, stats)
}

/// Apply [`shrink_back_labels`] to a split column of a table
pub fn shrink_back(
    table: &ObsTable,
    split_column: &str,
    identity_column: &str,
    covariate_column: Option<&str>,
    thresholds: &ShrinkThresholds,
) -> Result<(ObsTable, ShrinkStats), SplitError> {
    let labels = label::from_column(&table.string_values(split_column)?)?;
    let identities = super::grouped::non_null(table.string_values(identity_column)?)?;
    let covariates = match covariate_column {
        Some(column) => Some(table.string_values(column)?),
        None => None,
    };

    let (shrunk, stats) =
        shrink_back_labels(&labels, &identities, covariates.as_deref(), thresholds);
    info!(
        "Shrink-back moved {} test and {} ood rows to train",
        stats.moved_from_test, stats.moved_from_ood
    );
    let table = table.with_string_column(split_column, label::to_column(&shrunk))?;
    Ok((table, stats))
}
