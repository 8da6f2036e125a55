use std::collections::{BTreeSet, HashMap};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::table::ObsTable;

use super::label::{self, SplitLabel};
use super::{SplitError, SplitProportions};

/// Randomly partition distinct identities into train/test/ood groups.
///
/// Identities are sorted before shuffling, so the result depends only on the
/// identity set, the proportions and the seed.
pub fn partition_identities(
    distinct: &BTreeSet<String>,
    proportions: &SplitProportions,
    seed: u64,
) -> HashMap<String, SplitLabel> {
    let mut order: Vec<&String> = distinct.iter().collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let (_, n_test, n_ood) = proportions.counts(order.len());
    order
        .into_iter()
        .enumerate()
        .map(|(position, identity)| {
            let label = if position < n_test {
                SplitLabel::Test
            } else if position < n_test + n_ood {
                SplitLabel::Ood
            } else {
                SplitLabel::Train
            };
            (identity.clone(), label)
        })
        .collect()
}

/// Label every row with its identity's partition
pub fn identity_split_labels(
    identities: &[String],
    proportions: &SplitProportions,
    seed: u64,
) -> Result<Vec<SplitLabel>, SplitError> {
    proportions.validate()?;
    let distinct: BTreeSet<String> = identities.iter().cloned().collect();
    let groups = partition_identities(&distinct, proportions, seed);
    Ok(identities.iter().map(|id| groups[id]).collect())
}

/// Add a leakage-safe split column grouped by identity
pub fn assign_identity_split(
    table: &ObsTable,
    identity_column: &str,
    split_column: &str,
    proportions: &SplitProportions,
    seed: u64,
) -> Result<ObsTable, SplitError> {
    let identities = non_null(table.string_values(identity_column)?)?;
    let labels = identity_split_labels(&identities, proportions, seed)?;

    let distinct: BTreeSet<&String> = identities.iter().collect();
    let mut groups: HashMap<SplitLabel, BTreeSet<&String>> = HashMap::new();
    for (identity, label) in identities.iter().zip(&labels) {
        groups.entry(*label).or_default().insert(identity);
    }
    let group_size = |l: SplitLabel| groups.get(&l).map_or(0, |g| g.len());
    info!(
        "Identity split over {} identities: {} train, {} test, {} ood",
        distinct.len(),
        group_size(SplitLabel::Train),
        group_size(SplitLabel::Test),
        group_size(SplitLabel::Ood)
    );
    let held_out_empty = group_size(SplitLabel::Test) == 0 || group_size(SplitLabel::Ood) == 0;
    if !distinct.is_empty() && held_out_empty {
        warn!(
            "Identity split has an empty held-out group ({} identities are too few)",
            distinct.len()
        );
    }

    Ok(table.with_string_column(split_column, label::to_column(&labels))?)
}

pub(super) fn non_null(values: Vec<Option<String>>) -> Result<Vec<String>, SplitError> {
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or(SplitError::NullIdentity { row }))
        .collect()
}
