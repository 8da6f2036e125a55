use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::table::ObsTable;

use super::label::{self, SplitLabel};
use super::{SplitError, SplitProportions};

/// Label `n` rows by a seeded random permutation.
///
/// Rows are split individually, so the same identity may land in several
/// partitions.
pub fn random_split_labels(
    n: usize,
    proportions: &SplitProportions,
    seed: u64,
) -> Vec<SplitLabel> {
    let mut rows: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);

    let (_, n_test, n_ood) = proportions.counts(n);
    let mut labels = vec![SplitLabel::Train; n];
    for (position, row) in rows.into_iter().enumerate() {
        if position < n_test {
            labels[row] = SplitLabel::Test;
        } else if position < n_test + n_ood {
            labels[row] = SplitLabel::Ood;
        }
    }
    labels
}

/// Add a per-row random split column
pub fn assign_random_split(
    table: &ObsTable,
    split_column: &str,
    proportions: &SplitProportions,
    seed: u64,
) -> Result<ObsTable, SplitError> {
    proportions.validate()?;
    let labels = random_split_labels(table.num_rows(), proportions, seed);
    Ok(table.with_string_column(split_column, label::to_column(&labels))?)
}
