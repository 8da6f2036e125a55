use std::fmt;

use crate::table::ObsTable;

use super::label::{self, SplitLabel};
use super::SplitError;

/// Row counts per partition of one split column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSummary {
    /// Split column name
    pub column: String,
    /// Rows labelled train
    pub train: usize,
    /// Rows labelled test
    pub test: usize,
    /// Rows labelled ood
    pub ood: usize,
}

impl SplitSummary {
    /// Count labels of an in-memory label vector
    pub fn from_labels(column: &str, labels: &[SplitLabel]) -> Self {
        let mut summary = Self {
            column: column.to_string(),
            ..Self::default()
        };
        for label in labels {
            match label {
                SplitLabel::Train => summary.train += 1,
                SplitLabel::Test => summary.test += 1,
                SplitLabel::Ood => summary.ood += 1,
            }
        }
        summary
    }

    /// Count labels of a split column; fails on nulls or unknown labels
    pub fn from_table(table: &ObsTable, column: &str) -> Result<Self, SplitError> {
        let labels = label::from_column(&table.string_values(column)?)?;
        Ok(Self::from_labels(column, &labels))
    }

    /// Rows in one partition
    pub fn count(&self, label: SplitLabel) -> usize {
        match label {
            SplitLabel::Train => self.train,
            SplitLabel::Test => self.test,
            SplitLabel::Ood => self.ood,
        }
    }

    /// Rows across all partitions
    pub fn total(&self) -> usize {
        self.train + self.test + self.ood
    }
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total().max(1) as f64;
        write!(f, "{}:", self.column)?;
        for label in SplitLabel::ALL {
            let count = self.count(label);
            write!(
                f,
                " {} {} ({:.1}%)",
                label,
                count,
                100.0 * count as f64 / total
            )?;
        }
        Ok(())
    }
}
