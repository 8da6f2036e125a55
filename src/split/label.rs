use std::fmt;
use std::str::FromStr;

use crate::schema::{OOD, TEST, TRAIN};

use super::SplitError;

/// Partition a row is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SplitLabel {
    /// Training data
    Train,
    /// Held-out test data
    Test,
    /// Out-of-distribution data
    Ood,
}

impl SplitLabel {
    /// All labels in partition order
    pub const ALL: [SplitLabel; 3] = [SplitLabel::Train, SplitLabel::Test, SplitLabel::Ood];

    /// Label as written to split columns
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitLabel::Train => TRAIN,
            SplitLabel::Test => TEST,
            SplitLabel::Ood => OOD,
        }
    }
}

impl fmt::Display for SplitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitLabel {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            TRAIN => Ok(SplitLabel::Train),
            TEST => Ok(SplitLabel::Test),
            OOD => Ok(SplitLabel::Ood),
            other => Err(SplitError::UnknownLabel(other.to_string())),
        }
    }
}

/// Labels as a nullable text column
pub(crate) fn to_column(labels: &[SplitLabel]) -> Vec<Option<String>> {
    labels.iter().map(|l| Some(l.as_str().to_string())).collect()
}

/// Parse a split column; nulls and unknown values are errors
pub(crate) fn from_column(values: &[Option<String>]) -> Result<Vec<SplitLabel>, SplitError> {
    values
        .iter()
        .map(|v| match v {
            Some(s) => s.parse(),
            None => Err(SplitError::UnknownLabel(String::new())),
        })
        .collect()
}
