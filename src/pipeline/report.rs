use std::fmt;
use std::path::PathBuf;

use crate::filter::FilterStats;
use crate::reference::JoinStats;
use crate::split::{ShrinkStats, SplitSummary};
use crate::writer::WriterStats;

/// Outcome of preparing one dataset
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Dataset name
    pub name: String,
    /// Written file
    pub output: PathBuf,
    /// Observations read from the input
    pub rows_read: usize,
    /// Reference join counts, when a reference was used
    pub join: Option<JoinStats>,
    /// Validity filter counts
    pub filter: FilterStats,
    /// Distinct identities in the prepared table
    pub distinct_identities: usize,
    /// Shrink-back counts
    pub shrink: ShrinkStats,
    /// Identity split distribution after shrink-back
    pub identity_split: SplitSummary,
    /// Random split distribution
    pub random_split: SplitSummary,
    /// Output file statistics
    pub writer: WriterStats,
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset '{}' -> {}", self.name, self.output.display())?;
        writeln!(f, "  Rows read:        {}", self.rows_read)?;
        if let Some(join) = &self.join {
            writeln!(
                f,
                "  Reference join:   {} matched, {} unmatched",
                join.matched, join.unmatched
            )?;
        }
        writeln!(f, "  Filter:           {}", self.filter)?;
        writeln!(f, "  Identities:       {}", self.distinct_identities)?;
        writeln!(
            f,
            "  Shrink-back:      {} test, {} ood rows moved to train",
            self.shrink.moved_from_test, self.shrink.moved_from_ood
        )?;
        writeln!(f, "  {}", self.identity_split)?;
        writeln!(f, "  {}", self.random_split)?;
        write!(f, "  {}", self.writer)
    }
}

/// A dataset that failed inside a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFailure {
    /// Dataset name
    pub name: String,
    /// Error message
    pub error: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Datasets prepared successfully, in job order
    pub completed: Vec<PipelineReport>,
    /// Datasets that failed, in job order
    pub failed: Vec<DatasetFailure>,
}

impl BatchReport {
    /// Whether every dataset succeeded
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Batch: {} succeeded, {} failed",
            self.completed.len(),
            self.failed.len()
        )?;
        for report in &self.completed {
            writeln!(f, "  ok     {} ({} rows)", report.name, report.writer.rows_written)?;
        }
        for failure in &self.failed {
            writeln!(f, "  failed {}: {}", failure.name, failure.error)?;
        }
        Ok(())
    }
}
