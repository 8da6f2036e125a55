use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use log::{error, info};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{
    run_pipeline, BatchReport, DatasetFailure, PipelineConfig, PipelineError, PipelineReport,
};

/// Key under which two spellings of one output path compare equal.
///
/// Relative paths are taken from the working directory, `.` and `..` are
/// resolved lexically, and an existing parent directory is canonicalized
/// so symlinked spellings also match.
fn output_key(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normal = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normal.pop();
            }
            other => normal.push(other.as_os_str()),
        }
    }

    match (normal.parent(), normal.file_name()) {
        (Some(parent), Some(name)) => match parent.canonicalize() {
            Ok(parent) => parent.join(name),
            Err(_) => normal,
        },
        _ => normal,
    }
}

fn run_job(
    config: &PipelineConfig,
    duplicate_output: bool,
) -> Result<PipelineReport, PipelineError> {
    if duplicate_output {
        return Err(PipelineError::DuplicateOutput(
            config.output.display().to_string(),
        ));
    }
    run_pipeline(config)
}

/// Prepare several datasets independently.
///
/// A failing dataset is logged and recorded; the remaining datasets still
/// run. With the `parallel` feature the jobs run concurrently. When two
/// jobs name the same output (after resolving `.`, `..` and symlinked
/// directories), every job after the first fails without running.
pub fn run_batch(jobs: &[PipelineConfig]) -> BatchReport {
    let mut outputs = HashSet::new();
    let duplicates: Vec<bool> = jobs
        .iter()
        .map(|job| !outputs.insert(output_key(&job.output)))
        .collect();

    #[cfg(feature = "parallel")]
    let results: Vec<Result<PipelineReport, PipelineError>> = jobs
        .par_iter()
        .zip(duplicates.par_iter())
        .map(|(job, duplicate)| run_job(job, *duplicate))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<PipelineReport, PipelineError>> = jobs
        .iter()
        .zip(&duplicates)
        .map(|(job, duplicate)| run_job(job, *duplicate))
        .collect();

    let mut report = BatchReport::default();
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(done) => {
                info!("Dataset '{}' prepared: {} rows", job.name, done.writer.rows_written);
                report.completed.push(done);
            }
            Err(e) => {
                error!("Dataset '{}' failed: {}", job.name, e);
                report.failed.push(DatasetFailure {
                    name: job.name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    report
}
