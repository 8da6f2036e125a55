use log::{info, warn};

use crate::filter::{add_condition_columns, join_reference, ValidityFilter};
use crate::metadata::{PrepMetadata, ProcessingHistory, SourceFileInfo};
use crate::reader::read_obs_table;
use crate::reference::ReferenceTable;
use crate::split::{
    assign_identity_split, assign_random_split, shrink_back, SplitProportions, SplitSummary,
};
use crate::writer::write_prepared_table;

use super::{PipelineConfig, PipelineError, PipelineReport};

fn proportions_param(p: &SplitProportions) -> String {
    format!("{}/{}/{}", p.train, p.test, p.ood)
}

/// Prepare one dataset: read, join, filter, split, label and write.
///
/// The output file is written only if every stage succeeds.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    info!("Preparing dataset '{}'", config.name);
    let identity = config.filter.identity_column.as_str();
    let mut history = ProcessingHistory::new();
    let mut metadata = PrepMetadata::for_dataset(&config.name);
    metadata
        .source_files
        .push(SourceFileInfo::from_path(&config.input, "observations"));

    let table = read_obs_table(&config.input)?;
    let rows_read = table.num_rows();

    let (table, join) = match &config.reference {
        Some(source) => {
            if !table.has_column(&config.key_column) {
                return Err(PipelineError::MissingColumn(config.key_column.clone()));
            }
            let reference = ReferenceTable::from_delimited_file(&source.path, &source.options)?;
            metadata
                .source_files
                .push(SourceFileInfo::from_path(&source.path, "reference"));
            let (joined, stats) =
                join_reference(&table, &reference, &config.key_column, identity)?;
            history.add_step(
                history
                    .next_step("reference join")
                    .with_parameter("key_column", &config.key_column)
                    .with_parameter("reference_value", &source.options.value_column)
                    .with_parameter("matched", stats.matched)
                    .with_parameter("unmatched", stats.unmatched)
                    .with_parameter("duplicate_keys", reference.duplicate_keys()),
            );
            (joined, Some(stats))
        }
        None => {
            if !table.has_column(identity) {
                return Err(PipelineError::MissingColumn(identity.to_string()));
            }
            (table, None)
        }
    };

    let (table, filter_stats) = ValidityFilter::new(config.filter.clone()).apply(&table)?;
    history.add_step(
        history
            .next_step("validity filter")
            .with_parameter("min_replicates", config.filter.min_replicates)
            .with_parameter("rows_in", filter_stats.rows_in)
            .with_parameter("controls_assigned", filter_stats.controls_assigned)
            .with_parameter("removed_sentinel", filter_stats.removed_sentinel)
            .with_parameter("removed_invalid", filter_stats.removed_invalid)
            .with_parameter("removed_dose", filter_stats.removed_dose)
            .with_parameter("removed_replicates", filter_stats.removed_replicates)
            .with_parameter("rows_out", filter_stats.rows_out),
    );
    if table.is_empty() {
        return Err(PipelineError::EmptyAfterFilter(config.name.clone()));
    }

    let split = &config.split;
    let covariate = match config.covariate_column.as_deref() {
        Some(column) if table.has_column(column) => Some(column),
        Some(column) => {
            warn!("Covariate column '{}' not found; ignored", column);
            None
        }
        None => None,
    };

    let table = assign_identity_split(
        &table,
        identity,
        &split.identity_column,
        &split.identity_proportions,
        split.seed,
    )?;
    let (table, shrink) = shrink_back(
        &table,
        &split.identity_column,
        identity,
        covariate,
        &split.shrink,
    )?;
    history.add_step(
        history
            .next_step("identity split")
            .with_parameter("column", &split.identity_column)
            .with_parameter("seed", split.seed)
            .with_parameter("proportions", proportions_param(&split.identity_proportions))
            .with_parameter("min_identity_count", split.shrink.min_identity_count)
            .with_parameter("min_covariate_count", split.shrink.min_covariate_count)
            .with_parameter("covariate_column", covariate.unwrap_or("none"))
            .with_parameter("moved_from_test", shrink.moved_from_test)
            .with_parameter("moved_from_ood", shrink.moved_from_ood),
    );

    let table = assign_random_split(
        &table,
        &split.random_column,
        &split.random_proportions,
        split.seed,
    )?;
    history.add_step(
        history
            .next_step("random split")
            .with_parameter("column", &split.random_column)
            .with_parameter("seed", split.seed)
            .with_parameter("proportions", proportions_param(&split.random_proportions)),
    );

    let table = match config.filter.dose_column.as_deref() {
        Some(dose) if table.has_column(dose) => {
            add_condition_columns(&table, identity, dose, covariate)?
        }
        _ => table,
    };

    let identity_split = SplitSummary::from_table(&table, &split.identity_column)?;
    let random_split = SplitSummary::from_table(&table, &split.random_column)?;
    let distinct_identities = table.distinct_count(identity)?;
    info!("{}", identity_split);
    info!("{}", random_split);

    metadata.processing_history = Some(history);
    let mut writer_config = config.writer.clone().with_dictionary_column(identity);
    if let Some(column) = covariate {
        writer_config = writer_config.with_dictionary_column(column);
    }
    let writer = write_prepared_table(&config.output, &table, &metadata, writer_config)?;

    Ok(PipelineReport {
        name: config.name.clone(),
        output: config.output.clone(),
        rows_read,
        join,
        filter: filter_stats,
        distinct_identities,
        shrink,
        identity_split,
        random_split,
        writer,
    })
}
