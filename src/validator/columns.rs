use crate::table::ObsTable;

use super::{ValidationCheck, ValidationOptions, ValidationReport};

/// Required columns; returns false if content checks cannot run
pub(super) fn check_columns(
    table: &ObsTable,
    options: &ValidationOptions,
    report: &mut ValidationReport,
) -> bool {
    let mut all_present = true;
    for column in [&options.identity_column, &options.split_column] {
        if table.has_column(column) {
            report.add_check(ValidationCheck::ok(format!("Column '{}' present", column)));
        } else {
            report.add_check(ValidationCheck::failed(
                format!("Column '{}' present", column),
                "Required column is missing",
            ));
            all_present = false;
        }
    }

    if !table.has_column(&options.random_split_column) {
        report.add_check(ValidationCheck::warning(
            format!("Column '{}' present", options.random_split_column),
            "No row-level split",
        ));
    }

    all_present
}
