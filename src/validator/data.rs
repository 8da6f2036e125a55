use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::smiles;
use crate::split::{SplitLabel, SplitSummary};
use crate::table::ObsTable;

use super::{ValidationCheck, ValidationOptions, ValidationReport};

/// Examples listed in a failure message
const MAX_EXAMPLES: usize = 3;

fn examples<'a, I: IntoIterator<Item = &'a String>>(values: I) -> String {
    values
        .into_iter()
        .take(MAX_EXAMPLES)
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Identity column: non-null, no markers, valid and canonical SMILES
pub(super) fn check_identities(
    table: &ObsTable,
    options: &ValidationOptions,
    report: &mut ValidationReport,
) {
    let values = match table.string_values(&options.identity_column) {
        Ok(values) => values,
        Err(e) => {
            report.add_check(ValidationCheck::failed("Identity values", e.to_string()));
            return;
        }
    };

    let nulls = values.iter().filter(|v| v.is_none()).count();
    if nulls == 0 {
        report.add_check(ValidationCheck::ok("Identities non-null"));
    } else {
        report.add_check(ValidationCheck::failed(
            "Identities non-null",
            format!("{} rows have no identity", nulls),
        ));
    }

    let distinct: BTreeSet<&String> = values.iter().flatten().collect();

    let markers: Vec<&String> = distinct
        .iter()
        .copied()
        .filter(|v| options.sentinels.contains(v))
        .collect();
    if markers.is_empty() {
        report.add_check(ValidationCheck::ok("No placeholder identities"));
    } else {
        report.add_check(ValidationCheck::failed(
            "No placeholder identities",
            format!("Found {}", examples(markers)),
        ));
    }

    let mut invalid = Vec::new();
    let mut not_canonical = Vec::new();
    for value in distinct.iter().copied().filter(|v| !options.sentinels.contains(v)) {
        match smiles::canonicalize(value) {
            Ok(canonical) if canonical == *value => {}
            Ok(_) => not_canonical.push(value),
            Err(_) => invalid.push(value),
        }
    }

    if invalid.is_empty() {
        report.add_check(ValidationCheck::ok(format!(
            "Identities parse as SMILES ({} distinct)",
            distinct.len()
        )));
    } else {
        report.add_check(ValidationCheck::failed(
            "Identities parse as SMILES",
            format!("{} invalid, e.g. {}", invalid.len(), examples(invalid.iter().copied())),
        ));
    }

    if not_canonical.is_empty() {
        report.add_check(ValidationCheck::ok("Identities canonical"));
    } else {
        report.add_check(ValidationCheck::warning(
            "Identities canonical",
            format!(
                "{} not in canonical form, e.g. {}",
                not_canonical.len(),
                examples(not_canonical.iter().copied())
            ),
        ));
    }
}

/// Labels are known and cover every row
pub(super) fn check_split_column(table: &ObsTable, column: &str, report: &mut ValidationReport) {
    let name = format!("Split labels in '{}'", column);
    let summary = match SplitSummary::from_table(table, column) {
        Ok(summary) => summary,
        Err(e) => {
            report.add_check(ValidationCheck::failed(name, e.to_string()));
            return;
        }
    };

    if summary.total() != table.num_rows() {
        report.add_check(ValidationCheck::failed(
            name,
            format!(
                "Partitions hold {} rows, table has {}",
                summary.total(),
                table.num_rows()
            ),
        ));
        return;
    }

    let empty: Vec<&str> = [SplitLabel::Test, SplitLabel::Ood]
        .into_iter()
        .filter(|l| summary.count(*l) == 0)
        .map(|l| l.as_str())
        .collect();
    if empty.is_empty() || table.is_empty() {
        report.add_check(ValidationCheck::ok(format!(
            "{} (train {}, test {}, ood {})",
            name, summary.train, summary.test, summary.ood
        )));
    } else {
        report.add_check(ValidationCheck::warning(
            name,
            format!("Empty partitions: {}", empty.join(", ")),
        ));
    }
}

/// Each identity falls in exactly one partition of the identity split
pub(super) fn check_leakage(
    table: &ObsTable,
    options: &ValidationOptions,
    report: &mut ValidationReport,
) {
    let name = format!("No identity leakage in '{}'", options.split_column);
    let (identities, labels) = match (
        table.string_values(&options.identity_column),
        table.string_values(&options.split_column),
    ) {
        (Ok(identities), Ok(labels)) => (identities, labels),
        (Err(e), _) | (_, Err(e)) => {
            report.add_check(ValidationCheck::failed(name, e.to_string()));
            return;
        }
    };

    let mut seen: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for (identity, label) in identities.iter().zip(&labels) {
        if let (Some(identity), Some(label)) = (identity, label) {
            seen.entry(identity.as_str()).or_default().insert(label.as_str());
        }
    }

    let mut leaked: Vec<String> = seen
        .into_iter()
        .filter(|(_, labels)| labels.len() > 1)
        .map(|(identity, _)| identity.to_string())
        .collect();
    leaked.sort();

    if leaked.is_empty() {
        report.add_check(ValidationCheck::ok(name));
    } else {
        report.add_check(ValidationCheck::failed(
            name,
            format!(
                "{} identities span several partitions, e.g. {}",
                leaked.len(),
                examples(&leaked)
            ),
        ));
    }
}

/// Every identity has at least `min` rows
pub(super) fn check_replicates(
    table: &ObsTable,
    identity_column: &str,
    min: usize,
    report: &mut ValidationReport,
) {
    let name = format!("At least {} replicates per identity", min);
    let counts: BTreeMap<String, usize> = match table.value_counts(identity_column) {
        Ok(counts) => counts,
        Err(e) => {
            report.add_check(ValidationCheck::failed(name, e.to_string()));
            return;
        }
    };

    let sparse: Vec<&String> = counts
        .iter()
        .filter(|(_, count)| **count < min)
        .map(|(identity, _)| identity)
        .collect();
    if sparse.is_empty() {
        report.add_check(ValidationCheck::ok(name));
    } else {
        report.add_check(ValidationCheck::failed(
            name,
            format!("{} identities below minimum, e.g. {}", sparse.len(), examples(sparse)),
        ));
    }
}
