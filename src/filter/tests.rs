use super::*;

const ASPIRIN: &str = "CC(=O)Oc1ccccc1C(=O)O";
const ETHANOL: &str = "OCC";

fn column(values: &[Option<&str>]) -> Vec<Option<String>> {
    values.iter().map(|v| v.map(str::to_string)).collect()
}

fn identity_table(values: &[Option<&str>]) -> ObsTable {
    ObsTable::from_string_columns(vec![(CANONICAL_SMILES.to_string(), column(values))]).unwrap()
}

fn filter(min_replicates: usize) -> ValidityFilter {
    ValidityFilter::new(FilterConfig {
        min_replicates,
        ..FilterConfig::default()
    })
}

#[test]
fn test_sentinel_and_replicate_scenario() {
    // {A, B, -666, restricted} x 2 with min replicates 2
    let table = identity_table(&[
        Some(ASPIRIN),
        Some(ETHANOL),
        Some("-666"),
        Some("restricted"),
        Some(ASPIRIN),
        Some(ETHANOL),
        Some("-666"),
        Some("restricted"),
    ]);
    let (filtered, stats) = filter(2).apply(&table).unwrap();

    assert_eq!(filtered.num_rows(), 4);
    assert_eq!(stats.removed(), 4);
    assert_eq!(stats.removed_sentinel, 4);
    assert_eq!(stats.removed_replicates, 0);
}

#[test]
fn test_identities_are_canonicalized() {
    let table = identity_table(&[Some("OCC"), Some("CCO"), Some("C(O)C")]);
    let (filtered, _) = filter(3).apply(&table).unwrap();
    assert_eq!(filtered.num_rows(), 3);
    assert_eq!(filtered.value_counts(CANONICAL_SMILES).unwrap()["CCO"], 3);
}

#[test]
fn test_invalid_identities_are_dropped_not_fatal() {
    let table = identity_table(&[
        Some("CCO"),
        Some("C1CC"),
        Some("C1CC"),
        Some("not a smiles"),
        Some("CCO"),
    ]);
    let (filtered, stats) = filter(1).apply(&table).unwrap();
    assert_eq!(filtered.num_rows(), 2);
    assert_eq!(stats.removed_invalid, 3);
    assert_eq!(stats.invalid_identities, 2);
}

#[test]
fn test_nulls_and_numeric_sentinels_are_dropped() {
    let table = identity_table(&[None, Some("-666.0"), Some("NaN"), Some("CCO")]);
    let (filtered, stats) = filter(1).apply(&table).unwrap();
    assert_eq!(filtered.num_rows(), 1);
    assert_eq!(stats.removed_sentinel, 3);
}

#[test]
fn test_replicate_threshold_is_inclusive() {
    let mut values = vec![Some("CCO"); 6];
    values.extend(vec![Some("CCN"); 5]);
    let (filtered, stats) = filter(6).apply(&identity_table(&values)).unwrap();
    assert_eq!(filtered.num_rows(), 6);
    assert_eq!(stats.removed_replicates, 5);
    assert_eq!(filtered.distinct_count(CANONICAL_SMILES).unwrap(), 1);
}

#[test]
fn test_dose_sentinels() {
    let table = ObsTable::from_string_columns(vec![
        (CANONICAL_SMILES.to_string(), column(&[Some("CCO"); 4])),
        (
            "pert_dose".to_string(),
            column(&[Some("10.0"), Some("-666"), None, Some("-666.0")]),
        ),
    ])
    .unwrap();
    let config = FilterConfig {
        dose_column: Some("pert_dose".to_string()),
        min_replicates: 1,
        ..FilterConfig::default()
    };
    let (filtered, stats) = ValidityFilter::new(config).apply(&table).unwrap();
    assert_eq!(stats.removed_dose, 2);
    assert_eq!(filtered.num_rows(), 2);
}

#[test]
fn test_missing_dose_column_is_skipped() {
    let config = FilterConfig {
        dose_column: Some("pert_dose".to_string()),
        min_replicates: 1,
        ..FilterConfig::default()
    };
    let (filtered, stats) = ValidityFilter::new(config)
        .apply(&identity_table(&[Some("CCO")]))
        .unwrap();
    assert_eq!(filtered.num_rows(), 1);
    assert_eq!(stats.removed_dose, 0);
}

#[test]
fn test_controls_get_vehicle_identity() {
    let table = ObsTable::from_string_columns(vec![
        (
            CANONICAL_SMILES.to_string(),
            column(&[Some("restricted"), Some("CCO"), Some("-666")]),
        ),
        (
            "pert_iname".to_string(),
            column(&[Some("DMSO"), Some("ethanol"), Some("dmso")]),
        ),
    ])
    .unwrap();
    let config = FilterConfig {
        min_replicates: 1,
        perturbation_column: Some("pert_iname".to_string()),
        control_values: vec!["DMSO".to_string()],
        ..FilterConfig::default()
    };
    let (filtered, stats) = ValidityFilter::new(config).apply(&table).unwrap();

    assert_eq!(stats.controls_assigned, 2);
    assert_eq!(filtered.num_rows(), 3);
    assert_eq!(
        filtered.bool_values("control").unwrap(),
        vec![true, false, true]
    );
    let dmso = crate::smiles::canonicalize(DEFAULT_CONTROL_SMILES).unwrap();
    assert_eq!(filtered.value_counts(CANONICAL_SMILES).unwrap()[&dmso], 2);
}

#[test]
fn test_join_then_filter() {
    let reference = ReferenceTable::from_pairs(vec![
        ("BRD-1", Some(ASPIRIN.to_string())),
        ("BRD-2", Some("restricted".to_string())),
    ]);
    let obs = ObsTable::from_string_columns(vec![(
        "pert_id".to_string(),
        column(&[Some("BRD-1"), Some("BRD-2"), Some("BRD-3"), Some("BRD-1")]),
    )])
    .unwrap();

    let (joined, join_stats) =
        join_reference(&obs, &reference, "pert_id", CANONICAL_SMILES).unwrap();
    assert_eq!(join_stats.matched, 3);

    let (filtered, stats) = filter(2).apply(&joined).unwrap();
    assert_eq!(filtered.num_rows(), 2);
    assert_eq!(stats.removed_sentinel, 2);
}

#[test]
fn test_input_table_is_unchanged() {
    let table = identity_table(&[Some("-666"), Some("OCC")]);
    let _ = filter(1).apply(&table).unwrap();
    assert_eq!(table.num_rows(), 2);
    assert_eq!(
        table.string_values(CANONICAL_SMILES).unwrap(),
        column(&[Some("-666"), Some("OCC")])
    );
}
