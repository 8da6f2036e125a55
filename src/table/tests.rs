use std::sync::Arc;

use arrow::array::{DictionaryArray, Float64Array, Int32Array};
use arrow::datatypes::Int32Type;

use super::*;

fn text(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|v| Some(v.to_string())).collect()
}

fn sample() -> ObsTable {
    ObsTable::from_string_columns(vec![
        ("pert_id".to_string(), text(&["a", "b", "a", "c"])),
        ("cell_id".to_string(), text(&["A549", "MCF7", "A549", "PC3"])),
    ])
    .unwrap()
}

#[test]
fn test_from_string_columns() {
    let table = sample();
    assert_eq!(table.num_rows(), 4);
    assert_eq!(table.column_names(), vec!["pert_id", "cell_id"]);
    assert!(table.has_column("cell_id"));
    assert!(!table.has_column("dose"));
}

#[test]
fn test_from_string_columns_length_mismatch() {
    let err = ObsTable::from_string_columns(vec![
        ("a".to_string(), text(&["1", "2"])),
        ("b".to_string(), text(&["1"])),
    ])
    .unwrap_err();
    assert!(matches!(err, TableError::LengthMismatch { expected: 2, actual: 1, .. }));
    assert!(matches!(
        ObsTable::from_string_columns(Vec::new()).unwrap_err(),
        TableError::NoColumns
    ));
}

#[test]
fn test_filter_returns_new_table() {
    let table = sample();
    let filtered = table.filter(&[true, false, true, false]).unwrap();
    assert_eq!(filtered.num_rows(), 2);
    assert_eq!(table.num_rows(), 4);
    assert_eq!(
        filtered.string_values("cell_id").unwrap(),
        text(&["A549", "A549"])
    );
}

#[test]
fn test_with_string_column_adds_and_replaces() {
    let table = sample();
    let added = table
        .with_string_column("split_ood", text(&["train", "test", "train", "ood"]))
        .unwrap();
    assert_eq!(added.num_columns(), 3);
    assert!(!table.has_column("split_ood"));

    let replaced = added
        .with_string_column("split_ood", text(&["ood", "ood", "ood", "ood"]))
        .unwrap();
    assert_eq!(replaced.num_columns(), 3);
    assert_eq!(replaced.value_counts("split_ood").unwrap()["ood"], 4);

    assert!(table.with_string_column("x", text(&["1"])).is_err());
}

#[test]
fn test_value_counts_skip_nulls() {
    let table = ObsTable::from_string_columns(vec![(
        "smiles".to_string(),
        vec![Some("CCO".to_string()), None, Some("CCO".to_string())],
    )])
    .unwrap();
    let counts = table.value_counts("smiles").unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts["CCO"], 2);
    assert_eq!(table.distinct_count("smiles").unwrap(), 1);
}

#[test]
fn test_string_values_cast_numeric_and_dictionary() {
    let dose: ArrayRef = Arc::new(Float64Array::from(vec![Some(10.0), None]));
    let count: ArrayRef = Arc::new(Int32Array::from(vec![1, 2]));
    let cells: DictionaryArray<Int32Type> = vec!["A549", "MCF7"].into_iter().collect();
    let schema = Schema::new(vec![
        Field::new("dose", DataType::Float64, true),
        Field::new("count", DataType::Int32, false),
        Field::new(
            "cell_id",
            DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8)),
            false,
        ),
    ]);
    let batch =
        RecordBatch::try_new(Arc::new(schema), vec![dose, count, Arc::new(cells)]).unwrap();
    let table = ObsTable::new(batch);

    let dose = table.string_values("dose").unwrap();
    assert!(dose[0].as_deref().unwrap().starts_with("10"));
    assert_eq!(dose[1], None);
    assert_eq!(table.string_values("count").unwrap(), text(&["1", "2"]));
    assert_eq!(table.string_values("cell_id").unwrap(), text(&["A549", "MCF7"]));
}

#[test]
fn test_bool_column_roundtrip() {
    let table = sample()
        .with_bool_column("control", vec![false, true, false, true])
        .unwrap();
    assert_eq!(
        table.bool_values("control").unwrap(),
        vec![false, true, false, true]
    );
    assert!(matches!(
        table.bool_values("missing").unwrap_err(),
        TableError::ColumnNotFound(_)
    ));
}
