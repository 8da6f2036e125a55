use std::io::Cursor;

use super::*;

const PERT_INFO: &str = "pert_id\tpert_iname\tcanonical_smiles
BRD-A001\taspirin\tCC(=O)Oc1ccccc1C(=O)O
BRD-A002\tsecret\trestricted
BRD-A003\tblank\t
BRD-A001\taspirin-dup\tCCO
";

fn reference() -> ReferenceTable {
    ReferenceTable::from_reader(Cursor::new(PERT_INFO), "pert_id", "canonical_smiles", b'\t')
        .unwrap()
}

#[test]
fn test_reference_parsing() {
    let table = reference();
    assert_eq!(table.len(), 3);
    assert_eq!(table.get("BRD-A001"), Some("CC(=O)Oc1ccccc1C(=O)O"));
    assert_eq!(table.get("BRD-A002"), Some("restricted"));
    assert_eq!(table.get("BRD-A003"), None);
    assert!(table.contains_key("BRD-A003"));
}

#[test]
fn test_first_duplicate_wins() {
    let table = reference();
    assert_eq!(table.duplicate_keys(), 1);
    assert_eq!(table.get("BRD-A001"), Some("CC(=O)Oc1ccccc1C(=O)O"));
}

#[test]
fn test_missing_column() {
    let err = ReferenceTable::from_reader(Cursor::new(PERT_INFO), "pert_id", "smiles", b'\t')
        .unwrap_err();
    assert!(matches!(err, ReferenceError::MissingColumn(ref c) if c == "smiles"));
}

#[test]
fn test_headers_are_case_insensitive() {
    let csv = "PERT_ID,Canonical_SMILES\nx,CCO\n";
    let table =
        ReferenceTable::from_reader(Cursor::new(csv), "pert_id", "canonical_smiles", b',').unwrap();
    assert_eq!(table.get("x"), Some("CCO"));
}

#[test]
fn test_left_join_preserves_rows() {
    let obs = ObsTable::from_string_columns(vec![(
        "pert_id".to_string(),
        vec![
            Some("BRD-A001".to_string()),
            Some("BRD-UNKNOWN".to_string()),
            None,
            Some("BRD-A003".to_string()),
            Some("BRD-A001".to_string()),
        ],
    )])
    .unwrap();

    let (joined, stats) = reference().join(&obs, "pert_id", "canonical_smiles").unwrap();
    assert_eq!(joined.num_rows(), 5);
    assert_eq!(stats, JoinStats { matched: 2, unmatched: 3 });

    let smiles = joined.string_values("canonical_smiles").unwrap();
    assert_eq!(smiles[0].as_deref(), Some("CC(=O)Oc1ccccc1C(=O)O"));
    assert_eq!(smiles[1], None);
    assert_eq!(smiles[2], None);
    assert_eq!(smiles[3], None);
    assert_eq!(smiles[4], smiles[0]);
}

#[test]
fn test_from_pairs() {
    let table = ReferenceTable::from_pairs(vec![
        ("a", Some("C".to_string())),
        ("a", Some("CC".to_string())),
        ("b", None),
    ]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("a"), Some("C"));
    assert_eq!(table.duplicate_keys(), 1);
}
