//! Shared fixtures for integration tests: a LINCS-like observation table and
//! its key-to-SMILES reference.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const VALID_COMPOUNDS: usize = 20;
pub const REPLICATES: usize = 8;
pub const CELL_LINES: [&str; 2] = ["A549", "MCF7"];
pub const DOSES: [&str; 4] = ["0.1", "1.0", "10.0", "100.0"];

/// SMILES of the i-th valid compound; the first is a non-canonical spelling
pub fn compound_smiles(i: usize) -> String {
    if i == 0 {
        "OCC".to_string()
    } else {
        "C".repeat(i + 1)
    }
}

fn push_rows(out: &mut String, pert_id: &str, pert_iname: &str, count: usize) {
    for r in 0..count {
        out.push_str(&format!(
            "{},{},{},{}\n",
            pert_id,
            pert_iname,
            DOSES[r % DOSES.len()],
            CELL_LINES[r % CELL_LINES.len()]
        ));
    }
}

/// Write `obs.csv` and `pert_info.txt` into `dir`; returns their paths.
///
/// Rows: 20 valid compounds x 8, four unusable compounds x 8 (restricted,
/// `-666`, unparsable, missing from the reference), one compound with only
/// 3 rows, and 8 DMSO control rows. 203 rows in total.
pub fn write_lincs_fixture(dir: &Path) -> (PathBuf, PathBuf) {
    let mut obs = String::from("pert_id,pert_iname,pert_dose,cell_id\n");
    let mut reference = String::from("pert_id\tcanonical_smiles\n");

    for i in 0..VALID_COMPOUNDS {
        let id = format!("BRD-{:03}", i);
        push_rows(&mut obs, &id, &format!("compound_{}", i), REPLICATES);
        reference.push_str(&format!("{}\t{}\n", id, compound_smiles(i)));
    }
    for (id, smiles) in [("BRD-R", "restricted"), ("BRD-M", "-666"), ("BRD-X", "C1CC")] {
        push_rows(&mut obs, id, id, REPLICATES);
        reference.push_str(&format!("{}\t{}\n", id, smiles));
    }
    push_rows(&mut obs, "BRD-U", "unmapped", REPLICATES);
    push_rows(&mut obs, "BRD-S", "sparse", 3);
    reference.push_str("BRD-S\tCCCl\n");
    push_rows(&mut obs, "DMSO_ctl", "DMSO", REPLICATES);

    let obs_path = dir.join("obs.csv");
    let reference_path = dir.join("pert_info.txt");
    fs::write(&obs_path, obs).unwrap();
    fs::write(&reference_path, reference).unwrap();
    (obs_path, reference_path)
}
