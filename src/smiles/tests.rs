use super::*;

const CAFFEINE_KEKULE: &str = "CN1C=NC2=C1C(=O)N(C(=O)N2C)C";
const CAFFEINE_AROMATIC: &str = "Cn1c(=O)c2c(ncn2C)n(C)c1=O";
const ASPIRIN: &str = "CC(=O)Oc1ccccc1C(=O)O";

#[test]
fn test_canonical_atom_order() {
    assert_eq!(canonicalize("OCC").unwrap(), "CCO");
    assert_eq!(canonicalize("CCO").unwrap(), "CCO");
    assert_eq!(canonicalize("OC(C)=O").unwrap(), "CC(=O)O");
}

#[test]
fn test_kekule_and_aromatic_forms_agree() {
    assert_eq!(canonicalize("C1=CC=CC=C1").unwrap(), "c1ccccc1");
    assert_eq!(canonicalize("c1ccccc1").unwrap(), "c1ccccc1");
    assert_eq!(
        canonicalize(CAFFEINE_KEKULE).unwrap(),
        canonicalize(CAFFEINE_AROMATIC).unwrap()
    );
}

#[test]
fn test_equivalent_spellings() {
    assert_eq!(
        canonicalize("n1ccccc1").unwrap(),
        canonicalize("c1ccncc1").unwrap()
    );
    assert_eq!(
        canonicalize("Cc1ccccc1").unwrap(),
        canonicalize("c1ccc(C)cc1").unwrap()
    );
}

#[test]
fn test_canonical_is_idempotent() {
    for smiles in [ASPIRIN, CAFFEINE_KEKULE, "c1cc[nH]c1", "CCN(CC)CC", "C1CCCCC1"] {
        let once = canonicalize(smiles).unwrap();
        let twice = canonicalize(&once).unwrap();
        assert_eq!(once, twice, "not idempotent for {}", smiles);
    }
}

#[test]
fn test_pyrrole_keeps_bracket_hydrogen() {
    let canonical = canonicalize("c1cc[nH]c1").unwrap();
    assert!(canonical.contains("[nH]"));
}

#[test]
fn test_stereo_is_dropped() {
    assert_eq!(
        canonicalize("C[C@H](N)O").unwrap(),
        canonicalize("C[C@@H](N)O").unwrap()
    );
    assert_eq!(canonicalize("F/C=C/F").unwrap(), canonicalize("FC=CF").unwrap());
}

#[test]
fn test_alanine_enantiomers_share_identity() {
    for smiles in [
        "N[C@@H](C)C(=O)O",
        "C[C@H](N)C(=O)O",
        "C[C@@H](N)C(=O)O",
        "OC(=O)[C@H](C)N",
        "CC(N)C(=O)O",
    ] {
        assert_eq!(canonicalize(smiles).unwrap(), "CC(C(=O)O)N", "{}", smiles);
    }
}

#[test]
fn test_chiral_centre_keeps_hydrogen() {
    let mol = parse("C[C@H](N)O").unwrap();
    assert_eq!(mol.atoms()[1].hydrogens, 1);
    assert!(!canonicalize("C[C@H](N)O").unwrap().contains('['));
}

#[test]
fn test_salts_sorted_by_fragment() {
    assert_eq!(canonicalize("[Na+].[Cl-]").unwrap(), "[Cl-].[Na+]");
    assert_eq!(parse("CCO.Cl").unwrap().fragment_count(), 2);
}

#[test]
fn test_charges_and_isotopes_are_written() {
    assert_eq!(canonicalize("[O-]C").unwrap(), "C[O-]");
    assert_eq!(canonicalize("[13CH4]").unwrap(), "[13CH4]");
    assert!(canonicalize("C[N+](C)(C)C").unwrap().contains("[N+]"));
}

#[test]
fn test_hydrogen_counts() {
    let mol = parse("CC=O").unwrap();
    let hydrogens: Vec<u8> = mol.atoms().iter().map(|a| a.hydrogens).collect();
    assert_eq!(hydrogens, vec![3, 1, 0]);
}

#[test]
fn test_valence_errors() {
    assert!(matches!(
        parse("C(C)(C)(C)(C)C").unwrap_err(),
        SmilesError::Valence { .. }
    ));
    assert!(matches!(parse("[CH5]").unwrap_err(), SmilesError::Valence { .. }));
    assert!(matches!(parse("N(=O)=O").unwrap_err(), SmilesError::Valence { .. }));
}

#[test]
fn test_aromaticity_errors() {
    assert_eq!(parse("c1cccc1").unwrap_err(), SmilesError::Kekulize);
    assert_eq!(parse("c1ccnc1").unwrap_err(), SmilesError::Kekulize);
    assert!(matches!(
        parse("Cc").unwrap_err(),
        SmilesError::NonRingAromatic(_)
    ));
}

#[test]
fn test_sentinels_are_invalid() {
    for token in ["-666", "restricted", "nan", "", "  "] {
        assert!(!is_valid(token), "{:?} should be invalid", token);
    }
}

#[test]
fn test_common_drugs_are_valid() {
    for smiles in [
        ASPIRIN,
        CAFFEINE_AROMATIC,
        "CS(C)=O",
        "CC(C)Cc1ccc(cc1)C(C)C(=O)O",
        "O=C1CCCN1",
        "[O-][N+](=O)c1ccccc1",
        "c1ccc2ccccc2c1",
    ] {
        assert!(is_valid(smiles), "{} should be valid", smiles);
    }
}

#[test]
fn test_quinone_is_not_aromatic() {
    let mol = parse("O=C1C=CC(=O)C=C1").unwrap();
    assert!(mol.atoms().iter().all(|a| !a.aromatic));
}

#[test]
fn test_naphthalene_fully_aromatic() {
    let mol = parse("C1=CC2=CC=CC=C2C=C1").unwrap();
    assert!(mol.atoms().iter().all(|a| a.aromatic));
    assert_eq!(
        mol.to_canonical_smiles(),
        canonicalize("c1ccc2ccccc2c1").unwrap()
    );
}

#[test]
fn test_long_chain_is_written_without_recursion() {
    let chain = "C".repeat(1_000);
    assert_eq!(canonicalize(&chain).unwrap(), chain);

    let ring = format!("C1{}C1", "C".repeat(998));
    assert_eq!(parse(&ring).unwrap().atom_count(), 1_000);
}

#[test]
fn test_oversized_input_is_an_error() {
    let chain = "C".repeat(10_000);
    assert_eq!(
        canonicalize(&chain).unwrap_err(),
        SmilesError::TooManyAtoms(MAX_ATOMS)
    );
    assert!(is_valid(&"C".repeat(MAX_ATOMS)));
}
