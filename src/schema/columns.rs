/// Column names as constants for type safety
/// Canonical SMILES of the perturbation (the chemical identity key)
pub const CANONICAL_SMILES: &str = "canonical_smiles";
/// Whether the row is a vehicle control
pub const CONTROL: &str = "control";
/// Leakage-safe split: every identity sits in exactly one partition
pub const SPLIT_OOD: &str = "split_ood";
/// Per-row random split (identities may appear in several partitions)
pub const SPLIT_RANDOM: &str = "split_random";
/// `<identity>_<dose>` condition label
pub const DRUG_DOSE_NAME: &str = "drug_dose_name";
/// `<covariate>_<identity>_<dose>` condition label
pub const COV_DRUG_DOSE_NAME: &str = "cov_drug_dose_name";

/// Default observation key joined against the reference table
pub const DEFAULT_KEY: &str = "pert_id";

/// Training partition label
pub const TRAIN: &str = "train";
/// Held-out test partition label
pub const TEST: &str = "test";
/// Out-of-distribution partition label
pub const OOD: &str = "ood";
