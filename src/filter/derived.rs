use crate::schema::{COV_DRUG_DOSE_NAME, DRUG_DOSE_NAME};
use crate::table::{ObsTable, TableError};

/// Append `drug_dose_name` (`<identity>_<dose>`) and, when a covariate
/// column is given, `cov_drug_dose_name` (`<covariate>_<identity>_<dose>`).
///
/// A label is null when any of its parts is null.
pub fn add_condition_columns(
    table: &ObsTable,
    identity_column: &str,
    dose_column: &str,
    covariate_column: Option<&str>,
) -> Result<ObsTable, TableError> {
    let identities = table.string_values(identity_column)?;
    let doses = table.string_values(dose_column)?;

    let drug_dose: Vec<Option<String>> = identities
        .iter()
        .zip(&doses)
        .map(|(identity, dose)| match (identity, dose) {
            (Some(identity), Some(dose)) => Some(format!("{}_{}", identity, dose)),
            _ => None,
        })
        .collect();

    let mut result = table.with_string_column(DRUG_DOSE_NAME, drug_dose.clone())?;

    if let Some(covariate_column) = covariate_column {
        let covariates = table.string_values(covariate_column)?;
        let cov_drug_dose: Vec<Option<String>> = covariates
            .iter()
            .zip(&drug_dose)
            .map(|(covariate, label)| match (covariate, label) {
                (Some(covariate), Some(label)) => Some(format!("{}_{}", covariate, label)),
                _ => None,
            })
            .collect();
        result = result.with_string_column(COV_DRUG_DOSE_NAME, cov_drug_dose)?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_condition_labels() {
        let table = ObsTable::from_string_columns(vec![
            ("canonical_smiles".to_string(), column(&[Some("CCO"), Some("CCO"), None])),
            ("pert_dose".to_string(), column(&[Some("10.0"), None, Some("1.0")])),
            ("cell_id".to_string(), column(&[Some("A549"), Some("A549"), Some("PC3")])),
        ])
        .unwrap();

        let labelled =
            add_condition_columns(&table, "canonical_smiles", "pert_dose", Some("cell_id"))
                .unwrap();
        assert_eq!(
            labelled.string_values(DRUG_DOSE_NAME).unwrap(),
            column(&[Some("CCO_10.0"), None, None])
        );
        assert_eq!(
            labelled.string_values(COV_DRUG_DOSE_NAME).unwrap(),
            column(&[Some("A549_CCO_10.0"), None, None])
        );
    }

    #[test]
    fn test_without_covariate() {
        let table = ObsTable::from_string_columns(vec![
            ("canonical_smiles".to_string(), column(&[Some("C")])),
            ("pert_dose".to_string(), column(&[Some("5")])),
        ])
        .unwrap();
        let labelled = add_condition_columns(&table, "canonical_smiles", "pert_dose", None).unwrap();
        assert!(labelled.has_column(DRUG_DOSE_NAME));
        assert!(!labelled.has_column(COV_DRUG_DOSE_NAME));
    }
}
