use arrow::datatypes::Schema;

/// Checks that every named column is present in the schema.
///
/// Returns the first missing column as an error.
pub fn require_columns(schema: &Schema, required: &[&str]) -> Result<(), SchemaValidationError> {
    for name in required {
        if schema.field_with_name(name).is_err() {
            return Err(SchemaValidationError::MissingColumn(name.to_string()));
        }
    }
    Ok(())
}

/// Errors that can occur during schema validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required column is missing from the schema
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{DataType, Field};

    #[test]
    fn test_require_columns() {
        let schema = Schema::new(vec![
            Field::new("canonical_smiles", DataType::Utf8, true),
            Field::new("split_ood", DataType::Utf8, true),
        ]);
        assert!(require_columns(&schema, &["canonical_smiles", "split_ood"]).is_ok());

        let err = require_columns(&schema, &["canonical_smiles", "cell_id"]).unwrap_err();
        assert!(matches!(err, SchemaValidationError::MissingColumn(ref c) if c == "cell_id"));
    }
}
