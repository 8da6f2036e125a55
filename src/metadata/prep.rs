use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::processing::ProcessingHistory;
use super::source::SourceFileInfo;
use super::MetadataError;

/// Complete metadata container for a prepared table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrepMetadata {
    /// Dataset name
    pub dataset: Option<String>,

    /// Files the table was prepared from
    pub source_files: Vec<SourceFileInfo>,

    /// Processing history
    pub processing_history: Option<ProcessingHistory>,

    /// Format version found in a file footer (set when reading)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,

    /// Write timestamp found in a file footer (set when reading)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Writing tool found in a file footer (set when reading)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_info: Option<String>,
}

impl PrepMetadata {
    /// Create a new empty metadata container
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for a named dataset
    pub fn for_dataset(name: &str) -> Self {
        Self {
            dataset: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Convert all metadata to a HashMap suitable for Parquet key_value_metadata
    pub fn to_parquet_metadata(&self) -> Result<HashMap<String, String>, MetadataError> {
        use crate::schema::*;

        let mut metadata = HashMap::new();

        metadata.insert(
            KEY_FORMAT_VERSION.to_string(),
            CHEMPREP_FORMAT_VERSION.to_string(),
        );

        metadata.insert(KEY_CREATED_AT.to_string(), chrono::Utc::now().to_rfc3339());

        metadata.insert(
            KEY_TOOL_INFO.to_string(),
            format!("chemprep v{}", env!("CARGO_PKG_VERSION")),
        );

        if let Some(ref name) = self.dataset {
            metadata.insert(KEY_DATASET.to_string(), name.clone());
        }

        if !self.source_files.is_empty() {
            metadata.insert(
                KEY_SOURCE_FILES.to_string(),
                serde_json::to_string(&self.source_files)?,
            );
        }

        if let Some(ref history) = self.processing_history {
            metadata.insert(KEY_PROCESSING_HISTORY.to_string(), history.to_json()?);
        }

        Ok(metadata)
    }

    /// Reconstruct metadata from Parquet key_value_metadata
    pub fn from_parquet_metadata(
        metadata: &HashMap<String, String>,
    ) -> Result<Self, MetadataError> {
        use crate::schema::*;

        let mut result = Self::new();

        result.format_version = metadata.get(KEY_FORMAT_VERSION).cloned();
        result.created_at = metadata.get(KEY_CREATED_AT).cloned();
        result.tool_info = metadata.get(KEY_TOOL_INFO).cloned();
        result.dataset = metadata.get(KEY_DATASET).cloned();

        if let Some(json) = metadata.get(KEY_SOURCE_FILES) {
            result.source_files = decode_footer(KEY_SOURCE_FILES, json)?;
        }

        if let Some(json) = metadata.get(KEY_PROCESSING_HISTORY) {
            result.processing_history = Some(decode_footer(KEY_PROCESSING_HISTORY, json)?);
        }

        Ok(result)
    }
}

fn decode_footer<T: serde::de::DeserializeOwned>(key: &str, json: &str) -> Result<T, MetadataError> {
    serde_json::from_str(json).map_err(|source| MetadataError::CorruptFooter {
        key: key.to_string(),
        source,
    })
}
