use std::path::Path;

use serde::{Deserialize, Serialize};

/// Source file information for provenance tracking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceFileInfo {
    /// Original file name
    pub name: String,

    /// Original file path
    pub path: Option<String>,

    /// Role of the file in preparation ("observations" or "reference")
    pub role: String,

    /// File format (e.g., "parquet", "csv", "tsv")
    pub format: Option<String>,

    /// File size in bytes
    pub size_bytes: Option<u64>,
}

impl SourceFileInfo {
    /// Create new source file info with the given filename
    pub fn new(name: &str, role: &str) -> Self {
        Self {
            name: name.to_string(),
            role: role.to_string(),
            ..Default::default()
        }
    }

    /// Describe a file on disk; the size is omitted when it cannot be read
    pub fn from_path(path: &Path, role: &str) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            path: Some(path.display().to_string()),
            role: role.to_string(),
            format: path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase()),
            size_bytes: std::fs::metadata(path).ok().map(|m| m.len()),
        }
    }
}
