use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::MetadataError;

/// Data processing history for audit trail
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingHistory {
    /// List of processing steps applied
    pub steps: Vec<ProcessingStep>,
}

/// A single preparation step in the processing history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStep {
    /// Step order (1-indexed)
    pub order: i32,

    /// Software name
    pub software: String,

    /// Software version
    pub version: Option<String>,

    /// Processing type (e.g., "reference join", "validity filter", "split")
    pub processing_type: String,

    /// Timestamp when processing was performed
    pub timestamp: Option<String>,

    /// Processing parameters and resulting counts
    pub parameters: BTreeMap<String, String>,
}

impl ProcessingStep {
    /// Step stamped with this crate's name, version and the current time
    pub fn new(order: i32, processing_type: &str) -> Self {
        Self {
            order,
            software: env!("CARGO_PKG_NAME").to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            processing_type: processing_type.to_string(),
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
            parameters: BTreeMap::new(),
        }
    }

    /// Record a parameter
    pub fn with_parameter(mut self, key: &str, value: impl ToString) -> Self {
        self.parameters.insert(key.to_string(), value.to_string());
        self
    }
}

impl ProcessingHistory {
    /// Create a new empty processing history
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a processing step to the history
    pub fn add_step(&mut self, step: ProcessingStep) {
        self.steps.push(step);
    }

    /// Start a step numbered after the last one; push it with [`add_step`](Self::add_step)
    pub fn next_step(&self, processing_type: &str) -> ProcessingStep {
        let order = self.steps.last().map_or(1, |s| s.order + 1);
        ProcessingStep::new(order, processing_type)
    }

    /// Find the first step of a given type
    pub fn step(&self, processing_type: &str) -> Option<&ProcessingStep> {
        self.steps
            .iter()
            .find(|s| s.processing_type == processing_type)
    }

    /// Serialize to JSON for Parquet footer storage
    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }
}
