use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use super::{Distribution, SweepError};

/// Key that marks a mapping as a distribution rather than a namespace
const TYPE_KEY: &str = "type";

/// Experiment-runner settings, passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemlSection {
    /// Script the runner executes
    pub executable: Option<String>,
    /// Experiment collection name
    pub name: Option<String>,
    /// Directory for runner logs
    pub output_dir: Option<String>,
    /// Any other runner keys
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Randomly sampled parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RandomGroup {
    /// Draws per grid point
    pub samples: usize,
    /// Seed for the draws
    pub seed: Option<u64>,
    /// Dotted parameter name to distribution
    pub parameters: BTreeMap<String, Distribution>,
}

/// A declarative hyperparameter sweep: fixed values, random draws and a grid.
///
/// Nested mappings are flattened to dotted names, so
/// `model: {hparams: {dim: 32}}` and `model.hparams.dim: 32` are the same
/// parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepDefinition {
    /// Runner settings
    pub seml: Option<SemlSection>,
    /// Parameters shared by every run
    pub fixed: BTreeMap<String, Value>,
    /// Randomly sampled parameters
    pub random: RandomGroup,
    /// Parameters swept as a cartesian product
    pub grid: BTreeMap<String, Distribution>,
}

#[derive(Deserialize)]
struct RawSweep {
    seml: Option<SemlSection>,
    #[serde(default)]
    fixed: Mapping,
    #[serde(default)]
    random: Mapping,
    #[serde(default)]
    grid: Mapping,
}

fn key_string(key: &Value) -> Result<String, SweepError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(SweepError::InvalidKey(format!("{:?}", other))),
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn flatten_values(
    prefix: &str,
    mapping: &Mapping,
    out: &mut BTreeMap<String, Value>,
) -> Result<(), SweepError> {
    for (key, value) in mapping {
        let name = join(prefix, &key_string(key)?);
        match value {
            Value::Mapping(nested) => flatten_values(&name, nested, out)?,
            leaf => {
                out.insert(name, leaf.clone());
            }
        }
    }
    Ok(())
}

fn flatten_distributions(
    prefix: &str,
    mapping: &Mapping,
    out: &mut BTreeMap<String, Distribution>,
) -> Result<(), SweepError> {
    for (key, value) in mapping {
        let name = join(prefix, &key_string(key)?);
        let Value::Mapping(nested) = value else {
            return Err(SweepError::InvalidDistribution {
                name,
                reason: "expected a mapping with a 'type' key".to_string(),
            });
        };
        if nested.contains_key(TYPE_KEY) {
            let distribution: Distribution = serde_yaml::from_value(value.clone()).map_err(|e| {
                SweepError::InvalidDistribution {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            out.insert(name, distribution);
        } else {
            flatten_distributions(&name, nested, out)?;
        }
    }
    Ok(())
}

fn take_scalar<T: serde::de::DeserializeOwned>(
    mapping: &mut Mapping,
    key: &str,
) -> Result<Option<T>, SweepError> {
    match mapping.remove(key) {
        Some(value) => Ok(Some(serde_yaml::from_value(value)?)),
        None => Ok(None),
    }
}

impl SweepDefinition {
    /// Parse a definition from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SweepError> {
        let mut raw: RawSweep = serde_yaml::from_str(yaml)?;

        let mut fixed = BTreeMap::new();
        flatten_values("", &raw.fixed, &mut fixed)?;

        let samples = take_scalar(&mut raw.random, "samples")?.unwrap_or(0);
        let seed = take_scalar(&mut raw.random, "seed")?;
        let mut parameters = BTreeMap::new();
        flatten_distributions("", &raw.random, &mut parameters)?;

        let mut grid = BTreeMap::new();
        flatten_distributions("", &raw.grid, &mut grid)?;

        Ok(Self {
            seml: raw.seml,
            fixed,
            random: RandomGroup {
                samples,
                seed,
                parameters,
            },
            grid,
        })
    }

    /// Load a definition from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SweepError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Check distribution bounds, that no parameter is defined twice, and
    /// that random parameters come with a sample count
    pub fn validate(&self) -> Result<(), SweepError> {
        self.validate_parameters()?;
        if !self.random.parameters.is_empty() && self.random.samples == 0 {
            return Err(SweepError::NoSamples);
        }
        Ok(())
    }

    pub(super) fn validate_parameters(&self) -> Result<(), SweepError> {
        for (name, distribution) in &self.random.parameters {
            distribution.validate(name)?;
        }
        for (name, distribution) in &self.grid {
            distribution.validate(name)?;
            distribution.grid_values(name)?;
        }

        let names = self
            .fixed
            .keys()
            .chain(self.random.parameters.keys())
            .chain(self.grid.keys());
        let mut seen = BTreeSet::new();
        for name in names {
            if !seen.insert(name) {
                return Err(SweepError::DuplicateParameter(name.clone()));
            }
        }
        Ok(())
    }
}
