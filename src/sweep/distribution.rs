use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_yaml::{Number, Value};

use super::SweepError;

/// How a swept parameter takes its values.
///
/// `randint` draws from the half-open range `[min, max)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Distribution {
    /// One of a fixed list of values
    Choice {
        /// Candidate values
        options: Vec<Value>,
    },
    /// Uniform float in `[min, max)`
    Uniform {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
    /// Float whose logarithm is uniform in `[ln min, ln max)`
    Loguniform {
        /// Lower bound, strictly positive
        min: f64,
        /// Upper bound
        max: f64,
    },
    /// Integer in `[min, max)`
    Randint {
        /// Lower bound
        min: i64,
        /// Exclusive upper bound
        max: i64,
    },
}

impl Distribution {
    /// Check the bounds of the distribution
    pub fn validate(&self, name: &str) -> Result<(), SweepError> {
        let invalid = |reason: &str| SweepError::InvalidDistribution {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        match self {
            Distribution::Choice { options } if options.is_empty() => Err(invalid("no options")),
            Distribution::Uniform { min, max } if !(min < max) => {
                Err(invalid("min must be below max"))
            }
            Distribution::Loguniform { min, .. } if !(*min > 0.0) => {
                Err(invalid("min must be positive"))
            }
            Distribution::Loguniform { min, max } if !(min < max) => {
                Err(invalid("min must be below max"))
            }
            Distribution::Randint { min, max } if min >= max => {
                Err(invalid("min must be below max"))
            }
            _ => Ok(()),
        }
    }

    /// Draw one value
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Value {
        match self {
            Distribution::Choice { options } => {
                options.choose(rng).cloned().unwrap_or(Value::Null)
            }
            Distribution::Uniform { min, max } => {
                Value::Number(Number::from(rng.gen_range(*min..*max)))
            }
            Distribution::Loguniform { min, max } => {
                let log = rng.gen_range(min.ln()..max.ln());
                Value::Number(Number::from(log.exp()))
            }
            Distribution::Randint { min, max } => {
                Value::Number(Number::from(rng.gen_range(*min..*max)))
            }
        }
    }

    /// Every value of an enumerable distribution, in order
    pub fn grid_values(&self, name: &str) -> Result<Vec<Value>, SweepError> {
        match self {
            Distribution::Choice { options } => Ok(options.clone()),
            Distribution::Randint { min, max } => {
                Ok((*min..*max).map(|v| Value::Number(Number::from(v))).collect())
            }
            _ => Err(SweepError::NotEnumerable(name.to_string())),
        }
    }
}
