use thiserror::Error;

/// Errors raised while loading or expanding a sweep definition
#[derive(Error, Debug)]
pub enum SweepError {
    /// I/O error while reading the definition
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed YAML
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Parameter keys must be strings
    #[error("Parameter key is not a string: {0}")]
    InvalidKey(String),

    /// A distribution is malformed or has inconsistent bounds
    #[error("Invalid distribution for '{name}': {reason}")]
    InvalidDistribution {
        /// Dotted parameter name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// A parameter appears in more than one group
    #[error("Parameter '{0}' is defined in more than one group")]
    DuplicateParameter(String),

    /// Grid parameters need a finite set of values
    #[error("Grid parameter '{0}' must be a choice or randint distribution")]
    NotEnumerable(String),

    /// Random parameters were given but no samples requested
    #[error("Random parameters need at least one sample")]
    NoSamples,
}
