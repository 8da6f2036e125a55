//! # Hyperparameter Sweep Definitions
//!
//! Loads the YAML sweep documents consumed by the experiment runner and
//! expands them into concrete run configurations.
//!
//! A definition has three parameter groups:
//!
//! - `fixed`: values shared by every run
//! - `random`: parameters drawn from a [`Distribution`], `samples` times,
//!   with an optional `seed`
//! - `grid`: parameters swept as a cartesian product
//!
//! ```rust
//! use chemprep::sweep::SweepDefinition;
//!
//! let sweep = SweepDefinition::from_yaml_str(r#"
//! fixed:
//!   model.hparams.dim: 32
//! random:
//!   samples: 3
//!   seed: 7
//!   model.hparams.lr: {type: loguniform, min: 1.0e-4, max: 1.0e-2}
//! grid:
//!   dataset.split_key: {type: choice, options: [split_ood, split_random]}
//! "#)?;
//! sweep.validate()?;
//! assert_eq!(sweep.expand(None, None)?.len(), 6);
//! # Ok::<(), chemprep::sweep::SweepError>(())
//! ```

mod definition;
mod distribution;
mod error;
mod expand;

#[cfg(test)]
mod tests;

pub use definition::{RandomGroup, SemlSection, SweepDefinition};
pub use distribution::Distribution;
pub use error::SweepError;
pub use expand::RunConfig;

/// Seed used when neither the definition nor the caller sets one
pub const DEFAULT_SWEEP_SEED: u64 = 42;
