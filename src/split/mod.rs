//! # Split Assignment
//!
//! Two independent ways of partitioning a filtered table into
//! `train` / `test` / `ood`:
//!
//! - **Identity split** ([`assign_identity_split`]): distinct identities are
//!   shuffled with a fixed seed and cut into groups, so every row of one
//!   molecule lands in the same partition. Followed by [`shrink_back`], which
//!   returns held-out rows with too little support to training.
//! - **Random split** ([`assign_random_split`]): rows are permuted
//!   individually. Identities leak across partitions; this split exists as a
//!   baseline only.
//!
//! Both write their labels into a separate column; neither reads the other.
//!
//! ## Example
//!
//! ```rust
//! use chemprep::split::{identity_split_labels, SplitProportions};
//!
//! let identities: Vec<String> = (0..100).map(|i| format!("id{:03}", i)).collect();
//! let labels = identity_split_labels(&identities, &SplitProportions::identity_default(), 42)?;
//! assert_eq!(labels.len(), 100);
//! # Ok::<(), chemprep::split::SplitError>(())
//! ```

mod error;
mod grouped;
mod label;
mod proportions;
mod random;
mod shrink;
mod summary;


pub use error::SplitError;
pub use grouped::{assign_identity_split, identity_split_labels, partition_identities};
pub use label::SplitLabel;
pub use proportions::SplitProportions;
pub use random::{assign_random_split, random_split_labels};
pub use shrink::{shrink_back, shrink_back_labels, ShrinkStats, ShrinkThresholds};
pub use summary::SplitSummary;

/// Default seed for both splits
pub const DEFAULT_SEED: u64 = 42;
