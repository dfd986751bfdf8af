//! # cellstat core
//!
//! Reductions over the per-agent arrays of simulation runs.
//!
//! This crate contains the storage-independent analysis logic:
//! - The [`RunView`] trait through which a run's arrays are read
//! - Relations between an agent and its neighbor, and the masks they induce
//! - Masked means of resource contributed, pooled over directions and updates
//! - Per-cell-update apoptosis rate
//! - The named metric catalog and cross-run summaries
//! - Channel-duration frequency tables
//!
//! ## Example
//!
//! ```
//! use cellstat_core::{Predicate, Relation, UpdateRange};
//!
//! let range = UpdateRange::new(100, 200).unwrap();
//! let same_channel = Predicate::holds(Relation::SameChannel { level: "lev_0".into() });
//! assert_eq!(range.len(), 100);
//! # let _ = same_channel;
//! ```

/// Masked and unmasked means of resource contributed
pub mod aggregate;
/// Apoptosis rate over agents and updates
pub mod apoptosis;
/// Configuration file handling
pub mod config;
/// Channel-duration frequency tables
pub mod duration;
/// Error types and result aliases
pub mod error;
/// Named metric catalog and logging setup
pub mod metrics;
/// Agent-neighbor relations and masks
pub mod relation;
/// Mean and standard deviation across runs
pub mod summary;
/// The loader trait and update ranges
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{mean, mean_resource_contributed, relational_mean, MeanAccumulator};
pub use apoptosis::apoptosis_rate;
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use metrics::{evaluate_catalog, init_logging, MetricValues, ResourceMetric};
pub use relation::{Comparison, Predicate, Relation};
pub use summary::Summary;
pub use view::{RunView, UpdateRange};
