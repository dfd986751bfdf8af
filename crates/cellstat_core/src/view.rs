//! Read-only access to the arrays of one run.

use crate::error::{AnalysisError, Result};
use std::ops::Range;

/// Half-open range of update numbers, `[first, last)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateRange {
    pub first: u64,
    pub last: u64,
}

impl UpdateRange {
    /// Builds a range, rejecting `first > last`. An empty range is allowed.
    pub fn new(first: u64, last: u64) -> Result<Self> {
        if first > last {
            return Err(AnalysisError::InvalidRange { first, last });
        }
        Ok(Self { first, last })
    }

    pub fn iter(&self) -> Range<u64> {
        self.first..self.last
    }

    pub fn len(&self) -> u64 {
        self.last - self.first
    }

    pub fn is_empty(&self) -> bool {
        self.first == self.last
    }
}

impl IntoIterator for UpdateRange {
    type Item = u64;
    type IntoIter = Range<u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Named per-agent arrays of a single run.
///
/// Every accessor returns the flattened array. Implementations report missing
/// keys and unreadable element types; callers check lengths against
/// [`RunView::agent_count`].
pub trait RunView {
    /// Number of agents N, the size of the ownership index.
    fn agent_count(&self) -> Result<usize>;

    /// Number of channel hierarchy levels.
    fn level_count(&self) -> Result<u32>;

    /// Neighbor direction keys in iteration order.
    fn direction_keys(&self) -> Result<Vec<String>>;

    /// Channel level keys in iteration order.
    fn channel_levels(&self) -> Result<Vec<String>>;

    /// Neighbor index of every agent in direction `dir`. Static across updates.
    fn neighbor_index(&self, dir: &str) -> Result<Vec<usize>>;

    /// Resource each agent contributed toward direction `dir` at `update`.
    fn resource_contributed(&self, dir: &str, update: u64) -> Result<Vec<f64>>;

    /// Channel id of every agent at hierarchy `level` at `update`.
    fn channel(&self, level: &str, update: u64) -> Result<Vec<u64>>;

    /// Position of every agent's parent at `update`.
    fn parent_pos(&self, update: u64) -> Result<Vec<usize>>;

    /// Previous deepest-level channel of every agent at `update`.
    fn prev_chan(&self, update: u64) -> Result<Vec<u64>>;

    /// Apoptosis type code of every agent at `update`.
    fn apoptosis(&self, update: u64) -> Result<Vec<u64>>;
}

/// Fails unless `values` has exactly `expected` elements.
pub fn expect_len<T>(values: &[T], expected: usize, path: impl FnOnce() -> String) -> Result<()> {
    if values.len() != expected {
        return Err(AnalysisError::length_mismatch(path(), expected, values.len()));
    }
    Ok(())
}
