//! Masked reductions of resource-contributed arrays.

use crate::error::Result;
use crate::relation::Predicate;
use crate::view::{expect_len, RunView, UpdateRange};

/// Running arithmetic mean.
///
/// The mean of nothing is NaN, never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.sum / self.count as f64
    }
}

impl Extend<f64> for MeanAccumulator {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<f64> for MeanAccumulator {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

/// Arithmetic mean of `values`, NaN when empty.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().copied().collect::<MeanAccumulator>().mean()
}

/// Neighbor index of every direction, checked against the agent count.
pub fn load_neighbors<R: RunView + ?Sized>(run: &R) -> Result<Vec<(String, Vec<usize>)>> {
    let agents = run.agent_count()?;
    run.direction_keys()?
        .into_iter()
        .map(|dir| -> Result<(String, Vec<usize>)> {
            let index = run.neighbor_index(&dir)?;
            expect_len(&index, agents, || format!("Index/{dir}"))?;
            Ok((dir, index))
        })
        .collect()
}

/// Mean over directions and updates of the per-array mean of resource
/// contributed. No mask is applied.
pub fn mean_resource_contributed<R: RunView + ?Sized>(run: &R, range: UpdateRange) -> Result<f64> {
    let mut per_array = MeanAccumulator::new();
    for dir in run.direction_keys()? {
        for update in range {
            let rc = run.resource_contributed(&dir, update)?;
            per_array.push(mean(&rc));
        }
    }
    Ok(per_array.mean())
}

/// Mean of resource contributed over every (direction, update, agent) for which
/// `predicate` holds between the agent and its neighbor in that direction.
///
/// Every selected value is weighted equally. Returns NaN when the predicate
/// never holds.
pub fn relational_mean<R: RunView + ?Sized>(
    run: &R,
    range: UpdateRange,
    predicate: &Predicate,
) -> Result<f64> {
    let agents = run.agent_count()?;
    let neighbors = load_neighbors(run)?;
    let mut acc = MeanAccumulator::new();

    for update in range {
        let operands = predicate.relation.operands(run, update)?;
        for (dir, index) in &neighbors {
            let rc = run.resource_contributed(dir, update)?;
            expect_len(&rc, agents, || {
                format!("ResourceContributed/{dir}/upd_{update}")
            })?;
            let mask = predicate.mask(&operands, index)?;
            acc.extend(
                rc.iter()
                    .zip(mask)
                    .filter_map(|(&value, keep)| keep.then_some(value)),
            );
        }
        tracing::trace!(update, selected = acc.count(), "Masked update");
    }

    tracing::debug!(
        relation = ?predicate.relation,
        comparison = ?predicate.comparison,
        selected = acc.count(),
        "Relational mean"
    );
    Ok(acc.mean())
}
