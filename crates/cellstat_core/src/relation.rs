//! Relations between an agent and one of its neighbors.
//!
//! Every relation compares a value read at the agent `i` with a value read at
//! its neighbor `j = neighbor[i]`. Either side is an array loaded for the
//! current update or the agent position itself, so all supported forms share a
//! single evaluation loop:
//!
//! | relation          | agent side        | neighbor side      |
//! |-------------------|-------------------|--------------------|
//! | same channel      | `channel[i]`      | `channel[j]`       |
//! | cell parent       | `parent_pos[i]`   | `j`                |
//! | cell child        | `i`               | `parent_pos[j]`    |
//! | propagule parent  | `prev_chan[i]`    | `deep_channel[j]`  |
//! | propagule child   | `deep_channel[i]` | `prev_chan[j]`     |

use crate::error::{AnalysisError, Result};
use crate::view::{expect_len, RunView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    /// Agent and neighbor share a channel at `level`.
    SameChannel { level: String },
    /// The neighbor is the agent's parent.
    CellParent,
    /// The agent is the neighbor's parent.
    CellChild,
    /// The agent's previous channel is the neighbor's channel at `level`.
    PropaguleParent { level: String },
    /// The agent's channel at `level` is the neighbor's previous channel.
    PropaguleChild { level: String },
}

/// How the two sides of a relation are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
}

/// One side of a relation, loaded for a single update.
#[derive(Debug, Clone, PartialEq)]
pub enum Side {
    /// The agent's own position.
    Position,
    Values(Vec<u64>),
}

impl Side {
    fn at(&self, index: usize) -> u64 {
        match self {
            Side::Position => index as u64,
            Side::Values(v) => v[index],
        }
    }

    fn check_len(&self, agents: usize, path: impl FnOnce() -> String) -> Result<()> {
        match self {
            Side::Position => Ok(()),
            Side::Values(v) => expect_len(v, agents, path),
        }
    }
}

/// The arrays a relation reads for one update.
#[derive(Debug, Clone, PartialEq)]
pub struct Operands {
    pub agent: Side,
    pub neighbor: Side,
}

fn as_ids(positions: Vec<usize>) -> Vec<u64> {
    positions.into_iter().map(|p| p as u64).collect()
}

impl Relation {
    /// Loads both sides of the relation at `update` and checks their lengths.
    pub fn operands<R: RunView + ?Sized>(&self, run: &R, update: u64) -> Result<Operands> {
        let operands = match self {
            Relation::SameChannel { level } => {
                let channel = run.channel(level, update)?;
                Operands {
                    agent: Side::Values(channel.clone()),
                    neighbor: Side::Values(channel),
                }
            }
            Relation::CellParent => Operands {
                agent: Side::Values(as_ids(run.parent_pos(update)?)),
                neighbor: Side::Position,
            },
            Relation::CellChild => Operands {
                agent: Side::Position,
                neighbor: Side::Values(as_ids(run.parent_pos(update)?)),
            },
            Relation::PropaguleParent { level } => Operands {
                agent: Side::Values(run.prev_chan(update)?),
                neighbor: Side::Values(run.channel(level, update)?),
            },
            Relation::PropaguleChild { level } => Operands {
                agent: Side::Values(run.channel(level, update)?),
                neighbor: Side::Values(run.prev_chan(update)?),
            },
        };

        let agents = run.agent_count()?;
        operands.agent.check_len(agents, || {
            format!("{} at update {update}", self.agent_label())
        })?;
        operands.neighbor.check_len(agents, || {
            format!("{} at update {update}", self.neighbor_label())
        })?;
        Ok(operands)
    }

    fn agent_label(&self) -> &'static str {
        match self {
            Relation::SameChannel { .. } | Relation::PropaguleChild { .. } => "Channel",
            Relation::CellParent => "ParentPos",
            Relation::CellChild => "Index/own",
            Relation::PropaguleParent { .. } => "PrevChan",
        }
    }

    fn neighbor_label(&self) -> &'static str {
        match self {
            Relation::SameChannel { .. } | Relation::PropaguleParent { .. } => "Channel",
            Relation::CellParent => "Index",
            Relation::CellChild => "ParentPos",
            Relation::PropaguleChild { .. } => "PrevChan",
        }
    }
}

/// A relation together with the comparison applied to its two sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub relation: Relation,
    pub comparison: Comparison,
}

impl Predicate {
    pub fn holds(relation: Relation) -> Self {
        Self {
            relation,
            comparison: Comparison::Equal,
        }
    }

    pub fn fails(relation: Relation) -> Self {
        Self {
            relation,
            comparison: Comparison::NotEqual,
        }
    }

    /// Elementwise predicate over all agents, looking through `neighbors`.
    ///
    /// `neighbors` must have one entry per agent and every entry must be a
    /// valid agent index.
    pub fn mask(&self, operands: &Operands, neighbors: &[usize]) -> Result<Vec<bool>> {
        let agents = neighbors.len();
        operands
            .agent
            .check_len(agents, || "relation agent side".to_string())?;
        operands
            .neighbor
            .check_len(agents, || "relation neighbor side".to_string())?;
        neighbors
            .iter()
            .enumerate()
            .map(|(i, &j)| {
                if j >= agents {
                    return Err(AnalysisError::out_of_range(j, agents, "neighbor index"));
                }
                let equal = operands.agent.at(i) == operands.neighbor.at(j);
                Ok(match self.comparison {
                    Comparison::Equal => equal,
                    Comparison::NotEqual => !equal,
                })
            })
            .collect()
    }
}
