//! In-memory [`RunView`] used by the unit tests of this crate.

use crate::error::{AnalysisError, Result};
use crate::view::RunView;
use std::collections::BTreeMap;

#[derive(Default)]
pub struct GridRun {
    pub agents: usize,
    pub levels: u32,
    pub neighbors: BTreeMap<String, Vec<usize>>,
    pub resource: BTreeMap<(String, u64), Vec<f64>>,
    pub channels: BTreeMap<(String, u64), Vec<u64>>,
    pub parents: BTreeMap<u64, Vec<usize>>,
    pub prev_chans: BTreeMap<u64, Vec<u64>>,
    pub apoptosis: BTreeMap<u64, Vec<u64>>,
}

impl GridRun {
    pub fn new(agents: usize, levels: u32) -> Self {
        Self {
            agents,
            levels,
            ..Default::default()
        }
    }

    pub fn neighbor(mut self, dir: &str, index: Vec<usize>) -> Self {
        self.neighbors.insert(dir.to_string(), index);
        self
    }

    pub fn resource(mut self, dir: &str, update: u64, values: Vec<f64>) -> Self {
        self.resource.insert((dir.to_string(), update), values);
        self
    }

    pub fn channel(mut self, level: &str, update: u64, values: Vec<u64>) -> Self {
        self.channels.insert((level.to_string(), update), values);
        self
    }

    pub fn parents(mut self, update: u64, values: Vec<usize>) -> Self {
        self.parents.insert(update, values);
        self
    }

    pub fn prev_chan(mut self, update: u64, values: Vec<u64>) -> Self {
        self.prev_chans.insert(update, values);
        self
    }

    pub fn apoptosis(mut self, update: u64, values: Vec<u64>) -> Self {
        self.apoptosis.insert(update, values);
        self
    }
}

fn lookup<K: Ord, V: Clone>(map: &BTreeMap<K, V>, key: &K, name: String) -> Result<V> {
    map.get(key).cloned().ok_or(AnalysisError::MissingKey(name))
}

impl RunView for GridRun {
    fn agent_count(&self) -> Result<usize> {
        Ok(self.agents)
    }

    fn level_count(&self) -> Result<u32> {
        Ok(self.levels)
    }

    fn direction_keys(&self) -> Result<Vec<String>> {
        Ok(self.neighbors.keys().cloned().collect())
    }

    fn channel_levels(&self) -> Result<Vec<String>> {
        let mut levels: Vec<String> = self.channels.keys().map(|(l, _)| l.clone()).collect();
        levels.dedup();
        Ok(levels)
    }

    fn neighbor_index(&self, dir: &str) -> Result<Vec<usize>> {
        lookup(&self.neighbors, &dir.to_string(), format!("Index/{dir}"))
    }

    fn resource_contributed(&self, dir: &str, update: u64) -> Result<Vec<f64>> {
        lookup(
            &self.resource,
            &(dir.to_string(), update),
            format!("ResourceContributed/{dir}/upd_{update}"),
        )
    }

    fn channel(&self, level: &str, update: u64) -> Result<Vec<u64>> {
        lookup(
            &self.channels,
            &(level.to_string(), update),
            format!("Channel/{level}/upd_{update}"),
        )
    }

    fn parent_pos(&self, update: u64) -> Result<Vec<usize>> {
        lookup(&self.parents, &update, format!("ParentPos/upd_{update}"))
    }

    fn prev_chan(&self, update: u64) -> Result<Vec<u64>> {
        lookup(&self.prev_chans, &update, format!("PrevChan/upd_{update}"))
    }

    fn apoptosis(&self, update: u64) -> Result<Vec<u64>> {
        lookup(&self.apoptosis, &update, format!("Apoptosis/upd_{update}"))
    }
}
