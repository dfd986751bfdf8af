pub mod macros;

use cellstat_data::layout::{self, lev_key, upd_key};
use cellstat_data::{Dataset, Group};
use cellstat_io::{save_document, Run};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

/// Builds run documents on a ring of agents with a `left` and a `right`
/// neighbor.
#[allow(dead_code)]
pub struct RunBuilder {
    agents: usize,
    levels: u32,
    root: Group,
}

#[allow(dead_code)]
impl RunBuilder {
    pub fn new(agents: usize, levels: u32) -> Self {
        let mut root = Group::new();
        root.set_attr(layout::NLEV_ATTR, vec![i64::from(levels)]);
        root.put_dataset(
            &layout::join(layout::INDEX, layout::OWN),
            Dataset::from_u64((0..agents as u64).collect()),
        );
        let left = (0..agents).map(|i| ((i + agents - 1) % agents) as u64).collect();
        let right = (0..agents).map(|i| ((i + 1) % agents) as u64).collect();
        root.put_dataset(&layout::join(layout::INDEX, "left"), Dataset::from_u64(left));
        root.put_dataset(&layout::join(layout::INDEX, "right"), Dataset::from_u64(right));
        Self {
            agents,
            levels,
            root,
        }
    }

    pub fn with_resource(mut self, dir: &str, update: u64, values: Vec<f64>) -> Self {
        let path = format!("{}/{dir}/{}", layout::RESOURCE_CONTRIBUTED, upd_key(update));
        self.root.put_dataset(&path, Dataset::from_f64(values));
        self
    }

    pub fn with_channel(mut self, level: u32, update: u64, values: Vec<u64>) -> Self {
        let path = format!("{}/{}/{}", layout::CHANNEL, lev_key(level), upd_key(update));
        self.root.put_dataset(&path, Dataset::from_u64(values));
        self
    }

    pub fn with_parents(mut self, update: u64, values: Vec<u64>) -> Self {
        let path = layout::join(layout::PARENT_POS, &upd_key(update));
        self.root.put_dataset(&path, Dataset::from_u64(values));
        self
    }

    pub fn with_prev_chan(mut self, update: u64, values: Vec<u64>) -> Self {
        let path = layout::join(layout::PREV_CHAN, &upd_key(update));
        self.root.put_dataset(&path, Dataset::from_u64(values));
        self
    }

    pub fn with_apoptosis(mut self, update: u64, values: Vec<u64>) -> Self {
        let path = layout::join(layout::APOPTOSIS, &upd_key(update));
        self.root.put_dataset(&path, Dataset::from_u64(values));
        self
    }

    /// Fills every array of updates `[first, last)` with seeded random values.
    pub fn with_random_updates(mut self, seed: u64, first: u64, last: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.agents;
        for update in first..last {
            for dir in ["left", "right"] {
                let rc = (0..n).map(|_| rng.gen_range(0.0..10.0)).collect();
                self = self.with_resource(dir, update, rc);
            }
            for level in 0..self.levels {
                let ch = (0..n).map(|_| rng.gen_range(0..3)).collect();
                self = self.with_channel(level, update, ch);
            }
            let parents = (0..n).map(|_| rng.gen_range(0..n as u64)).collect();
            let prev = (0..n).map(|_| rng.gen_range(0..3)).collect();
            let apoptosis = (0..n).map(|_| rng.gen_range(0..4)).collect();
            self = self
                .with_parents(update, parents)
                .with_prev_chan(update, prev)
                .with_apoptosis(update, apoptosis);
        }
        self
    }

    pub fn build(self) -> Group {
        self.root
    }

    pub fn build_run(self, name: &str) -> Run {
        Run::from_document(name, self.root)
    }

    /// Writes the document as `dir/name`, gzip-compressed for `.gz` names.
    pub fn save(self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        save_document(&self.root, &path).expect("Failed to save run document");
        path
    }
}

/// Fresh scratch directory under the system temp dir.
#[allow(dead_code)]
pub fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cellstat_{test}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}
