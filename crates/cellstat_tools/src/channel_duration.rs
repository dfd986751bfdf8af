//! Loading of per-seed channel-duration tables.

use anyhow::{Context, Result};
use cellstat_core::duration::DurationSample;
use cellstat_io::Table;
use std::path::{Path, PathBuf};

pub const SEED_COLUMN: &str = "seed";
pub const DURATION_COLUMN: &str = "ch1_dur";
pub const FREQUENCY_COLUMN: &str = "channel_weighted_freq";

pub const PLOT_CAPTION: &str = "Duration of Level 2 Channels";
pub const PLOT_X_DESC: &str = "Updates";
pub const PLOT_Y_DESC: &str = "Log Per-Channel Frequency";

/// File name prefix of the tables read when none are given.
pub const DEFAULT_INPUT_PREFIX: &str = "level-1-channel-dur-channel-weighted-frequency_";

/// Tables in `dir` named `<DEFAULT_INPUT_PREFIX>*.csv`, sorted by name.
pub fn default_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(DEFAULT_INPUT_PREFIX) && name.ends_with(".csv"));
        if matches && path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Samples of one table, in row order.
pub fn samples_from_table(table: &Table) -> Result<Vec<DurationSample>> {
    let seeds = table.column_values(SEED_COLUMN)?;
    let durations = table.float_column(DURATION_COLUMN)?;
    let freqs = table.float_column(FREQUENCY_COLUMN)?;
    Ok(seeds
        .into_iter()
        .zip(durations)
        .zip(freqs)
        .map(|((seed, duration), weighted_freq)| DurationSample {
            seed: seed.trim().to_string(),
            duration,
            weighted_freq,
        })
        .collect())
}

/// Concatenated samples of every table in `paths`.
pub fn load_samples(paths: &[PathBuf]) -> Result<Vec<DurationSample>> {
    let mut samples = Vec::new();
    for path in paths {
        let table = Table::read(path)?;
        let before = samples.len();
        samples.extend(
            samples_from_table(&table).with_context(|| format!("reading {}", path.display()))?,
        );
        tracing::debug!(path = %path.display(), rows = samples.len() - before, "Loaded duration table");
    }
    Ok(samples)
}
