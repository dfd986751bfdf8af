//! Channel-duration frequency tables.
//!
//! Each sample records, for one seed, how often channels lasting `duration`
//! updates occurred (weighted by channel). Durations are binned every
//! [`DURATION_STEP`] updates.

use crate::aggregate::MeanAccumulator;
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bin width of recorded durations, in updates.
pub const DURATION_STEP: u64 = 50_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationSample {
    pub seed: String,
    pub duration: f64,
    pub weighted_freq: f64,
}

/// Appends a zero-frequency sample for every seed and every binned duration
/// below the largest observed duration that has no sample yet.
///
/// Seeds are visited in first-appearance order. Returns the number of samples
/// added.
pub fn fill_missing_bins(samples: &mut Vec<DurationSample>) -> usize {
    let max = samples
        .iter()
        .map(|s| s.duration)
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return 0;
    }
    let limit = max.trunc() as u64;

    let mut seeds: Vec<String> = Vec::new();
    for s in samples.iter() {
        if !seeds.contains(&s.seed) {
            seeds.push(s.seed.clone());
        }
    }

    let before = samples.len();
    for seed in seeds {
        for bin in (0..limit).step_by(DURATION_STEP as usize) {
            let duration = bin as f64;
            let present = samples
                .iter()
                .any(|s| s.seed == seed && s.duration == duration);
            if !present {
                samples.push(DurationSample {
                    seed: seed.clone(),
                    duration,
                    weighted_freq: 0.0,
                });
            }
        }
    }
    samples.len() - before
}

/// Mean frequency across seeds at every duration, ordered by duration.
pub fn mean_series(samples: &[DurationSample]) -> Vec<(f64, f64)> {
    let mut bins: BTreeMap<u64, (f64, MeanAccumulator)> = BTreeMap::new();
    for s in samples {
        // f64 bit patterns of non-negative values sort like the values.
        let key = s.duration.max(0.0).to_bits();
        bins.entry(key)
            .or_insert_with(|| (s.duration, MeanAccumulator::new()))
            .1
            .push(s.weighted_freq);
    }
    bins.into_values()
        .map(|(duration, acc)| (duration, acc.mean()))
        .collect()
}

/// Duration averaged with the channel-weighted frequencies as weights.
pub fn weighted_mean_duration(samples: &[DurationSample]) -> Result<f64> {
    let total: f64 = samples.iter().map(|s| s.weighted_freq).sum();
    if total == 0.0 {
        return Err(AnalysisError::EmptySelection(
            "channel-weighted frequencies sum to zero".to_string(),
        ));
    }
    let weighted: f64 = samples.iter().map(|s| s.duration * s.weighted_freq).sum();
    Ok(weighted / total)
}
