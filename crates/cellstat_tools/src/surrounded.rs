//! Reproduction rate grouped by treatment and channel surround status.

use anyhow::{Context, Result};
use cellstat_core::config::PlotConfig;
use cellstat_core::MeanAccumulator;
use cellstat_io::{parse_float, Table};

pub const TREATMENT_COLUMN: &str = "Treatment";
pub const RATE_COLUMN: &str = "Reproduction Rate";
pub const SURROUNDED_COLUMN: &str = "Channel 1 Surrounded";

/// Two-sided 95% normal quantile.
const Z_95: f64 = 1.96;

/// One bar: the mean rate of a (treatment, surround status) group.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub hue: usize,
    pub mean: f64,
    /// Half-width of the 95% interval.
    pub error: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBars {
    /// Distinct surround values, indexed by [`Bar::hue`].
    pub hues: Vec<String>,
    pub groups: Vec<BarGroup>,
}

fn interval(values: &[f64]) -> (f64, f64) {
    let acc: MeanAccumulator = values.iter().copied().collect();
    let mean = acc.mean();
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let n = values.len() as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, Z_95 * var.sqrt() / n.sqrt())
}

/// Orders hue levels numerically when they are all numbers, otherwise by
/// first appearance.
fn order_hues(mut hues: Vec<String>) -> Vec<String> {
    let numeric: Option<Vec<f64>> = hues.iter().map(|h| h.trim().parse().ok()).collect();
    if let Some(keys) = numeric {
        let mut keyed: Vec<(f64, String)> = keys.into_iter().zip(hues).collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        hues = keyed.into_iter().map(|(_, h)| h).collect();
    }
    hues
}

/// Groups the rows of `table` by display label and surround status.
///
/// Labels keep the order in which their treatments first appear. Every
/// treatment must have a label in `plot`.
pub fn group_rates(table: &Table, plot: &PlotConfig) -> Result<GroupedBars> {
    let treatments = table.column_values(TREATMENT_COLUMN)?;
    let rates = table.column_values(RATE_COLUMN)?;
    let surrounded = table.column_values(SURROUNDED_COLUMN)?;

    let mut labels: Vec<String> = Vec::new();
    let mut hues: Vec<String> = Vec::new();
    let mut samples: Vec<(usize, String, f64)> = Vec::with_capacity(table.len());

    for (row, ((treatment, rate), hue)) in treatments.iter().zip(&rates).zip(&surrounded).enumerate() {
        let label = plot
            .treatment_label(treatment)
            .with_context(|| format!("no plot label for treatment {treatment:?}"))?;
        let rate = parse_float(rate).with_context(|| format!("{RATE_COLUMN} in row {}", row + 1))?;
        let hue = hue.trim().to_string();

        let label_idx = match labels.iter().position(|l| l == label) {
            Some(idx) => idx,
            None => {
                labels.push(label.to_string());
                labels.len() - 1
            }
        };
        if !hues.contains(&hue) {
            hues.push(hue.clone());
        }
        // Empty rate cells still place their label and hue but add no sample.
        if rate.is_finite() {
            samples.push((label_idx, hue, rate));
        }
    }

    let hues = order_hues(hues);
    let groups = labels
        .into_iter()
        .enumerate()
        .map(|(label_idx, label)| {
            let bars = hues
                .iter()
                .enumerate()
                .filter_map(|(hue_idx, hue)| {
                    let values: Vec<f64> = samples
                        .iter()
                        .filter(|(l, h, _)| *l == label_idx && h == hue)
                        .map(|(_, _, rate)| *rate)
                        .collect();
                    if values.is_empty() {
                        return None;
                    }
                    let (mean, error) = interval(&values);
                    Some(Bar {
                        hue: hue_idx,
                        mean,
                        error,
                        count: values.len(),
                    })
                })
                .collect();
            BarGroup { label, bars }
        })
        .collect();

    Ok(GroupedBars { hues, groups })
}
