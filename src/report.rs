//! The `apoptosis` and `resource` reports.
//!
//! Runs are loaded one file at a time in the order given; each file
//! contributes one row or one sample per metric.

use anyhow::{Context, Result};
use cellstat_core::config::{ApoptosisConfig, ResourceConfig};
use cellstat_core::{apoptosis_rate, evaluate_catalog, ResourceMetric, Summary, UpdateRange};
use cellstat_io::{format_float, Run, Table};
use std::path::{Path, PathBuf};

pub const TREATMENT_COLUMN: &str = "Treatment";
pub const APOPTOSIS_RATE_COLUMN: &str = "Per-Cell-Update Apoptosis Rate";
pub const FIRST_UPDATE_COLUMN: &str = "First Update";
pub const LAST_UPDATE_COLUMN: &str = "Last Update";

/// Apoptosis rate of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ApoptosisRow {
    pub treatment: String,
    pub rate: f64,
    pub range: UpdateRange,
}

impl ApoptosisRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.treatment.clone(),
            format_float(self.rate),
            self.range.first.to_string(),
            self.range.last.to_string(),
        ]
    }
}

/// Computes the apoptosis row of `run`.
pub fn apoptosis_row(run: &Run, range: UpdateRange, codes: &[u64]) -> Result<ApoptosisRow> {
    let treatment = run.treatment()?;
    let rate = apoptosis_rate(run, range, codes)
        .with_context(|| format!("apoptosis rate of {}", run.path().display()))?;
    tracing::info!(file = %run.path().display(), %treatment, rate, "Computed apoptosis rate");
    Ok(ApoptosisRow {
        treatment,
        rate,
        range,
    })
}

/// Report table with one row per entry of `rows`.
pub fn apoptosis_table(rows: &[ApoptosisRow]) -> Result<Table> {
    let mut table = Table::new([
        TREATMENT_COLUMN,
        APOPTOSIS_RATE_COLUMN,
        FIRST_UPDATE_COLUMN,
        LAST_UPDATE_COLUMN,
    ]);
    for row in rows {
        table.push_row(row.cells())?;
    }
    Ok(table)
}

/// Apoptosis report over `files`, one row per file in input order.
pub fn run_apoptosis(files: &[PathBuf], range: UpdateRange, config: &ApoptosisConfig) -> Result<Table> {
    let mut rows = Vec::with_capacity(files.len());
    for path in files {
        let run = Run::open(path)?;
        rows.push(apoptosis_row(&run, range, &config.codes)?);
    }
    apoptosis_table(&rows)
}

/// Writes `table` to `output`.
pub fn save_table(table: &Table, output: &Path) -> Result<()> {
    table
        .write(output)
        .with_context(|| format!("writing {}", output.display()))
}

/// Cross-run summary of one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    pub metric: ResourceMetric,
    pub summary: Summary,
}

/// Console form of a float: always with a fractional part, NaN as `nan`.
fn console_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:?}")
    }
}

impl std::fmt::Display for MetricSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}  mean/std:  {} / {}",
            self.metric.label(),
            console_float(self.summary.mean),
            console_float(self.summary.std)
        )
    }
}

/// Resource report over `files`: every catalog metric summarized across runs.
pub fn run_resource(
    files: &[PathBuf],
    range: UpdateRange,
    config: &ResourceConfig,
) -> Result<Vec<MetricSummary>> {
    let runs = files
        .iter()
        .map(Run::open)
        .collect::<cellstat_io::Result<Vec<_>>>()?;
    summarize_runs(&runs, range, config)
}

/// Summaries of the metric catalog over already loaded runs.
pub fn summarize_runs(
    runs: &[Run],
    range: UpdateRange,
    config: &ResourceConfig,
) -> Result<Vec<MetricSummary>> {
    let catalog = evaluate_catalog(runs, range, config)?;
    Ok(catalog
        .into_iter()
        .map(|values| MetricSummary {
            metric: values.metric,
            summary: Summary::of(&values.values),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellstat_data::{Dataset, Group};

    fn run(name: &str, apoptosis: &[Vec<u64>]) -> Run {
        let mut root = Group::new();
        root.set_attr("NLEV", vec![1]);
        root.put_dataset("Index/own", Dataset::from_u64(vec![0, 1]));
        for (update, codes) in apoptosis.iter().enumerate() {
            root.put_dataset(
                &format!("Apoptosis/upd_{update}"),
                Dataset::from_u64(codes.clone()),
            );
        }
        Run::from_document(name, root)
    }

    #[test]
    fn test_apoptosis_rows_keep_input_order() {
        let range = UpdateRange::new(0, 2).unwrap();
        let rows = vec![
            apoptosis_row(&run("x+treat=b+seed=1", &[vec![1, 0], vec![0, 0]]), range, &[1, 2])
                .unwrap(),
            apoptosis_row(&run("x+treat=a+seed=1", &[vec![2, 2], vec![1, 3]]), range, &[1, 2])
                .unwrap(),
        ];
        let table = apoptosis_table(&rows).unwrap();
        assert_eq!(
            table.to_csv(),
            "Treatment,Per-Cell-Update Apoptosis Rate,First Update,Last Update\n\
             treat=b,0.25,0,2\n\
             treat=a,0.75,0,2\n"
        );
    }

    #[test]
    fn test_empty_range_writes_empty_rate() {
        let range = UpdateRange::new(5, 5).unwrap();
        let row = apoptosis_row(&run("treat=a", &[]), range, &[1, 2]).unwrap();
        assert!(row.rate.is_nan());
        assert_eq!(row.cells()[1], "");
    }

    #[test]
    fn test_missing_treatment_fails() {
        let range = UpdateRange::new(0, 1).unwrap();
        assert!(apoptosis_row(&run("seed=1", &[vec![0, 0]]), range, &[1]).is_err());
    }

    #[test]
    fn test_summary_line_format() {
        let line = MetricSummary {
            metric: ResourceMetric::CellParent,
            summary: Summary { mean: 0.5, std: 0.25 },
        }
        .to_string();
        assert_eq!(line, "means_cell_parent  mean/std:  0.5 / 0.25");
    }

    #[test]
    fn test_summary_line_keeps_fraction_and_lowercase_nan() {
        let whole = MetricSummary {
            metric: ResourceMetric::Means,
            summary: Summary { mean: 15.0, std: 0.0 },
        };
        assert_eq!(whole.to_string(), "means  mean/std:  15.0 / 0.0");

        let undefined = MetricSummary {
            metric: ResourceMetric::SameChannelNot,
            summary: Summary::of(&[f64::NAN, 1.0]),
        };
        assert_eq!(
            undefined.to_string(),
            "means_samechannelNot_levs  mean/std:  nan / nan"
        );
    }
}
