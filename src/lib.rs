//! # cellstat
//!
//! Batch reports over simulation run files: per-run apoptosis rates written
//! as CSV, and cross-run summaries of resource-contribution metrics.
//!
//! Analysis lives in `cellstat_core`, run loading and tables in
//! `cellstat_io`; this crate wires them into the `cellstat` command.

pub mod report;

pub use report::{run_apoptosis, run_resource, ApoptosisRow, MetricSummary};
