//! # cellstat IO
//!
//! I/O layer for the cellstat analysis tools.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - Loading and saving run documents (gzip-compressed or plain JSON)
//! - [`Run`], the [`cellstat_core::RunView`] over a loaded document
//! - CSV tables for reports and plot inputs
//! - Treatment extraction from run file names

/// Run document persistence
pub mod archive;
/// Error types and result aliases for I/O operations
pub mod error;
/// Typed access to the arrays of a loaded run
pub mod run;
/// CSV reading and writing
pub mod table;
/// Treatment names encoded in file names
pub mod treatment;

pub use archive::{load_document, save_document};
pub use error::{IoError, Result};
pub use run::Run;
pub use table::{format_float, parse_float, Table};
pub use treatment::extract_treatment;
