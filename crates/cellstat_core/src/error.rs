//! Error types for run analysis.

use thiserror::Error;

/// Failures while reading arrays out of a run or reducing them.
///
/// None of these are recoverable: every variant means the input does not have
/// the layout the analysis expects.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// A group, dataset, or attribute is absent.
    #[error("missing key: {0}")]
    MissingKey(String),

    /// A dataset holds values that cannot be read as the requested kind.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: String,
    },

    /// Two arrays that are compared elementwise differ in length.
    #[error("length mismatch at {path}: expected {expected} agents, found {found}")]
    LengthMismatch {
        path: String,
        expected: usize,
        found: usize,
    },

    /// A neighbor or parent index points outside the agent range.
    #[error("index {index} out of range for {len} agents ({context})")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        context: String,
    },

    /// A reduction that has no defined value for an empty input.
    #[error("empty selection: {0}")]
    EmptySelection(String),

    /// An update range with `first > last`.
    #[error("invalid update range [{first}, {last})")]
    InvalidRange { first: u64, last: u64 },
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    #[must_use]
    pub fn missing<S: Into<String>>(key: S) -> Self {
        Self::MissingKey(key.into())
    }

    #[must_use]
    pub fn length_mismatch<S: Into<String>>(path: S, expected: usize, found: usize) -> Self {
        Self::LengthMismatch {
            path: path.into(),
            expected,
            found,
        }
    }

    #[must_use]
    pub fn out_of_range<S: Into<String>>(index: usize, len: usize, context: S) -> Self {
        Self::IndexOutOfRange {
            index,
            len,
            context: context.into(),
        }
    }
}
