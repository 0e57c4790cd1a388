//! Error types for the unemployment pipeline.
//!
//! An empty selection is not an error: it flows through the pipeline as an
//! empty view and a `None` statistics block.

use std::io;
use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while loading or filtering the dataset.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source could not be read (missing file, unreadable bytes,
    /// unsupported format). Fatal to the whole pipeline.
    #[error("Source unavailable: {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    /// A required column is missing from the source.
    #[error("Required column '{column}' not found in source. Available columns: {available:?}")]
    SchemaError {
        column: String,
        available: Vec<String>,
    },

    /// Filter parameters with `year_min > year_max`.
    #[error("Invalid year range: {year_min} > {year_max}")]
    InvalidYearRange { year_min: i32, year_max: i32 },

    #[error("Data processing error: {0}")]
    Polars(#[from] PolarsError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PipelineError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        PipelineError::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience alias for pipeline results.
pub type PipelineResult<T> = Result<T, PipelineError>;
