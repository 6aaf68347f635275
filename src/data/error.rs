use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a tabular source into a [`Dataset`](super::model::Dataset).
///
/// Every variant is fatal: a load either normalises every row or fails whole.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': {message}")]
    Malformed {
        row: usize,
        column: String,
        message: String,
    },

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl LoadError {
    pub(crate) fn malformed(row: usize, column: &str, message: impl Into<String>) -> Self {
        LoadError::Malformed {
            row,
            column: column.to_string(),
            message: message.into(),
        }
    }
}

/// Programmer error: a query named a column that cannot be queried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown field '{0}'")]
    UnknownField(String),
}

/// Failure while writing the table view out as CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}
