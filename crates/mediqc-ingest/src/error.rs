//! Error types for dataset ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a dataset file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("data file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is neither `.csv` nor `.json`.
    #[error("unsupported data file format: {path} (expected .csv or .json)")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// File is not valid JSON.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON parsed but is not an array of flat objects.
    #[error("unexpected JSON shape in {path}: {reason}")]
    JsonShape { path: PathBuf, reason: String },

    /// File has no header or no columns.
    #[error("data file is empty: {path}")]
    EmptyDataset { path: PathBuf },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// Maps an I/O error on `path`, separating a missing file from other failures.
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported_by_path() {
        let err = IngestError::from_io(
            std::path::Path::new("/data/records.csv"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(err.to_string(), "data file not found: /data/records.csv");
    }

    #[test]
    fn polars_errors_convert() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("年龄".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
