//! Store error types.

use std::path::PathBuf;

use mediqc_model::RuleError;
use thiserror::Error;

/// Store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("failed to {operation} file {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON with the wrong top-level shape.
    #[error("unexpected content in {path}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    /// Serializing data for a write failed.
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No stored rule has this id.
    #[error("rule not found: {id}")]
    RuleNotFound { id: String },

    /// A stored rule already uses this id.
    #[error("duplicate rule id: {id}")]
    DuplicateRuleId { id: String },

    /// Rule definition rejected before it was stored.
    #[error(transparent)]
    InvalidRule(#[from] RuleError),

    /// Temp file could not be renamed over the target.
    #[error("failed to replace {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
