//! Dataset ingestion for quality control.
//!
//! Loads the tabular output of upstream record parsers into a
//! [`Dataset`](mediqc_model::Dataset):
//!
//! - **CSV**: header-first files read through Polars with dtype inference
//!   and date parsing
//! - **JSON**: an array of flat objects
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mediqc_ingest::read_dataset;
//!
//! let dataset = read_dataset(Path::new("records.csv"))?;
//! println!("{} records", dataset.len());
//! ```

mod csv;
mod error;
mod json;
mod polars_utils;

use std::path::Path;

use mediqc_model::Dataset;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use csv::{frame_to_dataset, read_csv_dataset, read_csv_frame};
pub use json::{json_to_dataset, json_to_value, read_json_dataset};

// === Conversion ===
pub use polars_utils::any_to_value;

/// Reads a dataset, choosing the reader from the file extension.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => read_csv_dataset(path),
        Some("json") => read_json_dataset(path),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
