//! Violation report helpers: summary totals and file export.

mod export;
mod summary;

pub use export::{
    CSV_HEADERS, CsvExportOptions, export_csv, export_json, write_csv, write_json,
};
pub use summary::{ReportSummary, flagged_records};
