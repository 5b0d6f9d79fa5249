//! CSV loading through Polars.

use std::path::Path;

use mediqc_model::{Dataset, Record};
use polars::prelude::*;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::polars_utils::any_to_value;

/// Reads a header-first CSV file into a Polars DataFrame.
///
/// Column dtypes are inferred over the whole file and date-like columns are
/// parsed, so numeric and date cells reach the rule engine typed. If typed
/// parsing still fails the file is re-read with every column as text.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    match read_frame(path, None, true) {
        Ok(df) => Ok(df),
        Err(_) => {
            warn!(
                path = %path.display(),
                "typed CSV parse failed; reading every column as text"
            );
            read_frame(path, Some(0), false).map_err(|e| IngestError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    }
}

/// `infer_rows` of `None` scans the full file; `Some(0)` reads all columns
/// as strings.
fn read_frame(
    path: &Path,
    infer_rows: Option<usize>,
    parse_dates: bool,
) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_rows)
        .map_parse_options(|options| options.with_try_parse_dates(parse_dates))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

/// Reads a CSV file into a dataset.
pub fn read_csv_dataset(path: &Path) -> Result<Dataset> {
    let df = read_csv_frame(path)?;
    if df.width() == 0 {
        return Err(IngestError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }
    let dataset = frame_to_dataset(&df)?;
    debug!(
        path = %path.display(),
        records = dataset.len(),
        columns = dataset.columns().len(),
        "CSV dataset loaded"
    );
    Ok(dataset)
}

/// Converts a DataFrame row by row into records, keeping column order.
pub fn frame_to_dataset(df: &DataFrame) -> Result<Dataset> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let mut record = Record::new();
        for (name, column) in columns.iter().zip(df.get_columns()) {
            record.insert(name.as_str(), any_to_value(column.get(row_idx)?));
        }
        records.push(record);
    }

    Ok(Dataset::new(columns, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn header_only_file_has_columns_and_no_records() {
        let file = create_temp_csv("科室,主要诊断\n");
        let dataset = read_csv_dataset(file.path()).unwrap();

        assert_eq!(dataset.columns(), ["科室", "主要诊断"]);
        assert!(dataset.is_empty());
    }

    #[test]
    fn empty_file_is_rejected() {
        let file = create_temp_csv("");
        let result = read_csv_dataset(file.path());

        assert!(matches!(result, Err(IngestError::EmptyDataset { .. })));
    }

    #[test]
    fn bom_is_stripped_from_first_column() {
        let file = create_temp_csv("\u{feff}科室,年龄\n骨科,20\n");
        let dataset = read_csv_dataset(file.path()).unwrap();

        assert!(dataset.has_field("科室"));
    }
}
