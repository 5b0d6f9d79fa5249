//! JSON record files: an array of flat objects, one object per record.

use std::path::Path;

use mediqc_model::{Dataset, Record, Value};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Reads a JSON records file into a dataset.
///
/// Columns are the object keys in first-seen order. A key missing from some
/// objects reads as empty in those records.
pub fn read_json_dataset(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::from_io(path, e))?;
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(IngestError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    let json: JsonValue = serde_json::from_str(text).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = json_to_dataset(json).map_err(|reason| IngestError::JsonShape {
        path: path.to_path_buf(),
        reason,
    })?;
    debug!(
        path = %path.display(),
        records = dataset.len(),
        columns = dataset.columns().len(),
        "JSON dataset loaded"
    );
    Ok(dataset)
}

/// Converts a parsed JSON document into a dataset, describing the first
/// shape problem found.
pub fn json_to_dataset(json: JsonValue) -> std::result::Result<Dataset, String> {
    let JsonValue::Array(items) = json else {
        return Err("expected an array of record objects".to_string());
    };

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let JsonValue::Object(fields) = item else {
            return Err(format!("record {} is not an object", idx + 1));
        };
        for name in fields.keys() {
            if !columns.contains(name) {
                columns.push(name.clone());
            }
        }
        records.push(
            fields
                .into_iter()
                .map(|(name, value)| (name, json_to_value(value)))
                .collect::<Record>(),
        );
    }

    Ok(Dataset::new(columns, records))
}

/// Nested arrays and objects are kept as their JSON text.
pub fn json_to_value(value: JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Empty,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => n.as_f64().map_or(Value::Empty, Value::Number),
        JsonValue::String(s) => Value::Text(s),
        other => Value::Text(other.to_string()),
    }
}
