//! Tabular input consumed by the rule engine.

use std::collections::BTreeMap;

use crate::value::Value;

static EMPTY: Value = Value::Empty;

/// One row of a dataset. Fields that were never set read as [`Value::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&EMPTY)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

/// Ordered records plus the column list they were parsed with.
///
/// Row identity is the positional index; violation reports refer to rows by
/// that index only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset with an explicit column list.
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Creates a dataset whose columns are every field seen in `records`,
    /// in first-seen order. Fields within one record are visited by name.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for name in record.field_names() {
                if !columns.iter().any(|column| column == name) {
                    columns.push(name.to_string());
                }
            }
        }
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.columns.iter().any(|column| column == field)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates `(index, record)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Record)> {
        self.records.iter().enumerate()
    }
}
