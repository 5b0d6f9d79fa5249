//! Polars `AnyValue` to record `Value` conversion.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use mediqc_model::Value;
use polars::prelude::*;

/// Days from 0001-01-01 (CE day 1) to the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Converts one cell into a record value.
///
/// Nulls become [`Value::Empty`], numeric and boolean cells keep their type,
/// temporal cells become dates. Anything else falls back to its text form.
pub fn any_to_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Empty,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => Value::Number(f64::from(v)),
        AnyValue::Int16(v) => Value::Number(f64::from(v)),
        AnyValue::Int32(v) => Value::Number(f64::from(v)),
        AnyValue::Int64(v) => Value::Number(v as f64),
        AnyValue::UInt8(v) => Value::Number(f64::from(v)),
        AnyValue::UInt16(v) => Value::Number(f64::from(v)),
        AnyValue::UInt32(v) => Value::Number(f64::from(v)),
        AnyValue::UInt64(v) => Value::Number(v as f64),
        AnyValue::Float32(v) => Value::Number(f64::from(v)),
        AnyValue::Float64(v) => Value::Number(v),
        AnyValue::String(s) => Value::Text(s.to_string()),
        AnyValue::StringOwned(s) => Value::Text(s.to_string()),
        AnyValue::Date(days) => days_to_date(days).map_or(Value::Empty, Value::from),
        AnyValue::Datetime(ts, unit, _) => {
            timestamp_to_datetime(ts, unit).map_or(Value::Empty, Value::Date)
        }
        other => Value::Text(other.to_string()),
    }
}

fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

fn timestamp_to_datetime(ts: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let datetime = match unit {
        TimeUnit::Nanoseconds => DateTime::from_timestamp_nanos(ts),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(ts)?,
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(ts)?,
    };
    Some(datetime.naive_utc())
}
