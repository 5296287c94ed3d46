//! Type conversion subsystem: pure per-type conversions from a raw
//! trimmed token into a typed [`ParamValue`].
//!
//! Failures are recorded in the shared validation-error list rather than
//! returned eagerly, so every bad value in a request is reported in one
//! aggregate failure.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::json;

use crate::error::{ValidationError, ValidationErrors};
use crate::registry::DataType;
use crate::value::ParamValue;

/// Calendar formats accepted for colon-bearing DATETIME tokens, tried
/// after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Converts a raw token according to the field's declared data type.
///
/// On failure the error is appended to `errors` and `None` is returned;
/// the caller continues with the next token so all failures aggregate.
pub fn convert(
    field: &str,
    data_type: DataType,
    raw: &str,
    errors: &mut ValidationErrors,
) -> Option<ParamValue> {
    match data_type {
        DataType::String => Some(ParamValue::Text(raw.to_string())),
        DataType::Integer => match raw.parse::<i64>() {
            Ok(n) => Some(ParamValue::Int(n)),
            Err(_) => {
                errors.push(conversion_error("integer", field, raw));
                None
            }
        },
        DataType::Number => match raw.parse::<f64>() {
            Ok(n) => Some(ParamValue::Float(n)),
            Err(_) => {
                errors.push(conversion_error("numeric", field, raw));
                None
            }
        },
        DataType::Boolean => Some(ParamValue::Bool(parse_boolean(raw))),
        DataType::DateTime => match parse_datetime(raw) {
            Some(ts) => Some(ParamValue::DateTime(ts)),
            None => {
                errors.push(conversion_error("datetime", field, raw));
                None
            }
        },
    }
}

/// Case-insensitive boolean parse; never fails.
fn parse_boolean(raw: &str) -> bool {
    matches!(
        raw.to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}

/// Parses a DATETIME token.
///
/// Colon-bearing tokens are treated as calendar/time text; anything else
/// is interpreted as epoch milliseconds.
fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if raw.contains(':') {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    } else {
        let millis = raw.parse::<i64>().ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

fn conversion_error(kind: &str, field: &str, raw: &str) -> ValidationError {
    ValidationError::new(format!("invalid {kind} value for field {field}"))
        .with_data(json!({"field": field, "value": raw}))
}
