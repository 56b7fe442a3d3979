use serde_json::Value;

use crate::models::{ImportError, RawRow, RawValue};

/// Reads a structured-text payload. The payload must deserialize to a
/// sequence of objects; object keys become column names.
pub fn read(bytes: &[u8]) -> Result<Vec<RawRow>, ImportError> {
    let payload: Value = serde_json::from_slice(bytes)
        .map_err(|error| ImportError::parse(format!("invalid structured text: {error}")))?;

    let Value::Array(records) = payload else {
        return Err(ImportError::parse(
            "structured text payload must be a sequence of objects",
        ));
    };

    records.iter().map(row_from_record).collect()
}

fn row_from_record(record: &Value) -> Result<RawRow, ImportError> {
    let Value::Object(fields) = record else {
        return Err(ImportError::parse(
            "every structured text record must be an object",
        ));
    };

    Ok(fields
        .iter()
        .filter_map(|(column, value)| scalar_value(value).map(|value| (column.clone(), value)))
        .collect())
}

/// Non-scalar values (null, arrays, nested objects) read as absent so the
/// row validator reports them as missing fields.
fn scalar_value(value: &Value) -> Option<RawValue> {
    match value {
        Value::String(text) => Some(RawValue::Text(text.clone())),
        Value::Number(number) => number.as_f64().map(RawValue::Number),
        Value::Bool(flag) => Some(RawValue::Text(flag.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
