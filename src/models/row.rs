use std::collections::HashMap;

/// A single untyped cell value as it came out of the uploaded file.
///
/// Absent cells are not represented at all; a row simply has no entry for
/// that column. This keeps "missing" and "empty string" distinguishable,
/// which the validation rules rely on.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
}

impl RawValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(text) => Some(text),
            RawValue::Number(_) => None,
        }
    }

    /// Renders the value the way an operator typed it, for fields that
    /// accept either encoding (remark, amount).
    pub fn display(&self) -> String {
        match self {
            RawValue::Text(text) => text.clone(),
            RawValue::Number(number) => {
                if number.fract() == 0.0 && number.abs() < 1e15 {
                    format!("{}", *number as i64)
                } else {
                    format!("{number}")
                }
            }
        }
    }
}

/// One loosely-typed record produced by the file ingestor, keyed by the
/// column names taken from the header row (spreadsheet) or object keys
/// (structured text). Lives only for the duration of one import run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: HashMap<String, RawValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: RawValue) {
        self.fields.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.fields.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, RawValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
