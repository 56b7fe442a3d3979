use std::fmt;
use std::fmt::{Display, Formatter};

use thiserror::Error;

/// The input column a validation error is attached to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RowField {
    ClientCode,
    Date,
    Amount,
    Remark,
}

impl Display for RowField {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            RowField::ClientCode => "client_code",
            RowField::Date => "date",
            RowField::Amount => "amount",
            RowField::Remark => "remark",
        };
        write!(formatter, "{name}")
    }
}

/// One operator-correctable problem on one input row.
///
/// Row numbers are 1-based and offset by one to account for the header
/// row, so they match what the operator sees in their spreadsheet.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ValidationError {
    pub row_number: u32,
    pub field: RowField,
    pub message: String,
}

impl ValidationError {
    pub fn new(row_number: u32, field: RowField, message: impl Into<String>) -> Self {
        Self {
            row_number,
            field,
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "Row {} [{}]: {}",
            self.row_number, self.field, self.message
        )
    }
}

/// Fatal ingestion failures. Unlike validation errors these abort the
/// attempt outright; no partial ingestion is possible.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("The file contains no data rows")]
    EmptyFile,
    #[error("Unable to parse file: {0}")]
    Parse(String),
}

impl ImportError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
