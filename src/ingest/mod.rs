mod spreadsheet;
mod text;

use std::path::Path;
use std::str::FromStr;

use crate::models::{ImportError, RawRow};

/// The operator-declared shape of the uploaded file.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FileFormat {
    Spreadsheet,
    StructuredText,
}

impl FileFormat {
    /// Best-effort guess from a file extension, for CLI convenience.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "xlsx" | "xls" | "xlsb" | "ods" => Some(FileFormat::Spreadsheet),
            "json" | "txt" => Some(FileFormat::StructuredText),
            _ => None,
        }
    }
}

impl FromStr for FileFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "spreadsheet" => Ok(FileFormat::Spreadsheet),
            "structured-text" => Ok(FileFormat::StructuredText),
            other => Err(format!("Unknown file format '{other}'")),
        }
    }
}

/// Reads an in-memory file buffer into loosely-typed rows.
///
/// No filesystem or network access happens here; callers hand over the
/// bytes they already read. Zero data rows is an error so later stages
/// can assume a non-empty batch.
pub fn ingest(bytes: &[u8], format: FileFormat) -> Result<Vec<RawRow>, ImportError> {
    let rows = match format {
        FileFormat::Spreadsheet => spreadsheet::read(bytes)?,
        FileFormat::StructuredText => text::read(bytes)?,
    };

    if rows.is_empty() {
        return Err(ImportError::EmptyFile);
    }

    Ok(rows)
}
