use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use tracing::debug;

use crate::models::{ImportError, RawRow, RawValue};

/// Reads the first worksheet of a spreadsheet binary. The first row is
/// the header; every later row becomes one `RawRow`. Blank rows and
/// blank cells simply do not appear in the output.
pub fn read(bytes: &[u8]) -> Result<Vec<RawRow>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|error| ImportError::parse(format!("unreadable spreadsheet: {error}")))?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ImportError::parse("workbook contains no sheets"))?;

    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|error| ImportError::parse(format!("unreadable sheet '{first_sheet}': {error}")))?;

    debug!("Reading sheet '{first_sheet}' ({} rows including header)", range.height());

    Ok(rows_from_cells(range.rows()))
}

pub(super) fn rows_from_cells<'a>(mut rows: impl Iterator<Item = &'a [Data]>) -> Vec<RawRow> {
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    let columns: Vec<Option<String>> = header
        .iter()
        .map(|cell| match cell {
            Data::Empty => None,
            other => {
                let name = other.to_string().trim().to_string();
                (!name.is_empty()).then_some(name)
            }
        })
        .collect();

    rows.map(|cells| row_from_cells(&columns, cells))
        .filter(|row| !row.is_empty())
        .collect()
}

fn row_from_cells(columns: &[Option<String>], cells: &[Data]) -> RawRow {
    columns
        .iter()
        .zip(cells)
        .filter_map(|(column, cell)| {
            let column = column.clone()?;
            let value = cell_value(cell)?;
            Some((column, value))
        })
        .collect()
}

fn cell_value(cell: &Data) -> Option<RawValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(text) => (!text.is_empty()).then(|| RawValue::Text(text.clone())),
        Data::Float(number) => Some(RawValue::Number(*number)),
        Data::Int(number) => Some(RawValue::Number(*number as f64)),
        Data::Bool(flag) => Some(RawValue::Text(flag.to_string())),
        // Native date cells surface as day-count serials for the
        // date normalizer to resolve.
        Data::DateTime(datetime) => Some(RawValue::Number(datetime.as_f64())),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Some(RawValue::Text(text.clone())),
    }
}
