//! Row-record flattening for the tabular conversions.
//!
//! The first sheet row supplies the record keys; every following row
//! becomes one JSON object. The two conversion flavours differ only in
//! how blank cells render and whether fully-empty rows are kept.

use calamine::{DataType, Range};
use serde_json::{Map, Value};

use crate::matriz::tools::io::excel_read::cell_to_string;

/// How blank cells are rendered in row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankCells {
    /// Blank cells become JSON `null` (the `records` conversion).
    Null,
    /// Blank cells become the empty string (the `dump` conversion).
    EmptyString,
}

/// Flattens one sheet's range into JSON row records keyed by the header
/// row. Blank header cells synthesize a `Columna N` key (1-based column
/// number). With `drop_empty_rows`, rows whose cells are all empty are
/// skipped.
pub fn sheet_to_records(
    range: &Range<DataType>,
    blanks: BlankCells,
    drop_empty_rows: bool,
) -> Vec<Map<String, Value>> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let start_col = range.start().map(|(_, col)| col).unwrap_or(0);
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let label = cell_to_string(Some(cell));
            if label.is_empty() {
                format!("Columna {}", start_col + idx as u32 + 1)
            } else {
                label
            }
        })
        .collect();

    let mut records = Vec::new();
    for row in rows {
        if drop_empty_rows && row.iter().all(|cell| matches!(cell, DataType::Empty)) {
            continue;
        }

        let mut record = Map::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = match row.get(idx) {
                Some(cell) => cell_to_json(cell, blanks),
                None => blank_value(blanks),
            };
            record.insert(header.clone(), value);
        }
        records.push(record);
    }
    records
}

/// Maps a cell value onto JSON, keeping numbers and booleans typed.
/// Dates and durations surface as Excel serial numbers.
fn cell_to_json(cell: &DataType, blanks: BlankCells) -> Value {
    match cell {
        DataType::String(value) if value.is_empty() => blank_value(blanks),
        DataType::String(value) => Value::String(value.clone()),
        DataType::Int(value) => Value::from(*value),
        DataType::Float(value) | DataType::DateTime(value) => serde_json::Number::from_f64(*value)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        DataType::Bool(value) => Value::Bool(*value),
        DataType::Error(_) => blank_value(blanks),
        DataType::Empty => blank_value(blanks),
        other => Value::String(other.to_string()),
    }
}

fn blank_value(blanks: BlankCells) -> Value {
    match blanks {
        BlankCells::Null => Value::Null,
        BlankCells::EmptyString => Value::String(String::new()),
    }
}
