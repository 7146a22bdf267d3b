use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::input::{SourceError, header_name};
use crate::model::table::{Cell, RawTable};

/// Reads the first worksheet; its first row is the header.
pub fn parse_spreadsheet(bytes: &[u8]) -> Result<RawTable, SourceError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| SourceError::Parse(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SourceError::Parse("workbook has no worksheets".to_string()))?
        .map_err(|e| SourceError::Parse(e.to_string()))?;

    let mut iter = range.rows();
    let header = iter
        .next()
        .ok_or_else(|| SourceError::Parse("worksheet is empty".to_string()))?;
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| header_name(&convert_cell(cell).to_label(), idx))
        .collect();

    let rows = iter
        .map(|row| {
            row.iter()
                .take(columns.len())
                .map(convert_cell)
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(RawTable::new(columns, rows))
}

fn convert_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::String(s) => Cell::from_text(s),
        other => Cell::from_text(&other.to_string()),
    }
}
