use crate::input::{SourceError, header_name};
use crate::model::table::{Cell, RawTable};

/// Reads a delimited text score sheet. Rows may be ragged; short rows are padded
/// and surplus fields beyond the header are ignored. Non-UTF-8 bytes are replaced
/// rather than rejected.
pub fn parse_delimited(bytes: &[u8], delimiter: u8) -> Result<RawTable, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .byte_headers()
        .map_err(|e| SourceError::Parse(format!("header: {e}")))?
        .clone();
    if headers.is_empty() {
        return Err(SourceError::Parse("delimited source has no header".to_string()));
    }
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(idx, raw)| header_name(&String::from_utf8_lossy(raw), idx))
        .collect();

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(|e| SourceError::Parse(e.to_string()))?;
        let row = record
            .iter()
            .take(columns.len())
            .map(|field| Cell::from_text(&String::from_utf8_lossy(field)))
            .collect();
        rows.push(row);
    }

    Ok(RawTable::new(columns, rows))
}
