use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::model::table::RawTable;

pub mod cache;
pub mod delimited;
pub mod spreadsheet;

use delimited::parse_delimited;
use spreadsheet::parse_spreadsheet;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    Delimited(u8),
}

impl SourceFormat {
    /// Picks the format from the file name, looking through a trailing `.gz`.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        let ext = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        match ext {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => SourceFormat::Spreadsheet,
            "tsv" | "tab" => SourceFormat::Delimited(b'\t'),
            _ => SourceFormat::Delimited(b','),
        }
    }
}

pub fn load_table(path: &Path) -> Result<RawTable, SourceError> {
    let bytes = read_source_bytes(path)?;
    parse_table(&bytes, SourceFormat::from_path(path))
}

/// Spreadsheet sources that fail to open as a workbook are retried as CSV;
/// score sheets are often exported as CSV but keep their workbook name.
pub fn parse_table(bytes: &[u8], format: SourceFormat) -> Result<RawTable, SourceError> {
    match format {
        SourceFormat::Delimited(delimiter) => parse_delimited(bytes, delimiter),
        SourceFormat::Spreadsheet => match parse_spreadsheet(bytes) {
            Ok(table) => Ok(table),
            Err(err) => {
                warn!(
                    "could not read source as a spreadsheet ({}); retrying as CSV",
                    err
                );
                parse_delimited(bytes, b',').map_err(|csv_err| {
                    SourceError::Parse(format!(
                        "neither spreadsheet nor CSV: spreadsheet: {err}; csv: {csv_err}"
                    ))
                })
            }
        },
    }
}

pub fn read_source_bytes(path: &Path) -> Result<Vec<u8>, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }
    let mut reader = cache::open_maybe_gz(path)?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

pub(crate) fn header_name(raw: &str, idx: usize) -> String {
    let name = raw.trim().trim_start_matches('\u{feff}').trim();
    if name.is_empty() {
        let fallback = format!("column{}", idx + 1);
        warn!("blank header in column {}; using {}", idx + 1, fallback);
        fallback
    } else {
        name.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
