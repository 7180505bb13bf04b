//! Excel importer implementation - spreadsheet bytes → rows

use crate::error::{ContactsError, ContactsResult};
use crate::types::Row;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Reads header-keyed rows from the first worksheet of a workbook.
/// Accepts any format calamine detects (xlsx, xlsm, xlsb, xls, ods).
pub struct ExcelImporter;

impl ExcelImporter {
    /// Read rows from a file on disk
    pub fn read_file<P: AsRef<Path>>(path: P) -> ContactsResult<Vec<Row>> {
        let bytes = fs::read(path)?;
        Self::read_bytes(bytes)
    }

    /// Read rows from raw workbook bytes. Anything calamine cannot decode is
    /// an `ImportDecode` error; later sheets are ignored.
    pub fn read_bytes(bytes: Vec<u8>) -> ContactsResult<Vec<Row>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| ContactsError::ImportDecode(format!("Failed to open workbook: {}", e)))?;

        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(|e| {
                ContactsError::ImportDecode(format!("Failed to read first worksheet: {}", e))
            })?,
            None => return Ok(Vec::new()),
        };

        let rows = Self::rows_from_range(&range);
        debug!(rows = rows.len(), "read worksheet");
        Ok(rows)
    }

    /// First row is the header; each later row maps header → cell text
    fn rows_from_range(range: &Range<Data>) -> Vec<Row> {
        let mut sheet_rows = range.rows();

        let headers: Vec<String> = match sheet_rows.next() {
            Some(header_row) => header_row
                .iter()
                .enumerate()
                .map(|(col, cell)| Self::header_text(cell, col))
                .collect(),
            None => return Vec::new(),
        };

        sheet_rows
            .map(|cells| {
                let row: Row = headers
                    .iter()
                    .zip(cells.iter())
                    .map(|(header, cell)| (header.clone(), Self::cell_text(cell)))
                    .collect();
                row
            })
            .collect()
    }

    fn header_text(cell: &Data, col: usize) -> String {
        let text = Self::cell_text(cell);
        let text = text.trim();
        if text.is_empty() {
            format!("col_{}", col)
        } else {
            text.to_string()
        }
    }

    /// Scalar cell as text. Whole numbers drop the fractional part so phone
    /// numbers typed as numbers survive import.
    fn cell_text(cell: &Data) -> String {
        match cell {
            Data::Empty | Data::Error(_) => String::new(),
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", *f as i64)
                } else {
                    f.to_string()
                }
            }
            Data::Bool(b) => b.to_string(),
            other => other.to_string(),
        }
    }
}
