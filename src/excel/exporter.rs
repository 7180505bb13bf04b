//! Excel exporter implementation - rows → .xlsx

use crate::error::{ContactsError, ContactsResult};
use crate::types::Row;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Minimum column width in character units
const MIN_COLUMN_WIDTH: usize = 15;

/// Writes flat rows into a single-sheet workbook
pub struct ExcelExporter {
    sheet_name: String,
}

impl ExcelExporter {
    /// Create a new Excel exporter writing to a sheet with this name
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// Export rows to an Excel .xlsx file
    pub fn export(&self, rows: &[Row], output_path: &Path) -> ContactsResult<()> {
        let mut workbook = self.build_workbook(rows)?;
        workbook
            .save(output_path)
            .map_err(|e| ContactsError::Export(format!("Failed to save Excel file: {}", e)))?;
        Ok(())
    }

    /// Export rows to in-memory .xlsx bytes
    pub fn to_bytes(&self, rows: &[Row]) -> ContactsResult<Vec<u8>> {
        let mut workbook = self.build_workbook(rows)?;
        workbook
            .save_to_buffer()
            .map_err(|e| ContactsError::Export(format!("Failed to build Excel file: {}", e)))
    }

    fn build_workbook(&self, rows: &[Row]) -> ContactsResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&self.sheet_name)
            .map_err(|e| ContactsError::Export(format!("Failed to set worksheet name: {}", e)))?;

        self.write_sheet(worksheet, rows)?;
        Ok(workbook)
    }

    fn write_sheet(&self, worksheet: &mut Worksheet, rows: &[Row]) -> ContactsResult<()> {
        let headers = Self::headers(rows);
        let bold = Format::new().set_bold();

        // Header row (row 0)
        for (col_idx, header) in headers.iter().enumerate() {
            let col = Self::column_index(col_idx)?;
            worksheet
                .write_string_with_format(0, col, header.as_str(), &bold)
                .map_err(|e| ContactsError::Export(format!("Failed to write header: {}", e)))?;
            worksheet
                .set_column_width(col, Self::column_width(header))
                .map_err(|e| ContactsError::Export(format!("Failed to set width: {}", e)))?;
        }

        // Data rows (starting at row 1); cells a row lacks stay blank
        for (row_idx, row) in rows.iter().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            for (label, value) in row.iter() {
                let Some(col_idx) = headers.iter().position(|h| h == label) else {
                    continue;
                };
                worksheet
                    .write_string(excel_row, Self::column_index(col_idx)?, value)
                    .map_err(|e| ContactsError::Export(format!("Failed to write cell: {}", e)))?;
            }
        }

        Ok(())
    }

    fn column_index(col_idx: usize) -> ContactsResult<u16> {
        u16::try_from(col_idx)
            .map_err(|_| ContactsError::Export(format!("Too many columns: {}", col_idx + 1)))
    }

    /// Union of all row labels, in the order they are first seen
    pub fn headers(rows: &[Row]) -> Vec<String> {
        let mut headers: Vec<String> = Vec::new();
        for row in rows {
            for label in row.labels() {
                if !headers.iter().any(|h| h == label) {
                    headers.push(label.to_string());
                }
            }
        }
        headers
    }

    /// Display width: twice the label length, at least 15 units
    pub fn column_width(label: &str) -> f64 {
        (label.chars().count() * 2).max(MIN_COLUMN_WIDTH) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rows() -> Vec<Row> {
        vec![
            Row::new().with("Name", "Alice").with("Phone", "1"),
            Row::new()
                .with("Name", "Bob")
                .with("Email", "b@x.io")
                .with("Phone", "2")
                .with("Phone2", "3"),
        ]
    }

    #[test]
    fn test_headers_union_in_first_seen_order() {
        assert_eq!(
            ExcelExporter::headers(&rows()),
            vec!["Name", "Phone", "Email", "Phone2"]
        );
        assert!(ExcelExporter::headers(&[]).is_empty());
    }

    #[test]
    fn test_column_width() {
        assert_eq!(ExcelExporter::column_width("Name"), 15.0);
        assert_eq!(ExcelExporter::column_width("Emergency Contact"), 34.0);
        // Counted in characters, not bytes
        assert_eq!(ExcelExporter::column_width("电话"), 15.0);
    }

    #[test]
    fn test_column_index_out_of_range_is_export_error() {
        assert_eq!(ExcelExporter::column_index(3).unwrap(), 3);
        assert!(matches!(
            ExcelExporter::column_index(70_000),
            Err(ContactsError::Export(_))
        ));
    }

    #[test]
    fn test_export_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("contacts.xlsx");

        ExcelExporter::new("Contacts")
            .export(&rows(), &output_path)
            .unwrap();
        assert!(output_path.exists());
    }

    #[test]
    fn test_to_bytes_is_zip() {
        let bytes = ExcelExporter::new("联系人").to_bytes(&rows()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_invalid_sheet_name_is_export_error() {
        let result = ExcelExporter::new("bad[name]").to_bytes(&rows());
        assert!(matches!(result, Err(ContactsError::Export(_))));
    }
}
