//! Excel import/export for address books
//!
//! - Export: flat rows → single-sheet .xlsx
//! - Import: workbook bytes → header-keyed rows from the first sheet

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::ExcelImporter;
