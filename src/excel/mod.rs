//! Spreadsheet import
//!
//! Loads the uploaded workbook (or CSV export) into a `Table` that keeps
//! header names and row order exactly as uploaded.

mod importer;

pub use importer::{SheetFormat, SheetImporter};
