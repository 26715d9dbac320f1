//! Spreadsheet importer: uploaded bytes → `Table`

use crate::error::{ReportError, ReportResult};
use crate::types::{Cell, Table};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Spreadsheet container, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Anything calamine reads: .xlsx, .xlsm, .xls, .xlsb, .ods
    Workbook,
    Csv,
}

impl SheetFormat {
    pub fn from_file_name(name: &str) -> ReportResult<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xls" | "xlsb" | "ods") => Ok(SheetFormat::Workbook),
            Some("csv") => Ok(SheetFormat::Csv),
            _ => Err(ReportError::invalid_input(
                "Invalid file type. Please upload an Excel or CSV file.",
            )),
        }
    }
}

/// Reads the first worksheet (or the CSV body) into a `Table`. The first
/// row supplies the column names.
pub struct SheetImporter {
    format: SheetFormat,
}

impl SheetImporter {
    pub fn new(format: SheetFormat) -> Self {
        Self { format }
    }

    /// Importer for an uploaded file, chosen by its name.
    pub fn for_file_name(name: &str) -> ReportResult<Self> {
        Ok(Self::new(SheetFormat::from_file_name(name)?))
    }

    /// Read a spreadsheet from disk.
    pub fn import_path<P: AsRef<Path>>(path: P) -> ReportResult<Table> {
        let path = path.as_ref();
        let importer = Self::for_file_name(&path.to_string_lossy())?;
        let bytes = std::fs::read(path)?;
        importer.import(bytes)
    }

    pub fn import(&self, bytes: Vec<u8>) -> ReportResult<Table> {
        let table = match self.format {
            SheetFormat::Workbook => self.import_workbook(bytes)?,
            SheetFormat::Csv => self.import_csv(&bytes)?,
        };
        info!(
            format = ?self.format,
            columns = table.headers().len(),
            rows = table.len(),
            "spreadsheet loaded"
        );
        Ok(table)
    }

    fn import_workbook(&self, bytes: Vec<u8>) -> ReportResult<Table> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| ReportError::invalid_input(format!("Failed to open workbook: {}", e)))?;

        let sheet_names = workbook.sheet_names().to_vec();
        debug!(?sheet_names, "workbook opened");

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ReportError::invalid_input("Workbook has no worksheets"))?
            .map_err(|e| ReportError::invalid_input(format!("Failed to read worksheet: {}", e)))?;

        self.range_to_table(&range)
    }

    fn range_to_table(&self, range: &Range<Data>) -> ReportResult<Table> {
        let mut rows = range.rows();
        let header = rows
            .next()
            .ok_or_else(|| ReportError::invalid_input("Worksheet is empty"))?;

        let column_names = header
            .iter()
            .enumerate()
            .map(|(col, cell)| match cell {
                Data::Empty => format!("col_{}", col),
                other => other.to_string(),
            })
            .collect();

        let mut table = Table::new(column_names);
        for row in rows {
            table.push_row(row.iter().map(convert_cell).collect());
        }
        Ok(table)
    }

    fn import_csv(&self, bytes: &[u8]) -> ReportResult<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| ReportError::invalid_input(format!("Failed to read CSV header: {}", e)))?;
        let column_names = headers
            .iter()
            .enumerate()
            .map(|(col, name)| {
                // Excel writes a BOM in front of "CSV UTF-8" exports
                let name = if col == 0 {
                    name.trim_start_matches('\u{feff}')
                } else {
                    name
                };
                if name.is_empty() {
                    format!("col_{}", col)
                } else {
                    name.to_string()
                }
            })
            .collect();

        let mut table = Table::new(column_names);
        for record in reader.records() {
            let record = record
                .map_err(|e| ReportError::invalid_input(format!("Failed to read CSV row: {}", e)))?;
            table.push_row(record.iter().map(Cell::from).collect());
        }
        Ok(table)
    }
}

/// Map a calamine cell onto the report's cell model.
fn convert_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        // Error cells keep their display text (#N/A, #DIV/0!, ...)
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}
