//! MPA Report - zone performance reports from a monthly spreadsheet
//!
//! This library finds one zone's row in the uploaded workbook, derives and
//! formats the report figures, and renders them into a Word template.
//!
//! # Features
//!
//! - Case- and whitespace-insensitive zone lookup on the `ZONES` column
//! - Lenient numeric coercion (separators, currency symbols, stray text)
//! - Billions/millions abbreviation, percentages and component sums
//! - `.xlsx`/`.xls`/`.xlsb`/`.ods` and `.csv` input
//! - `{{ placeholder }}` substitution in `.docx` templates
//! - HTTP API (`mpa-server`) and CLI (`mpa-report`)
//!
//! # Example
//!
//! ```no_run
//! use mpa_report::core::build_report;
//! use mpa_report::excel::SheetImporter;
//! use mpa_report::template::DocxTemplate;
//!
//! let table = SheetImporter::import_path("mpa.xlsx")?;
//! let report = build_report(&table, "Ikoyi 1 Total")?;
//!
//! println!("{}: {} placeholders", report.title, report.placeholders.len());
//!
//! let document = DocxTemplate::open("mpatemplate.docx")?.render(&report.placeholders)?;
//! std::fs::write(report.file_name(), document)?;
//! # Ok::<(), mpa_report::error::ReportError>(())
//! ```

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod template;
pub mod types;

// Re-export commonly used types
pub use error::{ReportError, ReportResult};
pub use types::{Cell, Row, Table};

/// Install the global `tracing` subscriber. `RUST_LOG` overrides
/// `default_filter`. Safe to call more than once.
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
