//! The zone report pipeline: table in, placeholder map out.

use super::assemble::{assemble, report_title, Placeholders};
use super::resolver::resolve;
use crate::error::ReportResult;
use crate::types::Table;
use serde::Serialize;
use tracing::info;

/// Everything the template renderer and the API need for one zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneReport {
    /// Zone name as requested.
    pub zone: String,
    pub title: String,
    /// Rows that matched the zone; only the first was used.
    pub match_count: usize,
    pub placeholders: Placeholders,
}

impl ZoneReport {
    /// Download name for the rendered document, e.g. `IKOYI_1_Report.docx`.
    pub fn file_name(&self) -> String {
        format!("{}_Report.docx", self.title.replace(' ', "_"))
    }
}

/// Resolve `zone_name` in `table` and derive every placeholder value.
pub fn build_report(table: &Table, zone_name: &str) -> ReportResult<ZoneReport> {
    let resolution = resolve(table, zone_name)?;
    let placeholders = assemble(&resolution.row, zone_name);
    info!(
        zone = zone_name,
        row = resolution.row.index(),
        match_count = resolution.match_count,
        placeholders = placeholders.len(),
        "zone report assembled"
    );
    Ok(ZoneReport {
        zone: zone_name.to_string(),
        title: report_title(zone_name),
        match_count: resolution.match_count,
        placeholders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::types::Cell;

    fn table() -> Table {
        let mut table = Table::new(vec![
            "ZONES".to_string(),
            "PBT 2025 YTD  ACHVD".to_string(),
            "PBT 2025 FULL YR BGT".to_string(),
        ]);
        table.push_row(vec![
            Cell::from("Ikoyi 1 Total"),
            Cell::from("1,000,000"),
            Cell::from("2,000,000"),
        ]);
        table
    }

    #[test]
    fn test_build_report_percentage() {
        let report = build_report(&table(), "ikoyi 1 total").unwrap();
        assert_eq!(report.placeholders["PBT_value3"], "50");
        assert_eq!(report.placeholders["PBT_value1"], "1000B");
        assert_eq!(report.title, "IKOYI 1");
        assert_eq!(report.match_count, 1);
        assert_eq!(report.file_name(), "IKOYI_1_Report.docx");
    }

    #[test]
    fn test_build_report_unknown_zone() {
        assert!(matches!(
            build_report(&table(), "Victoria Island"),
            Err(ReportError::NotFound { .. })
        ));
    }
}
