//! Zone row lookup

use crate::error::{ReportError, ReportResult};
use crate::types::{Cell, Row, Table};
use tracing::{debug, warn};

/// Column holding the zone identifier.
pub const ZONE_COLUMN: &str = "ZONES";

/// Outcome of a zone lookup.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// First matching row in table order.
    pub row: Row<'a>,
    /// Number of rows that matched. Anything above 1 means the sheet holds
    /// duplicate zone rows and only the first one is reported on.
    pub match_count: usize,
}

impl Resolution<'_> {
    pub fn is_ambiguous(&self) -> bool {
        self.match_count > 1
    }
}

/// Trim and upper-case a zone name for comparison.
pub fn normalize_zone(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Find the row whose `ZONES` cell equals `zone_name`, ignoring case and
/// surrounding whitespace. Only text cells are candidates; a numeric or
/// boolean zone cell never matches.
pub fn resolve<'a>(table: &'a Table, zone_name: &str) -> ReportResult<Resolution<'a>> {
    if !table.has_column(ZONE_COLUMN) {
        return Err(ReportError::invalid_input(format!(
            "spreadsheet has no '{}' column",
            ZONE_COLUMN
        )));
    }

    let wanted = normalize_zone(zone_name);
    let mut matches = table.rows().filter(|row| match row.get(ZONE_COLUMN) {
        Some(Cell::Text(name)) => !name.is_empty() && normalize_zone(name) == wanted,
        _ => false,
    });

    let row = matches.next().ok_or_else(|| ReportError::NotFound {
        zone: zone_name.to_string(),
    })?;
    let match_count = 1 + matches.count();

    if match_count > 1 {
        warn!(
            zone = zone_name,
            match_count,
            row = row.index(),
            "zone matched several rows, using the first"
        );
    } else {
        debug!(zone = zone_name, row = row.index(), "zone resolved");
    }

    Ok(Resolution { row, match_count })
}
