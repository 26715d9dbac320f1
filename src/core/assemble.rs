//! Turning a resolved zone row into template text.

use super::schema::{Source, REPORT_SCHEMA, TITLE_KEY};
use crate::types::Row;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

/// Placeholder name → display text, as consumed by the template renderer.
pub type Placeholders = BTreeMap<String, String>;

static TRAILING_TOTAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*total\s*$").expect("static pattern"));

/// Report title for a zone: `"Ikoyi 1 Total"` → `"IKOYI 1"`.
pub fn report_title(zone_name: &str) -> String {
    TRAILING_TOTAL
        .replace(zone_name, "")
        .trim()
        .to_uppercase()
}

/// Build the full placeholder map for one zone row.
///
/// Every schema entry produces a value, falling back to the format's
/// zero text when the source columns are blank or absent.
pub fn assemble(row: &Row<'_>, zone_name: &str) -> Placeholders {
    let mut out = Placeholders::new();
    out.insert(TITLE_KEY.to_string(), report_title(zone_name));

    for placeholder in REPORT_SCHEMA {
        let text = match placeholder.source {
            Source::Computed { metric, format } => {
                let value = metric.evaluate(row);
                debug!(key = placeholder.key, ?value, "derived");
                format.apply(value)
            }
            Source::Static { text } => text.to_string(),
        };
        out.insert(placeholder.key.to_string(), text);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::placeholder_keys;
    use crate::types::{Cell, Table};

    #[test]
    fn test_report_title() {
        assert_eq!(report_title("Ikoyi 1 Total"), "IKOYI 1");
        assert_eq!(report_title("  lekki total  "), "LEKKI");
        assert_eq!(report_title("Apapa TOTAL"), "APAPA");
        assert_eq!(report_title("Totally Yaba"), "TOTALLY YABA");
    }

    #[test]
    fn test_assemble_empty_row_fills_every_key() {
        let mut table = Table::new(vec!["ZONES".to_string()]);
        table.push_row(vec![Cell::from("Ikoyi 1 Total")]);
        let out = assemble(&table.row(0).unwrap(), "Ikoyi 1 Total");

        for key in placeholder_keys() {
            assert!(out.contains_key(key), "missing {}", key);
        }
        assert_eq!(out["PBT_value1"], "0B");
        assert_eq!(out["PBT_value3"], "0");
        assert_eq!(out["DP_value1"], "0M");
        assert_eq!(out["AO_value1"], "0");
        assert_eq!(out["TRA_value4"], "0");
        assert_eq!(out["CDS_summary"], "Insert CDS Summary Here");
    }
}
