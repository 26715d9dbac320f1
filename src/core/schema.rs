//! The report layout: every template placeholder and where its value comes from.
//!
//! Column names match the monthly performance workbook exactly, including
//! the doubled space in `PBT 2025 YTD  ACHVD`.

use super::format::Format;
use super::metric::Metric;
use serde::Serialize;

/// How one placeholder gets its text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Source {
    Computed { metric: Metric, format: Format },
    Static { text: &'static str },
}

/// One template placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placeholder {
    pub key: &'static str,
    #[serde(flatten)]
    pub source: Source,
}

/// Placeholder filled from the requested zone name rather than the schema.
pub const TITLE_KEY: &str = "title";

const fn field(key: &'static str, column: &'static str, format: Format) -> Placeholder {
    Placeholder {
        key,
        source: Source::Computed {
            metric: Metric::Field { column },
            format,
        },
    }
}

const fn percent(key: &'static str, numerator: &'static str, denominator: &'static str) -> Placeholder {
    Placeholder {
        key,
        source: Source::Computed {
            metric: Metric::Ratio {
                numerator,
                denominator,
            },
            format: Format::Integer,
        },
    }
}

const fn sum(key: &'static str, columns: &'static [&'static str]) -> Placeholder {
    Placeholder {
        key,
        source: Source::Computed {
            metric: Metric::Sum { columns },
            format: Format::Integer,
        },
    }
}

const fn text(key: &'static str, text: &'static str) -> Placeholder {
    Placeholder {
        key,
        source: Source::Static { text },
    }
}

use Format::{Billions, Integer, Millions};

pub static REPORT_SCHEMA: &[Placeholder] = &[
    // Profit before tax
    field("PBT_value1", "PBT 2025 YTD  ACHVD", Billions),
    field("PBT_value2", "PBT 2025 FULL YR BGT", Billions),
    percent("PBT_value3", "PBT 2025 YTD  ACHVD", "PBT 2025 FULL YR BGT"),
    field("PBT_value4", "PBT 2025 YOY VAR", Billions),
    field("PBT_value5", "PBT Exp Run Rate", Billions),
    text("PBT_summary", "Insert PBT Summary Here"),
    // Demand deposits
    field("DDA_value1", "DDA May-25", Billions),
    field("DDA_value2", "DDA Jun-25", Billions),
    field("DDA_value3", "DDA Jul-25", Billions),
    percent("DDA_value4", "DDA Jul-25", "DDA 2025 FULL YR BGT"),
    field("DDA_value5", "DDA YTD Variance", Billions),
    text("DDA_summary", "Insert DDA Summary Here"),
    // Savings
    field("SAV_value1", "SAV May-25", Billions),
    field("SAV_value2", "SAV Jun-25", Billions),
    field("SAV_value3", "SAV Jul-25", Billions),
    percent("SAV_value4", "SAV Jul-25", "SAV 2025 FULL YR BGT"),
    field("SAV_value5", "SAV YTD Variance", Billions),
    text("SAV_summary", "Insert SAV Summary Here"),
    // Fixed deposits
    field("FD_value1", "FD May-25", Billions),
    field("FD_value2", "FD Jun-25", Billions),
    field("FD_value3", "FD Jul-25", Billions),
    percent("FD_value4", "FD Jul-25", "FD 2025 FULL YR BGT"),
    field("FD_value5", "FD YTD Variance", Billions),
    text("FD_summary", "Insert FD Summary Here"),
    // Domiciliary
    field("DP_value1", "DP May-25", Millions),
    field("DP_value2", "DP Jun-25", Millions),
    field("DP_value3", "DP Jul-25", Millions),
    percent("DP_value4", "DP Jul-25", "DP 2025 FULL YR BGT"),
    field("DP_value5", "DP YTD Variance", Millions),
    text("DP_summary", "Insert DP Summary Here"),
    // Risk assets
    field("TRA_value1", "TRA May-25", Billions),
    field("TRA_value2", "TRA Jun-25", Billions),
    field("TRA_value3", "TRA Jul-25", Billions),
    Placeholder {
        key: "TRA_value4",
        source: Source::Computed {
            metric: Metric::Scaled {
                column: "TRA Loan to Dep",
                factor: 100.0,
            },
            format: Integer,
        },
    },
    field("TRA_value5", "TRA YTD Variance", Billions),
    text("TRA_summary", "Insert TRA Summary Here"),
    // Average balance
    field("AB_value1", "AB Jun-25", Millions),
    field("AB_value2", "AB Jul-25", Millions),
    field("AB_value3", "AB VAR", Millions),
    text("AB_summary", "Insert AB Summary Here"),
    // Accounts opened
    field("AO_value1", "AO C/A Opened - Funded", Integer),
    field("AO_value2", "AO S/A Opened - Funded", Integer),
    field("AO_value3", "AO C/A Opened - Unfunded", Integer),
    field("AO_value4", "AO S/A Opened - Unfunded", Integer),
    field("AO_value5", "AO C/A Opened - Total", Integer),
    field("AO_value6", "AO S/A Opened - Total", Integer),
    // Cards
    sum("CDS_value1", &["CDS1 ACTIVE", "CDS2 ACTIVE"]),
    sum("CDS_value2", &["CDS1 INACTIVE", "CDS2 INACTIVE"]),
    sum("CDS_value3", &["CDS1 No. of Cards Issued", "CDS2 No. of Cards Issued"]),
    text("CDS_summary", "Insert CDS Summary Here"),
    // Customer enrolment
    field("CE_value1", "CE May-25", Integer),
    field("CE_value2", "CE Jun-25", Integer),
    field("CE_value3", "CE Jul-25", Integer),
    sum("CE_value4", &["CE May-25", "CE Jun-25", "CE Jul-25"]),
    // Agency onboarding
    field("AOB_value1", "AOB May-25", Integer),
    field("AOB_value2", "AOB Jun-25", Integer),
    field("AOB_value3", "AOB Jul-25", Integer),
    sum("AOB_value4", &["AOB May-25", "AOB Jun-25", "AOB Jul-25"]),
    // Point of sale terminals
    field("POS_value1", "POS ACTIVE", Integer),
    field("POS_value2", "POS INACTIVE", Integer),
    field("POS_value3", "POS NEWLY DEPLOYED", Integer),
    field("POS_value4", "POS RETRIEVED", Integer),
    text("POS_summary", "Insert POS Summary Here"),
    // NXP inflows
    field("NXP_value1", "NXP May-25", Millions),
    field("NXP_value2", "NXP Jun-25", Millions),
    field("NXP_value3", "NXP Jul-25", Millions),
    field("NXP_value4", "NXP YOY VAR", Millions),
];

/// Every placeholder key the report fills, `title` first.
pub fn placeholder_keys() -> impl Iterator<Item = &'static str> {
    std::iter::once(TITLE_KEY).chain(REPORT_SCHEMA.iter().map(|p| p.key))
}

/// Every workbook column the schema reads, deduplicated, in schema order.
pub fn source_columns() -> Vec<&'static str> {
    let mut columns: Vec<&'static str> = Vec::new();
    for placeholder in REPORT_SCHEMA {
        if let Source::Computed { metric, .. } = placeholder.source {
            for column in metric.columns() {
                if !columns.contains(&column) {
                    columns.push(column);
                }
            }
        }
    }
    columns
}
