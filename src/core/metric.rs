//! Metric derivation from a resolved row.

use super::coerce::coerce;
use crate::types::Row;
use serde::Serialize;

/// A numeric value derived from one or more columns of the zone row.
///
/// Missing handling differs per kind and must stay that way: plain sums
/// propagate a missing addend, ratios and scaled values fall back to `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Metric {
    /// A single column, unchanged.
    Field { column: &'static str },
    /// Sum of columns; missing if any column is missing.
    Sum { columns: &'static [&'static str] },
    /// `numerator / denominator * 100`; `0` when either side is missing or
    /// the denominator is zero.
    Ratio {
        numerator: &'static str,
        denominator: &'static str,
    },
    /// A stored fraction scaled up, with missing or zero input read as `0`.
    Scaled { column: &'static str, factor: f64 },
}

impl Metric {
    pub fn evaluate(&self, row: &Row<'_>) -> Option<f64> {
        match *self {
            Metric::Field { column } => field(row, column),
            Metric::Sum { columns } => columns.iter().map(|c| field(row, c)).sum(),
            Metric::Ratio {
                numerator,
                denominator,
            } => match (field(row, numerator), field(row, denominator)) {
                (Some(n), Some(d)) if d != 0.0 => Some(n / d * 100.0),
                _ => Some(0.0),
            },
            Metric::Scaled { column, factor } => Some(field(row, column).unwrap_or(0.0) * factor),
        }
    }

    /// Columns this metric reads.
    pub fn columns(&self) -> Vec<&'static str> {
        match *self {
            Metric::Field { column } | Metric::Scaled { column, .. } => vec![column],
            Metric::Sum { columns } => columns.to_vec(),
            Metric::Ratio {
                numerator,
                denominator,
            } => vec![numerator, denominator],
        }
    }
}

/// Coerced value of `column`; an absent column reads as missing.
fn field(row: &Row<'_>, column: &str) -> Option<f64> {
    row.get(column).and_then(coerce)
}
