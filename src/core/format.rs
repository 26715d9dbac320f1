//! Display formatting for report values.
//!
//! Source figures are in millions. `format_billions` switches to a `B`
//! suffix from 1,000 upwards; `format_millions` divides by 1,000 past the
//! same threshold but keeps the `M` suffix, which is what the existing
//! report documents show.
//!
//! One-decimal output keeps its trailing zero (`"500.0M"`, `"2.0B"`), as in
//! the existing documents. Only whole billions print without a decimal.

use num_format::{Locale, ToFormattedString};
use serde::Serialize;

/// How a placeholder value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Whole number with thousands separators. Missing renders as `"0"`.
    Integer,
    /// Millions-scale amount, abbreviated to `B` from 1,000. Missing renders as `"0B"`.
    Billions,
    /// Millions-scale amount, always `M`. Missing renders as `"0M"`.
    Millions,
}

impl Format {
    pub fn apply(self, value: Option<f64>) -> String {
        match self {
            Format::Integer => format_integer(value),
            Format::Billions => format_billions(value),
            Format::Millions => format_millions(value),
        }
    }

    /// Text used when the value is missing.
    pub fn fallback(self) -> &'static str {
        match self {
            Format::Integer => "0",
            Format::Billions => "0B",
            Format::Millions => "0M",
        }
    }
}

/// `1234567.8` → `"1,234,568"`
pub fn format_integer(value: Option<f64>) -> String {
    match value {
        Some(v) => with_separators(v),
        None => Format::Integer.fallback().to_string(),
    }
}

pub fn format_billions(value: Option<f64>) -> String {
    let Some(v) = value else {
        return Format::Billions.fallback().to_string();
    };
    if v.abs() < 1_000.0 {
        return format!("{}M", with_separators(v));
    }
    let billions = v / 1_000.0;
    if billions.fract() == 0.0 {
        format!("{:.0}B", billions)
    } else {
        format!("{:.1}B", billions)
    }
}

pub fn format_millions(value: Option<f64>) -> String {
    let Some(v) = value else {
        return Format::Millions.fallback().to_string();
    };
    if v >= 1_000.0 {
        format!("{:.1}M", v / 1_000.0)
    } else {
        format!("{:.1}M", v)
    }
}

/// Round to zero decimals and group the digits in threes.
fn with_separators(v: f64) -> String {
    let rounded = format!("{:.0}", v.abs());
    let grouped = match rounded.parse::<u128>() {
        Ok(n) => n.to_formatted_string(&Locale::en),
        Err(_) => rounded,
    };
    if v.is_sign_negative() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
