//! Lenient numeric coercion of spreadsheet cells.
//!
//! Every character that is not an ASCII digit or `.` is dropped before
//! parsing, so thousands separators, currency symbols and stray letters
//! disappear. So does a leading minus sign: `"-1,234"` reads as `1234`.
//!
//! Numeric cells go through the same rule after being written out the way
//! the workbook's float text reads: exponent form below `1e-4` and from
//! `1e16` (`5e-05`, `1e+16`), so their digits run together.

use crate::types::Cell;

/// Coerce a raw cell to a number. `None` means the value is missing.
pub fn coerce(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => coerce_str(&float_text(*n)),
        other => coerce_str(&other.to_string()),
    }
}

/// Shortest round-trip text of `n`, switching to `d.ddde±XX` outside
/// `[1e-4, 1e16)`.
fn float_text(n: f64) -> String {
    let magnitude = n.abs();
    if n == 0.0 || !n.is_finite() || (1e-4..1e16).contains(&magnitude) {
        return n.to_string();
    }
    let sci = format!("{:e}", n);
    match sci.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(e) => format!("{}e{}{:02}", mantissa, if e < 0 { '-' } else { '+' }, e.abs()),
            Err(_) => sci,
        },
        None => sci,
    }
}

/// Coerce the textual form of a cell.
pub fn coerce_str(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|n| n.is_finite())
}
