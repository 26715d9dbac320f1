//! Zone lookup, metric derivation and value formatting

pub mod assemble;
pub mod coerce;
pub mod format;
pub mod metric;
pub mod report;
pub mod resolver;
pub mod schema;

pub use assemble::{assemble, report_title, Placeholders};
pub use coerce::coerce;
pub use format::{format_billions, format_integer, format_millions, Format};
pub use metric::Metric;
pub use report::{build_report, ZoneReport};
pub use resolver::{resolve, Resolution, ZONE_COLUMN};
pub use schema::{Placeholder, Source, REPORT_SCHEMA};
