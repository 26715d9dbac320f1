//! MPA Report API Server module
//!
//! HTTP API that turns a spreadsheet upload and a zone name into the
//! rendered report. Run with `mpa-report serve` or `mpa-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server, ApiConfig};
