//! MPA Report API Server binary
//!
//! Serves report generation over HTTP.

use clap::Parser;
use mpa_report::api::{run_api_server, ApiConfig};
use mpa_report::api::server::DEFAULT_MAX_UPLOAD_BYTES;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mpa-server")]
#[command(version)]
#[command(about = "MPA Report API Server - zone reports from spreadsheet uploads")]
#[command(long_about = r#"
MPA Report API Server

Endpoints:
  - POST /generate-report  - multipart 'file' + 'zone_name'; returns the .docx
  - POST /api/v1/context   - same upload; returns placeholder values as JSON
  - GET  /health           - Health check
  - GET  /ping             - Liveness probe
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Features:
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM
  - JSON error envelope with request IDs
  - Tracing and structured logging (RUST_LOG)

Example usage:
  mpa-server --template mpatemplate.docx
  mpa-server --host 0.0.0.0 --port 3000

  curl -F file=@mpa.xlsx -F zone_name="Ikoyi 1 Total" \
    -o report.docx http://localhost:8080/generate-report
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "MPA_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "MPA_PORT")]
    port: u16,

    /// Word template the report is rendered into
    #[arg(short, long, default_value = "mpatemplate.docx", env = "MPA_TEMPLATE")]
    template: PathBuf,

    /// Largest accepted upload, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "MPA_MAX_UPLOAD")]
    max_upload: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        template_path: args.template,
        max_upload_bytes: args.max_upload,
    };

    run_api_server(config).await
}
