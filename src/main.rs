use clap::{Parser, Subcommand};
use mpa_report::api::server::DEFAULT_MAX_UPLOAD_BYTES;
use mpa_report::api::{run_api_server, ApiConfig};
use mpa_report::cli::{self, ContextFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mpa-report")]
#[command(about = "Zone performance reports: spreadsheet row in, Word document out.")]
#[command(long_about = "MPA Report - zone performance reports from the monthly workbook

Finds one zone's row (column ZONES, case-insensitive), derives the report
figures and fills the {{ placeholders }} of a Word template.

COMMANDS:
  render          - Render the report for one zone to a .docx
  context         - Print the placeholder values for one zone
  check-template  - List a template's placeholders and check them
  serve           - Run the HTTP API server

EXAMPLES:
  mpa-report render mpa.xlsx --zone \"Ikoyi 1 Total\" --template mpatemplate.docx
  mpa-report context mpa.xlsx --zone \"ikoyi 1 total\" --format json
  mpa-report check-template mpatemplate.docx
  mpa-report serve --port 3000")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Render the report document for one zone.

Reads the first worksheet of the spreadsheet (.xlsx, .xls, .xlsb, .ods or
.csv), picks the row whose ZONES cell matches --zone (ignoring case and
surrounding spaces) and writes the filled-in template.

If several rows match, the first one is used and a warning is printed.

The output defaults to <TITLE>_Report.docx in the current directory, where
TITLE is the zone name without a trailing 'Total', upper-cased.")]
    /// Render the report for one zone
    Render {
        /// Spreadsheet with one row per zone
        input: PathBuf,

        /// Zone name as it appears in the ZONES column
        #[arg(short, long)]
        zone: String,

        /// Word template with {{ placeholders }}
        #[arg(short, long, default_value = "mpatemplate.docx", env = "MPA_TEMPLATE")]
        template: PathBuf,

        /// Output .docx path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show verbose steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the placeholder values for one zone
    Context {
        /// Spreadsheet with one row per zone
        input: PathBuf,

        /// Zone name as it appears in the ZONES column
        #[arg(short, long)]
        zone: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ContextFormat::Table)]
        format: ContextFormat,
    },

    /// List a template's placeholders and check the report fills them all
    CheckTemplate {
        /// Word template with {{ placeholders }}
        template: PathBuf,
    },

    /// Run the HTTP API server
    Serve {
        /// Host address to bind to
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
    },
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    match args.command {
        Commands::Render {
            input,
            zone,
            template,
            output,
            verbose,
        } => {
            mpa_report::init_tracing(if verbose { "mpa_report=debug" } else { "warn" });
            cli::render(input, zone, template, output, verbose)?;
        }

        Commands::Context {
            input,
            zone,
            format,
        } => {
            mpa_report::init_tracing("warn");
            cli::context(input, zone, format)?;
        }

        Commands::CheckTemplate { template } => cli::check_template(template)?,

        Commands::Serve {
            host,
            port,
            template,
            max_upload,
        } => {
            let config = ApiConfig {
                host,
                port,
                template_path: template,
                max_upload_bytes: max_upload,
            };
            tokio::runtime::Runtime::new()?.block_on(run_api_server(config))?;
        }
    }

    Ok(())
}
