use crate::core::schema::placeholder_keys;
use crate::core::{build_report, ZoneReport};
use crate::error::{ReportError, ReportResult};
use crate::excel::SheetImporter;
use crate::template::DocxTemplate;
use colored::Colorize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Output format for the `context` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ContextFormat {
    /// Aligned `key = value` lines
    #[default]
    Table,
    Json,
    Yaml,
}

fn load_report(input: &Path, zone: &str, verbose: bool) -> ReportResult<ZoneReport> {
    if verbose {
        println!("{}", "📖 Reading spreadsheet...".cyan());
    }
    let table = SheetImporter::import_path(input)?;
    if verbose {
        println!(
            "   {} columns, {} rows",
            table.headers().len(),
            table.len()
        );
    }

    let report = build_report(&table, zone)?;
    if report.match_count > 1 {
        println!(
            "{}",
            format!(
                "⚠️  '{}' matched {} rows; using the first one",
                zone, report.match_count
            )
            .yellow()
        );
    }
    Ok(report)
}

/// Execute the render command
pub fn render(
    input: PathBuf,
    zone: String,
    template: PathBuf,
    output: Option<PathBuf>,
    verbose: bool,
) -> ReportResult<PathBuf> {
    println!("{}", "📄 MPA Report - Rendering".bold().green());
    println!("   Spreadsheet: {}", input.display());
    println!("   Zone:        {}", zone.bright_yellow().bold());
    println!("   Template:    {}\n", template.display());

    let template = DocxTemplate::open(&template)?;
    let report = load_report(&input, &zone, verbose)?;

    if verbose {
        println!("{}", "🧮 Substituting placeholders...".cyan());
    }
    let document = template.render(&report.placeholders)?;

    let output = output.unwrap_or_else(|| PathBuf::from(report.file_name()));
    fs::write(&output, &document)?;

    println!("{}", "✅ Report generated!".bold().green());
    println!("   Title:  {}", report.title.bright_blue().bold());
    println!("   Output: {} ({} bytes)\n", output.display(), document.len());
    Ok(output)
}

/// Execute the context command: print the placeholder values for a zone
pub fn context(input: PathBuf, zone: String, format: ContextFormat) -> ReportResult<()> {
    let report = load_report(&input, &zone, false)?;

    match format {
        ContextFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ContextFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
        ContextFormat::Table => {
            println!("{}", format!("📊 {}", report.title).bold().green());
            let width = report.placeholders.keys().map(String::len).max().unwrap_or(0);
            for key in placeholder_keys() {
                if let Some(value) = report.placeholders.get(key) {
                    let padded = format!("{:<width$}", key, width = width);
                    println!("   {} = {}", padded.bright_blue(), value.bold());
                }
            }
        }
    }
    Ok(())
}

/// Execute the check-template command: every placeholder the template
/// declares must be one the report fills.
pub fn check_template(template: PathBuf) -> ReportResult<()> {
    println!("{}", "🔍 MPA Report - Template check".bold().green());
    println!("   Template: {}\n", template.display());

    let declared = DocxTemplate::open(&template)?.placeholders()?;
    let known: BTreeSet<&str> = placeholder_keys().collect();

    let mut unknown = Vec::new();
    for name in &declared {
        if known.contains(name.as_str()) {
            println!("   ✅ {}", name.cyan());
        } else {
            println!("   ❌ {}", name.red().bold());
            unknown.push(name.clone());
        }
    }

    let unused = known
        .iter()
        .filter(|k| !declared.contains(**k))
        .count();
    println!(
        "\n   {} declared, {} not filled by the report, {} report values unused",
        declared.len(),
        unknown.len(),
        unused
    );

    if unknown.is_empty() {
        println!("{}", "✅ Template is compatible".bold().green());
        Ok(())
    } else {
        Err(ReportError::render_failure(format!(
            "template uses placeholders the report does not fill: {}",
            unknown.join(", ")
        )))
    }
}
