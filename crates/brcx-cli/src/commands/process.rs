//! Process command - extract data from a single certificate file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use brcx_core::batch::{BatchConsolidator, DocumentStatus, RawDocument};
use brcx_core::models::config::BrcxConfig;
use brcx_core::models::record::{CertificateRecord, all_columns};
use brcx_core::pdf::PdfTextExtractor;

use crate::export;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List missing mandatory fields
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // Load configuration
    let config = if let Some(path) = config_path {
        BrcxConfig::from_file(std::path::Path::new(path))?
    } else {
        BrcxConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let name = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document.pdf")
        .to_string();
    let data = fs::read(&args.input)?;

    let extractor = PdfTextExtractor::with_config(config.pdf.clone());
    let consolidator = BatchConsolidator::with_config(&config);
    let report = consolidator.run(&[RawDocument::new(name, data)], &extractor);

    let outcome = &report.outcomes[0];
    if outcome.status == DocumentStatus::Failed {
        anyhow::bail!(
            "No usable text could be extracted from {}",
            args.input.display()
        );
    }
    debug!(
        "Extraction via {} finished with status {}",
        outcome.extraction_method, outcome.status
    );

    let record = &report.records[0];

    if args.validate && !record.missing_fields.is_empty() && record.missing_fields != "None" {
        eprintln!("{}", style("Missing mandatory fields:").yellow());
        for field in record.missing_fields.split(", ") {
            eprintln!("  - {}", field);
        }
    }

    let output = format_record(record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_record(record: &CertificateRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => export::records_to_csv(std::slice::from_ref(record)),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_text(record: &CertificateRecord) -> String {
    let mut output = String::new();

    for column in all_columns() {
        output.push_str(&format!("{}: {}\n", column, record.cell(column)));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_text_lists_every_column() {
        let record = CertificateRecord::default();
        let text = format_text(&record);
        assert!(text.contains("Firm Name: \n"));
        assert!(text.contains("Missing Fields Count: 0\n"));
        assert_eq!(text.lines().count(), all_columns().len());
    }
}
