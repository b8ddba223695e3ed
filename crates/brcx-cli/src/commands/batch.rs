//! Batch processing command for multiple certificate files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use brcx_core::batch::{BatchConsolidator, DocumentStatus, RawDocument};
use brcx_core::models::config::BrcxConfig;
use brcx_core::pdf::PdfTextExtractor;

use crate::export;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for the consolidated report
    #[arg(short, long, default_value = "brcx-output")]
    output_dir: PathBuf,

    /// Skip writing the consolidated JSON file
    #[arg(long)]
    no_json: bool,

    /// Skip writing the consolidated CSV file
    #[arg(long)]
    no_csv: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        BrcxConfig::from_file(std::path::Path::new(path))?
    } else {
        BrcxConfig::default()
    };

    // Expand glob pattern; processing order follows the expansion order.
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("pdf")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Read inputs up front; unreadable files still become report rows.
    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document.pdf")
            .to_string();
        match fs::read(path) {
            Ok(data) => documents.push(RawDocument::new(name, data)),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                documents.push(RawDocument::new(name, Vec::new()));
            }
        }
    }

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let extractor = PdfTextExtractor::with_config(config.pdf.clone());
    let consolidator = BatchConsolidator::with_config(&config);
    let report = consolidator.run_with_progress(&documents, &extractor, |done, _total| {
        pb.set_position(done as u64);
    });

    pb.finish_with_message("Complete");

    // Write outputs
    fs::create_dir_all(&args.output_dir)?;

    if !args.no_json {
        let json_path = args.output_dir.join("consolidated.json");
        fs::write(&json_path, export::records_to_json(&report.records)?)?;
        debug!("Wrote {}", json_path.display());
    }

    if !args.no_csv {
        let csv_path = args.output_dir.join("consolidated.csv");
        fs::write(&csv_path, export::records_to_csv(&report.records)?)?;
        debug!("Wrote {}", csv_path.display());
    }

    export::write_workbook(&args.output_dir, &report)?;

    println!(
        "{} Report written to {}",
        style("✓").green(),
        args.output_dir.display()
    );

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.stats.total,
        start.elapsed()
    );
    println!(
        "   {} successful, {} partial, {} failed ({:.1}% success rate)",
        style(report.stats.successful).green(),
        style(report.stats.partial).yellow(),
        style(report.stats.failed).red(),
        report.stats.success_rate
    );

    println!();
    for outcome in &report.outcomes {
        let status = match outcome.status {
            DocumentStatus::Success => style("Success").green(),
            DocumentStatus::Partial => style("Partial").yellow(),
            DocumentStatus::Failed => style("Failed ").red(),
        };
        println!(
            "  {} {} (missing: {}, method: {})",
            status, outcome.file_name, outcome.missing, outcome.extraction_method
        );
    }

    Ok(())
}
