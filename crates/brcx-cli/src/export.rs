//! Exporters for the consolidated batch report.
//!
//! Every export is schema-stable: each record row exposes the full column
//! set in the fixed vocabulary order, no matter how much was extracted.

use std::fs;
use std::path::Path;

use brcx_core::batch::BatchReport;
use brcx_core::models::record::{CertificateRecord, MissingCount, all_columns};

/// Serialize records as a pretty-printed JSON array.
pub fn records_to_json(records: &[CertificateRecord]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Render records as flat delimited text, one row per record.
pub fn records_to_csv(records: &[CertificateRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let columns = all_columns();

    wtr.write_record(&columns)?;
    for record in records {
        let row: Vec<String> = columns.iter().map(|c| record.cell(c)).collect();
        wtr.write_record(&row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Write the consolidated "workbook": full data, summary and statistics
/// sheets as CSV files inside `dir`.
pub fn write_workbook(dir: &Path, report: &BatchReport) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;

    fs::write(dir.join("all_data.csv"), records_to_csv(&report.records)?)?;
    fs::write(dir.join("summary.csv"), summary_csv(report)?)?;
    fs::write(dir.join("statistics.csv"), statistics_csv(report)?)?;

    Ok(())
}

fn summary_csv(report: &BatchReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "File Name",
        "Firm Name",
        "IEC",
        "Total Realised Value",
        "Currency",
        "Missing Fields",
        "Status",
    ])?;

    for record in &report.records {
        // The summary sheet's coarse status is stricter than the batch
        // classification: only a record with nothing missing is Complete.
        let status = if record.missing_count == MissingCount::Count(0) {
            "Complete"
        } else {
            "Partial"
        };

        wtr.write_record([
            record.file_name.as_str(),
            record.firm_name.as_str(),
            record.iec.as_str(),
            record.total_realised_value.as_str(),
            record.currency.as_str(),
            &record.missing_count.to_string(),
            status,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn statistics_csv(report: &BatchReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let stats = &report.stats;

    wtr.write_record(["Metric", "Value"])?;
    wtr.write_record(["Total Files Processed", &stats.total.to_string()])?;
    wtr.write_record(["Successful", &stats.successful.to_string()])?;
    wtr.write_record(["Partially Successful", &stats.partial.to_string()])?;
    wtr.write_record(["Failed", &stats.failed.to_string()])?;
    wtr.write_record(["Success Rate", &format!("{:.1}%", stats.success_rate)])?;
    wtr.write_record(["Processing Date", &stats.generated_at])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
