//! Batch consolidation of many documents into one report.
//!
//! Documents are processed in input order; each one's outcome is isolated,
//! so a failure never aborts the batch and every input yields exactly one
//! record row. The report is append-only while it is being built and
//! read-only afterwards.

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::certificate::validate::missing_required_fields;
use crate::certificate::{CertificateParser, RuleBasedParser};
use crate::models::config::BrcxConfig;
use crate::models::record::{CertificateRecord, MissingCount};
use crate::pdf::DocumentTextExtractor;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A named document awaiting extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// File name, used as the document's identity in the report.
    pub name: String,
    /// Raw bytes handed to the text extractor.
    pub data: Vec<u8>,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Final classification of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Extraction ran and fewer than the threshold of mandatory fields
    /// are missing.
    Success,
    /// Extraction ran but too many mandatory fields are missing. A
    /// document whose every field came back empty is still Partial:
    /// extraction success is about obtaining text, not finding fields.
    Partial,
    /// No usable text could be obtained; field extraction never ran.
    Failed,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Partial => write!(f, "Partial"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Per-document entry in the batch summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutcome {
    /// File identifier.
    pub file_name: String,
    /// Final status.
    pub status: DocumentStatus,
    /// Missing-field count, or the `All` sentinel for failures.
    pub missing: MissingCount,
    /// Text extraction method tag.
    pub extraction_method: String,
}

/// Aggregate counts over a whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStats {
    pub total: usize,
    pub successful: usize,
    pub partial: usize,
    pub failed: usize,
    /// Percentage of `Success` documents (0.0 when the batch is empty).
    pub success_rate: f64,
    /// Timestamp captured once at aggregation time.
    pub generated_at: String,
}

/// Consolidated result of one batch run. Record order matches input order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub records: Vec<CertificateRecord>,
    pub outcomes: Vec<DocumentOutcome>,
    pub stats: BatchStats,
}

/// Runs extraction and validation over a collection of documents.
pub struct BatchConsolidator {
    parser: RuleBasedParser,
    /// Extracted text below this length counts as unusable.
    min_usable_text: usize,
    /// A document is `Success` when missing fewer mandatory fields than this.
    success_threshold: usize,
}

impl BatchConsolidator {
    /// Create a consolidator with default thresholds.
    pub fn new() -> Self {
        Self::with_config(&BrcxConfig::default())
    }

    /// Create a consolidator with thresholds from the given configuration.
    pub fn with_config(config: &BrcxConfig) -> Self {
        Self {
            parser: RuleBasedParser::new(),
            min_usable_text: config.pdf.min_text_length,
            success_threshold: config.batch.success_missing_threshold,
        }
    }

    /// Process every document in input order.
    pub fn run<E: DocumentTextExtractor>(
        &self,
        documents: &[RawDocument],
        extractor: &E,
    ) -> BatchReport {
        self.run_with_progress(documents, extractor, |_, _| {})
    }

    /// Like [`BatchConsolidator::run`], reporting `(processed, total)`
    /// after each document. The callback is observational only and cannot
    /// alter outcomes.
    pub fn run_with_progress<E: DocumentTextExtractor>(
        &self,
        documents: &[RawDocument],
        extractor: &E,
        mut on_progress: impl FnMut(usize, usize),
    ) -> BatchReport {
        let total = documents.len();
        let mut records = Vec::with_capacity(total);
        let mut outcomes = Vec::with_capacity(total);

        for (index, document) in documents.iter().enumerate() {
            let (record, outcome) = self.process_document(document, extractor);
            records.push(record);
            outcomes.push(outcome);
            on_progress(index + 1, total);
        }

        let stats = aggregate(&outcomes);
        debug!(
            "Batch complete: {}/{} successful, {} partial, {} failed",
            stats.successful, stats.total, stats.partial, stats.failed
        );

        BatchReport {
            records,
            outcomes,
            stats,
        }
    }

    fn process_document<E: DocumentTextExtractor>(
        &self,
        document: &RawDocument,
        extractor: &E,
    ) -> (CertificateRecord, DocumentOutcome) {
        let extraction = extractor.extract_text(&document.name, &document.data);
        let processed_at = Local::now().format(TIMESTAMP_FORMAT).to_string();

        if extraction.usable_len() < self.min_usable_text {
            warn!(
                "No usable text from {} ({} chars, method {}), marking failed",
                document.name,
                extraction.usable_len(),
                extraction.method
            );
            let record = CertificateRecord::failure(&document.name, &processed_at);
            let outcome = DocumentOutcome {
                file_name: document.name.clone(),
                status: DocumentStatus::Failed,
                missing: MissingCount::All,
                extraction_method: record.extraction_method.clone(),
            };
            return (record, outcome);
        }

        let text = extraction.text.as_deref().unwrap_or_default();
        let result = self.parser.parse(text);
        let mut record = result.record;

        record.file_name = document.name.clone();
        record.extraction_method = extraction.method.clone();
        record.processing_date = processed_at;

        let missing = missing_required_fields(&record);
        record.missing_count = MissingCount::Count(missing.len());
        record.missing_fields = if missing.is_empty() {
            "None".to_string()
        } else {
            missing.join(", ")
        };

        let status = if missing.len() < self.success_threshold {
            DocumentStatus::Success
        } else {
            DocumentStatus::Partial
        };

        let outcome = DocumentOutcome {
            file_name: document.name.clone(),
            status,
            missing: MissingCount::Count(missing.len()),
            extraction_method: extraction.method,
        };

        (record, outcome)
    }
}

impl Default for BatchConsolidator {
    fn default() -> Self {
        Self::new()
    }
}

fn aggregate(outcomes: &[DocumentOutcome]) -> BatchStats {
    let total = outcomes.len();
    let successful = outcomes
        .iter()
        .filter(|o| o.status == DocumentStatus::Success)
        .count();
    let partial = outcomes
        .iter()
        .filter(|o| o.status == DocumentStatus::Partial)
        .count();
    let failed = outcomes
        .iter()
        .filter(|o| o.status == DocumentStatus::Failed)
        .count();

    let success_rate = if total > 0 {
        (successful as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    BatchStats {
        total,
        successful,
        partial,
        failed,
        success_rate,
        generated_at: Local::now().format(TIMESTAMP_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::pdf::TextExtraction;

    /// Maps document names to canned extraction outcomes.
    struct StubExtractor {
        responses: HashMap<String, TextExtraction>,
    }

    impl StubExtractor {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
            }
        }

        fn with_text(mut self, name: &str, text: &str) -> Self {
            self.responses.insert(
                name.to_string(),
                TextExtraction {
                    text: Some(text.to_string()),
                    method: "pdf-extract".to_string(),
                },
            );
            self
        }

        fn with_failure(mut self, name: &str) -> Self {
            self.responses.insert(
                name.to_string(),
                TextExtraction {
                    text: None,
                    method: "Error".to_string(),
                },
            );
            self
        }
    }

    impl DocumentTextExtractor for StubExtractor {
        fn extract_text(&self, name: &str, _data: &[u8]) -> TextExtraction {
            self.responses
                .get(name)
                .cloned()
                .unwrap_or_else(|| TextExtraction {
                    text: None,
                    method: "Error".to_string(),
                })
        }
    }

    const COMPLETE_TEXT: &str = "\
        1 Firm Name ACME EXPORTS \
        2 Address/GSTIN 123 MG Road, Pune \
        3 IEC 0123456789 \
        4 Shipping Bill / Invoice No. 654321 \
        5 Shipping Bill / Invoice Date 2024-01-15 \
        6 Shipping Bill Port INMAA1 \
        7 Bank Name STATE BANK OF INDIA \
        8 Bill ID No. AB123 \
        9 Bank Realisation Certificate No. XY99A Dated 2024-02-01 \
        10 Date of Realisation of Money by Bank 2024-01-20 \
        11 Total Realised Value 50,000.00 \
        13 Net Realised Value 49,965.00 \
        14 Currency of Realization USD";

    // Firm, address and IEC only: six mandatory fields missing.
    const SPARSE_TEXT: &str = "1 Firm Name ACME EXPORTS 2 Address/GSTIN 123 MG Road, Pune \
        3 IEC 0123456789 and enough padding to clear the usability threshold";

    fn doc(name: &str) -> RawDocument {
        RawDocument::new(name, Vec::new())
    }

    #[test]
    fn test_mixed_batch_statuses_and_rate() {
        let extractor = StubExtractor::new()
            .with_text("a.pdf", COMPLETE_TEXT)
            .with_text("b.pdf", COMPLETE_TEXT)
            .with_text("c.pdf", SPARSE_TEXT);

        let consolidator = BatchConsolidator::new();
        let report = consolidator.run(&[doc("a.pdf"), doc("b.pdf"), doc("c.pdf")], &extractor);

        assert_eq!(report.stats.total, 3);
        assert_eq!(report.stats.successful, 2);
        assert_eq!(report.stats.partial, 1);
        assert_eq!(report.stats.failed, 0);
        assert!((report.stats.success_rate - 66.666).abs() < 0.1);

        assert_eq!(report.outcomes[0].status, DocumentStatus::Success);
        assert_eq!(report.outcomes[2].status, DocumentStatus::Partial);
        assert_eq!(report.outcomes[2].missing, MissingCount::Count(6));
    }

    // Items 1-5 present: Bank Name, Total, Net and Currency missing (4).
    const FOUR_MISSING_TEXT: &str = "1 Firm Name ACME EXPORTS \
        2 Address/GSTIN 123 MG Road, Pune 3 IEC 0123456789 \
        4 Shipping Bill / Invoice No. 654321 \
        5 Shipping Bill / Invoice Date 2024-01-15";

    // Items 1-4 present: the invoice date joins the missing set (5).
    const FIVE_MISSING_TEXT: &str = "1 Firm Name ACME EXPORTS \
        2 Address/GSTIN 123 MG Road, Pune 3 IEC 0123456789 \
        4 Shipping Bill / Invoice No. 654321";

    #[test]
    fn test_success_threshold_boundary() {
        let extractor = StubExtractor::new()
            .with_text("four.pdf", FOUR_MISSING_TEXT)
            .with_text("five.pdf", FIVE_MISSING_TEXT);

        let consolidator = BatchConsolidator::new();
        let report = consolidator.run(&[doc("four.pdf"), doc("five.pdf")], &extractor);

        // Missing fewer than five mandatory fields is still Success;
        // exactly five tips over to Partial.
        assert_eq!(report.outcomes[0].missing, MissingCount::Count(4));
        assert_eq!(report.outcomes[0].status, DocumentStatus::Success);
        assert_eq!(report.outcomes[1].missing, MissingCount::Count(5));
        assert_eq!(report.outcomes[1].status, DocumentStatus::Partial);
    }

    #[test]
    fn test_short_text_fails_without_field_extraction() {
        let extractor = StubExtractor::new().with_text("tiny.pdf", "only thirty characters here..");

        let consolidator = BatchConsolidator::new();
        let report = consolidator.run(&[doc("tiny.pdf")], &extractor);

        assert_eq!(report.outcomes[0].status, DocumentStatus::Failed);
        let record = &report.records[0];
        assert_eq!(record.extraction_method, "Failed");
        assert_eq!(record.missing_count, MissingCount::All);
        assert_eq!(record.missing_fields, "File processing failed");
        // Field matching never ran, so even deductions stay empty.
        assert_eq!(record.commission, "");
    }

    #[test]
    fn test_failed_extraction_is_isolated() {
        let extractor = StubExtractor::new()
            .with_failure("bad.pdf")
            .with_text("good.pdf", COMPLETE_TEXT);

        let consolidator = BatchConsolidator::new();
        let report = consolidator.run(&[doc("bad.pdf"), doc("good.pdf")], &extractor);

        // The failure is a full row, not a dropped document.
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.outcomes[0].status, DocumentStatus::Failed);
        assert_eq!(report.outcomes[1].status, DocumentStatus::Success);
        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.stats.successful, 1);
    }

    #[test]
    fn test_report_preserves_input_order() {
        let extractor = StubExtractor::new()
            .with_text("z.pdf", COMPLETE_TEXT)
            .with_failure("m.pdf")
            .with_text("a.pdf", SPARSE_TEXT);

        let consolidator = BatchConsolidator::new();
        let report = consolidator.run(&[doc("z.pdf"), doc("m.pdf"), doc("a.pdf")], &extractor);

        let names: Vec<&str> = report.records.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["z.pdf", "m.pdf", "a.pdf"]);
    }

    #[test]
    fn test_empty_fields_still_partial_not_failed() {
        // Enough text to be usable, but nothing matches any pattern.
        let noise = "x".repeat(200);
        let extractor = StubExtractor::new().with_text("noise.pdf", &noise);

        let consolidator = BatchConsolidator::new();
        let report = consolidator.run(&[doc("noise.pdf")], &extractor);

        assert_eq!(report.outcomes[0].status, DocumentStatus::Partial);
        assert_eq!(report.outcomes[0].missing, MissingCount::Count(9));
        // Extraction ran, so the deduction default applies.
        assert_eq!(report.records[0].commission, "0.00");
    }

    #[test]
    fn test_complete_record_missing_fields_says_none() {
        let extractor = StubExtractor::new().with_text("a.pdf", COMPLETE_TEXT);
        let report = BatchConsolidator::new().run(&[doc("a.pdf")], &extractor);

        let record = &report.records[0];
        assert_eq!(record.missing_count, MissingCount::Count(0));
        assert_eq!(record.missing_fields, "None");
        assert_eq!(record.extraction_method, "pdf-extract");
        assert_eq!(record.file_name, "a.pdf");
    }

    #[test]
    fn test_empty_batch_rate_is_zero() {
        let extractor = StubExtractor::new();
        let report = BatchConsolidator::new().run(&[], &extractor);
        assert_eq!(report.stats.total, 0);
        assert_eq!(report.stats.success_rate, 0.0);
    }

    #[test]
    fn test_progress_callback_sees_every_document() {
        let extractor = StubExtractor::new()
            .with_text("a.pdf", COMPLETE_TEXT)
            .with_failure("b.pdf");

        let mut seen = Vec::new();
        BatchConsolidator::new().run_with_progress(
            &[doc("a.pdf"), doc("b.pdf")],
            &extractor,
            |done, total| seen.push((done, total)),
        );
        assert_eq!(seen, vec![(1, 2), (2, 2)]);
    }
}
