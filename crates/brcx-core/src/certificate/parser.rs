//! Rule-based certificate parser.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::record::CertificateRecord;

use super::normalize::normalize_whitespace;
use super::rules::{extract_deductions, field_rules};
use super::validate::REQUIRED_FIELDS;

/// Result of certificate extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted certificate data.
    pub record: CertificateRecord,
    /// Extraction warnings (mandatory fields that came back empty).
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for certificate parsing.
pub trait CertificateParser {
    /// Parse certificate fields from raw text.
    ///
    /// Never fails: an absent field becomes an empty string in the record,
    /// so callers can tell "ran but found nothing" from a crash.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Parser applying the field pattern registry and the deduction extractor.
pub struct RuleBasedParser;

impl RuleBasedParser {
    /// Create a new rule-based parser.
    pub fn new() -> Self {
        Self
    }
}

impl Default for RuleBasedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CertificateParser for RuleBasedParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing certificate from {} characters of text", text.len());

        let text = normalize_whitespace(text);
        let mut record = CertificateRecord::default();
        let mut warnings = Vec::new();

        // Deduction block first: one shared context, five sibling fields.
        let deductions = extract_deductions(&text);
        record.commission = deductions.commission;
        record.discount = deductions.discount;
        record.insurance = deductions.insurance;
        record.freight = deductions.freight;
        record.other_deductions = deductions.other;

        // Remaining fields, each via its own fallback chain.
        for rule in field_rules() {
            match rule.extract(&text) {
                Some(value) => {
                    record.set(rule.name, value);
                }
                None => {
                    if REQUIRED_FIELDS.contains(&rule.name) {
                        warnings.push(format!("Could not extract {}", rule.name));
                    }
                }
            }
        }

        debug!(
            "Extracted certificate for firm {:?} with {} warnings",
            record.firm_name,
            warnings.len()
        );

        ExtractionResult {
            record,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
