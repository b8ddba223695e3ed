//! PDF text extraction using pdf-extract with a lopdf fallback.

use lazy_static::lazy_static;
use lopdf::Document;
use regex::Regex;
use tracing::{debug, warn};

use super::{DocumentTextExtractor, Result, TextExtraction};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

lazy_static! {
    static ref BLANK_LINES: Regex = Regex::new(r"\n\s*\n").unwrap();
}

/// Two-stage PDF text extractor.
///
/// `pdf-extract` is tried first since its layout reconstruction is usually
/// better. If it errors or yields too little text, the document is re-read
/// with lopdf's per-page extraction, which copes with some files the
/// primary path chokes on.
pub struct PdfTextExtractor {
    config: PdfConfig,
}

impl PdfTextExtractor {
    /// Create an extractor with default thresholds.
    pub fn new() -> Self {
        Self {
            config: PdfConfig::default(),
        }
    }

    /// Create an extractor with the given configuration.
    pub fn with_config(config: PdfConfig) -> Self {
        Self { config }
    }

    fn extract_with_lopdf(&self, data: &[u8]) -> Result<String> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(PdfError::NoPages);
        }

        let page_numbers: Vec<u32> = pages.keys().copied().collect();
        let text = doc
            .extract_text(&page_numbers)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        Ok(clean_text(&text))
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTextExtractor for PdfTextExtractor {
    fn extract_text(&self, name: &str, data: &[u8]) -> TextExtraction {
        // Primary: pdf-extract on the whole document
        match pdf_extract::extract_text_from_mem(data) {
            Ok(text) if text.trim().len() > self.config.primary_text_threshold => {
                debug!("pdf-extract yielded {} chars for {}", text.trim().len(), name);
                return TextExtraction {
                    text: Some(text),
                    method: "pdf-extract".to_string(),
                };
            }
            Ok(text) => {
                debug!(
                    "pdf-extract yielded only {} chars for {}, trying lopdf",
                    text.trim().len(),
                    name
                );
            }
            Err(e) => {
                warn!("pdf-extract failed for {}: {}, trying lopdf", name, e);
            }
        }

        // Fallback: lopdf per-page extraction
        match self.extract_with_lopdf(data) {
            Ok(text) => {
                let method = if text.trim().len() > self.config.min_text_length {
                    "lopdf"
                } else {
                    "lopdf (limited)"
                };
                debug!(
                    "lopdf yielded {} chars for {} ({})",
                    text.trim().len(),
                    name,
                    method
                );
                TextExtraction {
                    text: Some(text),
                    method: method.to_string(),
                }
            }
            Err(e) => {
                warn!("All text extraction failed for {}: {}", name, e);
                TextExtraction {
                    text: None,
                    method: "Error".to_string(),
                }
            }
        }
    }
}

/// Strip NUL bytes and collapse runs of blank lines.
fn clean_text(text: &str) -> String {
    let text = text.replace('\u{0}', "");
    BLANK_LINES.replace_all(&text, "\n").into_owned()
}
