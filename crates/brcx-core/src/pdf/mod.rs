//! PDF text extraction.
//!
//! The rest of the pipeline only sees [`DocumentTextExtractor`]; the
//! concrete PDF backends live behind it so the consolidator can be driven
//! by a stub in tests.

mod extractor;

pub use extractor::PdfTextExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Outcome of one text-extraction attempt.
///
/// `text` is `None` only when every backend failed outright. Short or
/// empty text is still returned as-is; deciding whether it is usable is
/// the consolidator's call.
#[derive(Debug, Clone)]
pub struct TextExtraction {
    /// Extracted text, if any backend produced output.
    pub text: Option<String>,
    /// Tag naming the backend that produced the text (or `"Error"`).
    pub method: String,
}

impl TextExtraction {
    /// Length of the extracted text with surrounding whitespace ignored.
    pub fn usable_len(&self) -> usize {
        self.text.as_deref().map(|t| t.trim().len()).unwrap_or(0)
    }
}

/// Obtains raw text for a named document.
pub trait DocumentTextExtractor {
    /// Extract text from the document's raw bytes. Never panics; total
    /// failure is reported as `text: None` with an error method tag.
    fn extract_text(&self, name: &str, data: &[u8]) -> TextExtraction;
}
