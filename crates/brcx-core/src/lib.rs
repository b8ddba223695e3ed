//! Core library for DGFT Bank Realisation Certificate extraction.
//!
//! This crate provides:
//! - PDF text extraction (pdf-extract with a lopdf fallback)
//! - Layered regex field extraction for the BRC template family
//! - Completeness validation against the mandatory field set
//! - Batch consolidation with per-document status tracking

pub mod batch;
pub mod certificate;
pub mod error;
pub mod models;
pub mod pdf;

pub use batch::{BatchConsolidator, BatchReport, BatchStats, DocumentOutcome, DocumentStatus, RawDocument};
pub use certificate::{CertificateParser, ExtractionResult, RuleBasedParser};
pub use error::{BrcxError, Result};
pub use models::config::BrcxConfig;
pub use models::record::{CertificateRecord, MissingCount};
pub use pdf::{DocumentTextExtractor, PdfTextExtractor, TextExtraction};
