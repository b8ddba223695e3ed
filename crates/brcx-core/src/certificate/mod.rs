//! Certificate field extraction module.

pub mod normalize;
mod parser;
pub mod rules;
pub mod validate;

pub use parser::{CertificateParser, ExtractionResult, RuleBasedParser};
