//! The ordered field pattern registry.
//!
//! Patterns assume whitespace-normalized single-line text. The `regex`
//! crate has no lookaround, so boundary context that the stricter
//! candidates anchor on (the next item's numbering and label) is matched
//! and consumed outside the capture group instead.

use lazy_static::lazy_static;

use super::{CandidatePattern, Composition, FieldRule};

fn pat(pattern: &str) -> CandidatePattern {
    CandidatePattern::new(pattern, Composition::FirstGroup)
}

fn dated(pattern: &str) -> CandidatePattern {
    CandidatePattern::new(pattern, Composition::CertificateDated)
}

lazy_static! {
    static ref FIELD_RULES: Vec<FieldRule> = vec![
        FieldRule::new(
            "Firm Name",
            vec![
                pat(r"1\s+Firm Name\s+([^2]+?)\s*2\s+Address"),
                pat(r"Firm Name\s+([A-Z\s&.,-]+?)\s*(?:Address|2\s)"),
                pat(r"1\s*Firm Name\s*([A-Z\s&.,-]+)"),
            ],
        ),
        FieldRule::new(
            "Address/GSTIN",
            vec![
                pat(r"2\s+Address/GSTIN\s+(.+?)\s*3\s+IEC"),
                pat(r"Address/GSTIN\s+([^3]+?)\s*3\s+IEC"),
                pat(r"2\s*Address/GSTIN\s*([A-Z0-9\s,.\-/&]+?)\s*3"),
            ],
        ),
        FieldRule::new(
            "IEC",
            vec![
                pat(r"3\s+IEC\s+(\d+)"),
                pat(r"IEC\s+(\d{10})"),
                pat(r"3\s*IEC\s*(\d+)"),
            ],
        ),
        FieldRule::new(
            "Shipping Bill / Invoice No.",
            vec![
                pat(r"4\s+Shipping Bill / Invoice No\.\s+(\d+)"),
                pat(r"Shipping Bill / Invoice No\.\s+(\d+)"),
                pat(r"4\s*Shipping Bill.*?No\.?\s*(\d+)"),
            ],
        ),
        FieldRule::new(
            "Shipping Bill / Invoice Date",
            vec![
                pat(r"5\s+Shipping Bill / Invoice Date\s+([\d-]+)"),
                pat(r"Shipping Bill / Invoice Date\s+([\d-]+)"),
                pat(r"5\s*Shipping Bill.*?Date\s*([\d-]+)"),
            ],
        ),
        FieldRule::new(
            "Shipping Bill Port",
            vec![
                pat(r"6\s+Shipping Bill Port\s+([A-Z0-9]+)"),
                pat(r"Shipping Bill Port\s+([A-Z0-9]+)"),
                pat(r"6\s*Shipping Bill Port\s*([A-Z0-9]+)"),
            ],
        ),
        FieldRule::new(
            "Bank Name",
            vec![
                pat(r"7\s+Bank Name\s+([A-Z\s&]+?)\s*8\s+Bill"),
                pat(r"Bank Name\s+([A-Z\s&]+?)\s*(?:Bill|8\s)"),
                pat(r"7\s*Bank Name\s*([A-Z\s&]+)"),
            ],
        ),
        FieldRule::new(
            "Bill ID No.",
            vec![
                pat(r"8\s+Bill ID No\.\s+([A-Z0-9]+)"),
                pat(r"Bill ID No\.\s+([A-Z0-9]+)"),
                pat(r"8\s*Bill ID No\.?\s*([A-Z0-9]+)"),
            ],
        ),
        FieldRule::new(
            "Bank Realisation Certificate No.",
            vec![
                dated(r"(?:9\s+)?Bank\s+Realisation\s+Certificate\s+No\.\s+([A-Z0-9]+)\s+Dated\s+([\d-]+)"),
                dated(r"Certificate\s+No\.\s+([A-Z0-9]+)\s+Dated\s+([\d-]+)"),
                dated(r"([A-Z0-9]+)\s+Dated\s+([\d-]+)"),
            ],
        ),
        FieldRule::new(
            "Date of Realisation of Money by Bank",
            vec![
                pat(r"10\s+Date\s+of\s+Realisation\s+of\s+Money\s+by\s+Bank\s+([\d-]+)"),
                pat(r"Date\s+of\s+Realisation\s+of\s+Money\s+by\s+Bank\s+([\d-]+)"),
                pat(r"Realisation\s+of\s+Money\s+by\s+Bank\s+([\d-]+)"),
                pat(r"by\s+Bank\s+([\d-]+)\s+11"),
                pat(r"Money\s+by\s+Bank\s+([\d-]+)"),
            ],
        ),
        FieldRule::new(
            "Total Realised Value",
            vec![
                pat(r"11\s+Total Realised Value\s+([\d,\.]+)"),
                pat(r"Total Realised Value\s+([\d,\.]+)"),
                pat(r"11\s*Total.*?Value\s*([\d,\.]+)"),
            ],
        ),
        FieldRule::new(
            "Net Realised Value",
            vec![
                pat(r"13\s+Net Realised Value\s+([\d,\.]+)"),
                pat(r"Net Realised Value\s+([\d,\.]+)"),
                pat(r"13\s*Net.*?Value\s*([\d,\.]+)"),
            ],
        ),
        FieldRule::new(
            "Currency of Realization",
            vec![
                pat(r"14\s+Currency of Realization\s+([A-Z]+)"),
                pat(r"Currency of Realization\s+([A-Z]+)"),
                pat(r"14\s*Currency.*?Realization\s*([A-Z]+)"),
            ],
        ),
        FieldRule::new(
            "Date and Time of Printing",
            vec![
                pat(r"15\s+Date and Time of Printing\s+([\d-]+\s+[\d:]+\s+[AP]M)"),
                pat(r"Date and Time of Printing\s+([\d-]+\s+[\d:]+\s+[AP]M)"),
                pat(r"15\s*Date and Time.*?Printing\s*([\d-]+\s+[\d:]+\s+[AP]M)"),
            ],
        ),
        FieldRule::new(
            "Source",
            vec![
                pat(r"17\s+Source \(Bank /\s+Exporter\)\s+([A-Za-z]+)"),
                pat(r"Source.*?\(Bank.*?Exporter\)\s*([A-Za-z]+)"),
                pat(r"17\s*Source.*?([A-Za-z]+)$"),
            ],
        ),
    ];
}

/// The ordered registry, one rule per single-value field.
pub fn field_rules() -> &'static [FieldRule] {
    &FIELD_RULES
}
