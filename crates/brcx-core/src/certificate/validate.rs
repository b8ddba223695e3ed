//! Completeness validation of extracted records.

use crate::models::record::CertificateRecord;

/// Fields a certificate must carry to be considered complete.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "Firm Name",
    "Address/GSTIN",
    "IEC",
    "Shipping Bill / Invoice No.",
    "Shipping Bill / Invoice Date",
    "Bank Name",
    "Total Realised Value",
    "Net Realised Value",
    "Currency of Realization",
];

/// Mandatory fields whose value is empty or whitespace-only, in the
/// declared field order. The list's length is the deficiency score.
pub fn missing_required_fields(record: &CertificateRecord) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| {
            record
                .get(field)
                .map(|value| value.trim().is_empty())
                .unwrap_or(true)
        })
        .collect()
}
