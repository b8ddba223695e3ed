//! Certificate record model.
//!
//! Every processed document yields one [`CertificateRecord`] covering the
//! full field vocabulary. Absence is always encoded as an empty string,
//! never as a missing key, so downstream consumers see a stable schema no
//! matter how much was actually extracted. The five deduction fields are
//! the single exception to the empty-string convention: when the deduction
//! block is not found they hold `"0.00"`, because an absent block means
//! zero deductions rather than "unknown".

use serde::{Deserialize, Serialize};

/// Labels of the single-value certificate fields, in template order.
pub const FIELD_NAMES: [&str; 15] = [
    "Firm Name",
    "Address/GSTIN",
    "IEC",
    "Shipping Bill / Invoice No.",
    "Shipping Bill / Invoice Date",
    "Shipping Bill Port",
    "Bank Name",
    "Bill ID No.",
    "Bank Realisation Certificate No.",
    "Date of Realisation of Money by Bank",
    "Total Realised Value",
    "Net Realised Value",
    "Currency of Realization",
    "Date and Time of Printing",
    "Source",
];

/// Labels of the five deduction fields, in column order.
pub const DEDUCTION_NAMES: [&str; 5] = [
    "Commission",
    "Discount",
    "Insurance",
    "Freight",
    "Other Deductions",
];

/// Labels of the metadata fields attached by the batch consolidator.
pub const METADATA_NAMES: [&str; 5] = [
    "File Name",
    "Extraction Method",
    "Processing Date",
    "Missing Fields Count",
    "Missing Fields",
];

/// All record columns, in export order.
pub fn all_columns() -> Vec<&'static str> {
    FIELD_NAMES
        .iter()
        .chain(DEDUCTION_NAMES.iter())
        .chain(METADATA_NAMES.iter())
        .copied()
        .collect()
}

/// Missing-field count with the sentinel used for failed extractions.
///
/// A document whose text could not be obtained never runs the validator,
/// so its count is the non-numeric sentinel `All` rather than `0`.
/// Aggregation code must special-case the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingCount {
    /// Normal validator output.
    Count(usize),
    /// Extraction failed before validation could run.
    All,
}

impl Default for MissingCount {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl std::fmt::Display for MissingCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::All => write!(f, "All"),
        }
    }
}

impl Serialize for MissingCount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u64(*n as u64),
            Self::All => serializer.serialize_str("All"),
        }
    }
}

impl<'de> Deserialize<'de> for MissingCount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Number(n) => n
                .as_u64()
                .map(|n| Self::Count(n as usize))
                .ok_or_else(|| D::Error::custom("negative missing-field count")),
            serde_json::Value::String(s) if s == "All" => Ok(Self::All),
            other => Err(D::Error::custom(format!(
                "expected count or \"All\", got {}",
                other
            ))),
        }
    }
}

/// One extracted certificate, plus processing metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateRecord {
    #[serde(rename = "Firm Name", default)]
    pub firm_name: String,

    #[serde(rename = "Address/GSTIN", default)]
    pub address_gstin: String,

    #[serde(rename = "IEC", default)]
    pub iec: String,

    #[serde(rename = "Shipping Bill / Invoice No.", default)]
    pub shipping_bill_no: String,

    #[serde(rename = "Shipping Bill / Invoice Date", default)]
    pub shipping_bill_date: String,

    #[serde(rename = "Shipping Bill Port", default)]
    pub shipping_bill_port: String,

    #[serde(rename = "Bank Name", default)]
    pub bank_name: String,

    #[serde(rename = "Bill ID No.", default)]
    pub bill_id_no: String,

    /// Composed as `"<certificate no> Dated <date>"` when both groups match.
    #[serde(rename = "Bank Realisation Certificate No.", default)]
    pub certificate_no: String,

    #[serde(rename = "Date of Realisation of Money by Bank", default)]
    pub realisation_date: String,

    #[serde(rename = "Total Realised Value", default)]
    pub total_realised_value: String,

    #[serde(rename = "Net Realised Value", default)]
    pub net_realised_value: String,

    #[serde(rename = "Currency of Realization", default)]
    pub currency: String,

    #[serde(rename = "Date and Time of Printing", default)]
    pub printing_date: String,

    #[serde(rename = "Source", default)]
    pub source: String,

    #[serde(rename = "Commission", default)]
    pub commission: String,

    #[serde(rename = "Discount", default)]
    pub discount: String,

    #[serde(rename = "Insurance", default)]
    pub insurance: String,

    #[serde(rename = "Freight", default)]
    pub freight: String,

    #[serde(rename = "Other Deductions", default)]
    pub other_deductions: String,

    #[serde(rename = "File Name", default)]
    pub file_name: String,

    #[serde(rename = "Extraction Method", default)]
    pub extraction_method: String,

    #[serde(rename = "Processing Date", default)]
    pub processing_date: String,

    #[serde(rename = "Missing Fields Count", default)]
    pub missing_count: MissingCount,

    /// Joined names of the missing mandatory fields, or `"None"`.
    #[serde(rename = "Missing Fields", default)]
    pub missing_fields: String,
}

impl CertificateRecord {
    /// Look up a field value by its column label.
    ///
    /// `Missing Fields Count` is not addressable here since it is not a
    /// plain string; use [`CertificateRecord::missing_count`] directly.
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "Firm Name" => &self.firm_name,
            "Address/GSTIN" => &self.address_gstin,
            "IEC" => &self.iec,
            "Shipping Bill / Invoice No." => &self.shipping_bill_no,
            "Shipping Bill / Invoice Date" => &self.shipping_bill_date,
            "Shipping Bill Port" => &self.shipping_bill_port,
            "Bank Name" => &self.bank_name,
            "Bill ID No." => &self.bill_id_no,
            "Bank Realisation Certificate No." => &self.certificate_no,
            "Date of Realisation of Money by Bank" => &self.realisation_date,
            "Total Realised Value" => &self.total_realised_value,
            "Net Realised Value" => &self.net_realised_value,
            "Currency of Realization" => &self.currency,
            "Date and Time of Printing" => &self.printing_date,
            "Source" => &self.source,
            "Commission" => &self.commission,
            "Discount" => &self.discount,
            "Insurance" => &self.insurance,
            "Freight" => &self.freight,
            "Other Deductions" => &self.other_deductions,
            "File Name" => &self.file_name,
            "Extraction Method" => &self.extraction_method,
            "Processing Date" => &self.processing_date,
            "Missing Fields" => &self.missing_fields,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Assign a field value by its column label.
    ///
    /// Returns `false` for labels outside the vocabulary.
    pub fn set(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "Firm Name" => &mut self.firm_name,
            "Address/GSTIN" => &mut self.address_gstin,
            "IEC" => &mut self.iec,
            "Shipping Bill / Invoice No." => &mut self.shipping_bill_no,
            "Shipping Bill / Invoice Date" => &mut self.shipping_bill_date,
            "Shipping Bill Port" => &mut self.shipping_bill_port,
            "Bank Name" => &mut self.bank_name,
            "Bill ID No." => &mut self.bill_id_no,
            "Bank Realisation Certificate No." => &mut self.certificate_no,
            "Date of Realisation of Money by Bank" => &mut self.realisation_date,
            "Total Realised Value" => &mut self.total_realised_value,
            "Net Realised Value" => &mut self.net_realised_value,
            "Currency of Realization" => &mut self.currency,
            "Date and Time of Printing" => &mut self.printing_date,
            "Source" => &mut self.source,
            "Commission" => &mut self.commission,
            "Discount" => &mut self.discount,
            "Insurance" => &mut self.insurance,
            "Freight" => &mut self.freight,
            "Other Deductions" => &mut self.other_deductions,
            "File Name" => &mut self.file_name,
            "Extraction Method" => &mut self.extraction_method,
            "Processing Date" => &mut self.processing_date,
            "Missing Fields" => &mut self.missing_fields,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Cell value for a column, as rendered in tabular exports.
    pub fn cell(&self, column: &str) -> String {
        if column == "Missing Fields Count" {
            return self.missing_count.to_string();
        }
        self.get(column).unwrap_or_default().to_string()
    }

    /// Build the identity-only record for a document whose text could not
    /// be obtained. Field extraction is never attempted for these.
    pub fn failure(file_name: &str, processing_date: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            extraction_method: "Failed".to_string(),
            processing_date: processing_date.to_string(),
            missing_count: MissingCount::All,
            missing_fields: "File processing failed".to_string(),
            ..Self::default()
        }
    }
}
