//! Deduction block extraction.
//!
//! The certificate lists five deduction amounts under one shared header
//! (Commission, Discount, Insurance, Freight, Other), so all five values
//! come from a single multi-group match. Groups 1-5 map positionally onto
//! the fixed column order. When no variant matches, all five default to
//! "0.00": an absent deduction block means zero deductions, unlike a
//! missing single-value field which means "unknown".

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

lazy_static! {
    static ref DEDUCTION_PATTERNS: Vec<Regex> = [
        r"Commission\s+Discount\s+Insurance\s+Freight\s+Other\s+([\d\.]+)\s+([\d\.]+)\s+([\d\.]+)\s+([\d\.]+)\s+([\d\.]+)",
        r"Commission\s*Discount\s*Insurance\s*Freight\s*Other.*?([\d\.]+)\s+([\d\.]+)\s+([\d\.]+)\s+([\d\.]+)\s+([\d\.]+)",
        r"12.*?Commission.*?Discount.*?Insurance.*?Freight.*?Other.*?([\d\.]+)\s+([\d\.]+)\s+([\d\.]+)\s+([\d\.]+)\s+([\d\.]+)",
    ]
    .iter()
    .map(|p| {
        RegexBuilder::new(p)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .unwrap()
    })
    .collect();
}

/// The five deduction values, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deductions {
    pub commission: String,
    pub discount: String,
    pub insurance: String,
    pub freight: String,
    pub other: String,
}

impl Default for Deductions {
    fn default() -> Self {
        Self {
            commission: "0.00".to_string(),
            discount: "0.00".to_string(),
            insurance: "0.00".to_string(),
            freight: "0.00".to_string(),
            other: "0.00".to_string(),
        }
    }
}

/// Extract the deduction block from normalized text.
///
/// Variants are tried in order; the first that matches assigns all five
/// fields from its capture groups. No match yields the zero defaults.
pub fn extract_deductions(text: &str) -> Deductions {
    for pattern in DEDUCTION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return Deductions {
                commission: caps[1].to_string(),
                discount: caps[2].to_string(),
                insurance: caps[3].to_string(),
                freight: caps[4].to_string(),
                other: caps[5].to_string(),
            };
        }
    }
    Deductions::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_clean_header() {
        let text = "Commission Discount Insurance Freight Other 10.00 0.00 5.50 20.00 1.25";
        let d = extract_deductions(text);
        assert_eq!(d.commission, "10.00");
        assert_eq!(d.discount, "0.00");
        assert_eq!(d.insurance, "5.50");
        assert_eq!(d.freight, "20.00");
        assert_eq!(d.other, "1.25");
    }

    #[test]
    fn test_extract_with_intervening_text() {
        let text = "12 Deductions Commission Discount Insurance Freight Other amounts 1.00 2.00 3.00 4.00 5.00";
        let d = extract_deductions(text);
        assert_eq!(d.commission, "1.00");
        assert_eq!(d.other, "5.00");
    }

    #[test]
    fn test_missing_block_defaults_to_zero() {
        let d = extract_deductions("no deduction table here");
        assert_eq!(d, Deductions::default());
        assert_eq!(d.commission, "0.00");
        assert_eq!(d.other, "0.00");
    }
}
