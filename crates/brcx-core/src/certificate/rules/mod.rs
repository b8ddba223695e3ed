//! Rule-based field extractors for DGFT Bank Realisation Certificates.
//!
//! Each field owns an ordered list of candidate patterns; candidates are
//! tried in order and the first match wins. Earlier candidates are strict
//! (anchored to the template's item numbering), later ones progressively
//! more permissive fallbacks. Resolution is purely positional in the
//! list, never by match scoring.

pub mod deductions;
mod registry;

pub use deductions::{Deductions, extract_deductions};
pub use registry::field_rules;

use regex::{Regex, RegexBuilder};

use super::normalize::normalize_whitespace;

/// How a successful match's capture groups become one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    /// Take capture group 1.
    FirstGroup,
    /// Join groups 1 and 2 as `"<g1> Dated <g2>"` (certificate number
    /// plus its issue date).
    CertificateDated,
}

/// One candidate pattern in a field's fallback chain.
#[derive(Debug)]
pub struct CandidatePattern {
    regex: Regex,
    compose: Composition,
}

impl CandidatePattern {
    /// Compile a candidate. All patterns are case-insensitive with
    /// dot-matches-newline on; the normalizer removes newlines anyway,
    /// but the matching mode is kept for safety.
    pub(crate) fn new(pattern: &str, compose: Composition) -> Self {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .unwrap_or_else(|e| panic!("invalid field pattern {:?}: {}", pattern, e));
        Self { regex, compose }
    }

    /// Try this candidate against normalized text. A match yields the
    /// composed value, whitespace-squeezed and trimmed.
    pub fn try_match(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        let raw = match self.compose {
            Composition::FirstGroup => caps.get(1)?.as_str().to_string(),
            Composition::CertificateDated => {
                let number = caps.get(1)?;
                match caps.get(2) {
                    Some(date) => format!("{} Dated {}", number.as_str(), date.as_str()),
                    None => number.as_str().to_string(),
                }
            }
        };
        Some(normalize_whitespace(&raw))
    }
}

/// Ordered candidate patterns for one logical field.
#[derive(Debug)]
pub struct FieldRule {
    /// Column label in the record vocabulary.
    pub name: &'static str,
    candidates: Vec<CandidatePattern>,
}

impl FieldRule {
    pub(crate) fn new(name: &'static str, candidates: Vec<CandidatePattern>) -> Self {
        Self { name, candidates }
    }

    /// First-match-wins evaluation over the candidate list.
    /// `None` means absence, not error.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.candidates.iter().find_map(|c| c.try_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_group_composition() {
        let pattern = CandidatePattern::new(r"IEC\s+(\d+)", Composition::FirstGroup);
        assert_eq!(pattern.try_match("IEC 0123456789"), Some("0123456789".to_string()));
        assert_eq!(pattern.try_match("no match here"), None);
    }

    #[test]
    fn test_dated_composition_joins_groups() {
        let pattern = CandidatePattern::new(
            r"Certificate\s+No\.\s+([A-Z0-9]+)\s+Dated\s+([\d-]+)",
            Composition::CertificateDated,
        );
        assert_eq!(
            pattern.try_match("Certificate No. ABC123 Dated 2024-02-01"),
            Some("ABC123 Dated 2024-02-01".to_string())
        );
    }

    #[test]
    fn test_captured_value_is_squeezed() {
        let pattern = CandidatePattern::new(r"Firm Name\s+(.+)", Composition::FirstGroup);
        // A capture can still contain internal runs if the input was not
        // normalized; the rule squeezes them regardless.
        assert_eq!(
            pattern.try_match("Firm Name ACME   EXPORTS "),
            Some("ACME EXPORTS".to_string())
        );
    }

    #[test]
    fn test_fallback_order_is_first_defined_first_tried() {
        let rule = FieldRule::new(
            "Test",
            vec![
                CandidatePattern::new(r"strict\s+(\d{4})", Composition::FirstGroup),
                CandidatePattern::new(r"(\d+)", Composition::FirstGroup),
            ],
        );
        // Strict candidate matches, permissive one never runs.
        assert_eq!(rule.extract("strict 1234"), Some("1234".to_string()));
        // Strict fails, fallback catches.
        assert_eq!(rule.extract("loose 7"), Some("7".to_string()));
        assert_eq!(rule.extract("nothing"), None);
    }
}
