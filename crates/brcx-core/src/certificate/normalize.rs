//! Whitespace canonicalization.
//!
//! Every field pattern is written against single-space-separated tokens,
//! so raw text must pass through here before matching. The same collapse
//! is applied again to captured values before they are stored.

/// Collapse every whitespace run (including newlines) to one space and
/// trim leading/trailing whitespace. Empty input yields empty output.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
