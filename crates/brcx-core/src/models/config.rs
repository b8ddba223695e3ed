//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the brcx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrcxConfig {
    /// PDF text extraction configuration.
    pub pdf: PdfConfig,

    /// Batch consolidation configuration.
    pub batch: BatchConfig,
}

/// PDF text extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length for the primary extractor's output to be
    /// accepted without trying the fallback.
    pub primary_text_threshold: usize,

    /// Minimum text length for extracted text to count as usable at all.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            primary_text_threshold: 100,
            min_text_length: 50,
        }
    }
}

/// Batch consolidation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// A document counts as `Success` when it is missing fewer than this
    /// many mandatory fields; otherwise it is `Partial`.
    pub success_missing_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            success_missing_threshold: 5,
        }
    }
}

impl BrcxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| crate::error::BrcxError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::error::Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::BrcxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BrcxConfig::default();
        assert_eq!(config.pdf.primary_text_threshold, 100);
        assert_eq!(config.pdf.min_text_length, 50);
        assert_eq!(config.batch.success_missing_threshold, 5);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: BrcxConfig = serde_json::from_str(r#"{"pdf":{"min_text_length":80}}"#).unwrap();
        assert_eq!(config.pdf.min_text_length, 80);
        assert_eq!(config.pdf.primary_text_threshold, 100);
        assert_eq!(config.batch.success_missing_threshold, 5);
    }
}
