//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the docsift pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsiftConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// OCR provider configuration.
    pub ocr: OcrConfig,
}

impl Default for DocsiftConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            ocr: OcrConfig::default(),
        }
    }
}

/// Field extraction configuration.
///
/// The defaults reproduce the documented extraction behavior; changing them
/// tunes the heuristics, it never disables a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Confidence an identity record must exceed to be marked verified.
    pub verified_threshold: u8,

    /// Number of leading lines scanned for the receipt vendor.
    pub vendor_scan_lines: usize,

    /// Number of leading lines scanned for the identity holder name.
    pub name_scan_lines: usize,

    /// Maximum item lines joined into the receipt description.
    pub description_max_items: usize,

    /// Additional merchant names recognized beyond the built-in list.
    pub extra_vendors: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            verified_threshold: 70,
            vendor_scan_lines: 5,
            name_scan_lines: 8,
            description_max_items: 3,
            extra_vendors: Vec::new(),
        }
    }
}

/// OCR provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Minimum recognition confidence (0.0 - 100.0) accepted from a provider.
    pub min_confidence: f64,

    /// Number of recognizer workers kept in the pool.
    pub pool_size: usize,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            pool_size: 2,
        }
    }
}

impl DocsiftConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DocsiftConfig::default();
        assert_eq!(config.extraction.verified_threshold, 70);
        assert_eq!(config.extraction.vendor_scan_lines, 5);
        assert_eq!(config.extraction.name_scan_lines, 8);
        assert_eq!(config.extraction.description_max_items, 3);
        assert!(config.extraction.extra_vendors.is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: DocsiftConfig =
            serde_json::from_str(r#"{"extraction": {"verified_threshold": 85}}"#).unwrap();
        assert_eq!(config.extraction.verified_threshold, 85);
        assert_eq!(config.extraction.vendor_scan_lines, 5);
        assert_eq!(config.ocr.pool_size, 2);
    }
}
