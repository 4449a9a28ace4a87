//! Receipt field extraction pipeline.

use chrono::{Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::models::config::ExtractionConfig;
use crate::models::record::{clamp_confidence, ReceiptRecord, UNKNOWN_VENDOR};

use super::rules::{
    amount::resolve_total, dates::resolve_receipt_date, description::synthesize_with_limit,
    vendor::VendorRecognizer, FieldExtractor,
};
use super::Extraction;

/// Receipt parser.
///
/// Total over any input: every field resolver falls back to a sentinel
/// value instead of failing. The reference date is injectable so the
/// "no date found" fallback stays deterministic under test.
pub struct ReceiptParser {
    config: ExtractionConfig,
    reference_date: Option<NaiveDate>,
}

impl ReceiptParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
            reference_date: None,
        }
    }

    /// Replace the extraction configuration.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Pin the date used when the text carries no parseable date.
    /// Defaults to the local calendar date at call time.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Extract every receipt field from raw OCR text.
    pub fn parse(&self, text: &str, confidence: f64) -> Extraction<ReceiptRecord> {
        // Wall-clock timing; Instant is unavailable on wasm targets.
        let start = Utc::now();
        let mut warnings = Vec::new();

        info!("Parsing receipt from {} characters of text", text.len());

        let vendor = VendorRecognizer::new(self.config.vendor_scan_lines)
            .with_extra_vendors(self.config.extra_vendors.clone())
            .extract(text)
            .map(|c| c.value);
        if vendor.is_none() {
            warn!("Could not recognize vendor");
            warnings.push("Could not recognize vendor".to_string());
        }
        let vendor = vendor.unwrap_or_else(|| UNKNOWN_VENDOR.to_string());

        let amount = resolve_total(text);
        if amount.is_none() {
            warn!("Could not resolve a total amount");
            warnings.push("Could not resolve a total amount".to_string());
        }
        let amount = amount.unwrap_or(Decimal::ZERO);

        let date = resolve_receipt_date(text);
        if date.is_none() {
            warnings.push("No date found, used reference date".to_string());
        }
        let date = date.unwrap_or_else(|| self.reference_date());

        let description =
            synthesize_with_limit(text, &vendor, self.config.description_max_items);

        debug!("Extracted receipt from {} with total {}", vendor, amount);

        let record = ReceiptRecord {
            vendor,
            amount,
            date,
            description,
            confidence: clamp_confidence(confidence),
            raw_text: text.to_string(),
        };

        Extraction {
            record,
            warnings,
            processing_time_ms: (Utc::now() - start).num_milliseconds().max(0) as u64,
        }
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const RECEIPT: &str = "WALMART SUPERCENTER\n\
        123 Main Street\n\
        04/15/2024 14:33\n\
        Milk $3.49\n\
        Bread $2.99\n\
        Subtotal: $6.48\n\
        Tax: $0.52\n\
        Total: $7.00";

    #[test]
    fn test_full_receipt() {
        let extraction = ReceiptParser::new().parse(RECEIPT, 95.4);
        let record = extraction.record;

        assert_eq!(record.vendor, "Walmart");
        assert_eq!(record.amount, Decimal::from_str("7.00").unwrap());
        assert_eq!(record.date, date(2024, 4, 15));
        assert_eq!(record.description, "Milk, Bread");
        assert_eq!(record.confidence, 95);
        assert_eq!(record.raw_text, RECEIPT);
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_total_over_empty_and_garbage_input() {
        let parser = ReceiptParser::new().with_reference_date(date(2026, 8, 25));

        let empty = parser.parse("", 50.0);
        assert_eq!(empty.record.vendor, UNKNOWN_VENDOR);
        assert_eq!(empty.record.amount, Decimal::ZERO);
        assert_eq!(empty.record.date, date(2026, 8, 25));
        assert_eq!(empty.record.description, "Purchase from Unknown Vendor");
        assert_eq!(empty.warnings.len(), 3);

        let blank = parser.parse("  \n\t \n  ", 50.0);
        assert_eq!(blank.record.vendor, UNKNOWN_VENDOR);
        assert_eq!(blank.record.date, date(2026, 8, 25));

        let garbage = parser.parse("\u{1F4A5}\u{1F4A5} \u{3053}\u{3068}\u{3070}\n####", f64::NAN);
        assert_eq!(garbage.record.confidence, 0);
        assert_eq!(garbage.record.amount, Decimal::ZERO);
    }

    #[test]
    fn test_idempotent_with_pinned_reference_date() {
        let parser = ReceiptParser::new().with_reference_date(date(2026, 1, 1));
        let text = "CORNER MART\nWidget $4.99";

        let first = parser.parse(text, 80.0);
        let second = parser.parse(text, 80.0);
        assert_eq!(first.record, second.record);
        assert_eq!(first.record.date, date(2026, 1, 1));
    }

    #[test]
    fn test_confidence_is_clamped_not_recomputed() {
        let parser = ReceiptParser::new();
        assert_eq!(parser.parse(RECEIPT, 150.0).record.confidence, 100);
        assert_eq!(parser.parse(RECEIPT, -5.0).record.confidence, 0);
        assert_eq!(parser.parse(RECEIPT, 87.5).record.confidence, 88);
    }

    #[test]
    fn test_config_knobs_flow_through() {
        let config = ExtractionConfig {
            vendor_scan_lines: 1,
            ..ExtractionConfig::default()
        };
        // The gazetteer line sits outside the narrowed window.
        let text = "Receipt copy\nWALMART\nTotal: $5.00";
        let extraction = ReceiptParser::new().with_config(config).parse(text, 90.0);
        assert_eq!(extraction.record.vendor, "Receipt Copy");
    }
}
