//! Identity card field extraction pipeline.

use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::models::config::ExtractionConfig;
use crate::models::record::{clamp_confidence, IdentityRecord, UNKNOWN, UNKNOWN_ID_TYPE};

use super::rules::{
    address::assemble_address,
    dates::{resolve_birth_date, resolve_expiration},
    doc_type::detect_type,
    name::NameExtractor,
    number::parse_number,
    FieldExtractor,
};
use super::Extraction;

/// Identity card parser.
///
/// Total over any input, like [`super::ReceiptParser`]. The reference
/// date disambiguates unlabeled dates: birth dates must precede it,
/// expiration dates must follow it.
pub struct IdentityParser {
    config: ExtractionConfig,
    reference_date: Option<NaiveDate>,
}

impl IdentityParser {
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

    /// Pin the date that splits birth dates from expiration dates.
    /// Defaults to the local calendar date at call time.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Extract every identity card field from raw OCR text.
    pub fn parse(&self, text: &str, confidence: f64) -> Extraction<IdentityRecord> {
        // Wall-clock timing; Instant is unavailable on wasm targets.
        let start = Utc::now();
        let mut warnings = Vec::new();
        let reference = self.reference_date();

        info!("Parsing identity card from {} characters of text", text.len());

        let kind = detect_type(text);
        if kind.is_none() {
            warnings.push("Could not detect document type".to_string());
        }
        let kind = kind.map(str::to_string).unwrap_or_else(|| UNKNOWN_ID_TYPE.to_string());

        let name = NameExtractor::new(self.config.name_scan_lines)
            .extract(text)
            .map(|c| c.value);
        if name.is_none() {
            warn!("Could not extract holder name");
            warnings.push("Could not extract holder name".to_string());
        }
        let name = name.unwrap_or_else(|| UNKNOWN.to_string());

        let number = parse_number(text);
        if number.is_none() {
            warn!("Could not extract document number");
            warnings.push("Could not extract document number".to_string());
        }
        let number = number.unwrap_or_else(|| UNKNOWN.to_string());

        let address = assemble_address(text);
        if address.is_none() {
            warnings.push("Could not extract address".to_string());
        }
        let address = address.unwrap_or_else(|| UNKNOWN.to_string());

        let date_of_birth = resolve_birth_date(text, reference);
        if date_of_birth.is_none() {
            warnings.push("Could not extract date of birth".to_string());
        }

        let expiration = resolve_expiration(text, reference);
        if expiration.is_none() {
            warnings.push("Could not extract expiration date".to_string());
        }

        let confidence = clamp_confidence(confidence);
        let verified = confidence > self.config.verified_threshold
            && name != UNKNOWN
            && number != UNKNOWN;

        debug!("Extracted {} for {} (verified: {})", kind, name, verified);

        let record = IdentityRecord {
            kind,
            name,
            number,
            address,
            date_of_birth,
            expiration,
            confidence,
            raw_text: text.to_string(),
            verified,
        };

        Extraction {
            record,
            warnings,
            processing_time_ms: (Utc::now() - start).num_milliseconds().max(0) as u64,
        }
    }
}

impl Default for IdentityParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parser() -> IdentityParser {
        IdentityParser::new().with_reference_date(date(2026, 8, 25))
    }

    const LICENSE: &str = "CALIFORNIA DRIVER LICENSE\n\
        DL D1234567\n\
        LN SMITH FN JOHN\n\
        123 Main Street\n\
        Sacramento, CA 95814\n\
        DOB: 01/15/1980\n\
        EXP: 01/15/2030";

    #[test]
    fn test_full_license() {
        let extraction = parser().parse(LICENSE, 88.2);
        let record = extraction.record;

        assert_eq!(record.kind, "Driver's License");
        assert_eq!(record.name, "John Smith");
        assert_eq!(record.number, "D1234567");
        assert_eq!(record.address, "123 Main Street, Sacramento, CA 95814");
        assert_eq!(record.date_of_birth, Some(date(1980, 1, 15)));
        assert_eq!(record.expiration, Some(date(2030, 1, 15)));
        assert_eq!(record.confidence, 88);
        assert!(record.verified);
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_verified_threshold_is_strict() {
        // Exactly at the threshold the record stays unverified.
        assert!(!parser().parse(LICENSE, 70.0).record.verified);
        // 70.6 rounds to 71, which clears the default threshold.
        assert!(parser().parse(LICENSE, 70.6).record.verified);
    }

    #[test]
    fn test_verified_requires_name_and_number() {
        let extraction = parser().parse("PASSPORT", 100.0);
        let record = extraction.record;

        assert_eq!(record.kind, "Passport");
        assert_eq!(record.name, UNKNOWN);
        assert_eq!(record.number, UNKNOWN);
        assert!(!record.verified);
    }

    #[test]
    fn test_sentinels_on_empty_input() {
        let extraction = parser().parse("", 80.0);
        let record = extraction.record;

        assert_eq!(record.kind, UNKNOWN_ID_TYPE);
        assert_eq!(record.name, UNKNOWN);
        assert_eq!(record.number, UNKNOWN);
        assert_eq!(record.address, UNKNOWN);
        assert_eq!(record.date_of_birth, None);
        assert_eq!(record.expiration, None);
        assert!(!record.verified);
        assert_eq!(extraction.warnings.len(), 6);
    }

    #[test]
    fn test_reference_date_splits_unlabeled_dates() {
        let text = "STATE ID\nAB123456\nJane Doe\n03/10/1992\n03/10/2031";
        let record = parser().parse(text, 90.0).record;

        assert_eq!(record.date_of_birth, Some(date(1992, 3, 10)));
        assert_eq!(record.expiration, Some(date(2031, 3, 10)));
    }
}
