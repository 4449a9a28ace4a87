//! Structured records produced by document field extraction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel for string fields that could not be extracted.
pub const UNKNOWN: &str = "Unknown";

/// Sentinel vendor when no plausible merchant name is found.
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

/// Sentinel identity document type.
pub const UNKNOWN_ID_TYPE: &str = "Unknown ID Type";

/// Class of document a text dump is extracted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Retail receipt.
    Receipt,
    /// Government-issued identity card.
    IdentityCard,
}

impl DocumentKind {
    /// Parse a document kind from user-facing text.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "receipt" => Some(DocumentKind::Receipt),
            "identity" | "identity_card" | "id" | "id_card" => Some(DocumentKind::IdentityCard),
            _ => None,
        }
    }

    /// Stable name used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Receipt => "receipt",
            DocumentKind::IdentityCard => "identity_card",
        }
    }
}

/// A structured retail receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Merchant name, or `"Unknown Vendor"`.
    pub vendor: String,

    /// Final charged total. Zero when no currency-shaped token exists.
    pub amount: Decimal,

    /// Transaction date. Falls back to the reference date when the text
    /// carries no parseable date.
    pub date: NaiveDate,

    /// Short summary of the purchased items.
    pub description: String,

    /// Caller-supplied OCR confidence, clamped to 0..=100.
    pub confidence: u8,

    /// The full input text, preserved verbatim.
    pub raw_text: String,
}

/// A structured identity card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Document type, e.g. `"Driver's License"`, or `"Unknown ID Type"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Holder name in `First [Middle] Last` order, or `"Unknown"`.
    pub name: String,

    /// Document number, or `"Unknown"`.
    pub number: String,

    /// Street address with optional city/state/zip line, or `"Unknown"`.
    pub address: String,

    /// Date of birth. `None` when absent; serialized as JSON `null`.
    pub date_of_birth: Option<NaiveDate>,

    /// Expiration date. `None` when absent; serialized as JSON `null`.
    pub expiration: Option<NaiveDate>,

    /// Caller-supplied OCR confidence, clamped to 0..=100.
    pub confidence: u8,

    /// The full input text, preserved verbatim.
    pub raw_text: String,

    /// True when confidence exceeds the verification threshold and both
    /// name and number were extracted.
    pub verified: bool,
}

/// Either record type, tagged for kind-dispatched callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "document", rename_all = "snake_case")]
pub enum DocumentRecord {
    /// Receipt extraction result.
    Receipt(ReceiptRecord),
    /// Identity card extraction result.
    IdentityCard(IdentityRecord),
}

impl DocumentRecord {
    /// The kind this record was extracted as.
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentRecord::Receipt(_) => DocumentKind::Receipt,
            DocumentRecord::IdentityCard(_) => DocumentKind::IdentityCard,
        }
    }
}

impl ReceiptRecord {
    /// Names of fields that fell back to their sentinel values.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.vendor == UNKNOWN_VENDOR {
            missing.push("vendor");
        }
        if self.amount == Decimal::ZERO {
            missing.push("amount");
        }
        missing
    }
}

impl IdentityRecord {
    /// Names of fields that fell back to their sentinel values.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.kind == UNKNOWN_ID_TYPE {
            missing.push("type");
        }
        if self.name == UNKNOWN {
            missing.push("name");
        }
        if self.number == UNKNOWN {
            missing.push("number");
        }
        if self.address == UNKNOWN {
            missing.push("address");
        }
        if self.date_of_birth.is_none() {
            missing.push("date_of_birth");
        }
        if self.expiration.is_none() {
            missing.push("expiration");
        }
        missing
    }
}

/// Round and clamp a caller-supplied confidence to 0..=100.
///
/// NaN maps to 0; out-of-range values saturate rather than fail.
pub fn clamp_confidence(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_parsing() {
        assert_eq!(DocumentKind::from_str("receipt"), Some(DocumentKind::Receipt));
        assert_eq!(DocumentKind::from_str("Identity"), Some(DocumentKind::IdentityCard));
        assert_eq!(DocumentKind::from_str("id"), Some(DocumentKind::IdentityCard));
        assert_eq!(DocumentKind::from_str("invoice"), None);
    }

    #[test]
    fn test_clamp_confidence() {
        assert_eq!(clamp_confidence(87.4), 87);
        assert_eq!(clamp_confidence(87.5), 88);
        assert_eq!(clamp_confidence(150.0), 100);
        assert_eq!(clamp_confidence(-3.0), 0);
        assert_eq!(clamp_confidence(f64::NAN), 0);
        assert_eq!(clamp_confidence(f64::INFINITY), 100);
    }

    #[test]
    fn test_identity_dates_serialize_to_null() {
        let record = IdentityRecord {
            kind: "Driver's License".to_string(),
            name: "Jane Q Doe".to_string(),
            number: "D1234567".to_string(),
            address: UNKNOWN.to_string(),
            date_of_birth: None,
            expiration: None,
            confidence: 80,
            raw_text: String::new(),
            verified: true,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["date_of_birth"].is_null());
        assert!(json["expiration"].is_null());
        assert_eq!(json["type"], "Driver's License");
    }

    #[test]
    fn test_document_record_tag() {
        let record = DocumentRecord::Receipt(ReceiptRecord {
            vendor: "Walmart".to_string(),
            amount: Decimal::new(1100, 2),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: "Purchase from Walmart".to_string(),
            confidence: 95,
            raw_text: String::new(),
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["document"], "receipt");
        assert_eq!(json["vendor"], "Walmart");
        assert_eq!(record.kind(), DocumentKind::Receipt);
    }

    #[test]
    fn test_missing_fields() {
        let record = ReceiptRecord {
            vendor: UNKNOWN_VENDOR.to_string(),
            amount: Decimal::ZERO,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: String::new(),
            confidence: 0,
            raw_text: String::new(),
        };
        assert_eq!(record.missing_fields(), vec!["vendor", "amount"]);
    }
}
