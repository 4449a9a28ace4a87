//! Document extraction pipelines.
//!
//! Two pipelines share one contract: feed in raw OCR text, get a fully
//! populated record back. Extraction is total, so unreadable input
//! produces sentinel values and warnings rather than errors.

pub mod rules;

mod identity;
mod receipt;

pub use identity::IdentityParser;
pub use receipt::ReceiptParser;

use crate::models::record::{DocumentKind, DocumentRecord, IdentityRecord, ReceiptRecord};

/// An extracted record together with extraction diagnostics.
#[derive(Debug, Clone)]
pub struct Extraction<T> {
    /// The extracted record.
    pub record: T,

    /// One entry per field that fell back to a sentinel value.
    pub warnings: Vec<String>,

    /// Wall-clock extraction time in milliseconds.
    pub processing_time_ms: u64,
}

/// Extract receipt fields with default settings.
pub fn extract_receipt(text: &str, confidence: f64) -> ReceiptRecord {
    ReceiptParser::new().parse(text, confidence).record
}

/// Extract identity card fields with default settings.
pub fn extract_identity(text: &str, confidence: f64) -> IdentityRecord {
    IdentityParser::new().parse(text, confidence).record
}

/// Extract whichever record `kind` selects.
pub fn extract_document(text: &str, confidence: f64, kind: DocumentKind) -> DocumentRecord {
    match kind {
        DocumentKind::Receipt => DocumentRecord::Receipt(extract_receipt(text, confidence)),
        DocumentKind::IdentityCard => {
            DocumentRecord::IdentityCard(extract_identity(text, confidence))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_document_dispatch() {
        let receipt = extract_document("STARBUCKS\nTotal: $4.50", 90.0, DocumentKind::Receipt);
        match receipt {
            DocumentRecord::Receipt(record) => assert_eq!(record.vendor, "Starbucks"),
            DocumentRecord::IdentityCard(_) => panic!("expected a receipt"),
        }

        let card = extract_document("PASSPORT", 90.0, DocumentKind::IdentityCard);
        assert_eq!(card.kind(), DocumentKind::IdentityCard);
    }
}
