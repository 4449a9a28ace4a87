//! WASM bindings for document OCR field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use docsift_core::models::record::{DocumentKind, DocumentRecord};
use docsift_core::{IdentityParser, ReceiptParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Today's date from the JS environment, used as the reference date.
fn today() -> Option<NaiveDate> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract receipt fields from OCR text.
///
/// Takes receipt text and the provider-reported confidence, and returns
/// a structured receipt record.
#[wasm_bindgen]
pub fn extract_receipt_from_text(text: &str, confidence: f64) -> Result<JsValue, JsValue> {
    let mut parser = ReceiptParser::new();
    if let Some(date) = today() {
        parser = parser.with_reference_date(date);
    }
    to_js(&parser.parse(text, confidence).record)
}

/// Extract identity card fields from OCR text.
#[wasm_bindgen]
pub fn extract_identity_from_text(text: &str, confidence: f64) -> Result<JsValue, JsValue> {
    let mut parser = IdentityParser::new();
    if let Some(date) = today() {
        parser = parser.with_reference_date(date);
    }
    to_js(&parser.parse(text, confidence).record)
}

/// Document extractor class for browser use.
#[wasm_bindgen]
pub struct DocumentExtractor {
    receipts: ReceiptParser,
    identities: IdentityParser,
}

#[wasm_bindgen]
impl DocumentExtractor {
    /// Create a new extractor with the reference date seeded from the
    /// JS clock.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let mut receipts = ReceiptParser::new();
        let mut identities = IdentityParser::new();
        if let Some(date) = today() {
            receipts = receipts.with_reference_date(date);
            identities = identities.with_reference_date(date);
        }
        Self {
            receipts,
            identities,
        }
    }

    /// Pin the reference date (YYYY-MM-DD). Returns false when the
    /// string does not parse.
    #[wasm_bindgen]
    pub fn set_reference_date(&mut self, date: &str) -> bool {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed) => {
                self.receipts = ReceiptParser::new().with_reference_date(parsed);
                self.identities = IdentityParser::new().with_reference_date(parsed);
                true
            }
            Err(_) => false,
        }
    }

    /// Extract a record of the given kind ("receipt" or "identity").
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, confidence: f64, kind: &str) -> Result<JsValue, JsValue> {
        let kind = DocumentKind::from_str(kind)
            .ok_or_else(|| JsValue::from_str(&format!("unknown document kind: {}", kind)))?;

        let record = match kind {
            DocumentKind::Receipt => {
                DocumentRecord::Receipt(self.receipts.parse(text, confidence).record)
            }
            DocumentKind::IdentityCard => {
                DocumentRecord::IdentityCard(self.identities.parse(text, confidence).record)
            }
        };

        to_js(&record)
    }

    /// Extract receipt fields from text.
    #[wasm_bindgen]
    pub fn extract_receipt(&self, text: &str, confidence: f64) -> Result<JsValue, JsValue> {
        to_js(&self.receipts.parse(text, confidence).record)
    }

    /// Extract identity card fields from text.
    #[wasm_bindgen]
    pub fn extract_identity(&self, text: &str, confidence: f64) -> Result<JsValue, JsValue> {
        to_js(&self.identities.parse(text, confidence).record)
    }

    /// Get the extraction result with warnings and timing attached.
    #[wasm_bindgen]
    pub fn extract_with_metadata(
        &self,
        text: &str,
        confidence: f64,
        kind: &str,
    ) -> Result<JsValue, JsValue> {
        let kind = DocumentKind::from_str(kind)
            .ok_or_else(|| JsValue::from_str(&format!("unknown document kind: {}", kind)))?;

        #[derive(serde::Serialize)]
        struct ExtractResult {
            record: DocumentRecord,
            warnings: Vec<String>,
            processing_time_ms: u64,
        }

        let output = match kind {
            DocumentKind::Receipt => {
                let extraction = self.receipts.parse(text, confidence);
                ExtractResult {
                    record: DocumentRecord::Receipt(extraction.record),
                    warnings: extraction.warnings,
                    processing_time_ms: extraction.processing_time_ms,
                }
            }
            DocumentKind::IdentityCard => {
                let extraction = self.identities.parse(text, confidence);
                ExtractResult {
                    record: DocumentRecord::IdentityCard(extraction.record),
                    warnings: extraction.warnings,
                    processing_time_ms: extraction.processing_time_ms,
                }
            }
        };

        to_js(&output)
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}
