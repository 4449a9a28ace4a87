//! Core library for OCR document field extraction.
//!
//! This crate provides:
//! - Receipt field extraction (vendor, total amount, date, description)
//! - Identity card field extraction (type, name, number, address, dates)
//! - Document data models with sentinel-based missing-field handling
//! - A pluggable text recognition contract with pooled checkout

pub mod document;
pub mod error;
pub mod models;
pub mod ocr;

pub use document::{
    extract_document, extract_identity, extract_receipt, Extraction, IdentityParser,
    ReceiptParser,
};
pub use error::{DocsiftError, OcrError, Result};
pub use models::config::DocsiftConfig;
pub use models::record::{
    DocumentKind, DocumentRecord, IdentityRecord, ReceiptRecord, UNKNOWN, UNKNOWN_ID_TYPE,
    UNKNOWN_VENDOR,
};
pub use ocr::{FixedRecognizer, RecognizedText, RecognizerPool, TextRecognizer};
