//! Data models for extracted documents and pipeline configuration.

pub mod config;
pub mod record;

pub use config::{DocsiftConfig, ExtractionConfig, OcrConfig};
pub use record::{
    clamp_confidence, DocumentKind, DocumentRecord, IdentityRecord, ReceiptRecord, UNKNOWN,
    UNKNOWN_ID_TYPE, UNKNOWN_VENDOR,
};
