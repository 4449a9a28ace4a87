//! Error types for the docsift-core library.
//!
//! Field extraction itself is total: missing fields fall back to sentinel
//! values instead of failing, so errors here come from the OCR layer and
//! the surrounding plumbing rather than from parsing.

use thiserror::Error;

/// Main error type for the docsift library.
#[derive(Error, Debug)]
pub enum DocsiftError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR text recognition.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The recognizer failed while reading text.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// The recognized text was rejected, for example below the
    /// configured confidence floor.
    #[error("input rejected: {0}")]
    Rejected(String),

    /// Every pooled recognizer is checked out.
    #[error("no recognizer available in pool")]
    PoolExhausted,
}

/// Result type for the docsift library.
pub type Result<T> = std::result::Result<T, DocsiftError>;
