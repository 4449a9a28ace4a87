//! Text recognition provider contract.
//!
//! Extraction itself consumes plain `(text, confidence)` pairs, so the
//! engine never runs OCR. This module owns the seam a real provider
//! plugs into: the [`TextRecognizer`] trait and a bounded
//! [`RecognizerPool`] for sharing stateful recognizers across callers.

mod pool;

pub use pool::{Lease, RecognizerPool};

use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Output of one recognition pass over an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedText {
    /// Recognized text, line-oriented.
    pub text: String,

    /// Mean recognition confidence (0.0 - 100.0).
    pub confidence: f64,
}

/// A text recognition backend.
///
/// Implementations are stateful (model sessions, scratch buffers), so
/// `recognize` takes `&mut self` and sharing goes through
/// [`RecognizerPool`].
pub trait TextRecognizer {
    /// Recognize text in an encoded image.
    fn recognize(&mut self, image: &[u8]) -> Result<RecognizedText, OcrError>;
}

/// Recognizer that returns one canned response for every input.
///
/// Stands in for a real backend in tests and examples.
#[derive(Debug, Clone)]
pub struct FixedRecognizer {
    text: String,
    confidence: f64,
}

impl FixedRecognizer {
    /// Create a recognizer that always yields `text` at `confidence`.
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

impl TextRecognizer for FixedRecognizer {
    fn recognize(&mut self, _image: &[u8]) -> Result<RecognizedText, OcrError> {
        Ok(RecognizedText {
            text: self.text.clone(),
            confidence: self.confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_recognizer_is_canned() {
        let mut recognizer = FixedRecognizer::new("TOTAL $5.00", 92.5);

        let first = recognizer.recognize(b"ignored").unwrap();
        let second = recognizer.recognize(b"also ignored").unwrap();

        assert_eq!(first.text, "TOTAL $5.00");
        assert_eq!(first.confidence, 92.5);
        assert_eq!(second.text, first.text);
    }
}
