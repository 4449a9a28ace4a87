//! Rule-based field extractors for receipts and identity cards.

pub mod lines;
pub mod patterns;

pub mod amount;
pub mod dates;
pub mod description;
pub mod vendor;

pub mod address;
pub mod doc_type;
pub mod name;
pub mod number;

pub use lines::{
    is_address_like, is_city_state_zip, is_date_like, is_numeric_only, lines, title_case, Line,
};

pub use address::assemble_address;
pub use amount::{parse_amount, resolve_total, TotalExtractor};
pub use dates::{
    resolve_birth_date, resolve_expiration, resolve_receipt_date, scan_dates, DateExtractor,
    DateToken,
};
pub use description::synthesize_description;
pub use doc_type::detect_type;
pub use name::{parse_name, NameExtractor};
pub use number::parse_number;
pub use vendor::{recognize_vendor, VendorRecognizer};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the resolved field from raw text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract every candidate occurrence of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An unresolved, provisional match for a field.
///
/// Multiple candidates may exist per field; the resolution policy of each
/// extractor selects at most one as final. Never exposed from the crate
/// root.
#[derive(Debug, Clone)]
pub struct Candidate<T> {
    /// Extracted value.
    pub value: T,

    /// Priority tier; lower is more authoritative.
    pub tier: u8,

    /// Zero-based index of the normalized line the match occurred on.
    pub line_index: usize,

    /// Full text of the line, kept for context filtering and logs.
    pub context: String,

    /// Name of the rule that produced the match.
    pub rule: &'static str,
}

impl<T> Candidate<T> {
    pub fn new(
        value: T,
        tier: u8,
        line_index: usize,
        context: impl Into<String>,
        rule: &'static str,
    ) -> Self {
        Self {
            value,
            tier,
            line_index,
            context: context.into(),
            rule,
        }
    }
}
