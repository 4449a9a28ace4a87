//! Vendor recognition for receipts.

use super::lines::{is_address_like, is_date_like, lines, title_case, Line};
use super::{Candidate, FieldExtractor};

/// Known merchant names in display form. Matching is case-insensitive
/// with apostrophes ignored, so "LOWES" still hits "Lowe's".
const VENDOR_GAZETTEER: &[&str] = &[
    // General retail
    "Walmart",
    "Target",
    "Costco",
    "Home Depot",
    "Lowe's",
    "Best Buy",
    "Dollar General",
    "Dollar Tree",
    // Grocery
    "Kroger",
    "Safeway",
    "Whole Foods",
    "Trader Joe's",
    "Aldi",
    "Publix",
    // Pharmacy
    "Walgreens",
    "CVS",
    "Rite Aid",
    // Fuel
    "Shell",
    "Chevron",
    "Exxon",
    "Mobil",
    "Texaco",
    "Arco",
    "Speedway",
    "7-Eleven",
    // Restaurants and coffee
    "McDonald's",
    "Burger King",
    "Wendy's",
    "Taco Bell",
    "Chipotle",
    "Subway",
    "Chick-fil-A",
    "KFC",
    "Starbucks",
    "Dunkin",
    "IHOP",
    "Denny's",
];

const DEFAULT_SCAN_LINES: usize = 5;

/// Merchant name extractor over the leading lines of a receipt.
pub struct VendorRecognizer {
    scan_lines: usize,
    extra_vendors: Vec<String>,
}

impl VendorRecognizer {
    pub fn new(scan_lines: usize) -> Self {
        Self {
            scan_lines,
            extra_vendors: Vec::new(),
        }
    }

    /// Additional merchant names recognized beyond the built-in list.
    pub fn with_extra_vendors(mut self, vendors: Vec<String>) -> Self {
        self.extra_vendors = vendors;
        self
    }

    fn window<'a>(&self, normalized: &'a [Line]) -> &'a [Line] {
        &normalized[..normalized.len().min(self.scan_lines)]
    }

    fn gazetteer_match(&self, line: &Line) -> Option<Candidate<String>> {
        let haystack = fold(&line.text);

        for entry in VENDOR_GAZETTEER.iter() {
            if haystack.contains(&fold(entry)) {
                return Some(Candidate::new(
                    entry.to_string(),
                    1,
                    line.index,
                    line.text.as_str(),
                    "gazetteer",
                ));
            }
        }
        for entry in &self.extra_vendors {
            if haystack.contains(&fold(entry)) {
                return Some(Candidate::new(
                    entry.clone(),
                    1,
                    line.index,
                    line.text.as_str(),
                    "gazetteer",
                ));
            }
        }
        None
    }

    fn plausible_name(line: &Line) -> Option<Candidate<String>> {
        let text = &line.text;
        let length = text.chars().count();

        if !(2..=49).contains(&length) {
            return None;
        }
        if !text.chars().any(char::is_alphabetic) {
            return None;
        }
        if text.contains(['$', '€', '£']) {
            return None;
        }
        if text.to_lowercase().contains("total") {
            return None;
        }
        if is_date_like(text) || is_address_like(text) {
            return None;
        }

        Some(Candidate::new(
            title_case(text),
            2,
            line.index,
            text.as_str(),
            "plausible_name",
        ))
    }
}

impl Default for VendorRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_LINES)
    }
}

impl FieldExtractor for VendorRecognizer {
    type Output = Candidate<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let normalized = lines(text);
        let window = self.window(&normalized);

        // A gazetteer hit anywhere in the window beats a heuristic name on
        // an earlier line; the list is strictly more reliable.
        for line in window {
            if let Some(hit) = self.gazetteer_match(line) {
                return Some(hit);
            }
        }
        for line in window {
            if let Some(hit) = Self::plausible_name(line) {
                return Some(hit);
            }
        }
        None
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let normalized = lines(text);
        let window = self.window(&normalized);
        let mut all = Vec::new();

        for line in window {
            if let Some(hit) = self.gazetteer_match(line) {
                all.push(hit);
            }
        }
        for line in window {
            if let Some(hit) = Self::plausible_name(line) {
                all.push(hit);
            }
        }
        all
    }
}

/// Recognize the merchant with the default window and built-in list only.
pub fn recognize_vendor(text: &str) -> Option<String> {
    VendorRecognizer::default().extract(text).map(|c| c.value)
}

fn fold(s: &str) -> String {
    s.to_lowercase().replace('\'', "")
}
