//! Line normalization and token classifiers shared by both pipelines.

use super::patterns::{
    CITY_STATE_ZIP, DATE_DAY_FIRST, DATE_MDY_DASH, DATE_MDY_SLASH, DATE_MONTH_FIRST, DATE_YMD,
    STREET_ADDRESS,
};

/// A trimmed, non-empty line and its index in the normalized sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Zero-based index over the normalized sequence, not the raw text.
    pub index: usize,

    /// Trimmed line text.
    pub text: String,
}

/// Split raw OCR text into trimmed, non-empty lines in original order.
///
/// Total and deterministic. Empty or whitespace-only input yields an empty
/// vector, which every extractor treats as "nothing found".
pub fn lines(text: &str) -> Vec<Line> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, text)| Line {
            index,
            text: text.to_string(),
        })
        .collect()
}

/// True when the line contains any recognized date shape.
pub fn is_date_like(line: &str) -> bool {
    DATE_MDY_SLASH.is_match(line)
        || DATE_MDY_DASH.is_match(line)
        || DATE_YMD.is_match(line)
        || DATE_MONTH_FIRST.is_match(line)
        || DATE_DAY_FIRST.is_match(line)
}

/// True when the line looks like a street address or a city/state/zip line.
pub fn is_address_like(line: &str) -> bool {
    STREET_ADDRESS.is_match(line) || is_city_state_zip(line)
}

/// True when the whole line is a `City, ST 12345[-6789]` shape.
pub fn is_city_state_zip(line: &str) -> bool {
    CITY_STATE_ZIP.is_match(line)
}

/// True when the line holds only digits and whitespace.
pub fn is_numeric_only(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace())
}

/// Title-case each whitespace-separated word, lowercasing the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
