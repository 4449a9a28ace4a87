//! Date extraction for receipts and identity documents.
//!
//! Receipts take the earliest parseable date in text order. Identity
//! documents carry two otherwise identical-looking date fields; the
//! temporal direction filter (birth strictly past, expiration strictly
//! future, relative to an injectable reference date) disambiguates them.

use chrono::NaiveDate;

use super::lines::lines;
use super::patterns::{
    DATE_DAY_FIRST, DATE_MDY_DASH, DATE_MDY_SLASH, DATE_MONTH_FIRST, DATE_YMD, DOB_LABEL,
    EXP_LABEL,
};
use super::FieldExtractor;

/// A date token found in text, ordered the way it appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateToken {
    /// Parsed calendar date.
    pub value: NaiveDate,

    /// Byte offset of the match in the scanned text.
    pub start: usize,

    /// Scan priority of the shape that matched, breaking same-offset ties.
    pub rank: u8,

    /// The matched text.
    pub source: String,
}

/// Date extractor returning tokens in text order.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = DateToken;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        scan_dates(text)
    }
}

/// Scan text for all five date shapes; tokens that fail calendar
/// validation are dropped. Result is sorted by position in the text.
pub fn scan_dates(text: &str) -> Vec<DateToken> {
    let mut tokens = Vec::new();

    // M/D/Y
    for caps in DATE_MDY_SLASH.captures_iter(text) {
        let month: u32 = caps[1].parse().unwrap_or(0);
        let day: u32 = caps[2].parse().unwrap_or(0);
        let year = parse_year(&caps[3]);

        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            let full_match = caps.get(0).unwrap();
            tokens.push(DateToken {
                value: date,
                start: full_match.start(),
                rank: 0,
                source: full_match.as_str().to_string(),
            });
        }
    }

    // M-D-Y
    for caps in DATE_MDY_DASH.captures_iter(text) {
        let month: u32 = caps[1].parse().unwrap_or(0);
        let day: u32 = caps[2].parse().unwrap_or(0);
        let year = parse_year(&caps[3]);

        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            let full_match = caps.get(0).unwrap();
            tokens.push(DateToken {
                value: date,
                start: full_match.start(),
                rank: 1,
                source: full_match.as_str().to_string(),
            });
        }
    }

    // Y-M-D
    for caps in DATE_YMD.captures_iter(text) {
        let year: i32 = caps[1].parse().unwrap_or(0);
        let month: u32 = caps[2].parse().unwrap_or(0);
        let day: u32 = caps[3].parse().unwrap_or(0);

        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            let full_match = caps.get(0).unwrap();
            tokens.push(DateToken {
                value: date,
                start: full_match.start(),
                rank: 2,
                source: full_match.as_str().to_string(),
            });
        }
    }

    // Month D, Y
    for caps in DATE_MONTH_FIRST.captures_iter(text) {
        let month = month_number(&caps[1]);
        let day: u32 = caps[2].parse().unwrap_or(0);
        let year: i32 = caps[3].parse().unwrap_or(0);

        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            let full_match = caps.get(0).unwrap();
            tokens.push(DateToken {
                value: date,
                start: full_match.start(),
                rank: 3,
                source: full_match.as_str().to_string(),
            });
        }
    }

    // D Month Y
    for caps in DATE_DAY_FIRST.captures_iter(text) {
        let day: u32 = caps[1].parse().unwrap_or(0);
        let month = month_number(&caps[2]);
        let year: i32 = caps[3].parse().unwrap_or(0);

        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            let full_match = caps.get(0).unwrap();
            tokens.push(DateToken {
                value: date,
                start: full_match.start(),
                rank: 4,
                source: full_match.as_str().to_string(),
            });
        }
    }

    tokens.sort_by(|a, b| a.start.cmp(&b.start).then(a.rank.cmp(&b.rank)));
    tokens
}

/// Earliest parseable date in text order, regardless of labels.
pub fn resolve_receipt_date(text: &str) -> Option<NaiveDate> {
    scan_dates(text).into_iter().next().map(|t| t.value)
}

/// Date of birth: labeled lines first, then any bare token; every
/// candidate must be strictly before the reference date.
pub fn resolve_birth_date(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    for line in lines(text) {
        if let Some(caps) = DOB_LABEL.captures(&line.text) {
            if let Some(token) = scan_dates(&caps[1]).into_iter().find(|t| t.value < reference) {
                return Some(token.value);
            }
        }
    }

    scan_dates(text)
        .into_iter()
        .find(|t| t.value < reference)
        .map(|t| t.value)
}

/// Expiration: the same policy with the direction reversed; every
/// candidate must be strictly after the reference date.
pub fn resolve_expiration(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    for line in lines(text) {
        if let Some(caps) = EXP_LABEL.captures(&line.text) {
            if let Some(token) = scan_dates(&caps[1]).into_iter().find(|t| t.value > reference) {
                return Some(token.value);
            }
        }
    }

    scan_dates(text)
        .into_iter()
        .find(|t| t.value > reference)
        .map(|t| t.value)
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        // Two-digit year: 00-50 maps to 2000s, 51-99 to 1900s.
        if year <= 50 {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}

fn month_number(name: &str) -> u32 {
    // The month alternation guarantees at least three ASCII letters.
    let lowered = name.to_lowercase();
    match &lowered[..3] {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => 0,
    }
}
