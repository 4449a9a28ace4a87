//! Common regex patterns for receipt and identity card extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// One tiered rule for locating the charged total on a receipt.
///
/// Rules are applied per line; group 1 of `pattern` captures the amount.
/// A line whose lowercased text contains any `reject` keyword never
/// produces a candidate from that rule.
pub struct AmountRule {
    /// Identifier carried into candidate provenance and logs.
    pub name: &'static str,

    /// Priority tier; lower is more authoritative.
    pub tier: u8,

    /// Pattern with the amount in capture group 1.
    pub pattern: Regex,

    /// Lowercase keywords that disqualify a line for this rule.
    pub reject: &'static [&'static str],
}

impl AmountRule {
    fn new(name: &'static str, tier: u8, pattern: &str, reject: &'static [&'static str]) -> Self {
        Self {
            name,
            tier,
            pattern: Regex::new(pattern).unwrap(),
            reject,
        }
    }
}

lazy_static! {
    // Receipt amount rules, most authoritative first. Tier 4 deliberately
    // omits the word boundary so it also fires on the "total" inside
    // "Subtotal"; the context filter decides whether that candidate lives.
    pub static ref AMOUNT_RULES: Vec<AmountRule> = vec![
        AmountRule::new(
            "labeled_final",
            1,
            r"(?i)\b(?:grand\s+total|amount\s+due|balance\s+due)\b[^0-9\n]*(\d[\d,]*\.\d{2})",
            &[],
        ),
        AmountRule::new(
            "total_at_eol",
            2,
            r"(?i)\btotal\b.*?(\d[\d,]*\.\d{2})\s*$",
            &[],
        ),
        AmountRule::new(
            "labeled_total",
            3,
            r"(?i)\btotal\b[^0-9\n]*(\d[\d,]*\.\d{2})",
            &["subtotal", "sub total", "grand", "final"],
        ),
        AmountRule::new(
            "any_total",
            4,
            r"(?i)total[^0-9\n]*(\d[\d,]*\.\d{2})",
            &[],
        ),
        AmountRule::new(
            "bare_currency",
            5,
            r"\$\s*(\d[\d,]*\.\d{2})",
            &[],
        ),
    ];

    // Date shapes, in scan priority order: M/D/Y, M-D-Y, Y-M-D, then the
    // two month-name orderings.
    pub static ref DATE_MDY_SLASH: Regex = Regex::new(
        r"\b(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})\b"
    ).unwrap();

    pub static ref DATE_MDY_DASH: Regex = Regex::new(
        r"\b(\d{1,2})-(\d{1,2})-(\d{4}|\d{2})\b"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_MONTH_FIRST: Regex = Regex::new(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b"
    ).unwrap();

    pub static ref DATE_DAY_FIRST: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?,?\s+(\d{4})\b"
    ).unwrap();

    // Labeled identity dates; group 1 is the remainder of the line, which
    // is re-scanned for a date token.
    pub static ref DOB_LABEL: Regex = Regex::new(
        r"(?i)\b(?:DOB|date\s+of\s+birth|birth\s*date|born)\b[\s:#]*(.+)"
    ).unwrap();

    pub static ref EXP_LABEL: Regex = Regex::new(
        r"(?i)\b(?:exp(?:ires|iration)?|valid\s+(?:until|thru|through))\b\.?[\s:#]*(.+)"
    ).unwrap();

    // Identity name shapes, tried in this order.
    pub static ref NAME_PROPER: Regex = Regex::new(
        r"^([A-Z][a-z]+)(?:\s+([A-Z][a-z]+))?\s+([A-Z][a-z]+)$"
    ).unwrap();

    pub static ref NAME_LAST_FIRST: Regex = Regex::new(
        r"^([A-Z][A-Za-z'-]+),\s*([A-Z][A-Za-z'-]+)(?:\s+([A-Z][A-Za-z'-]*\.?))?$"
    ).unwrap();

    pub static ref NAME_TAGGED: Regex = Regex::new(
        r"(?i)\bLN[\s:]+([A-Za-z'-]+).*?\bFN[\s:]+([A-Za-z'-]+)"
    ).unwrap();

    pub static ref NAME_ALL_CAPS: Regex = Regex::new(
        r"^([A-Z]{2,})(?:\s+([A-Z]{2,}))?\s+([A-Z]{2,})$"
    ).unwrap();

    pub static ref NAME_FALLBACK: Regex = Regex::new(
        r"^[A-Z][A-Za-z'-]*(?:\s+[A-Z][A-Za-z'-]*){1,2}$"
    ).unwrap();

    // Header words that disqualify a line from being a holder name.
    pub static ref NAME_SKIP: Regex = Regex::new(
        r"(?i)\b(?:licen[cs]e|state)\b"
    ).unwrap();

    // Identity number shapes, tried in this order per line.
    pub static ref ID_LETTER_DIGITS: Regex = Regex::new(
        r"\b([A-Z]\d{7,8})\b"
    ).unwrap();

    pub static ref ID_NUMERIC: Regex = Regex::new(
        r"\b(\d{8,12})\b"
    ).unwrap();

    pub static ref ID_ALPHA_PREFIX: Regex = Regex::new(
        r"\b([A-Z]{1,2}\d{6,9})\b"
    ).unwrap();

    pub static ref ID_LABELED: Regex = Regex::new(
        r"(?i)\b(?:DL|ID|LIC(?:ENSE)?)\s*[#:]?\s*([A-Za-z0-9-]{5,})"
    ).unwrap();

    // Address shapes.
    pub static ref STREET_ADDRESS: Regex = Regex::new(
        r"(?i)^\d+\s+(?:[A-Za-z0-9.'-]+\s+){0,4}(?:st|street|ave|avenue|rd|road|dr|drive|ln|lane|blvd|boulevard|way|ct|court|cir|circle|pl|place|pkwy|parkway|hwy|highway|ter|terrace)\b"
    ).unwrap();

    pub static ref CITY_STATE_ZIP: Regex = Regex::new(
        r"^[A-Za-z][A-Za-z .'-]*,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?$"
    ).unwrap();

    // Receipt line-item markers.
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"\$?\s*\d[\d,]*\.\d{2}"
    ).unwrap();

    pub static ref QTY_MARKER: Regex = Regex::new(
        r"(?i)\bqty\b|@"
    ).unwrap();

    pub static ref MULTIPLE_MARKER: Regex = Regex::new(
        r"(?i)\b\d+\s*x\b"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_rules_ordered_by_tier() {
        let tiers: Vec<u8> = AMOUNT_RULES.iter().map(|r| r.tier).collect();
        assert_eq!(tiers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_labeled_total_ignores_subtotal() {
        let rule = &AMOUNT_RULES[2];
        assert_eq!(rule.name, "labeled_total");
        // The word boundary already refuses "Subtotal"; the reject list
        // additionally covers "Sub Total" written as two words.
        assert!(!rule.pattern.is_match("Subtotal: $10.00"));
        assert!(rule.pattern.is_match("Sub Total: $10.00"));
        assert!(rule.reject.contains(&"sub total"));
    }

    #[test]
    fn test_any_total_matches_inside_subtotal() {
        let rule = &AMOUNT_RULES[3];
        let caps = rule.pattern.captures("Subtotal: $10.00").unwrap();
        assert_eq!(&caps[1], "10.00");
    }

    #[test]
    fn test_total_at_eol_takes_last_amount() {
        let rule = &AMOUNT_RULES[1];
        let caps = rule.pattern.captures("Total 49 items $123.45").unwrap();
        assert_eq!(&caps[1], "123.45");
    }

    #[test]
    fn test_date_shapes() {
        assert!(DATE_MDY_SLASH.is_match("01/15/2024"));
        assert!(DATE_MDY_DASH.is_match("01-15-24"));
        assert!(DATE_YMD.is_match("2024-01-15"));
        assert!(DATE_MONTH_FIRST.is_match("January 15, 2024"));
        assert!(DATE_DAY_FIRST.is_match("15 January 2024"));
        // M-D-Y must not fire inside a Y-M-D token.
        assert!(!DATE_MDY_DASH.is_match("2030-01-01"));
    }

    #[test]
    fn test_street_address_requires_street_keyword() {
        assert!(STREET_ADDRESS.is_match("123 Main Street"));
        assert!(STREET_ADDRESS.is_match("456 N. Oak Ave Apt 2"));
        assert!(!STREET_ADDRESS.is_match("123 Main Store"));
    }

    #[test]
    fn test_city_state_zip() {
        assert!(CITY_STATE_ZIP.is_match("Springfield, IL 62704"));
        assert!(CITY_STATE_ZIP.is_match("St. Louis, MO 63101-1234"));
        assert!(!CITY_STATE_ZIP.is_match("Springfield IL 62704"));
    }

    #[test]
    fn test_name_skip_words() {
        assert!(NAME_SKIP.is_match("CALIFORNIA DRIVER LICENSE"));
        assert!(NAME_SKIP.is_match("State of Ohio"));
        assert!(!NAME_SKIP.is_match("Patricia Staten"));
    }
}
