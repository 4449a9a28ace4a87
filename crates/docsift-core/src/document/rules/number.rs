//! Identity document number parsing.

use regex::Regex;

use super::lines::lines;
use super::patterns::{ID_ALPHA_PREFIX, ID_LABELED, ID_LETTER_DIGITS, ID_NUMERIC};

/// Minimum accepted length after whitespace stripping.
const MIN_LENGTH: usize = 6;

/// Parse the document number: per line, shapes in fixed order, first hit
/// long enough wins.
pub fn parse_number(text: &str) -> Option<String> {
    let shapes: [&Regex; 4] = [
        &*ID_LETTER_DIGITS,
        &*ID_NUMERIC,
        &*ID_ALPHA_PREFIX,
        &*ID_LABELED,
    ];

    for line in lines(text) {
        for shape in shapes {
            if let Some(caps) = shape.captures(&line.text) {
                let stripped: String =
                    caps[1].chars().filter(|c| !c.is_whitespace()).collect();
                if stripped.len() >= MIN_LENGTH {
                    return Some(stripped);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_prefixed_number() {
        assert_eq!(
            parse_number("CALIFORNIA DL\nD1234567"),
            Some("D1234567".to_string())
        );
    }

    #[test]
    fn test_plain_numeric_run() {
        assert_eq!(parse_number("ID# 123456789"), Some("123456789".to_string()));
    }

    #[test]
    fn test_two_letter_prefix() {
        assert_eq!(parse_number("No. XY123456"), Some("XY123456".to_string()));
    }

    #[test]
    fn test_labeled_number() {
        assert_eq!(
            parse_number("LICENSE: AB-12-34"),
            Some("AB-12-34".to_string())
        );
    }

    #[test]
    fn test_too_short_rejected() {
        assert_eq!(parse_number("ID: 12345"), None);
    }

    #[test]
    fn test_first_line_wins() {
        assert_eq!(
            parse_number("A1234567\nB7654321"),
            Some("A1234567".to_string())
        );
    }

    #[test]
    fn test_dates_do_not_leak_in() {
        assert_eq!(parse_number("DOB: 01/01/1980\nEXP: 01/01/2030"), None);
    }
}
