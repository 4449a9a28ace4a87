//! Identity holder name parsing.
//!
//! Names on identity cards arrive in several layouts; each accepted shape
//! is reordered into a canonical `First [Middle] Last` form.

use super::lines::{is_address_like, is_date_like, is_numeric_only, lines, title_case};
use super::patterns::{
    NAME_ALL_CAPS, NAME_FALLBACK, NAME_LAST_FIRST, NAME_PROPER, NAME_SKIP, NAME_TAGGED,
};
use super::{Candidate, FieldExtractor};

const DEFAULT_SCAN_LINES: usize = 8;

/// Holder name extractor over the leading lines of an identity card.
pub struct NameExtractor {
    scan_lines: usize,
}

impl NameExtractor {
    pub fn new(scan_lines: usize) -> Self {
        Self { scan_lines }
    }

    fn eligible(line: &str) -> bool {
        if line.chars().count() < 3 {
            return false;
        }
        if is_numeric_only(line) {
            return false;
        }
        if NAME_SKIP.is_match(line) {
            return false;
        }
        if is_date_like(line) || is_address_like(line) {
            return false;
        }
        true
    }

    fn match_shapes(line: &str, index: usize) -> Option<Candidate<String>> {
        if let Some(caps) = NAME_PROPER.captures(line) {
            let name = join_name(&caps[1], caps.get(2).map(|m| m.as_str()), &caps[3]);
            return Some(Candidate::new(name, 1, index, line, "proper_case"));
        }
        if let Some(caps) = NAME_LAST_FIRST.captures(line) {
            // Groups arrive Last, First, [Middle].
            let name = title_case(&join_name(
                &caps[2],
                caps.get(3).map(|m| m.as_str()),
                &caps[1],
            ));
            return Some(Candidate::new(name, 2, index, line, "last_first"));
        }
        if let Some(caps) = NAME_TAGGED.captures(line) {
            // LN tags the last name, FN the first.
            let name = title_case(&format!("{} {}", &caps[2], &caps[1]));
            return Some(Candidate::new(name, 3, index, line, "ln_fn_tagged"));
        }
        if let Some(caps) = NAME_ALL_CAPS.captures(line) {
            let name = title_case(&join_name(
                &caps[1],
                caps.get(2).map(|m| m.as_str()),
                &caps[3],
            ));
            return Some(Candidate::new(name, 4, index, line, "all_caps"));
        }
        None
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_LINES)
    }
}

impl FieldExtractor for NameExtractor {
    type Output = Candidate<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let normalized = lines(text);
        let window = &normalized[..normalized.len().min(self.scan_lines)];

        for line in window {
            if !Self::eligible(&line.text) {
                continue;
            }
            if let Some(hit) = Self::match_shapes(&line.text, line.index) {
                return Some(hit);
            }
        }

        // Fallback: any 2-3 word proper-case line, accepted verbatim.
        for line in window {
            if !Self::eligible(&line.text) {
                continue;
            }
            if NAME_FALLBACK.is_match(&line.text) {
                return Some(Candidate::new(
                    line.text.clone(),
                    5,
                    line.index,
                    line.text.as_str(),
                    "proper_line",
                ));
            }
        }

        None
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let normalized = lines(text);
        let window = &normalized[..normalized.len().min(self.scan_lines)];
        let mut all = Vec::new();

        for line in window {
            if !Self::eligible(&line.text) {
                continue;
            }
            if let Some(hit) = Self::match_shapes(&line.text, line.index) {
                all.push(hit);
            } else if NAME_FALLBACK.is_match(&line.text) {
                all.push(Candidate::new(
                    line.text.clone(),
                    5,
                    line.index,
                    line.text.as_str(),
                    "proper_line",
                ));
            }
        }

        all
    }
}

/// Parse the holder name with the default window.
pub fn parse_name(text: &str) -> Option<String> {
    NameExtractor::default().extract(text).map(|c| c.value)
}

fn join_name(first: &str, middle: Option<&str>, last: &str) -> String {
    match middle {
        Some(middle) => format!("{} {} {}", first, middle, last),
        None => format!("{} {}", first, last),
    }
}
