//! Receipt total resolution.
//!
//! A receipt carries many currency-shaped numbers (line items, subtotal,
//! tax, tip, total); this module picks the one that is the final charged
//! total. Every rule match becomes a [`Candidate`] carrying its tier and
//! line position, and a single resolution policy selects the winner.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::lines::{lines, Line};
use super::patterns::AMOUNT_RULES;
use super::{Candidate, FieldExtractor};

/// Context keywords that disqualify a candidate line from holding the
/// final total. The filter is skipped outright when it would remove every
/// candidate; receipts that carry only a subtotal line depend on that.
const CONTEXT_REJECTS: &[&str] = &["subtotal", "sub total", "tax", "discount", "tip"];

/// Total-amount extractor.
pub struct TotalExtractor;

impl TotalExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalExtractor {
    type Output = Candidate<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let normalized = lines(text);
        let candidates = collect_candidates(&normalized);
        resolve(candidates, normalized.len())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        collect_candidates(&lines(text))
    }
}

/// Resolve the charged total of a receipt.
///
/// `None` only when no currency-shaped token exists anywhere in the text.
pub fn resolve_total(text: &str) -> Option<Decimal> {
    TotalExtractor::new().extract(text).map(|c| c.value)
}

/// Parse a currency token, tolerating `$` and thousands separators.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Run every amount rule over every line.
fn collect_candidates(lines: &[Line]) -> Vec<Candidate<Decimal>> {
    let mut candidates = Vec::new();

    for line in lines {
        let lowered = line.text.to_lowercase();
        for rule in AMOUNT_RULES.iter() {
            if rule.reject.iter().any(|kw| lowered.contains(kw)) {
                continue;
            }
            for caps in rule.pattern.captures_iter(&line.text) {
                if let Some(value) = parse_amount(&caps[1]) {
                    candidates.push(Candidate::new(
                        value,
                        rule.tier,
                        line.index,
                        line.text.as_str(),
                        rule.name,
                    ));
                }
            }
        }
    }

    candidates
}

/// Resolution policy over collected candidates.
fn resolve(
    mut candidates: Vec<Candidate<Decimal>>,
    line_count: usize,
) -> Option<Candidate<Decimal>> {
    if candidates.is_empty() {
        return None;
    }

    let kept: Vec<Candidate<Decimal>> = candidates
        .iter()
        .filter(|c| {
            let lowered = c.context.to_lowercase();
            !CONTEXT_REJECTS.iter().any(|kw| lowered.contains(kw))
        })
        .cloned()
        .collect();
    // Never go from some candidates to none.
    if !kept.is_empty() {
        candidates = kept;
    }

    // Ascending tier, later line wins within a tier.
    candidates.sort_by(|a, b| a.tier.cmp(&b.tier).then(b.line_index.cmp(&a.line_index)));

    let best_tier = candidates[0].tier;
    let peers = candidates.iter().filter(|c| c.tier == best_tier).count();
    if peers > 1 {
        // The upper half of the receipt rarely holds the final total;
        // prefer the largest value on the lower half.
        let lower_half = line_count / 2;
        let late = candidates
            .iter()
            .filter(|c| c.tier == best_tier && c.line_index > lower_half)
            .max_by(|a, b| a.value.cmp(&b.value));
        if let Some(best) = late {
            return Some(best.clone());
        }
    }

    Some(candidates[0].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_total_beats_subtotal_and_tax() {
        let text = "Subtotal: $10.00\nTax: $1.00\nTotal: $11.00";
        assert_eq!(resolve_total(text), Some(dec("11.00")));
    }

    #[test]
    fn test_subtotal_only_receipt_skips_filter() {
        // The context filter would drop the only candidates; it must be
        // skipped so the subtotal value survives.
        let text = "CORNER MART\nSubtotal: $10.00\nThank you";
        assert_eq!(resolve_total(text), Some(dec("10.00")));
    }

    #[test]
    fn test_grand_total_outranks_plain_total() {
        let text = "Total: $5.00\nGrand Total: $25.00";
        assert_eq!(resolve_total(text), Some(dec("25.00")));
    }

    #[test]
    fn test_same_tier_later_line_wins() {
        // Ten lines; same-tier totals at indexes 2 and 8. The lower-half
        // restriction keeps only line 8.
        let text = "Line 0\nLine 1\nTotal: $5.00\nLine 3\nLine 4\nLine 5\nLine 6\nLine 7\nTotal: $3.00\nLine 9";
        assert_eq!(resolve_total(text), Some(dec("3.00")));
    }

    #[test]
    fn test_same_tier_lower_half_takes_max_value() {
        // Both candidates sit past the midpoint; the larger value wins
        // even though it appears earlier.
        let text = "Line 0\nLine 1\nLine 2\nLine 3\nLine 4\nLine 5\nTotal: $5.00\nLine 7\nTotal: $3.00\nLine 9";
        assert_eq!(resolve_total(text), Some(dec("5.00")));
    }

    #[test]
    fn test_same_tier_upper_half_falls_back_to_sorted_head() {
        // No candidate past the midpoint; the later of the two still wins
        // through the sort order.
        let text = "Line 0\nTotal: $7.00\nLine 2\nTotal: $2.00\nLine 4\nLine 5\nLine 6\nLine 7\nLine 8\nLine 9";
        assert_eq!(resolve_total(text), Some(dec("2.00")));
    }

    #[test]
    fn test_bare_currency_fallback() {
        let text = "STORE\nWidget $4.99\nThank you";
        assert_eq!(resolve_total(text), Some(dec("4.99")));
    }

    #[test]
    fn test_no_currency_shaped_token() {
        assert_eq!(resolve_total("Thank you for shopping"), None);
        assert_eq!(resolve_total(""), None);
    }

    #[test]
    fn test_thousands_separator() {
        let text = "Amount Due: $1,234.56";
        assert_eq!(resolve_total(text), Some(dec("1234.56")));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("11.00"), Some(dec("11.00")));
        assert_eq!(parse_amount("no digits"), None);
    }

    #[test]
    fn test_extract_all_keeps_provenance() {
        let extractor = TotalExtractor::new();
        let candidates = extractor.extract_all("Subtotal: $10.00\nTotal: $11.00");
        assert!(candidates.iter().any(|c| c.rule == "any_total" && c.line_index == 0));
        assert!(candidates.iter().any(|c| c.rule == "total_at_eol" && c.line_index == 1));
    }
}
