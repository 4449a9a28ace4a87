//! Receipt description synthesis.

use super::lines::{is_address_like, is_date_like, lines};
use super::patterns::{AMOUNT_TOKEN, MULTIPLE_MARKER, QTY_MARKER};

/// Lines containing these words are summary rows, never purchases.
const SUMMARY_WORDS: &[&str] = &["total", "tax", "change"];

/// Vendor-keyed generic descriptions used when no item line survives.
const VENDOR_CATEGORIES: &[(&[&str], &str)] = &[
    (
        &["shell", "chevron", "exxon", "mobil", "texaco", "arco", "speedway", "bp"],
        "Gasoline",
    ),
    (&["starbucks", "dunkin"], "Coffee"),
    (&["walgreens", "cvs", "rite aid"], "Pharmacy items"),
    (
        &["kroger", "safeway", "whole foods", "trader joe", "aldi", "publix"],
        "Groceries",
    ),
    (
        &[
            "mcdonald",
            "burger king",
            "wendy",
            "taco bell",
            "chipotle",
            "subway",
            "chick-fil-a",
            "kfc",
            "ihop",
            "denny",
        ],
        "Food purchase",
    ),
];

const MAX_ITEMS: usize = 3;

/// Summarize purchased items, falling back to a vendor-generic phrase.
pub fn synthesize_description(text: &str, vendor: &str) -> String {
    synthesize_with_limit(text, vendor, MAX_ITEMS)
}

/// Same policy with a configurable item cap.
pub fn synthesize_with_limit(text: &str, vendor: &str, max_items: usize) -> String {
    let items: Vec<String> = lines(text)
        .into_iter()
        .filter(|line| is_item_line(&line.text))
        .take(max_items)
        .map(|line| AMOUNT_TOKEN.replace_all(&line.text, "").trim().to_string())
        .filter(|stripped| !stripped.is_empty())
        .collect();

    if !items.is_empty() {
        return items.join(", ");
    }

    generic_description(vendor)
}

/// A purchasable line item carries a currency amount, a quantity marker,
/// or an `N x` pattern, and is not a summary/date/address row.
fn is_item_line(line: &str) -> bool {
    let lowered = line.to_lowercase();
    if SUMMARY_WORDS.iter().any(|w| lowered.contains(w)) {
        return false;
    }
    if is_date_like(line) || is_address_like(line) {
        return false;
    }
    AMOUNT_TOKEN.is_match(line) || QTY_MARKER.is_match(line) || MULTIPLE_MARKER.is_match(line)
}

fn generic_description(vendor: &str) -> String {
    let folded = vendor.to_lowercase();
    for (keys, description) in VENDOR_CATEGORIES {
        if keys.iter().any(|key| folded.contains(key)) {
            return (*description).to_string();
        }
    }
    format!("Purchase from {}", vendor)
}
