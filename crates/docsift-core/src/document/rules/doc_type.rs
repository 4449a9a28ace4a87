//! Identity document type detection.

/// Keyword sets in precedence order; the first category with a hit wins.
const TYPE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Driver's License",
        &["driver's license", "drivers license", "driver license", "driver lic"],
    ),
    ("Passport", &["passport"]),
    (
        "State ID",
        &["state id", "identification card", "state identification"],
    ),
    (
        "Military ID",
        &["military id", "armed forces", "uniformed services"],
    ),
];

/// Detect the document type by case-insensitive keyword scan.
pub fn detect_type(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    for (label, keywords) in TYPE_KEYWORDS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return Some(label);
        }
    }
    None
}
