//! Identity address assembly.

use super::lines::{is_city_state_zip, lines};
use super::patterns::STREET_ADDRESS;

/// Find the first street-shaped line, merging the immediately following
/// line when it carries a city/state/zip shape.
pub fn assemble_address(text: &str) -> Option<String> {
    let normalized = lines(text);

    for (position, line) in normalized.iter().enumerate() {
        if STREET_ADDRESS.is_match(&line.text) {
            if let Some(next) = normalized.get(position + 1) {
                if is_city_state_zip(&next.text) {
                    return Some(format!("{}, {}", line.text, next.text));
                }
            }
            return Some(line.text.clone());
        }
    }

    None
}
