//! Hint lookup.

use crate::types::Card;

const FALLBACK_PREFIX: &str = "Think about the key concepts related to ";

/// The card's own hint, trimmed, or a prompt-based fallback when it has none.
pub fn resolve_hint(card: &Card) -> String {
    let hint = card.hint.trim();
    if hint.is_empty() {
        format!("{FALLBACK_PREFIX}{}", card.front)
    } else {
        hint.to_string()
    }
}
