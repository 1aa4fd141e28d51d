//! Shared fixtures for leitner-core integration tests.

use leitner_core::{parse, Card};

/// Generate deck markdown with `num_cards` cards; every other card gets a hint.
pub fn sample_deck(num_cards: usize) -> String {
    (0..num_cards)
        .map(|i| {
            let n = i + 1;
            if i % 2 == 0 {
                format!("Q: Question {n}?\nA: Answer {n}.\nH: Hint {n}\nT: sample\n")
            } else {
                format!("Q: Question {n}?\nA: Answer {n}.\n")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parsed cards of [`sample_deck`].
pub fn sample_cards(num_cards: usize) -> Vec<Card> {
    parse(&sample_deck(num_cards)).expect("sample deck parses")
}
