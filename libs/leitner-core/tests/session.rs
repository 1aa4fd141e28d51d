//! End-to-end study session: parse a deck, then review over several days.

mod common;

use std::collections::BTreeMap;

use chrono::{Duration, TimeZone, Utc};
use leitner_core::{
    find_progress_range, practice, progress_stats, resolve_hint, to_bucket_array,
    update_buckets, BucketMap, BucketRange, Rating, ReviewRecord,
};
use pretty_assertions::assert_eq;

#[test]
fn cards_climb_buckets_over_a_week() {
    let cards = common::sample_cards(4);
    let mut buckets = BucketMap::with_buckets(4);
    for card in &cards {
        buckets.insert(0, card.clone());
    }

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    let mut history = Vec::new();

    // The first card is always easy, the second always hard, the rest medium.
    for day in 0..8 {
        let due = practice(&to_bucket_array(&buckets), day).unwrap();
        for card in due {
            let rating = if card == cards[0] {
                Rating::Easy
            } else if card == cards[1] {
                Rating::Hard
            } else {
                Rating::Medium
            };
            update_buckets(&mut buckets, &card, rating).unwrap();
            history.push(ReviewRecord {
                card,
                rating,
                reviewed_at: start + Duration::days(day),
            });
        }
    }

    // The easy card moves up on days 0, 2 and 4, then sits in the top bucket.
    assert_eq!(buckets.bucket_of(&cards[0]), Some(3));
    assert_eq!(buckets.bucket_of(&cards[1]), Some(0));
    assert_eq!(buckets.bucket_of(&cards[2]), Some(0));
    assert!(buckets.duplicates().is_empty());

    assert_eq!(
        find_progress_range(&to_bucket_array(&buckets)),
        Some(BucketRange { min: 0, max: 3 })
    );

    let stats = progress_stats(&buckets, &history);
    assert_eq!(
        stats.bucket_distribution,
        BTreeMap::from([(0, 3), (1, 0), (2, 0), (3, 1)])
    );
    assert!(stats.accuracy_rate > 0.0 && stats.accuracy_rate < 1.0);
    assert!(stats.average_difficulty.is_some());
}

#[test]
fn hints_come_from_deck_or_fallback() {
    let cards = common::sample_cards(2);
    assert_eq!(resolve_hint(&cards[0]), "Hint 1");
    assert_eq!(
        resolve_hint(&cards[1]),
        "Think about the key concepts related to Question 2?"
    );
}
