//! Moving a card between buckets after a review.

use crate::buckets::BucketMap;
use crate::error::{LeitnerError, Result};
use crate::types::{Card, Rating};

/// Bucket a card lands in after a review.
///
/// `bucket_count` is the number of keys in the map; an easy card cannot move
/// past `bucket_count - 1`. A hard card cannot move below bucket 0.
pub fn next_bucket(current: u32, rating: Rating, bucket_count: usize) -> u32 {
    match rating {
        Rating::Easy => {
            let top = u32::try_from(bucket_count.saturating_sub(1)).unwrap_or(u32::MAX);
            current.saturating_add(1).min(top)
        }
        Rating::Hard => current.saturating_sub(1),
        Rating::Medium => current,
    }
}

/// Move `card` according to `rating`.
///
/// Precondition: the card is held by exactly one bucket. If it is found in
/// several, the lowest-numbered bucket is the one moved from and a warning is
/// logged; the other copies are left where they are.
pub fn update_buckets<'a>(
    buckets: &'a mut BucketMap,
    card: &Card,
    rating: Rating,
) -> Result<&'a mut BucketMap> {
    let current = buckets
        .bucket_of(card)
        .ok_or_else(|| LeitnerError::CardNotFound {
            front: card.front.clone(),
        })?;

    if buckets.iter().filter(|(_, cards)| cards.contains(card)).count() > 1 {
        tracing::warn!(front = %card.front, bucket = current, "card found in more than one bucket");
    }

    let target = next_bucket(current, rating, buckets.len());
    buckets.bucket_mut(current).remove(card);
    buckets.bucket_mut(target).insert(card.clone());

    tracing::debug!(
        front = %card.front,
        rating = rating.as_str(),
        from = current,
        to = target,
        "moved card"
    );
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn card(front: &str) -> Card {
        Card::new(front, "answer")
    }

    fn map_with(card: &Card, bucket: u32, count: u32) -> BucketMap {
        let mut map = BucketMap::with_buckets(count);
        map.insert(bucket, card.clone());
        map
    }

    #[test]
    fn easy_promotes() {
        let a = card("a");
        let mut map = map_with(&a, 1, 4);
        update_buckets(&mut map, &a, Rating::Easy).unwrap();
        assert_eq!(map.bucket_of(&a), Some(2));
        assert!(map.get(1).unwrap().is_empty());
    }

    #[test]
    fn easy_on_last_bucket_stays() {
        let a = card("a");
        let mut map = map_with(&a, 3, 4);
        update_buckets(&mut map, &a, Rating::Easy).unwrap();
        assert_eq!(map.bucket_of(&a), Some(3));
    }

    #[test]
    fn easy_with_single_bucket_stays_in_zero() {
        let a = card("a");
        let mut map = map_with(&a, 0, 1);
        update_buckets(&mut map, &a, Rating::Easy).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.bucket_of(&a), Some(0));
    }

    #[test]
    fn easy_is_capped_by_key_count_not_highest_key() {
        let a = card("a");
        let mut map = BucketMap::new();
        map.insert(0, card("b"));
        map.insert(5, a.clone());
        update_buckets(&mut map, &a, Rating::Easy).unwrap();
        assert_eq!(map.bucket_of(&a), Some(1));
        assert!(map.get(5).unwrap().is_empty());
    }

    #[test]
    fn hard_demotes_and_floors_at_zero() {
        let a = card("a");
        let mut map = map_with(&a, 2, 4);
        update_buckets(&mut map, &a, Rating::Hard).unwrap();
        assert_eq!(map.bucket_of(&a), Some(1));
        update_buckets(&mut map, &a, Rating::Hard).unwrap();
        update_buckets(&mut map, &a, Rating::Hard).unwrap();
        assert_eq!(map.bucket_of(&a), Some(0));
    }

    #[test]
    fn medium_keeps_bucket() {
        let a = card("a");
        let mut map = map_with(&a, 2, 4);
        let before = map.clone();
        update_buckets(&mut map, &a, Rating::Medium).unwrap();
        assert_eq!(map, before);
    }

    #[test]
    fn creates_missing_destination_bucket() {
        let a = card("a");
        let mut map = BucketMap::new();
        map.insert(0, a.clone());
        map.insert(3, card("b"));
        map.insert(4, card("c"));
        update_buckets(&mut map, &a, Rating::Easy).unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map.bucket_of(&a), Some(1));
    }

    #[test]
    fn missing_card_is_not_found_and_map_unchanged() {
        let mut map = map_with(&card("a"), 0, 2);
        let before = map.clone();
        let err = update_buckets(&mut map, &card("z"), Rating::Easy).unwrap_err();
        assert_eq!(err, LeitnerError::CardNotFound { front: "z".into() });
        assert_eq!(map, before);
    }

    #[test]
    fn duplicate_moves_lowest_copy() {
        let a = card("a");
        let mut map = BucketMap::with_buckets(4);
        map.insert(1, a.clone());
        map.insert(3, a.clone());
        update_buckets(&mut map, &a, Rating::Hard).unwrap();
        assert!(map.get(0).unwrap().contains(&a));
        assert!(map.get(3).unwrap().contains(&a));
    }

    #[test]
    fn returns_same_map_for_chaining() {
        let a = card("a");
        let mut map = map_with(&a, 0, 3);
        let updated = update_buckets(&mut map, &a, Rating::Easy).unwrap();
        update_buckets(updated, &a, Rating::Easy).unwrap();
        assert_eq!(map.bucket_of(&a), Some(2));
    }

    #[test]
    fn next_bucket_rules() {
        assert_eq!(next_bucket(0, Rating::Hard, 5), 0);
        assert_eq!(next_bucket(3, Rating::Hard, 5), 2);
        assert_eq!(next_bucket(3, Rating::Easy, 5), 4);
        assert_eq!(next_bucket(4, Rating::Easy, 5), 4);
        assert_eq!(next_bucket(0, Rating::Easy, 1), 0);
        assert_eq!(next_bucket(2, Rating::Medium, 5), 2);
    }
}
