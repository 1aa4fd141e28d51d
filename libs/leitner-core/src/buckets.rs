//! Sparse and dense bucket representations.
//!
//! [`BucketMap`] is the mutable source of truth: bucket number to card set,
//! with gaps allowed. [`BucketArray`] is a read-only view derived from it,
//! indexed by bucket number with every gap filled by its own empty set.

use crate::error::{LeitnerError, Result};
use crate::types::{BucketRange, Card, CardSet, RawBuckets};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse bucket map. Each card is expected to live in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketMap(BTreeMap<u32, CardSet>);

impl BucketMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with empty buckets `0..count` already present.
    pub fn with_buckets(count: u32) -> Self {
        Self((0..count).map(|bucket| (bucket, CardSet::new())).collect())
    }

    /// Validate buckets loaded from storage.
    pub fn from_raw(raw: RawBuckets) -> Result<Self> {
        let mut buckets = BTreeMap::new();
        for (key, cards) in raw {
            let bucket = parse_bucket_key(&key)?;
            buckets
                .entry(bucket)
                .or_insert_with(CardSet::new)
                .extend(cards);
        }
        Ok(Self(buckets))
    }

    pub fn to_raw(&self) -> RawBuckets {
        self.0
            .iter()
            .map(|(bucket, cards)| (bucket.to_string(), cards.iter().cloned().collect()))
            .collect()
    }

    /// Add a card to a bucket, creating the bucket if needed.
    pub fn insert(&mut self, bucket: u32, card: Card) -> bool {
        self.bucket_mut(bucket).insert(card)
    }

    pub fn get(&self, bucket: u32) -> Option<&CardSet> {
        self.0.get(&bucket)
    }

    /// Number of bucket keys present, empty buckets included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &CardSet)> {
        self.0.iter().map(|(bucket, cards)| (*bucket, cards))
    }

    /// First bucket holding the card, scanning in ascending bucket order.
    pub fn bucket_of(&self, card: &Card) -> Option<u32> {
        self.iter()
            .find(|(_, cards)| cards.contains(card))
            .map(|(bucket, _)| bucket)
    }

    /// Look up a card by its front text.
    pub fn find_by_front(&self, front: &str) -> Option<(u32, &Card)> {
        self.iter().find_map(|(bucket, cards)| {
            cards
                .iter()
                .find(|card| card.front == front)
                .map(|card| (bucket, card))
        })
    }

    /// Cards present in more than one bucket.
    pub fn duplicates(&self) -> Vec<&Card> {
        let mut seen = CardSet::new();
        let mut duplicates = Vec::new();
        for (_, cards) in self.iter() {
            for card in cards {
                if !seen.insert(card.clone()) && !duplicates.contains(&card) {
                    duplicates.push(card);
                }
            }
        }
        duplicates
    }

    pub(crate) fn bucket_mut(&mut self, bucket: u32) -> &mut CardSet {
        self.0.entry(bucket).or_insert_with(CardSet::new)
    }
}

fn parse_bucket_key(key: &str) -> Result<u32> {
    let value: i64 = key.parse().map_err(|_| {
        LeitnerError::InvalidBuckets(format!("bucket key {key:?} is not an integer"))
    })?;
    if value < 0 {
        return Err(LeitnerError::InvalidBuckets(format!(
            "bucket key {value} is negative"
        )));
    }
    u32::try_from(value)
        .map_err(|_| LeitnerError::InvalidBuckets(format!("bucket key {value} is too large")))
}

/// Dense bucket array: index is the bucket number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketArray(Vec<CardSet>);

impl BucketArray {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CardSet> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardSet> {
        self.0.iter()
    }

    /// Back to the sparse form, keeping only non-empty buckets.
    pub fn to_bucket_map(&self) -> BucketMap {
        BucketMap(
            self.0
                .iter()
                .enumerate()
                .filter(|(_, cards)| !cards.is_empty())
                .map(|(index, cards)| (index as u32, cards.clone()))
                .collect(),
        )
    }
}

impl From<Vec<CardSet>> for BucketArray {
    fn from(buckets: Vec<CardSet>) -> Self {
        Self(buckets)
    }
}

/// Convert a sparse bucket map into a dense array of length `max key + 1`.
pub fn to_bucket_array(buckets: &BucketMap) -> BucketArray {
    let len = buckets.0.keys().next_back().map_or(0, |max| *max as usize + 1);
    let mut array = vec![CardSet::new(); len];
    for (bucket, cards) in buckets.iter() {
        array[bucket as usize] = cards.clone();
    }
    BucketArray(array)
}

/// Lowest and highest non-empty bucket, or `None` when every bucket is empty.
pub fn find_progress_range(buckets: &BucketArray) -> Option<BucketRange> {
    let mut occupied = buckets
        .iter()
        .enumerate()
        .filter(|(_, cards)| !cards.is_empty())
        .map(|(index, _)| index);
    let min = occupied.next()?;
    let max = occupied.last().unwrap_or(min);
    Some(BucketRange { min, max })
}
