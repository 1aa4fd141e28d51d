//! Progress statistics over the bucket map and review history.

use crate::buckets::BucketMap;
use crate::error::{LeitnerError, Result};
use crate::types::{ProgressStats, Rating, RawBuckets, RawReviewRecord, ReviewRecord};
use chrono::DateTime;

/// Validate one stored review record.
pub fn validate_record(index: usize, raw: RawReviewRecord) -> Result<ReviewRecord> {
    let invalid = |reason: &str| LeitnerError::InvalidHistory {
        index,
        reason: reason.to_string(),
    };

    let card = raw.card.ok_or_else(|| invalid("missing card"))?;
    let rating = raw
        .rating
        .ok_or_else(|| invalid("missing rating"))?
        .as_u64()
        .and_then(|value| u8::try_from(value).ok())
        .and_then(Rating::from_value)
        .ok_or_else(|| invalid("unknown rating value"))?;
    let timestamp = raw
        .timestamp
        .ok_or_else(|| invalid("missing timestamp"))?
        .as_f64()
        .filter(|timestamp| timestamp.is_finite())
        .ok_or_else(|| invalid("timestamp is not a number"))?;
    let reviewed_at = DateTime::from_timestamp_millis(timestamp as i64)
        .ok_or_else(|| invalid("timestamp out of range"))?;

    Ok(ReviewRecord {
        card,
        rating,
        reviewed_at,
    })
}

/// Validate a whole stored history, failing on the first bad record.
pub fn validate_history(raw: Vec<RawReviewRecord>) -> Result<Vec<ReviewRecord>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| validate_record(index, record))
        .collect()
}

/// Accuracy, bucket sizes and mean difficulty.
pub fn progress_stats(buckets: &BucketMap, history: &[ReviewRecord]) -> ProgressStats {
    let bucket_distribution = buckets
        .iter()
        .map(|(bucket, cards)| (bucket, cards.len()))
        .collect();

    if history.is_empty() {
        return ProgressStats {
            accuracy_rate: 0.0,
            bucket_distribution,
            average_difficulty: None,
        };
    }

    let total = history.len() as f64;
    let easy = history
        .iter()
        .filter(|record| record.rating == Rating::Easy)
        .count() as f64;
    let difficulty_sum: f64 = history
        .iter()
        .map(|record| f64::from(record.rating.to_value()))
        .sum();

    ProgressStats {
        accuracy_rate: easy / total,
        bucket_distribution,
        average_difficulty: Some(difficulty_sum / total),
    }
}

/// Validate stored buckets and history, then compute statistics.
///
/// Nothing is computed unless every bucket key and every record is valid.
pub fn progress_stats_raw(
    buckets: RawBuckets,
    history: Vec<RawReviewRecord>,
) -> Result<ProgressStats> {
    let buckets = BucketMap::from_raw(buckets)?;
    let history = validate_history(history)?;
    Ok(progress_stats(&buckets, &history))
}
