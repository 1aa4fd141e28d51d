//! Daily practice selection.

use crate::buckets::BucketArray;
use crate::error::{LeitnerError, Result};
use crate::types::CardSet;

/// Whether bucket `index` is reviewed on `day`: every `2^index` days.
pub fn is_bucket_due(index: usize, day: u64) -> bool {
    match u32::try_from(index).ok().and_then(|shift| 1u64.checked_shl(shift)) {
        Some(period) => day % period == 0,
        // Period exceeds every representable day, so only day 0 is a multiple.
        None => day == 0,
    }
}

/// Cards due for review on `day`.
pub fn practice(buckets: &BucketArray, day: i64) -> Result<CardSet> {
    let day = u64::try_from(day).map_err(|_| LeitnerError::InvalidDay { day })?;

    let due: CardSet = buckets
        .iter()
        .enumerate()
        .filter(|(index, _)| is_bucket_due(*index, day))
        .flat_map(|(_, cards)| cards.iter().cloned())
        .collect();

    tracing::debug!(day, due = due.len(), "selected practice cards");
    Ok(due)
}
