//! Session document: bucket map plus review history, stored as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use leitner_core::{
    study_day, validate_history, BucketMap, Card, RawBuckets, RawReviewRecord, ReviewRecord,
};
use serde::{Deserialize, Serialize};

/// On-disk layout.
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    started_at: DateTime<Utc>,
    buckets: RawBuckets,
    #[serde(default)]
    history: Vec<RawReviewRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub started_at: DateTime<Utc>,
    pub buckets: BucketMap,
    pub history: Vec<ReviewRecord>,
}

impl Session {
    /// New session with every card in bucket 0 and buckets `0..bucket_count` created.
    pub fn new(cards: Vec<Card>, bucket_count: u32, started_at: DateTime<Utc>) -> Self {
        let mut buckets = BucketMap::with_buckets(bucket_count);
        for card in cards {
            buckets.insert(0, card);
        }
        Self {
            started_at,
            buckets,
            history: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session {}", path.display()))?;
        let file: SessionFile = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse session {}", path.display()))?;

        let buckets = BucketMap::from_raw(file.buckets)?;
        let history = validate_history(file.history)?;

        for card in buckets.duplicates() {
            tracing::warn!(front = %card.front, "card appears in more than one bucket");
        }
        tracing::debug!(
            path = %path.display(),
            buckets = buckets.len(),
            reviews = history.len(),
            "loaded session"
        );

        Ok(Self {
            started_at: file.started_at,
            buckets,
            history,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = SessionFile {
            started_at: self.started_at,
            buckets: self.buckets.to_raw(),
            history: self.history.iter().map(RawReviewRecord::from).collect(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write session {}", path.display()))?;
        tracing::debug!(path = %path.display(), "saved session");
        Ok(())
    }

    /// Day counter for `now`, counted from the session start.
    pub fn day_at(&self, now: DateTime<Utc>, daily_reset_hour: u32) -> i64 {
        study_day(&self.started_at, &now, daily_reset_hour)
    }
}
