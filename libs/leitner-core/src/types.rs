//! Core types for the Leitner scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// A learning item. Identity is the value itself: two cards with the same
/// fields are the same card.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Card {
    /// Create a card with no hint and no tags.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            hint: String::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }
}

/// The set of cards held by one bucket.
pub type CardSet = BTreeSet<Card>;

/// Difficulty reported after reviewing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Hard,
    Medium,
    Easy,
}

impl Rating {
    /// Convert to the numeric ordinal (0-2) used for averaging.
    pub fn to_value(self) -> u8 {
        match self {
            Self::Hard => 0,
            Self::Medium => 1,
            Self::Easy => 2,
        }
    }

    /// Create from the numeric ordinal.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Hard),
            1 => Some(Self::Medium),
            2 => Some(Self::Easy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hard => "hard",
            Self::Medium => "medium",
            Self::Easy => "easy",
        }
    }
}

/// One completed review, as kept in the study history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub card: Card,
    pub rating: Rating,
    pub reviewed_at: DateTime<Utc>,
}

/// A review record as loaded from storage, before validation.
///
/// `rating` is the numeric ordinal and `timestamp` is Unix time in
/// milliseconds. Both accept any JSON value so that a wrongly typed field
/// reaches validation instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawReviewRecord {
    #[serde(default)]
    pub card: Option<Card>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

impl From<&ReviewRecord> for RawReviewRecord {
    fn from(record: &ReviewRecord) -> Self {
        Self {
            card: Some(record.card.clone()),
            rating: Some(Value::from(record.rating.to_value())),
            timestamp: Some(Value::from(record.reviewed_at.timestamp_millis())),
        }
    }
}

/// Buckets as loaded from storage, keyed by the textual bucket number.
pub type RawBuckets = BTreeMap<String, Vec<Card>>;

/// Lowest and highest occupied bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRange {
    pub min: usize,
    pub max: usize,
}

/// Aggregate learning progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub accuracy_rate: f64,
    pub bucket_distribution: BTreeMap<u32, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_difficulty: Option<f64>,
}

/// Scheduler settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeitnerSettings {
    /// Number of buckets created up front for a new session.
    pub bucket_count: u32,
    /// Hour of day (0-23) when a new study day begins.
    pub daily_reset_hour: u32,
}

impl Default for LeitnerSettings {
    fn default() -> Self {
        Self {
            bucket_count: 5,
            daily_reset_hour: 0,
        }
    }
}

/// Partial settings (all fields optional for overrides).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_reset_hour: Option<u32>,
}

impl LeitnerSettings {
    /// Apply overrides on top of these settings.
    pub fn merge(&self, overrides: &SettingsOverride) -> Self {
        Self {
            bucket_count: overrides.bucket_count.unwrap_or(self.bucket_count),
            daily_reset_hour: overrides.daily_reset_hour.unwrap_or(self.daily_reset_hour),
        }
    }
}
