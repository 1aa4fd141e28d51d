//! Modified-Leitner spaced repetition core.
//!
//! Provides:
//! - Sparse bucket map and dense bucket array, with conversion and range lookup
//! - Daily practice selection on a doubling cadence (bucket `i` every `2^i` days)
//! - Bucket updates after a hard/medium/easy review
//! - Hint lookup with a prompt-based fallback
//! - Progress statistics over the review history
//! - Markdown deck parser and study day counting

pub mod buckets;
pub mod day;
pub mod error;
pub mod hint;
pub mod parser;
pub mod practice;
pub mod stats;
pub mod types;
pub mod update;

pub use buckets::{find_progress_range, to_bucket_array, BucketArray, BucketMap};
pub use day::{study_date, study_day};
pub use error::{ErrorKind, LeitnerError, ParseError, Result};
pub use hint::resolve_hint;
pub use parser::parse;
pub use practice::{is_bucket_due, practice};
pub use stats::{progress_stats, progress_stats_raw, validate_history, validate_record};
pub use types::{
    BucketRange, Card, CardSet, LeitnerSettings, ProgressStats, Rating, RawBuckets,
    RawReviewRecord, ReviewRecord, SettingsOverride,
};
pub use update::{next_bucket, update_buckets};
