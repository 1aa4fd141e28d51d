//! Error types for leitner-core.

use thiserror::Error;

/// Result type alias using LeitnerError.
pub type Result<T> = std::result::Result<T, LeitnerError>;

/// Errors raised by the scheduling operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LeitnerError {
    #[error("invalid day {day}: day must be non-negative")]
    InvalidDay { day: i64 },

    #[error("card not found in any bucket: {front}")]
    CardNotFound { front: String },

    #[error("invalid buckets: {0}")]
    InvalidBuckets(String),

    #[error("invalid history record {index}: {reason}")]
    InvalidHistory { index: usize, reason: String },
}

/// Broad failure category, for callers that only care about the class of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    InvalidData,
}

impl LeitnerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDay { .. } => ErrorKind::InvalidInput,
            Self::CardNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidBuckets(_) | Self::InvalidHistory { .. } => ErrorKind::InvalidData,
        }
    }
}

/// Errors that can occur while parsing a markdown deck.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("missing front (Q:) at line {line}")]
    MissingFront { line: usize },

    #[error("missing back (A:) at line {line}")]
    MissingBack { line: usize },

    #[error("field {field} given twice at line {line}")]
    RepeatedField { field: &'static str, line: usize },

    #[error("duplicate card at line {line}: {front}")]
    DuplicateCard { front: String, line: usize },
}
