//! Subcommand implementations.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use leitner_core::{
    find_progress_range, parse, practice, progress_stats, resolve_hint, to_bucket_array,
    update_buckets, BucketRange, Card, LeitnerError, LeitnerSettings, ProgressStats, Rating,
    ReviewRecord,
};
use serde::Serialize;

use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Serialize)]
struct DueCard<'a> {
    bucket: Option<u32>,
    front: &'a str,
}

#[derive(Serialize)]
struct DueReport<'a> {
    day: i64,
    cards: Vec<DueCard<'a>>,
}

#[derive(Serialize)]
struct MoveReport<'a> {
    front: &'a str,
    rating: Rating,
    from: u32,
    to: u32,
}

#[derive(Serialize)]
struct ProgressReport {
    range: Option<BucketRange>,
    reviews: usize,
    #[serde(flatten)]
    stats: ProgressStats,
}

fn write_json(out: &mut dyn Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn find_card(session: &Session, front: &str) -> Result<(u32, Card)> {
    match session.buckets.find_by_front(front) {
        Some((bucket, card)) => Ok((bucket, card.clone())),
        None => Err(LeitnerError::CardNotFound {
            front: front.to_string(),
        }
        .into()),
    }
}

/// Create a session from a markdown deck.
pub fn init(
    out: &mut dyn Write,
    deck: &Path,
    session_path: &Path,
    settings: &LeitnerSettings,
    force: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    if session_path.exists() && !force {
        bail!(
            "session {} already exists (use --force to replace it)",
            session_path.display()
        );
    }

    let content = std::fs::read_to_string(deck)
        .with_context(|| format!("failed to read deck {}", deck.display()))?;
    let cards = parse(&content).with_context(|| format!("invalid deck {}", deck.display()))?;
    let count = cards.len();

    let session = Session::new(cards, settings.bucket_count, now);
    session.save(session_path)?;

    tracing::info!(cards = count, buckets = settings.bucket_count, "created session");
    writeln!(
        out,
        "Created {} with {} card(s) in {} bucket(s)",
        session_path.display(),
        count,
        settings.bucket_count
    )?;
    Ok(())
}

/// List cards due on `day`.
pub fn due(out: &mut dyn Write, session: &Session, day: i64, format: OutputFormat) -> Result<()> {
    let selected = practice(&to_bucket_array(&session.buckets), day)?;
    let cards: Vec<DueCard> = selected
        .iter()
        .map(|card| DueCard {
            bucket: session.buckets.bucket_of(card),
            front: &card.front,
        })
        .collect();

    match format {
        OutputFormat::Json => write_json(out, &DueReport { day, cards }),
        OutputFormat::Plain => {
            writeln!(out, "Day {}: {} card(s) due", day, cards.len())?;
            for card in &cards {
                match card.bucket {
                    Some(bucket) => writeln!(out, "  [{}] {}", bucket, card.front)?,
                    None => writeln!(out, "  {}", card.front)?,
                }
            }
            Ok(())
        }
    }
}

/// Record a review and move the card. The caller saves the session.
pub fn review(
    out: &mut dyn Write,
    session: &mut Session,
    front: &str,
    rating: Rating,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> Result<()> {
    let (from, card) = find_card(session, front)?;
    update_buckets(&mut session.buckets, &card, rating)?;
    let to = session.buckets.bucket_of(&card).unwrap_or(from);

    session.history.push(ReviewRecord {
        card,
        rating,
        reviewed_at: now,
    });

    match format {
        OutputFormat::Json => write_json(
            out,
            &MoveReport {
                front,
                rating,
                from,
                to,
            },
        ),
        OutputFormat::Plain => {
            writeln!(out, "{}: bucket {} -> {}", front, from, to)?;
            Ok(())
        }
    }
}

pub fn hint(out: &mut dyn Write, session: &Session, front: &str) -> Result<()> {
    let (_, card) = find_card(session, front)?;
    writeln!(out, "{}", resolve_hint(&card))?;
    Ok(())
}

/// Occupied bucket range and review statistics.
pub fn progress(out: &mut dyn Write, session: &Session, format: OutputFormat) -> Result<()> {
    let report = ProgressReport {
        range: find_progress_range(&to_bucket_array(&session.buckets)),
        reviews: session.history.len(),
        stats: progress_stats(&session.buckets, &session.history),
    };

    if format == OutputFormat::Json {
        return write_json(out, &report);
    }

    match report.range {
        Some(range) => writeln!(out, "Buckets in use: {} to {}", range.min, range.max)?,
        None => writeln!(out, "Buckets in use: none")?,
    }
    for (bucket, size) in &report.stats.bucket_distribution {
        writeln!(out, "  bucket {}: {} card(s)", bucket, size)?;
    }
    writeln!(out, "Reviews: {}", report.reviews)?;
    writeln!(out, "Accuracy: {:.1}%", report.stats.accuracy_rate * 100.0)?;
    match report.stats.average_difficulty {
        Some(avg) => writeln!(out, "Average difficulty: {:.2}", avg)?,
        None => writeln!(out, "Average difficulty: n/a")?,
    }
    Ok(())
}
