mod commands;
mod config;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use leitner_core::{Rating, SettingsOverride};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::OutputFormat;
use crate::config::Config;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "leitner", about = "Modified-Leitner flashcard scheduler", version)]
struct Cli {
    /// Session file (default: $LEITNER_SESSION or leitner-session.json)
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Hour of day when a new study day begins (default: $LEITNER_RESET_HOUR or 0)
    #[arg(long, global = true)]
    reset_hour: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a session from a markdown deck, all cards in bucket 0
    Init {
        /// Deck file (Q:/A:/H:/T: blocks)
        deck: PathBuf,
        /// Number of buckets (default: $LEITNER_BUCKETS or 5)
        #[arg(long)]
        buckets: Option<u32>,
        /// Replace an existing session
        #[arg(long)]
        force: bool,
    },

    /// List cards due for review
    Due {
        /// Day number (default: study days since the session started)
        #[arg(long, allow_negative_numbers = true)]
        day: Option<i64>,
    },

    /// Record a review and move the card between buckets
    Review {
        /// Front text of the card
        front: String,
        rating: RatingArg,
    },

    /// Show the hint for a card
    Hint {
        /// Front text of the card
        front: String,
    },

    /// Show bucket range and review statistics
    Progress,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum RatingArg {
    Hard,
    Medium,
    Easy,
}

impl From<RatingArg> for Rating {
    fn from(arg: RatingArg) -> Self {
        match arg {
            RatingArg::Hard => Rating::Hard,
            RatingArg::Medium => Rating::Medium,
            RatingArg::Easy => Rating::Easy,
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let cli = Cli::parse();
    let overrides = SettingsOverride {
        bucket_count: match &cli.command {
            Command::Init { buckets, .. } => *buckets,
            _ => None,
        },
        daily_reset_hour: cli.reset_hour,
    };
    let config = config.with_overrides(&overrides)?;
    let session_path = cli.session.unwrap_or(config.session_path);
    let settings = config.settings;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let now = Utc::now();

    match cli.command {
        Command::Init { deck, force, .. } => {
            commands::init(&mut out, &deck, &session_path, &settings, force, now)
        }
        Command::Due { day } => {
            let session = Session::load(&session_path)?;
            let day = day.unwrap_or_else(|| session.day_at(now, settings.daily_reset_hour));
            commands::due(&mut out, &session, day, cli.format)
        }
        Command::Review { front, rating } => {
            let mut session = Session::load(&session_path)?;
            commands::review(&mut out, &mut session, &front, rating.into(), cli.format, now)?;
            session.save(&session_path)
        }
        Command::Hint { front } => {
            let session = Session::load(&session_path)?;
            commands::hint(&mut out, &session, &front)
        }
        Command::Progress => {
            let session = Session::load(&session_path)?;
            commands::progress(&mut out, &session, cli.format)
        }
    }
}
