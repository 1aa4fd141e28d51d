//! Environment configuration.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use leitner_core::{LeitnerSettings, SettingsOverride};

pub const DEFAULT_SESSION_PATH: &str = "leitner-session.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub session_path: PathBuf,
    pub settings: LeitnerSettings,
}

impl Config {
    /// Read configuration from the process environment and an optional `.env` file.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let session_path = var("LEITNER_SESSION")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH));

        let overrides = SettingsOverride {
            bucket_count: parse_var(&var, "LEITNER_BUCKETS")?,
            daily_reset_hour: parse_var(&var, "LEITNER_RESET_HOUR")?,
        };
        let settings = LeitnerSettings::default().merge(&overrides);
        validate(&settings)?;

        Ok(Self {
            session_path,
            settings,
        })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, overrides: &SettingsOverride) -> Result<Self> {
        self.settings = self.settings.merge(overrides);
        validate(&self.settings)?;
        Ok(self)
    }
}

fn parse_var(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u32>> {
    var(key)
        .map(|value| {
            value
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{key} must be a non-negative integer, got {value:?}"))
        })
        .transpose()
}

fn validate(settings: &LeitnerSettings) -> Result<()> {
    if settings.bucket_count == 0 {
        bail!("bucket count must be at least 1");
    }
    if settings.daily_reset_hour > 23 {
        bail!(
            "daily reset hour must be between 0 and 23, got {}",
            settings.daily_reset_hour
        );
    }
    Ok(())
}
