use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Absent → questions come from the fallback pool only.
    pub anthropic_api_key: Option<String>,
    pub generation_timeout: Duration,
    pub transcript_dir: PathBuf,
    /// Seeds the per-technology question count draw.
    pub question_seed: Option<u64>,
    /// Overrides the random draw with a fixed count (1–5).
    pub question_count: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let question_count = optional_env("QUESTION_COUNT")
            .map(|v| v.parse::<usize>())
            .transpose()
            .context("QUESTION_COUNT must be a number")?;
        if let Some(n) = question_count {
            if !(1..=5).contains(&n) {
                bail!("QUESTION_COUNT must be between 1 and 5, got {n}");
            }
        }

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            generation_timeout: Duration::from_secs(
                std::env::var("GENERATION_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse::<u64>()
                    .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            transcript_dir: optional_env("TRANSCRIPT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("transcripts")),
            question_seed: optional_env("QUESTION_SEED")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("QUESTION_SEED must be an unsigned integer")?,
            question_count,
        })
    }
}

/// Reads a variable, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
