use anyhow::{Context, Result};

use crate::extraction::ExtractionMode;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_SCORING_TIMEOUT_SECS: u64 = 120;
const DEFAULT_SCORING_RETRY_BASE_MS: u64 = 1000;

/// Application configuration loaded from environment variables.
/// Every setting has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub extraction_mode: ExtractionMode,
    pub max_upload_bytes: usize,
    /// Resume analysis is disabled when unset.
    pub scoring_webhook_url: Option<String>,
    pub scoring_timeout_secs: u64,
    /// First retry delay for the scoring webhook; doubles on each retry.
    pub scoring_retry_base_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            extraction_mode: ExtractionMode::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            scoring_webhook_url: None,
            scoring_timeout_secs: DEFAULT_SCORING_TIMEOUT_SECS,
            scoring_retry_base_ms: DEFAULT_SCORING_RETRY_BASE_MS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: match var("PORT") {
                Some(v) => v
                    .trim()
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: var("RUST_LOG").unwrap_or(defaults.rust_log),
            extraction_mode: match var("EXTRACTION_MODE") {
                Some(v) => v
                    .parse::<ExtractionMode>()
                    .map_err(anyhow::Error::msg)
                    .context("EXTRACTION_MODE is invalid")?,
                None => defaults.extraction_mode,
            },
            max_upload_bytes: match var("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .trim()
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => defaults.max_upload_bytes,
            },
            scoring_webhook_url: var("SCORING_WEBHOOK_URL").map(|v| v.trim().to_string()),
            scoring_timeout_secs: match var("SCORING_TIMEOUT_SECS") {
                Some(v) => v
                    .trim()
                    .parse::<u64>()
                    .context("SCORING_TIMEOUT_SECS must be a whole number of seconds")?,
                None => defaults.scoring_timeout_secs,
            },
            scoring_retry_base_ms: match var("SCORING_RETRY_BASE_MS") {
                Some(v) => v
                    .trim()
                    .parse::<u64>()
                    .context("SCORING_RETRY_BASE_MS must be a whole number of milliseconds")?,
                None => defaults.scoring_retry_base_ms,
            },
        })
    }
}
