use anyhow::{Context, Result};

use crate::scoring::ScoringBackend;

/// Application configuration loaded from environment variables.
/// Every variable has a default; parse failures abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub curriculum_dir: String,
    pub scoring_backend: ScoringBackend,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            curriculum_dir: std::env::var("CURRICULUM_DIR")
                .unwrap_or_else(|_| "curriculum_files".to_string()),
            scoring_backend: std::env::var("SCORING_BACKEND")
                .unwrap_or_else(|_| "frequency".to_string())
                .parse()
                .map_err(anyhow::Error::msg)
                .context("SCORING_BACKEND must be 'frequency' or 'set'")?,
        })
    }
}
