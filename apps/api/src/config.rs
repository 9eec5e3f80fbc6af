use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_PROVIDER_URL: &str = "https://oapi.saramin.co.kr/job-search";

/// Application configuration loaded from environment variables.
/// Everything has a sensible default except the provider API key, which is
/// genuinely optional: without it the service serves the bundled fixture
/// listings instead of proxying the external provider.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the persisted user-state blobs.
    pub data_dir: PathBuf,
    pub provider_url: String,
    pub provider_api_key: Option<String>,
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
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            provider_url: std::env::var("JOB_API_URL")
                .unwrap_or_else(|_| DEFAULT_PROVIDER_URL.to_string()),
            provider_api_key: std::env::var("JOB_API_KEY").ok().filter(|k| !k.is_empty()),
        })
    }
}
