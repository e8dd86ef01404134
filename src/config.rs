//! Configuration loading from TOML with environment variable overrides.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! The scanner base URL may be overridden with `ARBVIEW_SCANNER_URL`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

/// Environment variable that overrides `scanner.base_url`.
pub const SCANNER_URL_ENV: &str = "ARBVIEW_SCANNER_URL";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub scanner: ScannerConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScannerConfig {
    /// Base URL of the scanner service, without trailing slash.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub port: u16,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_user_agent() -> String {
    "ARBVIEW/0.1.0 (arbitrage-dashboard)".to_string()
}

fn default_title() -> String {
    "Arbitrage Scanner".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file, then apply env overrides.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let mut config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        if let Ok(url) = std::env::var(SCANNER_URL_ENV) {
            config.scanner.base_url = url;
        }
        config.scanner.base_url = config.scanner.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }
}
