//! HTTP client for the scanner service.
//!
//! Endpoints:
//! - `GET  {base}/api/config` → `{ min_profit_percent, supported_exchanges }`
//! - `POST {base}/api/scan`   → scan payload (also on HTTP 500, with
//!   `status: "error"`)

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::ScannerApi;
use crate::config::ScannerConfig;
use crate::error::{DashboardError, Result};
use crate::types::{ScanConfig, ScanRequest, ScanResult};

/// Longest response excerpt kept in a decode error.
const MAX_ERROR_BODY: usize = 200;

/// `reqwest`-backed scanner client.
pub struct ScannerClient {
    http: Client,
    base_url: String,
}

impl ScannerClient {
    pub fn new(cfg: &ScannerConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(cfg.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client for scanner")?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY).collect()
}

#[async_trait]
impl ScannerApi for ScannerClient {
    async fn fetch_config(&self) -> Result<ScanConfig> {
        let url = self.url("/api/config");
        debug!(url = %url, "Fetching scanner config");

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(DashboardError::Decode {
                status: status.as_u16(),
                detail: excerpt(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| DashboardError::Decode {
            status: status.as_u16(),
            detail: format!("invalid config payload: {e}"),
        })
    }

    async fn scan(&self, exchanges: &[String]) -> Result<ScanResult> {
        let url = self.url("/api/scan");
        info!(url = %url, exchanges = ?exchanges, "Requesting scan");

        let body = ScanRequest {
            exchanges: exchanges.to_vec(),
        };
        let resp = self.http.post(&url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        // The scanner reports its own failures as HTTP 500 with a scan
        // payload, so decode regardless of status.
        match serde_json::from_str::<ScanResult>(&text) {
            Ok(result) => {
                debug!(http_status = status.as_u16(), scan_status = ?result.status, "Scan response decoded");
                Ok(result)
            }
            Err(e) if status.is_success() => Err(DashboardError::Decode {
                status: status.as_u16(),
                detail: format!("invalid scan payload: {e}"),
            }),
            Err(_) => Err(DashboardError::Decode {
                status: status.as_u16(),
                detail: excerpt(&text),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
