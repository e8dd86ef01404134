//! Mock scanner for integration testing.
//!
//! Provides a deterministic `ScannerApi` implementation that returns a
//! known configuration and scan payload and records every scan request,
//! all in-memory with no network.

use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};

use arbview::client::ScannerApi;
use arbview::error::{DashboardError, Result};
use arbview::types::{ScanConfig, ScanResult};

/// A mock scanner whose responses are fully controllable from test code.
#[derive(Clone)]
pub struct MockScanner {
    config: Option<ScanConfig>,
    response: Arc<Mutex<serde_json::Value>>,
    requests: Arc<Mutex<Vec<Vec<String>>>>,
    /// If set, scans fail with a decode error carrying this detail.
    force_error: Arc<Mutex<Option<String>>>,
}

impl MockScanner {
    /// Two exchanges, 0.5% threshold, one profitable opportunity out of two.
    pub fn new() -> Self {
        Self {
            config: Some(ScanConfig {
                min_profit_percent: 0.5,
                supported_exchanges: vec!["binance".to_string(), "kraken".to_string()],
            }),
            response: Arc::new(Mutex::new(default_response())),
            requests: Arc::new(Mutex::new(Vec::new())),
            force_error: Arc::new(Mutex::new(None)),
        }
    }

    /// A scanner whose config endpoint fails.
    pub fn without_config() -> Self {
        Self {
            config: None,
            ..Self::new()
        }
    }

    /// Replace the payload returned by the next scans.
    pub fn set_response(&self, value: serde_json::Value) {
        *self.response.lock().unwrap() = value;
    }

    pub fn set_error(&self, detail: &str) {
        *self.force_error.lock().unwrap() = Some(detail.to_string());
    }

    /// Exchange lists of every scan request received so far.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().unwrap().clone()
    }
}

/// Payload with one profitable (3-step fee breakdown) and one losing path.
pub fn default_response() -> serde_json::Value {
    let profitable = json!({
        "exchange": "Binance",
        "timestamp": "2026-03-01T10:00:00.000001",
        "trade_path": ["USDT -> BTC", "BTC -> ETH", "ETH -> USDT"],
        "start_amount": 100.0,
        "start_coin": "USDT",
        "end_amount": 102.3,
        "end_coin": "USDT",
        "fees_str": "0.10%",
        "profit_percent": 2.3,
        "status": "PROFITABLE",
        "fee_breakdown": [
            {"step": 1, "symbol": "BTCUSDT", "action": "BUY", "fee_percent": "0.100%"},
            {"step": 2, "symbol": "ETHBTC", "action": "BUY", "fee_percent": "0.100%"},
            {"step": 3, "symbol": "ETHUSDT", "action": "SELL", "fee_percent": "0.100%"}
        ]
    });
    let loss = json!({
        "exchange": "Kraken",
        "timestamp": "2026-03-01T10:00:01",
        "trade_path": ["USDT -> XRP", "XRP -> USDT"],
        "start_amount": 100.0,
        "start_coin": "USDT",
        "end_amount": 99.4,
        "end_coin": "USDT",
        "fees_str": "0.26%",
        "profit_percent": -0.6,
        "status": "LOSS",
        "fee_breakdown": [
            {"step": 1, "symbol": "XRPUSDT", "action": "BUY", "fee_percent": "0.260%"},
            {"step": 2, "symbol": "XRPUSDT", "action": "SELL", "fee_percent": "0.260%"}
        ]
    });

    json!({
        "status": "success",
        "count": 1,
        "opportunities": [profitable.clone()],
        "all_opportunities": [profitable, loss]
    })
}

#[async_trait]
impl ScannerApi for MockScanner {
    async fn fetch_config(&self) -> Result<ScanConfig> {
        self.config.clone().ok_or_else(|| DashboardError::Decode {
            status: 503,
            detail: "config unavailable".to_string(),
        })
    }

    async fn scan(&self, exchanges: &[String]) -> Result<ScanResult> {
        self.requests.lock().unwrap().push(exchanges.to_vec());

        if let Some(detail) = self.force_error.lock().unwrap().clone() {
            return Err(DashboardError::Decode { status: 502, detail });
        }

        let value = self.response.lock().unwrap().clone();
        serde_json::from_value(value).map_err(|e| DashboardError::Decode {
            status: 200,
            detail: e.to_string(),
        })
    }
}
