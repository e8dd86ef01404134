//! Scanner service integration.
//!
//! Defines the `ScannerApi` trait (the two endpoints the dashboard consumes)
//! and the `reqwest`-backed [`http::ScannerClient`].

pub mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ScanConfig, ScanResult};

/// Abstraction over the remote arbitrage scanner.
///
/// The dashboard treats the scanner as opaque: it only reads its
/// configuration and asks it to scan a set of exchanges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScannerApi: Send + Sync {
    /// `GET /api/config`
    async fn fetch_config(&self) -> Result<ScanConfig>;

    /// `POST /api/scan` for the given exchange identifiers.
    ///
    /// Application failures come back as `Ok` with `status: Error`; only
    /// transport and decoding problems are `Err`.
    async fn scan(&self, exchanges: &[String]) -> Result<ScanResult>;
}

pub use http::ScannerClient;
