//! ARBVIEW: web dashboard for an arbitrage scanner service
//!
//! Entry point. Loads configuration, initialises structured logging,
//! fetches the scanner configuration once, and serves the dashboard until
//! Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use arbview::client::ScannerClient;
use arbview::config;
use arbview::controller::Dashboard;
use arbview::dashboard::{self, DashboardState};

const BANNER: &str = r#"
    _    ____  ______     _____ _______        __
   / \  |  _ \| __ ) \   / /_ _| ____\ \      / /
  / _ \ | |_) |  _ \\ \ / / | ||  _|  \ \ /\ / /
 / ___ \|  _ <| |_) |\ V /  | || |___  \ V  V /
/_/   \_\_| \_\____/  \_/  |___|_____|  \_/\_/

  Arbitrage scanner dashboard v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = config::AppConfig::load("config.toml")?;

    init_logging();

    println!("{BANNER}");
    info!(
        scanner = %cfg.scanner.base_url,
        port = cfg.dashboard.port,
        "ARBVIEW starting up"
    );

    let client = ScannerClient::new(&cfg.scanner)?;
    let dash = Dashboard::new(Arc::new(client), cfg.dashboard.title.clone());

    // The page still serves without a config; the checklist stays empty.
    if dash.load_config().await.is_none() {
        warn!("Scanner config unavailable; exchange list will be empty");
    }

    let state = Arc::new(DashboardState::new(dash));
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received.");
    };

    dashboard::serve(state, cfg.dashboard.port, shutdown).await?;

    info!("ARBVIEW shut down cleanly.");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("arbview=info"));

    let json_logging = std::env::var("ARBVIEW_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
