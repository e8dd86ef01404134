//! Dashboard: Axum web server for the scanner UI.
//!
//! Serves the rendered page plus the form/link actions that drive it, and a
//! small JSON API for inspection. CORS enabled for local development.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

pub use routes::{AppState, DashboardState};

/// Bind and serve the dashboard until the shutdown future resolves.
pub async fn serve(
    state: AppState,
    port: u16,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = build_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dashboard port {port}"))?;
    info!(port, "Dashboard server listening on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Dashboard server error")?;

    Ok(())
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("*"))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Page and actions
        .route("/", get(routes::index))
        .route("/scan", post(routes::scan))
        .route("/fees", get(routes::fee_details))
        .route("/fees/:id", get(routes::fee_details_by_id))
        .route("/modal/close", post(routes::close_modal))
        // JSON API
        .route("/api/session", get(routes::get_session))
        .route("/api/page", get(routes::get_page))
        .route("/health", get(routes::health))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
