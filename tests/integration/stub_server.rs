//! `ScannerClient` against a local HTTP stub of the scanner service.

use axum::{http::StatusCode, routing::get, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use arbview::client::{ScannerApi, ScannerClient};
use arbview::config::ScannerConfig;
use arbview::controller::Dashboard;
use arbview::types::ScanStatus;

use crate::mock_scanner::default_response;

/// Serve `router` on an ephemeral loopback port; returns its base URL.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> ScannerClient {
    ScannerClient::new(&ScannerConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        user_agent: "arbview-test".to_string(),
    })
    .unwrap()
}

fn healthy_scanner() -> Router {
    Router::new()
        .route(
            "/api/config",
            get(|| async {
                Json(json!({
                    "min_profit_percent": -0.5,
                    "supported_exchanges": ["MEXC", "Binance", "KuCoin", "Bybit", "HTX"]
                }))
            }),
        )
        .route(
            "/api/scan",
            post(|Json(body): Json<Value>| async move {
                // Echo the requested exchanges back through the message field.
                let mut resp = default_response();
                resp["message"] = json!(body["exchanges"].to_string());
                Json(resp)
            }),
        )
}

#[tokio::test]
async fn client_reads_config() {
    let base = spawn_stub(healthy_scanner()).await;
    let config = client(&base).fetch_config().await.unwrap();
    assert_eq!(config.supported_exchanges.len(), 5);
    assert_eq!(config.threshold_label(), "-0.5%");
}

#[tokio::test]
async fn client_posts_selected_exchanges() {
    let base = spawn_stub(healthy_scanner()).await;
    let result = client(&base)
        .scan(&["MEXC".to_string(), "HTX".to_string()])
        .await
        .unwrap();
    assert_eq!(result.status, ScanStatus::Success);
    assert_eq!(result.message.as_deref(), Some(r#"["MEXC","HTX"]"#));
    assert_eq!(result.all_opportunities.len(), 2);
}

#[tokio::test]
async fn server_error_payload_is_application_error() {
    let router = Router::new().route(
        "/api/scan",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "message": "no markets"})),
            )
        }),
    );
    let base = spawn_stub(router).await;
    let result = client(&base).scan(&["MEXC".to_string()]).await.unwrap();
    assert_eq!(result.status, ScanStatus::Error);
    assert_eq!(result.message.as_deref(), Some("no markets"));
}

#[tokio::test]
async fn non_payload_response_is_transport_error() {
    let router = Router::new().route(
        "/api/scan",
        post(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") }),
    );
    let base = spawn_stub(router).await;
    let err = client(&base).scan(&["MEXC".to_string()]).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.user_message(), "Failed to connect to scanner.");
}

#[tokio::test]
async fn missing_config_endpoint_is_error() {
    let base = spawn_stub(Router::new()).await;
    assert!(client(&base).fetch_config().await.is_err());
}

#[tokio::test]
async fn dashboard_over_http() {
    let base = spawn_stub(healthy_scanner()).await;
    let dash = Dashboard::new(Arc::new(client(&base)), "Arbitrage Scanner");
    dash.load_config().await.unwrap();
    dash.set_selected(&["Binance".to_string()]);

    let summary = dash.trigger_scan().await.unwrap();
    assert_eq!(summary.profitable, 1);
    assert_eq!(summary.total_analyzed, 2);

    let html = dash.render();
    assert!(html.contains(r#"value="Binance" checked"#));
    assert!(html.contains(r#"value="MEXC">"#));
    assert!(html.contains(r#"<span id="paths-analyzed">2</span>"#));
}
