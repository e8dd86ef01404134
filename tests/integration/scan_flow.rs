//! End-to-end controller scenarios against the mock scanner.

use serde_json::json;
use std::sync::Arc;

use arbview::controller::{Dashboard, FeeDetail};
use arbview::error::DashboardError;
use arbview::page::ScanState;
use arbview::types::TableView;

use crate::mock_scanner::MockScanner;

async fn dashboard(scanner: &MockScanner) -> Dashboard {
    let dash = Dashboard::new(Arc::new(scanner.clone()), "Arbitrage Scanner");
    dash.load_config().await;
    dash
}

fn assert_idle(dash: &Dashboard) {
    let page = dash.page();
    assert_eq!(page.scan_state, ScanState::Idle);
    assert!(page.is_scan_enabled());
    assert_eq!(page.scan_state.status_label(), "Idle");
}

#[tokio::test]
async fn config_builds_prechecked_controls() {
    let scanner = MockScanner::new();
    let dash = dashboard(&scanner).await;

    let page = dash.page();
    assert_eq!(page.exchanges.len(), 2);
    assert!(page.exchanges.iter().all(|c| c.checked));
    assert_eq!(page.min_profit, "0.5%");

    let html = dash.render();
    assert!(html.contains(r#"value="binance" checked"#));
    assert!(html.contains(r#"value="kraken" checked"#));
    assert!(html.contains(r#"<span id="min-profit-val">0.5%</span>"#));
}

#[tokio::test]
async fn missing_config_leaves_default_page() {
    let scanner = MockScanner::without_config();
    let dash = dashboard(&scanner).await;
    assert!(dash.config().is_none());
    assert!(dash.page().exchanges.is_empty());

    // No controls means nothing selected: the scan is refused locally.
    assert!(matches!(
        dash.trigger_scan().await,
        Err(DashboardError::NoExchangeSelected)
    ));
    assert!(scanner.requests().is_empty());
}

#[tokio::test]
async fn zero_selection_sends_no_request() {
    let scanner = MockScanner::new();
    let dash = dashboard(&scanner).await;
    dash.set_selected(&[]);

    let err = dash.trigger_scan().await.unwrap_err();
    assert!(matches!(err, DashboardError::NoExchangeSelected));
    assert!(scanner.requests().is_empty());
    assert_eq!(dash.page().notices[0].text, "Please select at least one exchange.");
    assert_idle(&dash);
}

#[tokio::test]
async fn successful_scan_updates_counts_and_tables() {
    let scanner = MockScanner::new();
    let dash = dashboard(&scanner).await;
    dash.set_selected(&["kraken".to_string()]);

    dash.trigger_scan().await.unwrap();

    assert_eq!(scanner.requests(), vec![vec!["kraken".to_string()]]);
    let page = dash.page();
    assert_eq!(page.profit_count, "1");
    assert_eq!(page.paths_analyzed, "2");
    assert_eq!(page.table(TableView::Profitable).matches("<tr").count(), 1);
    assert_eq!(page.table(TableView::All).matches("<tr").count(), 2);
    assert!(page.table(TableView::All).contains("-0.6%"));
    assert!(page.table(TableView::Profitable).contains("+2.3%"));
    assert_idle(&dash);
}

#[tokio::test]
async fn empty_result_lists_show_empty_state() {
    let scanner = MockScanner::new();
    scanner.set_response(json!({
        "status": "success",
        "count": 0,
        "total_analyzed": 0,
        "opportunities": [],
        "all_opportunities": []
    }));
    let dash = dashboard(&scanner).await;
    dash.trigger_scan().await.unwrap();

    for view in [TableView::Profitable, TableView::All] {
        let page = dash.page();
        let body = page.table(view);
        assert_eq!(body.matches("<tr").count(), 1);
        assert!(body.contains("No data found."));
    }
    assert_eq!(dash.page().paths_analyzed, "0");
}

#[tokio::test]
async fn application_error_resets_and_keeps_session() {
    let scanner = MockScanner::new();
    let dash = dashboard(&scanner).await;
    dash.trigger_scan().await.unwrap();

    scanner.set_response(json!({"status": "error", "message": "Binance API unreachable"}));
    let err = dash.trigger_scan().await.unwrap_err();
    assert!(matches!(err, DashboardError::Scanner { .. }));
    assert_idle(&dash);

    let notices = &dash.page().notices;
    assert_eq!(notices.last().unwrap().text, "Error: Binance API unreachable");
    // The previous result still backs the fee modal.
    assert_eq!(dash.view_fee_details(0, true), FeeDetail::Shown(3));
}

#[tokio::test]
async fn transport_failure_resets() {
    let scanner = MockScanner::new();
    scanner.set_error("connection reset");
    let dash = dashboard(&scanner).await;

    let err = dash.trigger_scan().await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(dash.page().notices[0].text, "Failed to connect to scanner.");
    assert!(dash.session().is_none());
    assert_idle(&dash);
}

#[tokio::test]
async fn fee_modal_renders_breakdown_in_order() {
    let scanner = MockScanner::new();
    let dash = dashboard(&scanner).await;
    dash.trigger_scan().await.unwrap();

    assert_eq!(dash.view_fee_details(0, true), FeeDetail::Shown(3));
    let modal = &dash.page().modal;
    assert!(modal.visible);
    assert_eq!(modal.body.matches("<tr>").count(), 3);
    let btc = modal.body.find("BTCUSDT").unwrap();
    let eth_btc = modal.body.find("ETHBTC").unwrap();
    let eth_usdt = modal.body.find("ETHUSDT").unwrap();
    assert!(btc < eth_btc && eth_btc < eth_usdt);

    dash.close_modal();
    assert!(!dash.page().modal.visible);

    // Second row of the full list: the losing path.
    assert_eq!(dash.view_fee_details(1, false), FeeDetail::Shown(2));
    assert!(dash.page().modal.body.contains("XRPUSDT"));
}

#[tokio::test]
async fn fee_modal_without_scan_stays_hidden() {
    let scanner = MockScanner::new();
    let dash = dashboard(&scanner).await;
    assert_eq!(dash.view_fee_details(0, true), FeeDetail::NoResult);
    assert!(!dash.page().modal.visible);
    assert!(dash.page().modal.body.is_empty());
}

#[tokio::test]
async fn fee_lookup_by_id_matches_rendered_link() {
    let scanner = MockScanner::new();
    let dash = dashboard(&scanner).await;
    dash.trigger_scan().await.unwrap();

    let loss_id = dash.session().unwrap().all_opportunities[1].id;
    assert!(dash
        .page()
        .table(TableView::All)
        .contains(&format!("/fees/{loss_id}")));

    assert_eq!(dash.view_fee_details_by_id(loss_id), FeeDetail::Shown(2));
    assert!(dash.page().modal.body.contains("XRPUSDT"));
}

#[tokio::test]
async fn rescans_replace_tables() {
    let scanner = MockScanner::new();
    let dash = dashboard(&scanner).await;
    dash.trigger_scan().await.unwrap();
    let first = dash.page().table(TableView::All).matches("<tr").count();
    dash.trigger_scan().await.unwrap();
    let second = dash.page().table(TableView::All).matches("<tr").count();
    assert_eq!(first, second);
    assert_eq!(scanner.requests().len(), 2);
}
