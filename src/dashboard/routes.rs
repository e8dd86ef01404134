//! Dashboard route handlers.
//!
//! Page actions mutate the shared [`Dashboard`] and redirect back to `/`.
//! The dashboard locks its own state briefly, so the page stays readable
//! while a scan is in flight and a second scan request is turned away.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::controller::Dashboard;
use crate::page::Page;
use crate::types::OpportunityId;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub dashboard: Dashboard,
}

impl DashboardState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard }
    }
}

pub type AppState = Arc<DashboardState>;

#[derive(Debug, Deserialize)]
pub struct FeeQuery {
    pub index: usize,
    pub profitable: bool,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.dashboard.render())
}

/// POST /scan: form fields `exchange=<name>`, repeated.
pub async fn scan(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Redirect {
    let selected: Vec<String> = fields
        .into_iter()
        .filter(|(key, _)| key == "exchange")
        .map(|(_, value)| value)
        .collect();

    let dashboard = &state.dashboard;
    dashboard.set_selected(&selected);
    // Failures are already reported on the page.
    if let Err(e) = dashboard.trigger_scan().await {
        debug!(error = %e, "Scan request ended without results");
    }
    Redirect::to("/")
}

/// GET /fees?index=N&profitable=bool
pub async fn fee_details(
    State(state): State<AppState>,
    Query(query): Query<FeeQuery>,
) -> Redirect {
    let outcome = state.dashboard.view_fee_details(query.index, query.profitable);
    debug!(index = query.index, profitable = query.profitable, outcome = ?outcome, "Fee detail");
    Redirect::to("/")
}

/// GET /fees/{id}
pub async fn fee_details_by_id(State(state): State<AppState>, Path(id): Path<Uuid>) -> Redirect {
    let outcome = state.dashboard.view_fee_details_by_id(OpportunityId(id));
    debug!(id = %id, outcome = ?outcome, "Fee detail");
    Redirect::to("/")
}

/// POST /modal/close
pub async fn close_modal(State(state): State<AppState>) -> Redirect {
    state.dashboard.close_modal();
    Redirect::to("/")
}

/// GET /api/session: the stored scan result.
pub async fn get_session(State(state): State<AppState>) -> Response {
    match state.dashboard.session() {
        Some(result) => Json(result).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// GET /api/page: current page state, without consuming notifications.
pub async fn get_page(State(state): State<AppState>) -> Json<Page> {
    Json(state.dashboard.page())
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}
