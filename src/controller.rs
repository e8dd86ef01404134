//! Dashboard controller: config loading, scan triggering and fee detail.
//!
//! `Dashboard` owns the page, the scanner client and the session result
//! (the last successful scan). The session result lives only as long as the
//! dashboard and is replaced wholesale by each successful scan.
//!
//! State sits behind short-held locks that are never kept across the scanner
//! request, so the page can be read (and shows "Scanning...") while a scan is
//! in flight.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::client::ScannerApi;
use crate::error::{DashboardError, Result};
use crate::page::{NoticeLevel, Page, ScanState};
use crate::render::{empty_row, error_row, loading_row, modal::render_fee_rows, table::render_table};
use crate::types::{
    Opportunity, OpportunityId, ScanConfig, ScanResult, ScanStatus, ScanSummary, TableView,
};

/// Outcome of a fee detail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeDetail {
    /// Modal opened with this many fee rows.
    Shown(usize),
    /// Modal opened with a "no data" row; the opportunity has no breakdown.
    Empty,
    /// No opportunity at that position or with that id. Nothing rendered.
    NotFound,
    /// No scan has succeeded yet. Nothing rendered.
    NoResult,
}

/// Holds the page in the scanning state and returns it to idle when dropped,
/// whichever way the scan ends (including the scan future being dropped).
struct LoadingGuard<'a> {
    page: &'a RwLock<Page>,
}

impl<'a> LoadingGuard<'a> {
    /// Claim the scanning state. `None` if a scan is already running.
    fn enter(page: &'a RwLock<Page>) -> Option<Self> {
        let mut locked = page.write();
        if locked.scan_state == ScanState::Scanning {
            return None;
        }
        locked.set_loading(true);
        Some(Self { page })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut page = self.page.write();
        page.set_loading(false);
        // A scan abandoned mid-request has nothing to show.
        let placeholder = loading_row();
        for view in [TableView::Profitable, TableView::All] {
            if page.table(view) == placeholder {
                page.set_table(view, empty_row());
            }
        }
    }
}

pub struct Dashboard {
    api: Arc<dyn ScannerApi>,
    page: RwLock<Page>,
    config: RwLock<Option<ScanConfig>>,
    session: RwLock<Option<ScanResult>>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn ScannerApi>, title: impl Into<String>) -> Self {
        Self {
            api,
            page: RwLock::new(Page::new(title)),
            config: RwLock::new(None),
            session: RwLock::new(None),
        }
    }

    /// Snapshot of the current page state.
    pub fn page(&self) -> Page {
        self.page.read().clone()
    }

    pub fn config(&self) -> Option<ScanConfig> {
        self.config.read().clone()
    }

    /// The last successful scan, if any.
    pub fn session(&self) -> Option<ScanResult> {
        self.session.read().clone()
    }

    pub fn is_scanning(&self) -> bool {
        self.page.read().scan_state == ScanState::Scanning
    }

    /// Render the page, consuming pending notifications.
    pub fn render(&self) -> String {
        self.page.write().render_document()
    }

    // -- Config loader ---------------------------------------------------

    /// Fetch scanner configuration and build the exchange checklist.
    ///
    /// Failure is non-fatal: the page keeps its default state and a
    /// diagnostic is logged.
    pub async fn load_config(&self) -> Option<ScanConfig> {
        match self.api.fetch_config().await {
            Ok(config) => {
                info!(
                    exchanges = config.supported_exchanges.len(),
                    min_profit_percent = config.min_profit_percent,
                    "Scanner config loaded"
                );
                self.page.write().apply_config(&config);
                *self.config.write() = Some(config.clone());
                Some(config)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch config");
                None
            }
        }
    }

    /// Apply the submitted exchange selection to the checklist.
    ///
    /// Ignored while a scan is running; the checklist reflects what is
    /// being scanned.
    pub fn set_selected(&self, exchanges: &[String]) {
        let mut page = self.page.write();
        if page.scan_state == ScanState::Scanning {
            debug!("Selection change ignored during scan");
            return;
        }
        page.set_selected(exchanges);
    }

    // -- Scan controller -------------------------------------------------

    /// Scan the selected exchanges and render the results.
    ///
    /// Only one scan runs at a time; a request made while another is in
    /// flight is refused with a notice. The page is back in the idle state
    /// when this returns, on every path.
    pub async fn trigger_scan(&self) -> Result<ScanSummary> {
        let selected = self.page.read().selected_exchanges();
        if selected.is_empty() {
            let err = DashboardError::NoExchangeSelected;
            self.page.write().notify(NoticeLevel::Warning, err.user_message());
            return Err(err);
        }

        let Some(_loading) = LoadingGuard::enter(&self.page) else {
            let err = DashboardError::ScanInProgress;
            warn!("Scan requested while another is running");
            self.page.write().notify(NoticeLevel::Warning, err.user_message());
            return Err(err);
        };

        let response = self.api.scan(&selected).await;

        match response {
            Ok(mut result) if result.status == ScanStatus::Success => {
                result.assign_ids();
                let summary = ScanSummary {
                    profitable: result.count,
                    total_analyzed: result.total_analyzed(),
                };
                {
                    let mut page = self.page.write();
                    page.set_table(
                        TableView::Profitable,
                        render_table(&result.opportunities, TableView::Profitable),
                    );
                    page.set_table(
                        TableView::All,
                        render_table(&result.all_opportunities, TableView::All),
                    );
                    page.set_counts(summary.profitable, summary.total_analyzed);
                }
                info!(
                    exchanges = ?selected,
                    profitable = summary.profitable,
                    total_analyzed = summary.total_analyzed,
                    "Scan complete"
                );

                *self.session.write() = Some(result);
                Ok(summary)
            }
            Ok(result) => {
                let err = DashboardError::Scanner {
                    message: result.message.unwrap_or_else(|| "unknown error".to_string()),
                };
                warn!(error = %err, "Scanner reported an error");
                show_failure(&mut self.page.write(), &err);
                Err(err)
            }
            Err(err) => {
                error!(error = %err, "Scan failed");
                show_failure(&mut self.page.write(), &err);
                Err(err)
            }
        }
    }

    // -- Fee detail ------------------------------------------------------

    /// Show the fee breakdown of the opportunity at `index` in the
    /// profitable (`is_profitable`) or full list.
    pub fn view_fee_details(&self, index: usize, is_profitable: bool) -> FeeDetail {
        let session = self.session.read();
        let Some(session) = session.as_ref() else {
            debug!("Fee detail requested before any scan");
            return FeeDetail::NoResult;
        };
        let view = TableView::from_flag(is_profitable);
        let found = session.list(view).get(index);
        show_fee_modal(&mut self.page.write(), found)
    }

    /// Show the fee breakdown of the opportunity with the given id.
    pub fn view_fee_details_by_id(&self, id: OpportunityId) -> FeeDetail {
        let session = self.session.read();
        let Some(session) = session.as_ref() else {
            debug!("Fee detail requested before any scan");
            return FeeDetail::NoResult;
        };
        show_fee_modal(&mut self.page.write(), session.find(id))
    }

    /// Hide the fee modal (close control or backdrop click).
    pub fn close_modal(&self) {
        self.page.write().hide_modal();
    }
}

/// Notify the user and replace the loading placeholders with an error row.
fn show_failure(page: &mut Page, err: &DashboardError) {
    let message = err.user_message();
    page.notify(NoticeLevel::Error, message.clone());
    let row = error_row(&message);
    page.set_table(TableView::Profitable, row.clone());
    page.set_table(TableView::All, row);
}

fn show_fee_modal(page: &mut Page, found: Option<&Opportunity>) -> FeeDetail {
    let Some(op) = found else {
        debug!("Fee detail requested for unknown opportunity");
        return FeeDetail::NotFound;
    };

    let steps = op.fee_steps();
    page.show_modal(render_fee_rows(steps));
    if steps.is_empty() {
        FeeDetail::Empty
    } else {
        FeeDetail::Shown(steps.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
