//! Page model: everything the dashboard shows, and its HTML document.
//!
//! The page starts in its default (empty) state: no exchange controls,
//! placeholder threshold, idle scan trigger, empty tables and a hidden
//! fee modal.

use serde::Serialize;

use crate::render::{empty_row, escape_html, loading_row};
use crate::types::{ScanConfig, TableView};

const PAGE_TEMPLATE: &str = include_str!("templates/page.html");

/// One labelled exchange checkbox.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeControl {
    pub name: String,
    pub checked: bool,
}

/// Scan trigger and status pill state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanState {
    Idle,
    Scanning,
}

impl ScanState {
    pub fn status_label(&self) -> &'static str {
        match self {
            ScanState::Idle => "Idle",
            ScanState::Scanning => "Scanning...",
        }
    }

    pub fn status_class(&self) -> &'static str {
        match self {
            ScanState::Idle => "status-pill idle",
            ScanState::Scanning => "status-pill scanning",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            ScanState::Idle => "Start Scan",
            ScanState::Scanning => "Scanning...",
        }
    }

    fn button_icon(&self) -> &'static str {
        match self {
            ScanState::Idle => r#"<ion-icon name="scan-circle-outline"></ion-icon>"#,
            ScanState::Scanning => r#"<ion-icon name="sync-outline" class="spin"></ion-icon>"#,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A user-facing notification, shown once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Fee detail modal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Modal {
    pub visible: bool,
    pub body: String,
}

/// The visible dashboard state.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    pub exchanges: Vec<ExchangeControl>,
    pub min_profit: String,
    pub exchange_count: String,
    pub scan_state: ScanState,
    pub profit_count: String,
    pub paths_analyzed: String,
    pub results_body: String,
    pub all_results_body: String,
    pub modal: Modal,
    pub notices: Vec<Notice>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            exchanges: Vec::new(),
            min_profit: "--".to_string(),
            exchange_count: "0".to_string(),
            scan_state: ScanState::Idle,
            profit_count: "0".to_string(),
            paths_analyzed: "0".to_string(),
            results_body: empty_row(),
            all_results_body: empty_row(),
            modal: Modal::default(),
            notices: Vec::new(),
        }
    }

    // -- Exchange selection ----------------------------------------------

    /// Build one pre-checked control per supported exchange and show the
    /// threshold.
    pub fn apply_config(&mut self, config: &ScanConfig) {
        self.exchanges = config
            .supported_exchanges
            .iter()
            .map(|name| ExchangeControl {
                name: name.clone(),
                checked: true,
            })
            .collect();
        self.min_profit = config.threshold_label();
        self.exchange_count = config.supported_exchanges.len().to_string();
    }

    /// Check exactly the named controls; unknown names are ignored.
    pub fn set_selected(&mut self, selected: &[String]) {
        for control in &mut self.exchanges {
            control.checked = selected.iter().any(|s| s == &control.name);
        }
    }

    /// Names of the checked controls, in checklist order.
    pub fn selected_exchanges(&self) -> Vec<String> {
        self.exchanges
            .iter()
            .filter(|c| c.checked)
            .map(|c| c.name.clone())
            .collect()
    }

    // -- Scan state ------------------------------------------------------

    /// Enter or leave the scanning state. Entering also swaps both tables
    /// for the loading placeholder.
    pub fn set_loading(&mut self, loading: bool) {
        if loading {
            self.scan_state = ScanState::Scanning;
            self.results_body = loading_row();
            self.all_results_body = loading_row();
        } else {
            self.scan_state = ScanState::Idle;
        }
    }

    pub fn is_scan_enabled(&self) -> bool {
        self.scan_state == ScanState::Idle
    }

    // -- Results ---------------------------------------------------------

    /// Replace a table body wholesale.
    pub fn set_table(&mut self, view: TableView, rows: String) {
        match view {
            TableView::Profitable => self.results_body = rows,
            TableView::All => self.all_results_body = rows,
        }
    }

    pub fn table(&self, view: TableView) -> &str {
        match view {
            TableView::Profitable => &self.results_body,
            TableView::All => &self.all_results_body,
        }
    }

    pub fn set_counts(&mut self, profitable: u64, total_analyzed: u64) {
        self.profit_count = profitable.to_string();
        self.paths_analyzed = total_analyzed.to_string();
    }

    // -- Modal -----------------------------------------------------------

    pub fn show_modal(&mut self, body: String) {
        self.modal = Modal {
            visible: true,
            body,
        };
    }

    /// Hide the modal; its last body is kept but not shown.
    pub fn hide_modal(&mut self) {
        self.modal.visible = false;
    }

    // -- Notifications ---------------------------------------------------

    pub fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice {
            level,
            text: text.into(),
        });
    }

    /// Drain pending notifications.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // -- Document --------------------------------------------------------

    /// Render the full HTML document. Pending notifications are shown and
    /// consumed.
    pub fn render_document(&mut self) -> String {
        let notices = self.take_notices();
        let state = self.scan_state;

        fill_template(PAGE_TEMPLATE, |key| match key {
            "title" => escape_html(&self.title),
            "notices" => render_notices(&notices),
            "min_profit" => escape_html(&self.min_profit),
            "exchange_count" => escape_html(&self.exchange_count),
            "exchange_list" => self.render_exchange_list(),
            "scan_disabled" => (if state == ScanState::Idle { "" } else { "disabled" }).to_string(),
            "scan_button" => format!("{} {}", state.button_icon(), state.button_label()),
            "status_class" => state.status_class().to_string(),
            "status_label" => state.status_label().to_string(),
            "profit_count" => escape_html(&self.profit_count),
            "paths_analyzed" => escape_html(&self.paths_analyzed),
            "results_body" => self.results_body.clone(),
            "all_results_body" => self.all_results_body.clone(),
            "modal_class" => (if self.modal.visible { "modal" } else { "modal hidden" }).to_string(),
            "modal_body" => self.modal.body.clone(),
            _ => String::new(),
        })
    }

    fn render_exchange_list(&self) -> String {
        self.exchanges
            .iter()
            .map(|c| {
                let name = escape_html(&c.name);
                format!(
                    r#"<div class="checkbox-item"><input type="checkbox" id="ex-{name}" name="exchange" value="{name}"{checked}><label for="ex-{name}">{name}</label></div>"#,
                    checked = if c.checked { " checked" } else { "" },
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Substitute `{{key}}` placeholders in one pass, so substituted text is
/// never rescanned.
fn fill_template(template: &str, value: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                out.push_str(&value(after[..end].trim()));
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| {
            let level = match n.level {
                NoticeLevel::Warning => "warning",
                NoticeLevel::Error => "error",
            };
            format!(
                r#"<div class="notice notice-{level}" role="alert">{}</div>"#,
                escape_html(&n.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
