//! Result renderer: scan results and fee breakdowns to HTML row markup.
//!
//! Renderers are pure functions returning strings; the [`crate::page::Page`]
//! owns where the markup lands. All interpolated text goes through
//! [`escape_html`].

pub mod modal;
pub mod table;

/// Number of columns in the results tables.
pub const RESULT_COLUMNS: usize = 8;

/// Arrow glyph placed between trade path badges.
pub const PATH_ARROW: &str =
    r#" <ion-icon name="arrow-forward-outline" style="font-size: 10px; vertical-align: middle;"></ion-icon> "#;

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Placeholder row shown in both tables while a scan is in flight.
pub fn loading_row() -> String {
    format!(
        r#"<tr class="empty-state"><td colspan="{RESULT_COLUMNS}"><div class="scanner-loader"><div class="scanner-radar"></div><div class="loading-text">ANALYZING MARKET DATA...</div></div></td></tr>"#
    )
}

/// Row shown when a table has nothing to list.
pub fn empty_row() -> String {
    format!(
        r#"<tr class="empty-state"><td colspan="{RESULT_COLUMNS}"><div class="empty-message"><ion-icon name="alert-circle-outline"></ion-icon><p>No data found.</p></div></td></tr>"#
    )
}

/// Row shown in place of results after a failed scan.
pub fn error_row(message: &str) -> String {
    format!(
        r#"<tr class="empty-state error-state"><td colspan="{RESULT_COLUMNS}"><div class="empty-message"><ion-icon name="warning-outline"></ion-icon><p>{}</p></div></td></tr>"#,
        escape_html(message)
    )
}
