//! Opportunity table rows.

use super::{empty_row, escape_html, PATH_ARROW};
use crate::types::{Opportunity, OpportunityStatus, TableView};

/// Render the body rows of one results table.
///
/// One row per opportunity in input order, or a single empty-state row
/// when there is nothing to show. The output is a complete replacement for
/// the table body.
pub fn render_table(opportunities: &[Opportunity], view: TableView) -> String {
    if opportunities.is_empty() {
        return empty_row();
    }

    opportunities
        .iter()
        .enumerate()
        .map(|(index, op)| render_row(index, op, view))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_row(index: usize, op: &Opportunity, view: TableView) -> String {
    let exchange = escape_html(op.exchange.as_deref().unwrap_or("N/A"));
    let time = escape_html(&display_time(op));
    let path = render_path(&op.trade_path);
    let start = escape_html(&format!("{} {}", op.start_amount, op.start_coin));
    let end = escape_html(&format!("{} {}", op.end_amount, op.end_coin));
    let fees = escape_html(op.fees_str.as_deref().unwrap_or("N/A"));
    let status = op.status.to_string();

    format!(
        concat!(
            "<tr data-id=\"{id}\">",
            "<td><span class=\"exch-badge\">{exchange}</span></td>",
            "<td>{time}</td>",
            "<td style=\"max-width: 300px; white-space: normal;\">{path}</td>",
            "<td>{start}</td>",
            "<td>{end}</td>",
            "<td style=\"color: var(--text-secondary); font-size: 0.85rem;\">{fees} {trigger}</td>",
            "<td class=\"{profit_class}\">{profit}</td>",
            "<td><span class=\"status-pill status-{status_slug} {status_class}\" style=\"font-size: 0.75rem;\">{status}</span></td>",
            "</tr>"
        ),
        id = op.id,
        exchange = exchange,
        time = time,
        path = path,
        start = start,
        end = end,
        fees = fees,
        trigger = detail_trigger(index, op, view),
        profit_class = profit_class(op.profit_percent),
        profit = escape_html(&format_profit(op.profit_percent)),
        status_slug = escape_html(&status.to_lowercase()),
        status_class = status_class(&op.status),
        status = escape_html(&status),
    )
}

/// Detail control: links to the stable-id lookup and carries the row's
/// position and view for the positional one.
fn detail_trigger(index: usize, op: &Opportunity, view: TableView) -> String {
    format!(
        r#"<a class="btn-icon fee-detail" href="/fees/{id}" data-index="{index}" data-profitable="{flag}" style="font-size: 1rem; vertical-align: middle; margin-left: 4px;"><ion-icon name="information-circle-outline"></ion-icon></a>"#,
        id = op.id,
        flag = view.is_profitable(),
    )
}

fn display_time(op: &Opportunity) -> String {
    match &op.timestamp {
        Some(ts) => ts.local_time().unwrap_or_else(|| ts.to_string()),
        None => "N/A".to_string(),
    }
}

/// Coin badges joined by arrow glyphs.
pub fn render_path(path: &[String]) -> String {
    path.iter()
        .map(|coin| format!(r#"<span class="path-badge">{}</span>"#, escape_html(coin)))
        .collect::<Vec<_>>()
        .join(PATH_ARROW)
}

/// Signed percentage, `+` for zero and above.
pub fn format_profit(profit_percent: f64) -> String {
    // Adding 0.0 folds -0.0 into 0.0.
    let p = profit_percent + 0.0;
    if p >= 0.0 {
        format!("+{p}%")
    } else {
        format!("{p}%")
    }
}

pub fn profit_class(profit_percent: f64) -> &'static str {
    if profit_percent >= 0.0 {
        "profit-pos"
    } else {
        "profit-neg"
    }
}

/// Badge styling for a status; unknown values get no extra class.
pub fn status_class(status: &OpportunityStatus) -> &'static str {
    match status {
        OpportunityStatus::Profitable => "profit-pos",
        OpportunityStatus::Loss => "profit-neg",
        OpportunityStatus::LowProfit => "profit-mid",
        OpportunityStatus::Unknown(_) => "",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
