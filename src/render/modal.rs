//! Fee breakdown modal rows.

use super::escape_html;
use crate::types::{FeeStep, TradeAction};

/// Columns in the fee breakdown table.
pub const FEE_COLUMNS: usize = 4;

/// One row per fee step, in breakdown order.
///
/// An empty breakdown yields a single "no data" row rather than an empty
/// body.
pub fn render_fee_rows(steps: &[FeeStep]) -> String {
    if steps.is_empty() {
        return format!(
            r#"<tr class="empty-state"><td colspan="{FEE_COLUMNS}">No fee breakdown available.</td></tr>"#
        );
    }

    steps.iter().map(render_fee_row).collect::<Vec<_>>().join("\n")
}

fn render_fee_row(step: &FeeStep) -> String {
    format!(
        concat!(
            "<tr>",
            "<td>{step}</td>",
            "<td><span class=\"path-badge\">{symbol}</span></td>",
            "<td><span class=\"{class}\" style=\"color: {color}\">{action}</span></td>",
            "<td>{fee}</td>",
            "</tr>"
        ),
        step = escape_html(&step.step.to_string()),
        symbol = escape_html(&step.symbol),
        class = action_class(&step.action),
        color = action_color(&step.action),
        action = escape_html(&step.action.to_string()),
        fee = escape_html(&step.fee_percent),
    )
}

fn action_class(action: &TradeAction) -> &'static str {
    match action {
        TradeAction::Buy => "action-buy",
        _ => "action-sell",
    }
}

/// Buys are green, everything else red.
fn action_color(action: &TradeAction) -> &'static str {
    match action {
        TradeAction::Buy => "var(--accent-green)",
        _ => "var(--accent-red)",
    }
}
