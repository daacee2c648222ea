use rust_decimal::Decimal;
use std::fmt::Write;

use crate::portfolio::HoldingRow;
use crate::utils::{escape_html, format_count, format_fixed, format_grouped, format_percentage, round_display};

/// `<tr>` rows for the holdings table, in the order given
pub fn render_holdings_table(rows: &[HoldingRow]) -> String {
    let mut html = String::new();
    for row in rows {
        // Writing into a String cannot fail
        let _ = write!(
            html,
            concat!(
                "<tr>",
                "<td class=\"p-1\">{ticker}</td>",
                "<td class=\"p-1\">{name}</td>",
                "<td class=\"p-1\">{shares}</td>",
                "<td class=\"p-1 hidden sm:table-cell\">{value}</td>",
                "{ret}",
                "<td class=\"p-1\">{weight}</td>",
                "</tr>"
            ),
            ticker = escape_html(&row.ticker),
            name = escape_html(&row.name),
            shares = format_count(row.shares),
            value = format_grouped(row.market_value, 3),
            ret = return_cell(row.price_return),
            weight = format_fixed(row.weight_percent, 2),
        );
    }
    html
}

/// Korean market convention: gains in red, losses in blue
fn return_cell(price_return: Option<Decimal>) -> String {
    let percent = price_return.map(|r| round_display(r * Decimal::ONE_HUNDRED, 2));
    match percent {
        Some(p) if p > Decimal::ZERO => {
            format!("<td class=\"p-1 text-red-500\">{}</td>", format_percentage(p))
        }
        Some(p) if p < Decimal::ZERO => {
            format!("<td class=\"p-1 text-blue-500\">{}</td>", format_percentage(p))
        }
        _ => "<td class=\"p-1\">-</td>".to_string(),
    }
}
