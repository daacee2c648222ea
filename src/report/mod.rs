pub mod chart;
pub mod table;
pub mod template;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::portfolio::{FundCalculator, FundSummary};
use crate::utils::{Config, format_count, format_fixed, format_grouped, format_korean_date, format_percentage};

pub use chart::render_donut_chart;
pub use table::render_holdings_table;
pub use template::{relativize_asset_paths, Template};

pub const LAST_UPDATED: &str = "__LAST_UPDATED__";
pub const SHARES: &str = "__SHARES__";
pub const AUM: &str = "__AUM__";
pub const NAV: &str = "__NAV__";
pub const YTD_RETURN: &str = "__YTD_RETURN__";
pub const BETA: &str = "__BETA__";
pub const HOLDINGS: &str = "__HOLDINGS__";
pub const STOCK_WEIGHT: &str = "__STOCK_WEIGHT__";
pub const CASH_WEIGHT: &str = "__CASH_WEIGHT__";
pub const PDF: &str = "__PDF__";
pub const PDF_CHART: &str = "__PDF_CHART__";

/// Everything the renderer needs besides the fund itself
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub as_of: NaiveDate,
    pub baseline_nav: Decimal,
    pub include_chart: bool,
    pub relative_asset_paths: bool,
}

impl RenderContext {
    pub fn from_config(config: &Config, as_of: NaiveDate) -> Self {
        Self {
            as_of,
            baseline_nav: config.baseline_nav,
            include_chart: config.enable_chart,
            relative_asset_paths: config.relative_asset_paths,
        }
    }
}

/// Placeholder values for a summarized fund
pub fn placeholder_values(summary: &FundSummary, ctx: &RenderContext) -> Vec<(&'static str, String)> {
    let ytd = FundCalculator::ytd_return(summary.nav, ctx.baseline_nav);

    let mut values = vec![
        (LAST_UPDATED, format_korean_date(ctx.as_of)),
        (SHARES, format_count(summary.outstanding_shares)),
        (AUM, format_grouped(summary.aum, 3)),
        (NAV, format_grouped(summary.nav.trunc(), 0)),
        (YTD_RETURN, format_percentage(ytd)),
        (BETA, format_fixed(summary.weighted_beta, 2)),
        (HOLDINGS, summary.holdings_count.to_string()),
        (STOCK_WEIGHT, format_fixed(summary.stock_weight, 2)),
        (CASH_WEIGHT, format_fixed(summary.cash_weight, 2)),
        (PDF, render_holdings_table(&summary.rows)),
    ];

    if ctx.include_chart {
        values.push((PDF_CHART, render_donut_chart(&summary.rows)));
    }

    values
}

/// Placeholders blanked out when their feature is off
pub fn disabled_placeholders(ctx: &RenderContext) -> Vec<(&'static str, String)> {
    if ctx.include_chart {
        Vec::new()
    } else {
        vec![(PDF_CHART, String::new())]
    }
}

/// Render the final page. Fails without output if any placeholder is
/// missing or duplicated.
pub fn render_page(template: &Template, summary: &FundSummary, ctx: &RenderContext) -> Result<String> {
    let html = template.substitute_with_optional(
        &placeholder_values(summary, ctx),
        &disabled_placeholders(ctx),
    )?;

    Ok(if ctx.relative_asset_paths {
        relativize_asset_paths(&html)
    } else {
        html
    })
}
