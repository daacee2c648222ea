//! Build-time renderer for the fund disclosure page.
//!
//! Loads the holdings list, scrapes current prices and betas, derives AUM,
//! NAV and weights, and fills the placeholders of the static page template.

pub mod constants;
pub mod errors;
pub mod market;
pub mod observability;
pub mod pipeline;
pub mod portfolio;
pub mod report;
pub mod utils;

#[cfg(test)]
mod tests;

pub use errors::{FundError, Result, TemplateError};
pub use market::{MarketDataFetcher, MarketDataSource, NaverMarketData};
pub use pipeline::{BuildOutput, FundPageBuilder};
pub use portfolio::{FundCalculator, FundSummary, Holding, Portfolio};
pub use report::{RenderContext, Template};
pub use utils::Config;
