mod fetcher_tests;

use async_trait::async_trait;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::errors::{FundError, Result};
use crate::market::MarketDataSource;
use crate::portfolio::LogoColor;
use crate::utils::Config;

/// Every placeholder the page uses, each exactly once
pub(crate) const PAGE_TEMPLATE: &str = r#"<html><head><script src="/assets/index.js"></script></head><body>
<p id="updated">__LAST_UPDATED__</p>
<dl>
<dd id="shares">__SHARES__</dd><dd id="aum">__AUM__</dd><dd id="nav">__NAV__</dd>
<dd id="ytd">__YTD_RETURN__</dd><dd id="beta">__BETA__</dd><dd id="holdings">__HOLDINGS__</dd>
<dd id="stock">__STOCK_WEIGHT__</dd><dd id="cash">__CASH_WEIGHT__</dd>
</dl>
<table><tbody>__PDF__</tbody></table>
<div id="chart">__PDF_CHART__</div>
</body></html>"#;

/// In-memory market data keyed by ticker
#[derive(Default)]
pub(crate) struct FakeMarketData {
    prices: HashMap<String, Decimal>,
    betas: HashMap<String, Decimal>,
    failing_betas: HashSet<String>,
    colors: HashMap<String, LogoColor>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeMarketData {
    pub fn with_price(mut self, ticker: &str, price: Decimal) -> Self {
        self.prices.insert(ticker.to_string(), price);
        self
    }

    pub fn with_beta(mut self, ticker: &str, beta: Decimal) -> Self {
        self.betas.insert(ticker.to_string(), beta);
        self
    }

    /// Beta page that answers with a server error
    pub fn with_failing_beta(mut self, ticker: &str) -> Self {
        self.failing_betas.insert(ticker.to_string());
        self
    }

    pub fn with_color(mut self, ticker: &str, color: LogoColor) -> Self {
        self.colors.insert(ticker.to_string(), color);
        self
    }

    /// Shared log of every call, still readable after the fake is moved
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl MarketDataSource for FakeMarketData {
    async fn fetch_price(&self, ticker: &str) -> Result<Decimal> {
        self.record(format!("price:{}", ticker));
        self.prices
            .get(ticker)
            .copied()
            .ok_or_else(|| FundError::fetch(format!("No current price on quote page for {}", ticker)))
    }

    async fn fetch_beta(&self, ticker: &str) -> Result<Option<Decimal>> {
        self.record(format!("beta:{}", ticker));
        if self.failing_betas.contains(ticker) {
            return Err(FundError::Status {
                url: format!("https://beta.example/{}", ticker),
                status: 500,
            });
        }
        Ok(self.betas.get(ticker).copied())
    }

    async fn fetch_logo_color(&self, ticker: &str) -> Result<LogoColor> {
        self.record(format!("logo:{}", ticker));
        self.colors
            .get(ticker)
            .copied()
            .ok_or_else(|| FundError::fetch(format!("No logo for {}", ticker)))
    }
}

/// Config with no beta overrides, no retries and no chart
pub(crate) fn test_config() -> Config {
    Config {
        beta_overrides: IndexMap::new(),
        retry_count: 0,
        request_timeout_secs: 2,
        enable_chart: false,
        relative_asset_paths: false,
        ..Default::default()
    }
}
