use futures::future::try_join_all;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::source::MarketDataSource;
use crate::errors::{FundError, Result};
use crate::portfolio::{BetaSource, LogoColor, MarketQuote, Portfolio};
use crate::utils::{with_timeout_retry, Config, TimeoutConfig};

/// Fetches quotes for every non-cash holding.
///
/// Price and logo failures are fatal once retries run out. A missing beta
/// is not: it falls back to `default_beta` with a warning.
pub struct MarketDataFetcher<S> {
    source: S,
    timeouts: TimeoutConfig,
    default_beta: Decimal,
    beta_overrides: IndexMap<String, Decimal>,
    fetch_logos: bool,
}

impl<S: MarketDataSource> MarketDataFetcher<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            timeouts: config.timeout_config(),
            default_beta: config.default_beta,
            beta_overrides: config.beta_overrides.clone(),
            fetch_logos: config.enable_chart,
        }
    }

    /// Quotes keyed by ticker, in portfolio order
    pub async fn fetch_quotes(&self, portfolio: &Portfolio) -> Result<IndexMap<String, MarketQuote>> {
        let tickers: Vec<&str> = portfolio.securities().map(|h| h.ticker.as_str()).collect();
        info!("Fetching market data for {} holdings", tickers.len());

        let quotes = try_join_all(tickers.iter().map(|ticker| self.fetch_quote(ticker))).await?;

        Ok(tickers
            .into_iter()
            .map(str::to_string)
            .zip(quotes)
            .collect())
    }

    /// Price, beta and logo for one ticker, fetched concurrently
    pub async fn fetch_quote(&self, ticker: &str) -> Result<MarketQuote> {
        let (price, logo_color, (beta, beta_source)) = tokio::try_join!(
            self.price(ticker),
            self.logo_color(ticker),
            async { Ok::<_, FundError>(self.beta(ticker).await) }
        )?;

        debug!(
            "{}: price={} beta={} ({:?}) logo={:?}",
            ticker, price, beta, beta_source, logo_color
        );

        Ok(MarketQuote {
            price,
            beta,
            beta_source,
            logo_color,
        })
    }

    async fn price(&self, ticker: &str) -> Result<Decimal> {
        let operation = format!("price:{}", ticker);
        with_timeout_retry(|| self.source.fetch_price(ticker), &self.timeouts, &operation).await
    }

    async fn logo_color(&self, ticker: &str) -> Result<Option<LogoColor>> {
        if !self.fetch_logos {
            return Ok(None);
        }
        let operation = format!("logo:{}", ticker);
        with_timeout_retry(|| self.source.fetch_logo_color(ticker), &self.timeouts, &operation)
            .await
            .map(Some)
    }

    async fn beta(&self, ticker: &str) -> (Decimal, BetaSource) {
        if let Some(beta) = self.beta_overrides.get(ticker) {
            return (*beta, BetaSource::Override);
        }

        let operation = format!("beta:{}", ticker);
        match with_timeout_retry(|| self.source.fetch_beta(ticker), &self.timeouts, &operation).await {
            Ok(Some(beta)) => (beta, BetaSource::Scraped),
            Ok(None) => {
                warn!(
                    "No beta found for {} in either page layout, using default {}",
                    ticker, self.default_beta
                );
                (self.default_beta, BetaSource::Default)
            }
            Err(e) => {
                warn!(
                    "Beta lookup for {} failed ({}), using default {}",
                    ticker, e, self.default_beta
                );
                (self.default_beta, BetaSource::Default)
            }
        }
    }
}
