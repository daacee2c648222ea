use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use tracing::debug;

use super::logo::dominant_color;
use super::scrape::{decode_euc_kr, extract_beta, extract_price};
use crate::constants::{TICKER_SLOT, USER_AGENT};
use crate::errors::{FundError, Result};
use crate::portfolio::LogoColor;
use crate::utils::Config;

/// Raw per-ticker market data lookups.
///
/// Implementations do one request per call; timeouts, retries and the beta
/// default live in [`super::MarketDataFetcher`].
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Current price. A page without a price is an error.
    async fn fetch_price(&self, ticker: &str) -> Result<Decimal>;

    /// Market beta, `Ok(None)` when the page carries no recognizable beta.
    async fn fetch_beta(&self, ticker: &str) -> Result<Option<Decimal>>;

    /// Dominant color of the ticker's icon.
    async fn fetch_logo_color(&self, ticker: &str) -> Result<LogoColor>;
}

/// Scrapes Naver Finance quote pages and WiseReport metrics pages
#[derive(Clone)]
pub struct NaverMarketData {
    client: Client,
    price_url_template: String,
    beta_url_template: String,
    logo_url_template: String,
}

impl NaverMarketData {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            price_url_template: config.price_url_template.clone(),
            beta_url_template: config.beta_url_template.clone(),
            logo_url_template: config.logo_url_template.clone(),
        })
    }

    fn url(template: &str, ticker: &str) -> String {
        template.replace(TICKER_SLOT, ticker)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FundError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl MarketDataSource for NaverMarketData {
    async fn fetch_price(&self, ticker: &str) -> Result<Decimal> {
        let url = Self::url(&self.price_url_template, ticker);
        let page = decode_euc_kr(&self.get_bytes(&url).await?);

        extract_price(&page)
            .ok_or_else(|| FundError::fetch(format!("No current price on quote page for {}", ticker)))
    }

    async fn fetch_beta(&self, ticker: &str) -> Result<Option<Decimal>> {
        let url = Self::url(&self.beta_url_template, ticker);
        let bytes = self.get_bytes(&url).await?;
        let page = String::from_utf8_lossy(&bytes);

        Ok(extract_beta(&page))
    }

    async fn fetch_logo_color(&self, ticker: &str) -> Result<LogoColor> {
        let url = Self::url(&self.logo_url_template, ticker);
        let bytes = self.get_bytes(&url).await?;

        dominant_color(&bytes)
    }
}
