use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::*;
use crate::errors::{FundError, Result};
use crate::utils::timeout::TimeoutConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Files
    pub portfolio_path: PathBuf,
    pub shares_path: PathBuf,
    pub template_path: PathBuf,
    pub output_path: PathBuf,

    // Fund
    pub cash_ticker: String,
    pub baseline_nav: Decimal,
    pub default_beta: Decimal,
    pub beta_overrides: IndexMap<String, Decimal>,

    // Vendor endpoints
    pub price_url_template: String,
    pub beta_url_template: String,
    pub logo_url_template: String,

    // Network
    pub request_timeout_secs: u64,
    pub retry_count: u32,

    // Feature flags
    pub enable_chart: bool,
    pub relative_asset_paths: bool,

    // Logging
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            portfolio_path: PathBuf::from(DEFAULT_PORTFOLIO_PATH),
            shares_path: PathBuf::from(DEFAULT_SHARES_PATH),
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            cash_ticker: DEFAULT_CASH_TICKER.to_string(),
            baseline_nav: Decimal::from(10_000),
            default_beta: Decimal::ONE,
            beta_overrides: IndexMap::from([("069500".to_string(), Decimal::ONE)]),
            price_url_template: PRICE_URL_TEMPLATE.to_string(),
            beta_url_template: BETA_URL_TEMPLATE.to_string(),
            logo_url_template: LOGO_URL_TEMPLATE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            retry_count: DEFAULT_RETRY_COUNT,
            enable_chart: true,
            relative_asset_paths: true,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Build configuration from the environment. Every variable is optional.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            portfolio_path: env::var("FUND_PORTFOLIO_PATH")
                .unwrap_or_else(|_| DEFAULT_PORTFOLIO_PATH.to_string())
                .into(),
            shares_path: env::var("FUND_SHARES_PATH")
                .unwrap_or_else(|_| DEFAULT_SHARES_PATH.to_string())
                .into(),
            template_path: env::var("FUND_TEMPLATE_PATH")
                .unwrap_or_else(|_| DEFAULT_TEMPLATE_PATH.to_string())
                .into(),
            output_path: env::var("FUND_OUTPUT_PATH")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_PATH.to_string())
                .into(),

            cash_ticker: env::var("FUND_CASH_TICKER")
                .unwrap_or_else(|_| DEFAULT_CASH_TICKER.to_string()),
            baseline_nav: Self::decimal_var("FUND_BASELINE_NAV", DEFAULT_BASELINE_NAV)?,
            default_beta: Self::decimal_var("FUND_DEFAULT_BETA", DEFAULT_MARKET_BETA)?,
            beta_overrides: Self::parse_beta_overrides(
                &env::var("FUND_BETA_OVERRIDES")
                    .unwrap_or_else(|_| DEFAULT_BETA_OVERRIDES.to_string()),
            )?,

            price_url_template: env::var("FUND_PRICE_URL")
                .unwrap_or_else(|_| PRICE_URL_TEMPLATE.to_string()),
            beta_url_template: env::var("FUND_BETA_URL")
                .unwrap_or_else(|_| BETA_URL_TEMPLATE.to_string()),
            logo_url_template: env::var("FUND_LOGO_URL")
                .unwrap_or_else(|_| LOGO_URL_TEMPLATE.to_string()),

            request_timeout_secs: env::var("FUND_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| FundError::config("FUND_REQUEST_TIMEOUT_SECS must be an integer"))?,
            retry_count: env::var("FUND_RETRY_COUNT")
                .unwrap_or_else(|_| DEFAULT_RETRY_COUNT.to_string())
                .parse()
                .map_err(|_| FundError::config("FUND_RETRY_COUNT must be an integer"))?,

            enable_chart: Self::flag_var("FUND_ENABLE_CHART", true)?,
            relative_asset_paths: Self::flag_var("FUND_RELATIVE_ASSETS", true)?,

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: Self::parse_log_format(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            ),
        })
    }

    fn decimal_var(name: &str, default: &str) -> Result<Decimal> {
        let raw = env::var(name).unwrap_or_else(|_| default.to_string());
        Decimal::from_str(raw.trim())
            .map_err(|_| FundError::config(format!("{} must be a decimal, got '{}'", name, raw)))
    }

    fn flag_var(name: &str, default: bool) -> Result<bool> {
        match env::var(name) {
            Ok(raw) => Self::parse_flag(&raw).ok_or_else(|| {
                FundError::config(format!("{} must be true or false, got '{}'", name, raw))
            }),
            Err(_) => Ok(default),
        }
    }

    /// `true`/`false` and the usual `1`/`0`, `yes`/`no`, `on`/`off` spellings
    fn parse_flag(raw: &str) -> Option<bool> {
        match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    /// Parse `TICKER:BETA` pairs separated by commas.
    pub fn parse_beta_overrides(raw: &str) -> Result<IndexMap<String, Decimal>> {
        let mut overrides = IndexMap::new();
        for pair in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (ticker, beta) = pair
                .split_once(':')
                .ok_or_else(|| FundError::config(format!("Invalid beta override '{}'", pair)))?;
            let beta = Decimal::from_str(beta.trim())
                .map_err(|_| FundError::config(format!("Invalid beta in override '{}'", pair)))?;
            overrides.insert(ticker.trim().to_string(), beta);
        }
        Ok(overrides)
    }

    fn parse_log_format(format: &str) -> LogFormat {
        match format.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }

    pub fn timeout_config(&self) -> TimeoutConfig {
        TimeoutConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            retry_count: self.retry_count,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cash_ticker.trim().is_empty() {
            return Err(FundError::config("Cash ticker must not be empty"));
        }

        if self.baseline_nav <= Decimal::ZERO {
            return Err(FundError::config("Baseline NAV must be positive"));
        }

        for (name, template) in [
            ("price", &self.price_url_template),
            ("beta", &self.beta_url_template),
            ("logo", &self.logo_url_template),
        ] {
            if !template.contains(TICKER_SLOT) {
                return Err(FundError::config(format!(
                    "The {} URL template must contain {}",
                    name, TICKER_SLOT
                )));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(FundError::config("Request timeout must be at least one second"));
        }

        Ok(())
    }
}
