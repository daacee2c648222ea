use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A color sampled from a holding's icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogoColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LogoColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for LogoColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// One line-item position of the fund
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    pub name: String,
    pub shares: u64,
    pub purchase_price: Option<Decimal>,
    pub current_price: Decimal,
    pub market_beta: Decimal,
    pub logo_color: Option<LogoColor>,
    pub is_cash: bool,
}

impl Holding {
    /// A security whose price and beta still have to be fetched
    pub fn security(ticker: &str, name: &str, shares: u64, purchase_price: Option<Decimal>) -> Self {
        Self {
            ticker: ticker.to_string(),
            name: name.to_string(),
            shares,
            purchase_price,
            current_price: Decimal::ZERO,
            market_beta: Decimal::ZERO,
            logo_color: None,
            is_cash: false,
        }
    }

    /// The cash line: one unit is worth one, and it carries no market risk
    pub fn cash(ticker: &str, name: &str, amount: u64) -> Self {
        Self {
            ticker: ticker.to_string(),
            name: name.to_string(),
            shares: amount,
            purchase_price: None,
            current_price: Decimal::ONE,
            market_beta: Decimal::ZERO,
            logo_color: None,
            is_cash: true,
        }
    }

    pub fn market_value(&self) -> Decimal {
        Decimal::from(self.shares) * self.current_price
    }

    pub fn apply_quote(&mut self, quote: &MarketQuote) {
        self.current_price = quote.price;
        self.market_beta = quote.beta;
        self.logo_color = quote.logo_color;
    }
}

/// Holdings keyed by ticker in file order, plus the fund's share count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub holdings: IndexMap<String, Holding>,
    pub outstanding_shares: u64,
    pub cash_ticker: String,
}

impl Portfolio {
    pub fn cash(&self) -> Option<&Holding> {
        self.holdings.get(&self.cash_ticker)
    }

    /// Tickers that need market data, in file order
    pub fn securities(&self) -> impl Iterator<Item = &Holding> {
        self.holdings.values().filter(|h| !h.is_cash)
    }

    pub fn total_market_value(&self) -> Decimal {
        self.holdings.values().map(Holding::market_value).sum()
    }

    /// Copy fetched quotes onto the matching holdings
    pub fn apply_quotes(&mut self, quotes: &IndexMap<String, MarketQuote>) {
        for (ticker, quote) in quotes {
            if let Some(holding) = self.holdings.get_mut(ticker) {
                if !holding.is_cash {
                    holding.apply_quote(quote);
                }
            }
        }
    }
}

/// Where a holding's beta came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetaSource {
    Scraped,
    Override,
    Default,
}

/// Market data fetched for one security
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub price: Decimal,
    pub beta: Decimal,
    pub beta_source: BetaSource,
    pub logo_color: Option<LogoColor>,
}

/// Per-holding figures derived for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingRow {
    pub ticker: String,
    pub name: String,
    pub shares: u64,
    pub market_value: Decimal,
    /// Share of AUM, 0-100, unrounded
    pub weight_percent: Decimal,
    /// Fractional return since purchase; `None` for cash or without a purchase price
    pub price_return: Option<Decimal>,
    pub market_beta: Decimal,
    pub logo_color: Option<LogoColor>,
    pub is_cash: bool,
}

/// Aggregate fund statistics, derived fresh on every build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundSummary {
    pub outstanding_shares: u64,
    pub aum: Decimal,
    pub nav: Decimal,
    pub weighted_beta: Decimal,
    pub stock_weight: Decimal,
    pub cash_weight: Decimal,
    pub holdings_count: usize,
    /// Cash pinned last, everything else in load order
    pub rows: Vec<HoldingRow>,
}
