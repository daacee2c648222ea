use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use super::types::{Holding, Portfolio};
use crate::errors::{FundError, Result};

/// Read the holdings list and the outstanding share count from disk
pub fn load_portfolio(portfolio_path: &Path, shares_path: &Path, cash_ticker: &str) -> Result<Portfolio> {
    let csv = fs::read_to_string(portfolio_path).map_err(|e| FundError::io(portfolio_path, e))?;
    let shares = fs::read_to_string(shares_path).map_err(|e| FundError::io(shares_path, e))?;

    let holdings = parse_holdings(&csv, cash_ticker)?;
    let outstanding_shares = parse_outstanding_shares(&shares)?;

    info!(
        "Loaded {} holdings ({} outstanding shares) from {}",
        holdings.len(),
        outstanding_shares,
        portfolio_path.display()
    );

    Ok(Portfolio {
        holdings,
        outstanding_shares,
        cash_ticker: cash_ticker.to_string(),
    })
}

/// Parse `ticker,name,shares[,purchasePrice]` rows.
///
/// Blank lines are skipped. Any malformed row fails the whole file.
pub fn parse_holdings(csv: &str, cash_ticker: &str) -> Result<IndexMap<String, Holding>> {
    let mut holdings = IndexMap::new();

    for (index, raw_line) in csv.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if !(3..=4).contains(&fields.len()) {
            return Err(FundError::parse(format!(
                "line {}: expected 3 or 4 columns (ticker,name,shares[,purchasePrice]), found {}",
                line_no,
                fields.len()
            )));
        }

        let ticker = fields[0];
        let name = fields[1];
        if ticker.is_empty() {
            return Err(FundError::parse(format!("line {}: empty ticker", line_no)));
        }

        let shares: u64 = fields[2].parse().map_err(|_| {
            FundError::parse(format!(
                "line {}: share count '{}' is not a non-negative integer",
                line_no, fields[2]
            ))
        })?;

        let purchase_price = match fields.get(3) {
            Some(raw) if !raw.is_empty() => Some(parse_price(raw, line_no)?),
            _ => None,
        };

        if holdings.contains_key(ticker) {
            return Err(FundError::parse(format!(
                "line {}: ticker {} appears more than once",
                line_no, ticker
            )));
        }

        let holding = if ticker == cash_ticker {
            Holding::cash(ticker, name, shares)
        } else {
            Holding::security(ticker, name, shares, purchase_price)
        };
        debug!("Parsed holding {} ({}) x {}", ticker, name, shares);
        holdings.insert(ticker.to_string(), holding);
    }

    if !holdings.contains_key(cash_ticker) {
        return Err(FundError::parse(format!(
            "portfolio has no cash row for ticker {}",
            cash_ticker
        )));
    }

    Ok(holdings)
}

fn parse_price(raw: &str, line_no: usize) -> Result<Decimal> {
    let price = Decimal::from_str(raw).map_err(|_| {
        FundError::parse(format!("line {}: purchase price '{}' is not a number", line_no, raw))
    })?;
    if price.is_sign_negative() {
        return Err(FundError::parse(format!(
            "line {}: purchase price must not be negative",
            line_no
        )));
    }
    Ok(price)
}

/// Parse the single outstanding-share integer
pub fn parse_outstanding_shares(text: &str) -> Result<u64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    let shares: u64 = cleaned.parse().map_err(|_| {
        FundError::parse(format!("outstanding shares '{}' is not an integer", text.trim()))
    })?;
    if shares == 0 {
        return Err(FundError::parse("outstanding shares must be greater than zero"));
    }
    Ok(shares)
}
