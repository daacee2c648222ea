use rust_decimal::Decimal;
use tracing::debug;

use super::types::*;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Derives fund statistics from a priced portfolio
pub struct FundCalculator;

impl FundCalculator {
    /// Compute AUM, NAV, weighted beta and per-holding rows.
    ///
    /// Weights stay unrounded; rounding is a display concern.
    pub fn summarize(portfolio: &Portfolio) -> FundSummary {
        let aum = portfolio.total_market_value();
        let nav = aum / Decimal::from(portfolio.outstanding_shares);

        let mut rows: Vec<HoldingRow> = portfolio
            .holdings
            .values()
            .map(|holding| Self::holding_row(holding, aum))
            .collect();

        let weighted_beta = rows
            .iter()
            .map(|row| Self::fraction_of(row.market_value, aum) * row.market_beta)
            .sum::<Decimal>();

        let cash_weight = rows
            .iter()
            .filter(|row| row.is_cash)
            .map(|row| row.weight_percent)
            .sum::<Decimal>();
        let stock_weight = if aum.is_zero() { Decimal::ZERO } else { HUNDRED - cash_weight };

        // Stable sort: cash sinks to the bottom, the rest keep file order
        rows.sort_by_key(|row| row.is_cash);

        let holdings_count = rows.iter().filter(|row| !row.is_cash).count();

        debug!(
            "Fund summary: aum={} nav={} beta={} holdings={}",
            aum, nav, weighted_beta, holdings_count
        );

        FundSummary {
            outstanding_shares: portfolio.outstanding_shares,
            aum,
            nav,
            weighted_beta,
            stock_weight,
            cash_weight,
            holdings_count,
            rows,
        }
    }

    fn holding_row(holding: &Holding, aum: Decimal) -> HoldingRow {
        let market_value = holding.market_value();

        HoldingRow {
            ticker: holding.ticker.clone(),
            name: holding.name.clone(),
            shares: holding.shares,
            market_value,
            weight_percent: Self::fraction_of(market_value, aum) * HUNDRED,
            price_return: Self::price_return(holding),
            market_beta: holding.market_beta,
            logo_color: holding.logo_color,
            is_cash: holding.is_cash,
        }
    }

    fn fraction_of(value: Decimal, total: Decimal) -> Decimal {
        if total.is_zero() {
            Decimal::ZERO
        } else {
            value / total
        }
    }

    /// `(current - purchase) / purchase`, if there is a purchase price to compare with
    pub fn price_return(holding: &Holding) -> Option<Decimal> {
        if holding.is_cash {
            return None;
        }
        match holding.purchase_price {
            Some(purchase) if !purchase.is_zero() => {
                Some((holding.current_price - purchase) / purchase)
            }
            _ => None,
        }
    }

    /// Year-to-date return in percent against the NAV the year started at
    pub fn ytd_return(nav: Decimal, baseline_nav: Decimal) -> Decimal {
        if baseline_nav.is_zero() {
            return Decimal::ZERO;
        }
        (nav / baseline_nav - Decimal::ONE) * HUNDRED
    }
}
