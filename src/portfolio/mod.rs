pub mod types;
pub mod loader;
pub mod analyzer;

pub use types::*;
pub use loader::{load_portfolio, parse_holdings, parse_outstanding_shares};
pub use analyzer::FundCalculator;
