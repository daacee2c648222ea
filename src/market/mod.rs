pub mod scrape;
pub mod logo;
pub mod source;
pub mod fetcher;

pub use fetcher::MarketDataFetcher;
pub use logo::dominant_color;
pub use scrape::{decode_euc_kr, extract_beta, extract_price};
pub use source::{MarketDataSource, NaverMarketData};
