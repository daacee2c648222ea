use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{test_config, FakeMarketData};
use crate::errors::FundError;
use crate::market::{MarketDataFetcher, NaverMarketData};
use crate::portfolio::{parse_holdings, BetaSource, LogoColor, Portfolio};

fn portfolio(csv: &str) -> Portfolio {
    Portfolio {
        holdings: parse_holdings(csv, "KRW").unwrap(),
        outstanding_shares: 1000,
        cash_ticker: "KRW".to_string(),
    }
}

#[tokio::test]
async fn test_cash_is_never_fetched() {
    let source = FakeMarketData::default()
        .with_price("069500", dec!(35000))
        .with_beta("069500", dec!(1.2));
    let fetcher = MarketDataFetcher::new(source, &test_config());

    let quotes = fetcher
        .fetch_quotes(&portfolio("069500,KODEX200,100\nKRW,Cash,500000"))
        .await
        .unwrap();

    assert_eq!(quotes.len(), 1);
    assert!(quotes.contains_key("069500"));
    assert!(!quotes.contains_key("KRW"));
}

#[tokio::test]
async fn test_quotes_follow_portfolio_order() {
    let source = FakeMarketData::default()
        .with_price("B", dec!(2))
        .with_price("A", dec!(1))
        .with_price("C", dec!(3));
    let fetcher = MarketDataFetcher::new(source, &test_config());

    let quotes = fetcher
        .fetch_quotes(&portfolio("B,b,1\nKRW,Cash,1\nA,a,1\nC,c,1"))
        .await
        .unwrap();

    let tickers: Vec<&str> = quotes.keys().map(String::as_str).collect();
    assert_eq!(tickers, vec!["B", "A", "C"]);
    assert_eq!(quotes["A"].price, dec!(1));
}

#[tokio::test]
async fn test_override_skips_beta_lookup() {
    let mut config = test_config();
    config.beta_overrides.insert("069500".to_string(), Decimal::ONE);

    let source = FakeMarketData::default()
        .with_price("069500", dec!(35000))
        .with_beta("069500", dec!(1.7));
    let fetcher = MarketDataFetcher::new(source, &config);

    let quote = fetcher.fetch_quote("069500").await.unwrap();
    assert_eq!(quote.beta, Decimal::ONE);
    assert_eq!(quote.beta_source, BetaSource::Override);
}

#[tokio::test]
async fn test_missing_beta_uses_default() {
    let source = FakeMarketData::default().with_price("005930", dec!(70000));
    let fetcher = MarketDataFetcher::new(source, &test_config());

    let quote = fetcher.fetch_quote("005930").await.unwrap();
    assert_eq!(quote.beta, dec!(1.0));
    assert_eq!(quote.beta_source, BetaSource::Default);
}

#[tokio::test]
async fn test_beta_page_failure_uses_configured_default() {
    let mut config = test_config();
    config.default_beta = dec!(0.9);

    let source = FakeMarketData::default()
        .with_price("005930", dec!(70000))
        .with_failing_beta("005930");
    let fetcher = MarketDataFetcher::new(source, &config);

    let quote = fetcher.fetch_quote("005930").await.unwrap();
    assert_eq!(quote.beta, dec!(0.9));
    assert_eq!(quote.beta_source, BetaSource::Default);
}

#[tokio::test]
async fn test_scraped_beta_is_kept() {
    let source = FakeMarketData::default()
        .with_price("005930", dec!(70000))
        .with_beta("005930", dec!(1.35));
    let fetcher = MarketDataFetcher::new(source, &test_config());

    let quote = fetcher.fetch_quote("005930").await.unwrap();
    assert_eq!(quote.beta, dec!(1.35));
    assert_eq!(quote.beta_source, BetaSource::Scraped);
}

#[tokio::test]
async fn test_missing_price_fails_the_whole_batch() {
    let source = FakeMarketData::default().with_price("A", dec!(1));
    let fetcher = MarketDataFetcher::new(source, &test_config());

    let err = fetcher
        .fetch_quotes(&portfolio("A,a,1\nB,b,1\nKRW,Cash,1"))
        .await
        .unwrap_err();
    assert!(matches!(err, FundError::Fetch(ref msg) if msg.contains("B")));
}

#[tokio::test]
async fn test_logos_only_fetched_for_chart() {
    let source = FakeMarketData::default()
        .with_price("A", dec!(1))
        .with_color("A", LogoColor::new(10, 20, 30));
    let fetcher = MarketDataFetcher::new(source, &test_config());
    let quote = fetcher.fetch_quote("A").await.unwrap();
    assert_eq!(quote.logo_color, None);

    let mut config = test_config();
    config.enable_chart = true;
    let source = FakeMarketData::default()
        .with_price("A", dec!(1))
        .with_color("A", LogoColor::new(10, 20, 30));
    let fetcher = MarketDataFetcher::new(source, &config);
    let quote = fetcher.fetch_quote("A").await.unwrap();
    assert_eq!(quote.logo_color, Some(LogoColor::new(10, 20, 30)));
}

#[tokio::test]
async fn test_source_calls_skip_cash_and_overrides() {
    let mut config = test_config();
    config.beta_overrides.insert("069500".to_string(), Decimal::ONE);

    let source = FakeMarketData::default()
        .with_price("069500", dec!(35000))
        .with_price("005930", dec!(70000));
    let log = source.call_log();
    let fetcher = MarketDataFetcher::new(source, &config);
    let book = portfolio("069500,KODEX200,1\n005930,삼성전자,1\nKRW,Cash,1");

    fetcher.fetch_quotes(&book).await.unwrap();

    let calls = log.lock().unwrap().clone();
    assert!(calls.contains(&"price:069500".to_string()));
    assert!(calls.contains(&"beta:005930".to_string()));
    assert!(!calls.contains(&"beta:069500".to_string()));
    assert!(!calls.iter().any(|c| c.ends_with(":KRW")));
    assert!(!calls.iter().any(|c| c.starts_with("logo:")));
}

#[tokio::test]
async fn test_unreachable_quote_server_fails() {
    let mut config = test_config();
    config.price_url_template = "http://127.0.0.1:9/item/sise.naver?code={ticker}".to_string();
    config.beta_url_template = "http://127.0.0.1:9/c1010001.aspx?cmp_cd={ticker}".to_string();
    config.request_timeout_secs = 2;

    let source = NaverMarketData::new(&config).unwrap();
    let fetcher = MarketDataFetcher::new(source, &config);

    assert!(fetcher.fetch_quote("005930").await.is_err());
}
