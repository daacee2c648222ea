//! Field extraction for the vendor pages.
//!
//! Each page is treated as a loosely specified format that can change
//! without notice, so every extractor returns `None` instead of failing when
//! its pattern is absent. Callers decide whether a miss is fatal.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

/// `현재가 12,345 ` on the quote page
static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"현재가\s([\d,]+)\s").expect("valid price pattern"));

/// Company overview layout
static BETA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"52주베타</th>[\n\s]+<td class="num">[\n\s]+([\d.-]+)[\n\s]+</td>"#)
        .expect("valid beta pattern")
});

/// Fund (ETF) overview layout
static FUND_BETA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<th[^>]*>\s*베타\s*(?:\(\s*1년\s*\))?\s*</th>\s*<td[^>]*>\s*([\d.-]+)\s*</td>"#)
        .expect("valid fund beta pattern")
});

/// Decode a quote page. The vendor serves EUC-KR, not UTF-8.
pub fn decode_euc_kr(bytes: &[u8]) -> String {
    let (text, _, _) = encoding_rs::EUC_KR.decode(bytes);
    text.into_owned()
}

/// Current price with every thousands separator removed
pub fn extract_price(page: &str) -> Option<Decimal> {
    let digits: String = PRICE_PATTERN
        .captures(page)?
        .get(1)?
        .as_str()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&digits).ok()
}

/// 52-week beta, trying the company layout before the fund layout
pub fn extract_beta(page: &str) -> Option<Decimal> {
    [&*BETA_PATTERN, &*FUND_BETA_PATTERN]
        .into_iter()
        .find_map(|pattern| {
            let raw = pattern.captures(page)?.get(1)?.as_str();
            Decimal::from_str(raw).ok()
        })
}
