// Portfolio
pub const DEFAULT_CASH_TICKER: &str = "KRW";

// NAV per share the fund started the year at
pub const DEFAULT_BASELINE_NAV: &str = "10000";

// Substituted when no beta can be scraped
pub const DEFAULT_MARKET_BETA: &str = "1.0";

// The KOSPI 200 tracker is the market itself
pub const DEFAULT_BETA_OVERRIDES: &str = "069500:1.0";

// Input / output files
pub const DEFAULT_PORTFOLIO_PATH: &str = "data/pdf.csv";
pub const DEFAULT_SHARES_PATH: &str = "data/shares.txt";
pub const DEFAULT_TEMPLATE_PATH: &str = "index.html";
pub const DEFAULT_OUTPUT_PATH: &str = "dist/index.html";

// Vendor endpoints, `{ticker}` is replaced per holding
pub const PRICE_URL_TEMPLATE: &str = "https://finance.naver.com/item/sise.naver?code={ticker}";
pub const BETA_URL_TEMPLATE: &str =
    "https://navercomp.wisereport.co.kr/v2/company/c1010001.aspx?cmp_cd={ticker}";
pub const LOGO_URL_TEMPLATE: &str =
    "https://file.alphasquare.co.kr/media/images/stock_logo/kr/{ticker}.png";
pub const TICKER_SLOT: &str = "{ticker}";

// Network
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_RETRY_COUNT: u32 = 2;
pub const USER_AGENT: &str = "fund-disclosure/0.1";

// Chart
pub const CASH_SLICE_COLOR: &str = "#9ca3af";
pub const FALLBACK_SLICE_COLORS: [&str; 6] = [
    "#2563eb", "#16a34a", "#f59e0b", "#db2777", "#7c3aed", "#0891b2",
];
