mod config;
pub mod formatting;
pub mod timeout;

pub use config::{Config, LogFormat};
pub use formatting::{
    escape_html, format_count, format_fixed, format_grouped, format_korean_date,
    format_percentage, round_display,
};
pub use timeout::{with_timeout, with_timeout_retry, TimeoutConfig};
