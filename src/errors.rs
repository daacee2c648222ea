use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FundError>;

/// Errors that abort a page build
#[derive(Error, Debug)]
pub enum FundError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Operation '{operation}' timed out after {seconds} seconds")]
    Timeout { operation: String, seconds: u64 },

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Placeholder problems detected before any substitution happens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("placeholder {0} not found in template")]
    Missing(String),

    #[error("placeholder {token} appears {count} times, expected exactly once")]
    Duplicated { token: String, count: usize },
}

impl FundError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether retrying the same request could succeed.
    ///
    /// Network failures, timeouts and non-2xx responses are transient. A page
    /// that loaded but did not contain the expected field is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::Status { .. } | Self::Timeout { .. } => true,
            _ => false,
        }
    }
}
