use thiserror::Error;
use std::fmt;

/// Non-200 answer from the price endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamError {
    pub status: u16,
    pub hint: &'static str,
}

impl UpstreamError {
    pub fn from_status(status: u16) -> Self {
        Self {
            status,
            hint: crate::util::status_hint(status),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {} ({})", self.status, self.hint)
    }
}

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("Invalid initial date: {0}")]
    InvalidInitialDate(String),

    #[error("Invalid final date: {0}")]
    InvalidFinalDate(String),

    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    #[error("Unable to retrieve data, {0}")]
    Upstream(UpstreamError),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, PriceError>;

impl From<UpstreamError> for PriceError {
    fn from(e: UpstreamError) -> Self {
        PriceError::Upstream(e)
    }
}
