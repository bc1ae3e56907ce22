use std::fmt;
use std::time::Duration;

use crate::errors::{Result, PriceError};

pub const DEFAULT_BASE_URL: &str = "https://backend.simfin.com";
pub const DEFAULT_LOOKBACK_DAYS: u32 = 5;

pub const API_KEY_VAR: &str = "SIMFIN_API_KEY";
pub const BASE_URL_VAR: &str = "SIMFIN_BASE_URL";
pub const TIMEOUT_VAR: &str = "SIMFIN_TIMEOUT_SECS";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub lookback_days: u32,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            request_timeout: None,
        }
    }

    /// Read settings from the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| PriceError::ConfigError(format!("{} is not set", API_KEY_VAR)))?;

        let mut config = Self::new(api_key.trim());

        if let Some(url) = lookup(BASE_URL_VAR).filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(url.trim());
        }

        if let Some(secs) = lookup(TIMEOUT_VAR) {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                PriceError::ConfigError(format!("{} must be a number of seconds: {}", TIMEOUT_VAR, e))
            })?;
            config = config.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// The key stays out of logs and panic messages
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("lookback_days", &self.lookback_days)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
