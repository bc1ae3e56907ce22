use crate::config::Config;
use crate::errors::{Result, PriceError, UpstreamError};
use crate::http::base::HttpTransport;
use crate::logging::{self, SharedLogger};
use crate::models::price::{CompanyPrices, DateRange, PriceQuoteResult};
use crate::util;
use chrono::NaiveDate;
use log::{Level, Record};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use std::fmt;
use std::sync::Arc;

pub const PRICES_PATH: &str = "/api/v3/companies/prices/verbose";

/// Number of closing prices kept from the end of the series
pub const CLOSES_RETURNED: usize = 3;

const LOG_TARGET: &str = "simfin_prices::price_fetcher";

/// Closing-price lookups against the SimFin verbose prices endpoint
pub struct PriceFetcher {
    config: Config,
    transport: Arc<dyn HttpTransport + Send + Sync>,
    logger: SharedLogger,
    endpoint: Url,
    headers: HeaderMap,
}

impl PriceFetcher {
    /// Create a fetcher that logs through the global logger.
    pub fn new(config: Config, transport: Arc<dyn HttpTransport + Send + Sync>) -> Result<Self> {
        let endpoint = Url::parse(&format!("{}{}", config.base_url, PRICES_PATH))
            .map_err(|e| PriceError::ConfigError(format!("Invalid base url {}: {}", config.base_url, e)))?;

        let mut auth = HeaderValue::from_str(&config.api_key)
            .map_err(|_| PriceError::ConfigError("API key is not a valid header value".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        let fetcher = Self {
            config,
            transport,
            logger: logging::global(),
            endpoint,
            headers,
        };
        fetcher.log(Level::Info, format_args!("API key and authorization headers set up"));
        Ok(fetcher)
    }

    /// Replace the logger this fetcher writes its diagnostics to.
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Summary line for the last closing prices of `ticker` between `start` and `end`.
    pub async fn get_closing_prices(&self, ticker: &str, start: &str, end: &str) -> Result<String> {
        let result = self.fetch_closing_prices(ticker, start, end).await?;
        Ok(result.to_string())
    }

    /// Validate the range, query the endpoint once and keep the last closes.
    ///
    /// Bad dates or a blank ticker fail before anything is sent. A non-200 answer
    /// becomes [`PriceError::Upstream`].
    pub async fn fetch_closing_prices(
        &self,
        ticker: &str,
        start: &str,
        end: &str,
    ) -> Result<PriceQuoteResult> {
        self.log(
            Level::Info,
            format_args!("Checking the initial and final dates to prevent errors in the web"),
        );
        let range = DateRange::parse(start, end)?;

        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(PriceError::InvalidTicker("ticker must not be empty".to_string()));
        }

        let query_start = range.query_start(self.config.lookback_days);
        self.log(
            Level::Info,
            format_args!(
                "Correct input dates, requesting {} from {} to {}",
                ticker,
                query_start,
                range.end()
            ),
        );

        let url = self.prices_url(ticker, query_start, range.end());
        let response = self.transport.get(url, self.headers.clone()).await?;

        if response.status != StatusCode::OK {
            let err = UpstreamError::from_status(response.status.as_u16());
            self.log(
                Level::Error,
                format_args!(
                    "Unable to retrieve data, error: {}. Please check the definition of these mistakes to correct your input data: 400 - Bad request, 404 - API not found, 429 - Rate limits exceeded ({})",
                    err.status,
                    err.hint
                ),
            );
            return Err(PriceError::Upstream(err));
        }

        let companies: Vec<CompanyPrices> = serde_json::from_str(&response.body)?;
        let closes: Vec<f64> = companies
            .first()
            .map(|c| c.data.iter().map(|r| r.last_closing_price).collect())
            .unwrap_or_default();

        if closes.is_empty() {
            self.log(
                Level::Info,
                format_args!("No prices for {} between {} and {}", ticker, range.start(), range.end()),
            );
            return Ok(PriceQuoteResult::Empty {
                start: range.start(),
                end: range.end(),
            });
        }

        self.log(
            Level::Debug,
            format_args!("Received {} closing prices for {}", closes.len(), ticker),
        );
        Ok(PriceQuoteResult::Prices(util::last_n(&closes, CLOSES_RETURNED)))
    }

    fn prices_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("ticker", ticker)
            .append_pair("start", &start.format(util::ISO_DATE_FORMAT).to_string())
            .append_pair("end", &end.format(util::ISO_DATE_FORMAT).to_string());
        url
    }

    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        self.logger.log(
            &Record::builder()
                .args(args)
                .level(level)
                .target(LOG_TARGET)
                .module_path_static(Some(module_path!()))
                .file_static(Some(file!()))
                .build(),
        );
    }
}
