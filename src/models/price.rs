use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

use crate::errors::{Result, PriceError};
use crate::util;

/// Validated query window. Holding one means `min <= start <= end <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Check the two dates against each other and against the supported window.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let min = util::min_supported_date();
        let max = util::max_supported_date();

        if start > end || start < min {
            return Err(PriceError::InvalidInitialDate(format!(
                "Cannot input initial date greater than final date nor before {}",
                min
            )));
        }
        if end < start || end > max {
            return Err(PriceError::InvalidFinalDate(format!(
                "Cannot input final date lower than initial date nor after {}",
                max
            )));
        }

        Ok(Self { start, end })
    }

    /// Parse both ISO strings, then validate.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start_date = util::parse_iso_date(start).map_err(|_| {
            PriceError::InvalidInitialDate(format!("{} is not a YYYY-MM-DD date", start))
        })?;
        let end_date = util::parse_iso_date(end).map_err(|_| {
            PriceError::InvalidFinalDate(format!("{} is not a YYYY-MM-DD date", end))
        })?;
        Self::new(start_date, end_date)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Start date actually sent upstream.
    pub fn query_start(&self, lookback_days: u32) -> NaiveDate {
        util::lookback_start(self.start, lookback_days)
    }
}

/// One company block of the verbose prices response.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyPrices {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub data: Vec<PriceRecord>,
}

/// Daily row; only the fields this crate reads are declared.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Last Closing Price")]
    pub last_closing_price: f64,
}

/// Outcome of a successful request.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceQuoteResult {
    /// Up to three closes, most recent last.
    Prices(Vec<f64>),
    /// Nothing in range; dates are the caller's, not the padded ones.
    Empty { start: NaiveDate, end: NaiveDate },
}

impl PriceQuoteResult {
    pub fn prices(&self) -> &[f64] {
        match self {
            PriceQuoteResult::Prices(p) => p,
            PriceQuoteResult::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PriceQuoteResult::Empty { .. })
    }
}

impl fmt::Display for PriceQuoteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceQuoteResult::Prices(prices) => {
                write!(f, "The closing prices for the given dates are: {:?}", prices)
            }
            PriceQuoteResult::Empty { start, end } => {
                write!(f, "No data available between {} and {}.", start, end)
            }
        }
    }
}
