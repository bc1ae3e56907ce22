// Public API
pub mod models;
pub mod errors;
pub mod config;
pub mod http;
pub mod logging;
pub mod services;

#[doc(hidden)]
pub mod util;

// Re-exports for the common path
pub use config::Config;
pub use errors::{Result, PriceError, UpstreamError};
pub use http::{HttpResponse, HttpTransport, ReqwestTransport};
pub use models::price::{DateRange, PriceQuoteResult};
pub use services::price_fetcher::PriceFetcher;
