use crate::errors::{Result, PriceError};
use crate::http::base::{HttpResponse, HttpTransport};
use async_trait::async_trait;
use log::debug;
use reqwest::header::HeaderMap;
use reqwest::{Client, Url};
use std::time::Duration;

/// Transport backed by a shared reqwest client
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client; `None` leaves the request timeout unbounded.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(PriceError::RequestError)?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: Url, headers: HeaderMap) -> Result<HttpResponse> {
        debug!("GET {}", url.path());

        let response = self.client
            .get(url)
            .headers(headers)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Received status {} with {} bytes", status, body.len());

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_and_without_timeout() {
        assert!(ReqwestTransport::new(None).is_ok());
        assert!(ReqwestTransport::new(Some(Duration::from_secs(30))).is_ok());
    }
}
