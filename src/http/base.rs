use crate::errors::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Url};

/// Status and raw body of a completed request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Something that can perform a single GET request
#[async_trait]
pub trait HttpTransport {
    /// Send a GET to `url` with `headers` and hand back whatever came back.
    /// Non-2xx statuses are not errors at this layer.
    async fn get(&self, url: Url, headers: HeaderMap) -> Result<HttpResponse>;
}
