//! The single network seam: a blocking-from-the-caller's-view HTTP GET.

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::{fmt::Debug, time::Duration};

use crate::WeatherError;

/// Status and body of a completed request, before any provider looks at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    /// Issue one GET. Connection, DNS, timeout and body-read failures are `Transport` errors;
    /// any HTTP status, success or not, is returned as a response.
    async fn get(&self, url: &Url) -> Result<HttpResponse, WeatherError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// Transport whose requests fail with a `Transport` error once `timeout` elapses.
    pub fn with_timeout(timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build().map_err(WeatherError::transport)?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, WeatherError> {
        let res = self.http.get(url.clone()).send().await.map_err(WeatherError::transport)?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(WeatherError::transport)?;

        Ok(HttpResponse { status, body })
    }
}
