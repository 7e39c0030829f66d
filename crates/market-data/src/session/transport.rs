//! HTTP transport used by [`CachingSession`](super::CachingSession) on a cache miss.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{HttpMethod, Payload, RequestSpec};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Performs the actual network call for a request.
///
/// Implementations return the raw response body for a success status and
/// `MarketDataError::HttpStatus` otherwise. Interpreting the status (unknown
/// symbol, throttling...) is the provider's job.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &RequestSpec) -> Result<Payload, MarketDataError>;
}

/// `reqwest`-backed transport.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &RequestSpec) -> Result<Payload, MarketDataError> {
        debug!("HTTP {} {} {:?}", request.method, request.url, request.params);

        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url).query(&request.params),
            HttpMethod::Post => self.client.post(&request.url).form(&request.params),
        };

        let response = builder
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::HttpStatus {
                status: status.as_u16(),
                url: request.url.clone(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
