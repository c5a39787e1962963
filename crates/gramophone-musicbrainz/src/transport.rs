// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP transport: one GET, raw bytes back.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Rate-limit headers reported by the service. Read, never enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    /// Unix timestamp at which the window resets.
    pub reset: Option<u64>,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        fn parse<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
        }

        Self {
            limit: parse(headers, "x-ratelimit-limit"),
            remaining: parse(headers, "x-ratelimit-remaining"),
            reset: parse(headers, "x-ratelimit-reset"),
        }
    }
}

/// Response as received, whatever the status code.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub rate_limit: RateLimit,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Executes a single GET. Implementations must not retry on their own; wrap
/// them in [`crate::retry::Retry`] for that.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn get(&self, url: &Url, user_agent: &str) -> Result<RawResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &Url, user_agent: &str) -> Result<RawResponse> {
        (**self).get(url, user_agent).await
    }
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// `connect_timeout` bounds TCP connect plus TLS handshake; `timeout`
    /// bounds the whole request including reading the body.
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url, user_agent: &str) -> Result<RawResponse> {
        trace!(target: "musicbrainz", "GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        let rate_limit = RateLimit::from_headers(response.headers());
        debug!(
            target: "musicbrainz",
            status = %status,
            rate_limit = ?rate_limit.limit,
            rate_limit_remaining = ?rate_limit.remaining,
            "response received"
        );

        let body = response.bytes().await?.to_vec();
        trace!(target: "musicbrainz", "response body: {} bytes", body.len());

        Ok(RawResponse {
            status,
            rate_limit,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_rate_limit_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RateLimit-Limit", HeaderValue::from_static("1200"));
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static(" 1187 "));
        headers.insert("X-RateLimit-Reset", HeaderValue::from_static("1767225600"));

        let rate_limit = RateLimit::from_headers(&headers);
        assert_eq!(rate_limit.limit, Some(1200));
        assert_eq!(rate_limit.remaining, Some(1187));
        assert_eq!(rate_limit.reset, Some(1_767_225_600));
    }

    #[test]
    fn test_rate_limit_missing_or_garbage_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RateLimit-Limit", HeaderValue::from_static("lots"));

        let rate_limit = RateLimit::from_headers(&headers);
        assert_eq!(rate_limit, RateLimit::default());
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT).is_ok());
    }
}
