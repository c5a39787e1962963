// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{MusicBrainzError, Result};
use crate::transport::{RawResponse, Transport};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;
use url::Url;

/// Fixed number of attempts with a constant pause between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// `attempts` counts the first try; values below 1 are treated as 1.
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Transport decorator that retries failed GETs according to a [`RetryPolicy`].
///
/// Only transport failures are retried. A response with an error status is
/// still a response and is returned as-is.
#[derive(Debug)]
pub struct Retry<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T: Transport> Retry<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }
}

#[async_trait]
impl<T: Transport> Transport for Retry<T> {
    async fn get(&self, url: &Url, user_agent: &str) -> Result<RawResponse> {
        let attempts = self.policy.attempts;
        let mut attempt = 1;

        loop {
            match self.inner.get(url, user_agent).await {
                Ok(response) => return Ok(response),
                Err(err) if attempt >= attempts => {
                    if attempts == 1 {
                        return Err(err);
                    }
                    return Err(MusicBrainzError::RetriesExhausted {
                        attempts,
                        source: Box::new(err),
                    });
                }
                Err(err) => {
                    warn!(
                        target: "musicbrainz",
                        attempt,
                        attempts,
                        error = %err,
                        "request failed, retrying in {:?}",
                        self.policy.delay
                    );
                    sleep(self.policy.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
