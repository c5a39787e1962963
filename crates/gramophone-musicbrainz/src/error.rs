// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MusicBrainzError>;

#[derive(Debug, Error)]
pub enum MusicBrainzError {
    #[error(
        "client identity not configured: app name, app version and contact are required \
         before making any request"
    )]
    NotConfigured,

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0} is empty")]
    EmptyIdentifier(&'static str),

    #[error("Not a valid {kind}: {value:?}")]
    InvalidFormat { kind: &'static str, value: String },

    #[error("HTTP request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    #[error("After {attempts} attempts, last error: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<MusicBrainzError>,
    },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response from MusicBrainz API: {0}")]
    InvalidResponse(String),
}

impl MusicBrainzError {
    /// Whether the error happened on the wire, as opposed to configuration,
    /// input validation or an HTTP status returned by the service.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::RequestFailed(_) | Self::RetriesExhausted { .. }
        )
    }
}

impl From<reqwest::Error> for MusicBrainzError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::RequestFailed(err)
        }
    }
}
