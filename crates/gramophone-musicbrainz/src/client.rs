// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{MusicBrainzError, Result};
use crate::identifiers::{Isrc, Iswc};
use crate::models::{Artist, ArtistSearchResult, IsrcRecordings, IswcWorks, Recording, Work};
use crate::request::{ArtistQuery, Include, Request, Resource};
use crate::retry::{Retry, RetryPolicy};
use crate::transport::{
    HttpTransport, RawResponse, Transport, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const MUSICBRAINZ_API_BASE: &str = "https://musicbrainz.org/ws/2/";

/// How the application identifies itself to MusicBrainz.
///
/// The service rejects anonymous traffic, so every request carries
/// `User-Agent: {app_name}/{app_version} ({contact})`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub app_name: String,
    pub app_version: String,
    /// Contact URL or email address.
    pub contact: String,
}

impl ClientIdentity {
    pub fn new(
        app_name: impl Into<String>,
        app_version: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            app_version: app_version.into(),
            contact: contact.into(),
        }
    }

    /// `None` when any of the three parts is blank.
    pub fn user_agent(&self) -> Option<String> {
        let name = self.app_name.trim();
        let version = self.app_version.trim();
        let contact = self.contact.trim();

        if name.is_empty() || version.is_empty() || contact.is_empty() {
            return None;
        }

        Some(format!("{}/{} ({})", name, version, contact))
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// MusicBrainz web-service client.
///
/// Cheap to clone; clones share the underlying transport. Every lookup
/// performs one GET (more only if a retry policy was configured).
#[derive(Debug, Clone)]
pub struct MusicBrainzClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    user_agent: Option<String>,
}

impl MusicBrainzClient {
    /// Client with default settings and no identity. Every call fails with
    /// [`MusicBrainzError::NotConfigured`] until one is provided through the builder.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> MusicBrainzClientBuilder {
        MusicBrainzClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The User-Agent sent with every request, if an identity was configured.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Look up a recording with its ISRCs and artist credits.
    ///
    /// # Example
    /// ```no_run
    /// # use gramophone_musicbrainz::{ClientIdentity, MusicBrainzClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::builder()
    ///     .identity(ClientIdentity::new("my-app", "1.0", "me@example.com"))
    ///     .build()?;
    /// let recording = client
    ///     .get_recording("2cfad207-3f55-4aec-8120-86cf66e34d59")
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_recording(&self, mbid: &str) -> Result<Recording> {
        let user_agent = self.require_identity()?;
        let mbid = require_mbid(mbid)?;

        let request = Request::lookup(Resource::Recording, mbid)
            .include(Include::Isrcs)
            .include(Include::ArtistCredits);
        self.fetch(&request, user_agent).await
    }

    /// Look up a musical work with its aliases.
    pub async fn get_work(&self, mbid: &str) -> Result<Work> {
        let user_agent = self.require_identity()?;
        let mbid = require_mbid(mbid)?;

        let request = Request::lookup(Resource::Work, mbid).include(Include::Aliases);
        self.fetch(&request, user_agent).await
    }

    /// All recordings sharing an ISRC. The code is normalized before sending
    /// (`US-AT2-99-00609` becomes `USAT29900609`).
    pub async fn get_recordings_by_isrc(&self, isrc: &str) -> Result<IsrcRecordings> {
        let user_agent = self.require_identity()?;
        let isrc: Isrc = isrc.parse()?;

        let request = Request::browse(Resource::Isrc, isrc.as_str())
            .include(Include::Isrcs)
            .include(Include::ArtistCredits);
        let mut result: IsrcRecordings = self.fetch(&request, user_agent).await?;

        if result.isrc.is_empty() {
            result.isrc = isrc.into();
        }
        Ok(result)
    }

    /// All works sharing an ISWC, limited to the first page.
    /// [`IswcWorks::work_count`] holds the server-side total.
    pub async fn get_works_by_iswc(&self, iswc: &str) -> Result<IswcWorks> {
        let user_agent = self.require_identity()?;
        let iswc: Iswc = iswc.parse()?;

        let request = Request::browse(Resource::Iswc, iswc.as_str()).include(Include::Aliases);
        self.fetch(&request, user_agent).await
    }

    /// Look up an artist with its aliases.
    ///
    /// # Example
    /// ```no_run
    /// # use gramophone_musicbrainz::{ClientIdentity, MusicBrainzClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::builder()
    ///     .identity(ClientIdentity::new("my-app", "1.0", "https://example.com"))
    ///     .build()?;
    /// let artist = client.get_artist("a74b1b7f-71a5-4011-9441-d0b5e4122711").await?; // Radiohead
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_artist(&self, mbid: &str) -> Result<Artist> {
        let user_agent = self.require_identity()?;
        let mbid = require_mbid(mbid)?;

        let request = Request::lookup(Resource::Artist, mbid).include(Include::Aliases);
        self.fetch(&request, user_agent).await
    }

    /// Search artists by name, optionally restricted to an ISO 3166-1 country code.
    ///
    /// # Example
    /// ```no_run
    /// # use gramophone_musicbrainz::{ClientIdentity, MusicBrainzClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::builder()
    ///     .identity(ClientIdentity::new("my-app", "1.0", "me@example.com"))
    ///     .build()?;
    /// let artists = client.search_artist("Nirvana", Some("US")).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_artist(&self, name: &str, country: Option<&str>) -> Result<Vec<Artist>> {
        let user_agent = self.require_identity()?;
        let query = ArtistQuery::new(name)
            .ok_or(MusicBrainzError::EmptyIdentifier("artist name"))?
            .country(country);

        let request = Request::search(Resource::Artist, query.to_lucene());
        let result: ArtistSearchResult = self.fetch(&request, user_agent).await?;
        debug!(
            target: "musicbrainz",
            "artist search matched {} (returned {})",
            result.count,
            result.artists.len()
        );
        Ok(result.artists)
    }

    /// Perform an arbitrary GET and hand back the response untouched, whatever
    /// its status code.
    pub async fn fetch_raw(&self, request: &Request) -> Result<RawResponse> {
        let user_agent = self.require_identity()?;
        let url = request.url(&self.base_url)?;
        self.transport.get(&url, user_agent).await
    }

    fn require_identity(&self) -> Result<&str> {
        self.user_agent
            .as_deref()
            .ok_or(MusicBrainzError::NotConfigured)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: &Request, user_agent: &str) -> Result<T> {
        let url = request.url(&self.base_url)?;
        let response = self.transport.get(&url, user_agent).await?;
        check_status(&response, &url)?;

        serde_json::from_slice(&response.body).map_err(|e| {
            MusicBrainzError::InvalidResponse(format!("Failed to parse response: {}", e))
        })
    }
}

fn require_mbid(mbid: &str) -> Result<&str> {
    let mbid = mbid.trim();
    if mbid.is_empty() {
        return Err(MusicBrainzError::EmptyIdentifier("MBID"));
    }
    Ok(mbid)
}

fn check_status(response: &RawResponse, url: &Url) -> Result<()> {
    let status = response.status;

    if status.is_success() {
        return Ok(());
    }

    if status == StatusCode::NOT_FOUND {
        return Err(MusicBrainzError::NotFound(url.to_string()));
    }

    if status == StatusCode::SERVICE_UNAVAILABLE || status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MusicBrainzError::RateLimitExceeded);
    }

    let message = serde_json::from_slice::<ApiErrorBody>(&response.body)
        .map(|body| body.error)
        .unwrap_or_else(|_| response.text());

    Err(MusicBrainzError::ApiError {
        status: status.as_u16(),
        message,
    })
}

/// Builder for configuring a MusicBrainz client.
#[derive(Debug)]
pub struct MusicBrainzClientBuilder {
    base_url: String,
    identity: Option<ClientIdentity>,
    connect_timeout: Duration,
    timeout: Duration,
    retry: Option<RetryPolicy>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for MusicBrainzClientBuilder {
    fn default() -> Self {
        Self {
            base_url: MUSICBRAINZ_API_BASE.to_string(),
            identity: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: None,
            transport: None,
        }
    }
}

impl MusicBrainzClientBuilder {
    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Application name, version and contact sent in the User-Agent.
    pub fn identity(mut self, identity: ClientIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Set the connection timeout (TCP connect and TLS handshake).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the overall request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry failed requests. Off by default.
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Replace the HTTP transport. Timeouts set on the builder do not apply to it.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the MusicBrainz client.
    pub fn build(self) -> Result<MusicBrainzClient> {
        let base_url = Url::parse(&self.base_url)?;

        let transport: Arc<dyn Transport> = match (self.transport, self.retry) {
            (Some(custom), Some(policy)) => Arc::new(Retry::new(custom, policy)),
            (Some(custom), None) => custom,
            (None, retry) => {
                let http = HttpTransport::new(self.connect_timeout, self.timeout)?;
                match retry {
                    Some(policy) => Arc::new(Retry::new(http, policy)),
                    None => Arc::new(http),
                }
            }
        };

        let user_agent = self.identity.as_ref().and_then(ClientIdentity::user_agent);

        Ok(MusicBrainzClient {
            transport,
            base_url,
            user_agent,
        })
    }
}
