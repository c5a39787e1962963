// SPDX-License-Identifier: GPL-3.0-or-later

//! Request URL construction for the MusicBrainz web service.

use crate::error::Result;
use url::{ParseError, Url};

/// Page size injected into browse and search requests.
pub const DEFAULT_LIMIT: u32 = 10;
/// Page offset injected into browse and search requests.
pub const DEFAULT_OFFSET: u32 = 0;

/// Top-level resources queried by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Recording,
    Work,
    Isrc,
    Iswc,
    Artist,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Recording => "recording",
            Resource::Work => "work",
            Resource::Isrc => "isrc",
            Resource::Iswc => "iswc",
            Resource::Artist => "artist",
        }
    }
}

/// Sub-resources the service can embed in a response (`inc=` values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include {
    Isrcs,
    ArtistCredits,
    Aliases,
}

impl Include {
    pub fn as_str(self) -> &'static str {
        match self {
            Include::Isrcs => "isrcs",
            Include::ArtistCredits => "artist-credits",
            Include::Aliases => "aliases",
        }
    }
}

/// A single GET against the web service, before it is resolved to a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    resource: Resource,
    id: Option<String>,
    includes: Vec<Include>,
    paginated: bool,
    params: Vec<(String, String)>,
}

impl Request {
    /// Look up one entity by its identifier.
    pub fn lookup(resource: Resource, id: impl Into<String>) -> Self {
        Self {
            resource,
            id: Some(id.into()),
            includes: Vec::new(),
            paginated: false,
            params: Vec::new(),
        }
    }

    /// Browse the entities sharing a code (ISRC, ISWC). Paginated with the
    /// fixed limit and offset.
    pub fn browse(resource: Resource, code: impl Into<String>) -> Self {
        Self {
            paginated: true,
            ..Self::lookup(resource, code)
        }
    }

    /// Free-text search on a resource. Paginated with the fixed limit and offset.
    pub fn search(resource: Resource, query: impl Into<String>) -> Self {
        Self {
            resource,
            id: None,
            includes: Vec::new(),
            paginated: true,
            params: vec![("query".to_string(), query.into())],
        }
    }

    pub fn include(mut self, include: Include) -> Self {
        if !self.includes.contains(&include) {
            self.includes.push(include);
        }
        self
    }

    /// Add an arbitrary query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Query parameters in the order they are appended to the URL.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.params.clone();
        pairs.push(("fmt".to_string(), "json".to_string()));

        if !self.includes.is_empty() {
            let inc = self
                .includes
                .iter()
                .map(|i| i.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            pairs.push(("inc".to_string(), inc));
        }

        if self.paginated {
            pairs.push(("limit".to_string(), DEFAULT_LIMIT.to_string()));
            pairs.push(("offset".to_string(), DEFAULT_OFFSET.to_string()));
        }

        pairs
    }

    /// Resolve against the service root, e.g. `https://musicbrainz.org/ws/2/`.
    ///
    /// The identifier becomes a single percent-encoded path segment. Requests
    /// without an identifier end in a slash (`artist/`).
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?;
            segments
                .pop_if_empty()
                .push(self.resource.as_str())
                .push(self.id.as_deref().unwrap_or(""));
        }

        {
            let mut query = url.query_pairs_mut();
            query.clear();
            for (name, value) in self.query_pairs() {
                query.append_pair(&name, &value);
            }
        }

        Ok(url)
    }
}

/// Lucene-style artist query: a name term and an optional country filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistQuery {
    name: String,
    country: Option<String>,
}

impl ArtistQuery {
    /// Returns `None` if the name is blank.
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            country: None,
        })
    }

    /// Blank countries are ignored.
    pub fn country(mut self, country: Option<&str>) -> Self {
        self.country = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase);
        self
    }

    pub fn to_lucene(&self) -> String {
        let mut query = format!("artist:\"{}\"", escape_phrase(&self.name));
        if let Some(country) = &self.country {
            query.push_str(" AND country:");
            query.push_str(country);
        }
        query
    }
}

fn escape_phrase(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://musicbrainz.org/ws/2/").unwrap()
    }

    fn param(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_lookup_url_with_includes() {
        let url = Request::lookup(Resource::Recording, "2cfad207-3f55-4aec-8120-86cf66e34d59")
            .include(Include::Isrcs)
            .include(Include::ArtistCredits)
            .url(&base())
            .unwrap();

        assert_eq!(
            url.path(),
            "/ws/2/recording/2cfad207-3f55-4aec-8120-86cf66e34d59"
        );
        assert_eq!(param(&url, "fmt").as_deref(), Some("json"));
        assert_eq!(param(&url, "inc").as_deref(), Some("isrcs artist-credits"));
        assert_eq!(param(&url, "limit"), None);
        assert_eq!(param(&url, "offset"), None);
    }

    #[test]
    fn test_browse_url_is_paginated() {
        let url = Request::browse(Resource::Iswc, "T0700802863")
            .include(Include::Aliases)
            .url(&base())
            .unwrap();

        assert_eq!(url.path(), "/ws/2/iswc/T0700802863");
        assert_eq!(param(&url, "limit").as_deref(), Some("10"));
        assert_eq!(param(&url, "offset").as_deref(), Some("0"));
        assert_eq!(param(&url, "inc").as_deref(), Some("aliases"));
    }

    #[test]
    fn test_search_url_has_trailing_slash_and_query() {
        let url = Request::search(Resource::Artist, "artist:\"Daft Punk\"")
            .url(&base())
            .unwrap();

        assert_eq!(url.path(), "/ws/2/artist/");
        assert_eq!(param(&url, "query").as_deref(), Some("artist:\"Daft Punk\""));
        assert_eq!(param(&url, "fmt").as_deref(), Some("json"));
        assert_eq!(param(&url, "limit").as_deref(), Some("10"));
        assert_eq!(param(&url, "inc"), None);
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let base = Url::parse("http://127.0.0.1:8080").unwrap();
        let url = Request::lookup(Resource::Work, "abc").url(&base).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/work/abc?fmt=json");
    }

    #[test]
    fn test_identifier_is_percent_encoded() {
        let url = Request::lookup(Resource::Artist, "a/b c?")
            .url(&base())
            .unwrap();
        assert_eq!(url.path(), "/ws/2/artist/a%2Fb%20c%3F");
    }

    #[test]
    fn test_duplicate_includes_are_collapsed() {
        let request = Request::lookup(Resource::Artist, "x")
            .include(Include::Aliases)
            .include(Include::Aliases);
        let pairs = request.query_pairs();
        assert!(pairs.contains(&("inc".to_string(), "aliases".to_string())));
    }

    #[test]
    fn test_extra_params_are_appended() {
        let url = Request::lookup(Resource::Artist, "x")
            .param("lang", "en")
            .url(&base())
            .unwrap();
        assert_eq!(param(&url, "lang").as_deref(), Some("en"));
    }

    #[test]
    fn test_artist_query_name_only() {
        let query = ArtistQuery::new("  Radiohead ").unwrap();
        assert_eq!(query.to_lucene(), "artist:\"Radiohead\"");
    }

    #[test]
    fn test_artist_query_with_country() {
        let query = ArtistQuery::new("Nirvana").unwrap().country(Some(" us "));
        assert_eq!(query.to_lucene(), "artist:\"Nirvana\" AND country:US");
    }

    #[test]
    fn test_artist_query_blank_country_ignored() {
        let query = ArtistQuery::new("Nirvana").unwrap().country(Some("   "));
        assert_eq!(query.to_lucene(), "artist:\"Nirvana\"");
    }

    #[test]
    fn test_artist_query_escapes_quotes() {
        let query = ArtistQuery::new(r#"The "Band" \ Co"#).unwrap();
        assert_eq!(query.to_lucene(), r#"artist:"The \"Band\" \\ Co""#);
    }

    #[test]
    fn test_artist_query_blank_name() {
        assert!(ArtistQuery::new("   ").is_none());
        assert!(ArtistQuery::new("").is_none());
    }
}
