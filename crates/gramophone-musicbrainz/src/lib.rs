// SPDX-License-Identifier: GPL-3.0-or-later

//! MusicBrainz web-service client.
//!
//! Looks up recordings, works and artists by MBID, browses recordings by ISRC
//! and works by ISWC, and searches artists by name. Every request carries the
//! User-Agent built from the configured [`ClientIdentity`]; a client without
//! one refuses to touch the network.

pub mod client;
mod de;
pub mod error;
pub mod identifiers;
pub mod models;
pub mod request;
pub mod retry;
pub mod transport;

pub use client::{ClientIdentity, MusicBrainzClient, MusicBrainzClientBuilder};
pub use error::{MusicBrainzError, Result};
pub use identifiers::{is_valid_isrc, is_valid_iswc, Isrc, Iswc};
pub use models::{
    Artist, ArtistCredit, ArtistSearchResult, Attribute, IsrcRecordings, IswcWorks, Recording,
    Work,
};
pub use request::{ArtistQuery, Include, Request, Resource};
pub use retry::{Retry, RetryPolicy};
pub use transport::{HttpTransport, RateLimit, RawResponse, Transport};
