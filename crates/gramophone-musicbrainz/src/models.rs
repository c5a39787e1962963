// SPDX-License-Identifier: GPL-3.0-or-later

//! Entities returned by the MusicBrainz web service.
//!
//! No field is required. Absent and `null` values fall back to the type's
//! default, so a lookup that matched nothing yields an entity with an empty
//! `id` rather than a parse error.

use crate::de::{alias_names, nullable};
use serde::{Deserialize, Serialize};

/// Artist information from MusicBrainz.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Artist {
    /// MusicBrainz artist ID (MBID).
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    /// Artist name.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Artist sort name (for sorting).
    #[serde(rename = "sort-name", deserialize_with = "nullable")]
    pub sort_name: String,
    /// Disambiguation comment (e.g., "US hip hop artist").
    #[serde(deserialize_with = "nullable")]
    pub disambiguation: String,
    /// Artist type (e.g., "Person", "Group").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub artist_type: Option<String>,
    /// Country code (ISO 3166-1 alpha-2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Search score (only present in search results).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl Artist {
    pub fn is_found(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Artist credit entry (artist contribution to a recording).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtistCredit {
    /// Name as credited.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Join phrase (e.g., " & ", " feat. ").
    #[serde(deserialize_with = "nullable")]
    pub joinphrase: String,
    #[serde(deserialize_with = "nullable")]
    pub artist: Artist,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Recording {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    /// Duration in milliseconds; 0 when unknown.
    #[serde(deserialize_with = "nullable")]
    pub length: u64,
    #[serde(deserialize_with = "nullable")]
    pub disambiguation: String,
    #[serde(deserialize_with = "nullable")]
    pub video: bool,
    #[serde(deserialize_with = "nullable")]
    pub isrcs: Vec<String>,
    #[serde(rename = "artist-credit", deserialize_with = "nullable")]
    pub artist_credit: Vec<ArtistCredit>,
}

impl Recording {
    pub fn is_found(&self) -> bool {
        !self.id.is_empty()
    }

    /// Credited artist names with their join phrases, e.g. "Artist A feat. Artist B".
    pub fn artist_credit_phrase(&self) -> String {
        self.artist_credit
            .iter()
            .map(|credit| {
                let name = if credit.name.is_empty() {
                    credit.artist.name.as_str()
                } else {
                    credit.name.as_str()
                };
                format!("{}{}", name, credit.joinphrase)
            })
            .collect()
    }
}

/// Generic key/value metadata attached to a work (e.g. a key or a catalogue number).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Attribute {
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub attribute_type: String,
    #[serde(rename = "type-id", deserialize_with = "nullable")]
    pub type_id: String,
    #[serde(deserialize_with = "nullable")]
    pub value: String,
}

/// Musical work (composition).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Work {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    /// Work type (e.g. "Song", "Symphony").
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub work_type: String,
    #[serde(rename = "type-id", deserialize_with = "nullable")]
    pub type_id: String,
    /// ISO 639-3 lyrics language.
    #[serde(deserialize_with = "nullable")]
    pub language: String,
    #[serde(deserialize_with = "nullable")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub iswcs: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub disambiguation: String,
    #[serde(deserialize_with = "nullable")]
    pub attributes: Vec<Attribute>,
    #[serde(deserialize_with = "alias_names")]
    pub aliases: Vec<String>,
}

impl Work {
    pub fn is_found(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Recordings sharing an ISRC.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IsrcRecordings {
    /// The queried ISRC, normalized.
    #[serde(deserialize_with = "nullable")]
    pub isrc: String,
    #[serde(deserialize_with = "nullable")]
    pub recordings: Vec<Recording>,
}

/// Works sharing an ISWC.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IswcWorks {
    #[serde(deserialize_with = "nullable")]
    pub works: Vec<Work>,
    #[serde(rename = "work-offset", deserialize_with = "nullable")]
    pub work_offset: u32,
    /// Total matches on the server; may exceed `works.len()`.
    #[serde(rename = "work-count", deserialize_with = "nullable")]
    pub work_count: u32,
}

/// Artist search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtistSearchResult {
    /// Creation timestamp.
    #[serde(deserialize_with = "nullable")]
    pub created: String,
    /// Total number of results.
    #[serde(deserialize_with = "nullable")]
    pub count: u32,
    /// Offset used for this page.
    #[serde(deserialize_with = "nullable")]
    pub offset: u32,
    #[serde(deserialize_with = "nullable")]
    pub artists: Vec<Artist>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_maps_to_defaults() {
        let recording: Recording = serde_json::from_str("{}").unwrap();
        assert_eq!(recording, Recording::default());
        assert!(!recording.is_found());

        let works: IswcWorks = serde_json::from_str("{}").unwrap();
        assert_eq!(works.work_count, 0);
        assert!(works.works.is_empty());
    }

    #[test]
    fn test_nulls_map_to_defaults() {
        let json = serde_json::json!({
            "id": "b38119e8-260f-372c-a1ca-653d02b5577c",
            "title": "Yesterday",
            "type": null,
            "type-id": null,
            "language": null,
            "languages": null,
            "iswcs": ["T-010.140.236-1"],
            "disambiguation": "",
            "attributes": null,
            "aliases": null
        });

        let work: Work = serde_json::from_value(json).unwrap();
        assert!(work.is_found());
        assert_eq!(work.work_type, "");
        assert_eq!(work.language, "");
        assert!(work.languages.is_empty());
        assert!(work.attributes.is_empty());
        assert!(work.aliases.is_empty());
        assert_eq!(work.iswcs, vec!["T-010.140.236-1".to_string()]);
    }

    #[test]
    fn test_recording_with_null_length() {
        let json = serde_json::json!({
            "id": "2cfad207-3f55-4aec-8120-86cf66e34d59",
            "title": "Some Track",
            "length": null,
            "video": null
        });
        let recording: Recording = serde_json::from_value(json).unwrap();
        assert_eq!(recording.length, 0);
        assert!(!recording.video);
    }

    #[test]
    fn test_work_aliases_accept_objects_and_strings() {
        let json = serde_json::json!({
            "id": "w",
            "aliases": [
                {"name": "Scrambled Eggs", "sort-name": "Scrambled Eggs", "locale": null},
                "Yesterday (Remastered)",
                {"sort-name": "no name"}
            ]
        });
        let work: Work = serde_json::from_value(json).unwrap();
        assert_eq!(
            work.aliases,
            vec![
                "Scrambled Eggs".to_string(),
                "Yesterday (Remastered)".to_string()
            ]
        );
    }

    #[test]
    fn test_work_attributes() {
        let json = serde_json::json!({
            "id": "w",
            "attributes": [{
                "type": "Key",
                "type-id": "7526c19d-3be4-3420-b6cc-9fb6e49fa1a9",
                "value": "F major"
            }]
        });
        let work: Work = serde_json::from_value(json).unwrap();
        assert_eq!(work.attributes.len(), 1);
        assert_eq!(work.attributes[0].attribute_type, "Key");
        assert_eq!(work.attributes[0].value, "F major");
    }

    #[test]
    fn test_artist_credit_phrase() {
        let json = serde_json::json!({
            "id": "r",
            "artist-credit": [
                {"name": "Artist A", "joinphrase": " feat. ", "artist": {"id": "a", "name": "Artist A"}},
                {"name": "", "artist": {"id": "b", "name": "Artist B", "sort-name": "B, Artist"}}
            ]
        });
        let recording: Recording = serde_json::from_value(json).unwrap();
        assert_eq!(recording.artist_credit_phrase(), "Artist A feat. Artist B");
        assert_eq!(recording.artist_credit[1].artist.sort_name, "B, Artist");
    }

    #[test]
    fn test_serialized_entity_reads_back() {
        let work = Work {
            id: "w".into(),
            title: "Yesterday".into(),
            aliases: vec!["Scrambled Eggs".into()],
            ..Work::default()
        };
        let json = serde_json::to_string(&work).unwrap();
        let back: Work = serde_json::from_str(&json).unwrap();
        assert_eq!(back, work);
    }
}
