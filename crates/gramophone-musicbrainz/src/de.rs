// SPDX-License-Identifier: GPL-3.0-or-later

//! Field deserializers for the loosely-typed parts of MusicBrainz JSON.

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AliasRepr {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
}

/// Aliases arrive as objects (`{"name": ..., "sort-name": ...}`); older
/// payloads and hand-written fixtures use plain strings. Keep the names.
pub(crate) fn alias_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<AliasRepr>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|alias| match alias {
            AliasRepr::Name(name) => Some(name),
            AliasRepr::Object { name } => name,
        })
        .collect())
}
