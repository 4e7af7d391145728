// SPDX-License-Identifier: GPL-3.0-or-later

//! Release lookup response (`/release/{id}?inc=labels+artist-credits`).
//!
//! MusicBrainz uses hyphenated keys; every one is mapped explicitly. Keys that
//! are absent or `null` decode to empty collections or `None`, while `id` and
//! `title` are required so an error payload never passes as a release.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Release information from MusicBrainz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Release {
    /// MusicBrainz release ID (MBID).
    pub id: Uuid,
    /// Release title.
    pub title: String,
    /// Artist credit for the release.
    #[serde(rename = "artist-credit", default, deserialize_with = "null_as_default")]
    pub artist_credit: Vec<ArtistCredit>,
    /// Labels and catalog numbers. Empty for self-released material.
    #[serde(rename = "label-info", default, deserialize_with = "null_as_default")]
    pub label_info: Vec<LabelInfo>,
    /// Country and date of each release event.
    #[serde(rename = "release-events", default, deserialize_with = "null_as_default")]
    pub release_events: Vec<ReleaseEvent>,
    /// Cover Art Archive availability flags.
    #[serde(rename = "cover-art-archive", default, deserialize_with = "null_as_default")]
    pub cover_art_archive: CoverArtArchive,
    /// Language and script of the track list.
    #[serde(rename = "text-representation", default, deserialize_with = "null_as_default")]
    pub text_representation: TextRepresentation,
    #[serde(default)]
    pub asin: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    /// Country code (ISO 3166-1 alpha-2) of the earliest release event.
    #[serde(default)]
    pub country: Option<String>,
    /// Release date (YYYY, YYYY-MM, or YYYY-MM-DD).
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub disambiguation: Option<String>,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(rename = "packaging-id", default)]
    pub packaging_id: Option<Uuid>,
    /// Data quality ("normal", "high", "low").
    #[serde(default)]
    pub quality: Option<String>,
    /// Release status (e.g., "Official", "Bootleg").
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "status-id", default)]
    pub status_id: Option<Uuid>,
}

impl Release {
    /// Artist credit as printed on the release, e.g. "Ella Fitzgerald & Louis Armstrong".
    pub fn artist_display(&self) -> String {
        self.artist_credit
            .iter()
            .map(|credit| {
                format!(
                    "{}{}",
                    credit.name,
                    credit.joinphrase.as_deref().unwrap_or_default()
                )
            })
            .collect()
    }

    /// Catalog numbers across all labels, skipping unknown ones.
    pub fn catalog_numbers(&self) -> impl Iterator<Item = &str> {
        self.label_info
            .iter()
            .filter_map(|info| info.catalog_number.as_deref())
    }
}

/// Artist credit entry (artist contribution to a release).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistCredit {
    /// Name as credited on the release.
    pub name: String,
    /// Join phrase (e.g., " & ", " feat. ").
    #[serde(default)]
    pub joinphrase: Option<String>,
    /// Artist details.
    pub artist: ArtistRef,
}

/// Reference to an artist (minimal info).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistRef {
    /// MusicBrainz artist ID.
    pub id: Uuid,
    /// Artist name.
    pub name: String,
    /// Artist sort name.
    #[serde(rename = "sort-name")]
    pub sort_name: String,
    /// Disambiguation comment (e.g., "US jazz singer").
    #[serde(default)]
    pub disambiguation: Option<String>,
}

/// Label and catalog number of a release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelInfo {
    #[serde(rename = "catalog-number", default)]
    pub catalog_number: Option<String>,
    /// The label, when known. Some releases list only a catalog number.
    #[serde(default)]
    pub label: Option<LabelRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelRef {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "sort-name", default)]
    pub sort_name: Option<String>,
    #[serde(default)]
    pub disambiguation: Option<String>,
    /// Label code (the number after "LC").
    #[serde(rename = "label-code", default)]
    pub label_code: Option<u32>,
}

/// Release in a specific area on a specific date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReleaseEvent {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub area: Option<Area>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Area {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "sort-name", default)]
    pub sort_name: Option<String>,
    #[serde(default)]
    pub disambiguation: Option<String>,
    #[serde(rename = "iso-3166-1-codes", default, deserialize_with = "null_as_default")]
    pub iso_3166_1_codes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverArtArchive {
    #[serde(default)]
    pub artwork: bool,
    #[serde(default)]
    pub back: bool,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub darkened: bool,
    #[serde(default)]
    pub front: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextRepresentation {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
