// SPDX-License-Identifier: GPL-3.0-or-later

//! AcoustID lookup response, as returned with
//! `meta=recordings releases tracks`.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Decoded body of a successful `/v2/lookup` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupResponse {
    /// Service status, `"ok"` for every response handed out by the client.
    pub status: String,
    /// Candidate AcoustID tracks, in the order the service ranked them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<LookupResult>,
}

impl LookupResponse {
    /// Highest-scoring candidate, if any.
    pub fn best_match(&self) -> Option<&LookupResult> {
        self.results
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// One scored AcoustID track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupResult {
    /// AcoustID track ID.
    pub id: Uuid,
    /// Match score (0-1), higher is more confident.
    pub score: f64,
    /// MusicBrainz recordings linked to this AcoustID track.
    #[serde(default, deserialize_with = "null_as_default")]
    pub recordings: Vec<Recording>,
}

/// MusicBrainz recording attached to a lookup result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recording {
    /// MusicBrainz recording ID.
    pub id: Uuid,
    /// Recording title (absent for recordings without metadata).
    #[serde(default)]
    pub title: Option<String>,
    /// Length in seconds.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub releases: Vec<Release>,
}

/// Artist reference (MusicBrainz ID and name).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistRef {
    pub id: Uuid,
    pub name: String,
}

/// Release containing a recording, with its medium and track layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Release {
    /// MusicBrainz release ID.
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub date: Option<PartialDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub medium_count: Option<u32>,
    #[serde(default)]
    pub track_count: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mediums: Vec<Medium>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub releaseevents: Vec<ReleaseEvent>,
}

/// Disc, vinyl side, or other medium of a release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medium {
    #[serde(default)]
    pub format: Option<String>,
    pub position: u32,
    #[serde(default)]
    pub track_count: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracks: Vec<Track>,
}

/// Track on a medium that carries the looked-up recording.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// MusicBrainz track ID.
    pub id: Uuid,
    pub position: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistRef>,
}

/// Country-specific release date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReleaseEvent {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub date: Option<PartialDate>,
}

/// Date where month and day may be unknown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartialDate {
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub month: Option<u8>,
    #[serde(default)]
    pub day: Option<u8>,
}

/// Error object AcoustID puts next to `"status": "error"`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_response() -> serde_json::Value {
        serde_json::json!({
            "status": "ok",
            "results": [{
                "id": "9ff43b6a-4f16-427c-93c2-92307ca505e0",
                "score": 0.97,
                "recordings": [{
                    "id": "cd2e7c47-16f5-46c6-a37c-a1eb7bf599ff",
                    "title": "Solitude",
                    "duration": 192,
                    "artists": [{
                        "id": "d59c4cda-11d9-48db-8bfe-b557ee602aed",
                        "name": "Billie Holiday"
                    }],
                    "releases": [{
                        "id": "9b7a83cd-15c2-4d2f-9eea-da740c033517",
                        "title": "Solitude",
                        "country": "US",
                        "date": {"year": 1993, "month": 8},
                        "medium_count": 1,
                        "track_count": 16,
                        "mediums": [{
                            "format": "CD",
                            "position": 1,
                            "track_count": 16,
                            "tracks": [{
                                "id": "f0e3f0b4-1a5c-4bb5-9b8c-1c6a3fa0f0d1",
                                "position": 2,
                                "title": "Solitude",
                                "artists": [{
                                    "id": "d59c4cda-11d9-48db-8bfe-b557ee602aed",
                                    "name": "Billie Holiday"
                                }]
                            }]
                        }],
                        "releaseevents": [{
                            "country": "US",
                            "date": {"year": 1993, "month": 8}
                        }]
                    }]
                }]
            }]
        })
    }

    #[test]
    fn decodes_nested_release_layout() {
        let response: LookupResponse = serde_json::from_value(full_response()).unwrap();

        let recording = &response.results[0].recordings[0];
        assert_eq!(recording.title.as_deref(), Some("Solitude"));
        assert_eq!(recording.artists[0].name, "Billie Holiday");

        let release = &recording.releases[0];
        assert_eq!(release.medium_count, Some(1));
        assert_eq!(release.mediums[0].format.as_deref(), Some("CD"));
        assert_eq!(release.mediums[0].tracks[0].position, 2);
        assert_eq!(release.releaseevents[0].country.as_deref(), Some("US"));

        let date = release.date.unwrap();
        assert_eq!(date.year, Some(1993));
        assert_eq!(date.month, Some(8));
        assert_eq!(date.day, None);
    }

    #[test]
    fn result_without_recordings_decodes_to_empty_list() {
        let response: LookupResponse = serde_json::from_value(serde_json::json!({
            "status": "ok",
            "results": [{
                "id": "9ff43b6a-4f16-427c-93c2-92307ca505e0",
                "score": 0.51,
                "recordings": null
            }]
        }))
        .unwrap();

        assert!(response.results[0].recordings.is_empty());
    }

    #[test]
    fn best_match_picks_highest_score() {
        let response: LookupResponse = serde_json::from_value(serde_json::json!({
            "status": "ok",
            "results": [
                {"id": "0dd2d1a0-88f2-41a4-b6da-0f3ba8caf50a", "score": 0.7},
                {"id": "1ee3e2b1-99f3-52b5-87db-1f4cb9dcf61b", "score": 0.85},
                {"id": "2ff4f3c2-aaf4-63c6-98ec-2f5dc0edea2c", "score": 0.6}
            ]
        }))
        .unwrap();

        let best = response.best_match().unwrap();
        assert!((best.score - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn best_match_of_empty_results_is_none() {
        let response = LookupResponse {
            status: "ok".to_string(),
            results: Vec::new(),
        };
        assert!(response.best_match().is_none());
    }
}
