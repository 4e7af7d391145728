// SPDX-License-Identifier: GPL-3.0-or-later

#[cfg(test)]
mod tests {
    use crate::{MusicBrainzClient, MusicBrainzError};
    use reqwest::StatusCode;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    const SOLITUDE_MBID: &str = "9b7a83cd-15c2-4d2f-9eea-da740c033517";
    const KID_A_MBID: &str = "0e8a1994-f0a7-481d-9be2-6c2f80e14de5";
    const CC_RELEASE_MBID: &str = "b3b51ad3-1e2e-4ac3-bd0d-ec4c1f4bb5b6";

    fn solitude_response() -> serde_json::Value {
        serde_json::json!({
            "id": SOLITUDE_MBID,
            "title": "Solitude",
            "status": "Official",
            "status-id": "4e304316-386d-3409-af2e-78857eec5cfe",
            "quality": "normal",
            "packaging": "Jewel Case",
            "packaging-id": "ec27701a-4a22-37f4-bfac-6616e0f9750a",
            "disambiguation": "",
            "date": "1993",
            "country": "US",
            "barcode": "731451981024",
            "asin": null,
            "artist-credit": [{
                "name": "Billie Holiday",
                "joinphrase": "",
                "artist": {
                    "id": "d59c4cda-11d9-48db-8bfe-b557ee602aed",
                    "name": "Billie Holiday",
                    "sort-name": "Holiday, Billie",
                    "disambiguation": ""
                }
            }],
            "label-info": [{
                "catalog-number": "314 519 810-2",
                "label": {
                    "id": "b8bf2e7a-8eae-4ab7-a4e5-2b1e4e1b1f90",
                    "name": "Verve",
                    "sort-name": "Verve",
                    "disambiguation": "",
                    "label-code": 383
                }
            }],
            "release-events": [{
                "date": "1993",
                "area": {
                    "id": "489ce91b-6658-3307-9877-795b68554c98",
                    "name": "United States",
                    "sort-name": "United States",
                    "disambiguation": "",
                    "iso-3166-1-codes": ["US"]
                }
            }],
            "cover-art-archive": {
                "artwork": true,
                "back": false,
                "count": 1,
                "darkened": false,
                "front": true
            },
            "text-representation": {
                "language": "eng",
                "script": "Latn"
            }
        })
    }

    fn client_for(server: &MockServer) -> MusicBrainzClient {
        MusicBrainzClient::builder()
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    fn release_query(request: &Request) -> bool {
        request.url.query() == Some("inc=labels+artist-credits&fmt=json")
    }

    #[tokio::test]
    async fn test_get_release_decodes_hyphenated_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/release/{}", SOLITUDE_MBID)))
            .and(release_query)
            .respond_with(ResponseTemplate::new(200).set_body_json(solitude_response()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let release = client
            .get_release(Uuid::parse_str(SOLITUDE_MBID).unwrap())
            .await
            .unwrap();

        assert_eq!(release.id.to_string(), SOLITUDE_MBID);
        assert_eq!(release.title, "Solitude");
        assert_eq!(release.artist_credit[0].name, "Billie Holiday");
        assert_eq!(release.artist_credit[0].artist.sort_name, "Holiday, Billie");
        assert_eq!(release.artist_display(), "Billie Holiday");

        let label_info = &release.label_info[0];
        assert_eq!(label_info.catalog_number.as_deref(), Some("314 519 810-2"));
        let label = label_info.label.as_ref().unwrap();
        assert_eq!(label.name, "Verve");
        assert_eq!(label.label_code, Some(383));

        let area = release.release_events[0].area.as_ref().unwrap();
        assert_eq!(area.iso_3166_1_codes, vec!["US".to_string()]);
        assert_eq!(release.release_events[0].date.as_deref(), Some("1993"));

        assert!(release.cover_art_archive.front);
        assert!(!release.cover_art_archive.back);
        assert_eq!(release.cover_art_archive.count, 1);
        assert_eq!(release.text_representation.language.as_deref(), Some("eng"));
        assert_eq!(release.text_representation.script.as_deref(), Some("Latn"));
        assert_eq!(release.packaging.as_deref(), Some("Jewel Case"));
        assert_eq!(release.asin, None);
    }

    #[tokio::test]
    async fn test_get_release_without_label_info() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/release/{}", CC_RELEASE_MBID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": CC_RELEASE_MBID,
                "title": "Dog Days",
                "artist-credit": [{
                    "name": "Josh Woodward",
                    "artist": {
                        "id": "22c5c6c0-8e15-4bd1-8a8f-8ea9f1a54db1",
                        "name": "Josh Woodward",
                        "sort-name": "Woodward, Josh"
                    }
                }],
                "release-events": null,
                "cover-art-archive": null
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let release = client
            .get_release(Uuid::parse_str(CC_RELEASE_MBID).unwrap())
            .await
            .unwrap();

        assert!(release.label_info.is_empty());
        assert!(release.release_events.is_empty());
        assert_eq!(release.catalog_numbers().count(), 0);
        assert!(!release.cover_art_archive.artwork);
    }

    #[tokio::test]
    async fn test_get_release_label_info_without_label() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/release/{}", KID_A_MBID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": KID_A_MBID,
                "title": "Kid A",
                "label-info": [
                    {"catalog-number": "XLDA782", "label": null},
                    {"catalog-number": null, "label": {
                        "id": "c0b2500e-0cef-4130-869d-732b23ed9df5",
                        "name": "XL Recordings",
                        "label-code": null
                    }}
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let release = client
            .get_release(Uuid::parse_str(KID_A_MBID).unwrap())
            .await
            .unwrap();

        assert_eq!(release.label_info.len(), 2);
        assert!(release.label_info[0].label.is_none());
        assert_eq!(release.catalog_numbers().collect::<Vec<_>>(), vec!["XLDA782"]);
        assert_eq!(
            release.label_info[1].label.as_ref().unwrap().name,
            "XL Recordings"
        );
    }

    #[tokio::test]
    async fn test_artist_display_uses_join_phrases() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": SOLITUDE_MBID,
                "title": "Ella and Louis",
                "artist-credit": [
                    {
                        "name": "Ella Fitzgerald",
                        "joinphrase": " & ",
                        "artist": {
                            "id": "54799c0e-eb45-4eea-996d-c4d71a63c499",
                            "name": "Ella Fitzgerald",
                            "sort-name": "Fitzgerald, Ella"
                        }
                    },
                    {
                        "name": "Louis Armstrong",
                        "artist": {
                            "id": "eea8a7fe-1ac9-4e8c-8a2e-0b4d5e5b3c9f",
                            "name": "Louis Armstrong",
                            "sort-name": "Armstrong, Louis"
                        }
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let release = client
            .get_release(Uuid::parse_str(SOLITUDE_MBID).unwrap())
            .await
            .unwrap();

        assert_eq!(release.artist_display(), "Ella Fitzgerald & Louis Armstrong");
    }

    #[tokio::test]
    async fn test_get_release_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"error": "Not Found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .get_release(Uuid::parse_str(SOLITUDE_MBID).unwrap())
            .await;

        match result.unwrap_err() {
            MusicBrainzError::HttpStatus { status, body } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(body.contains("Not Found"));
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_release_error_payload_is_not_a_release() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "oops"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .get_release(Uuid::parse_str(SOLITUDE_MBID).unwrap())
            .await;

        assert!(matches!(result, Err(MusicBrainzError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_get_release_malformed_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .get_release(Uuid::parse_str(SOLITUDE_MBID).unwrap())
            .await;

        assert!(matches!(result, Err(MusicBrainzError::InvalidResponse(_))));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = MusicBrainzClient::builder().base_url("no scheme").build();
        assert!(matches!(result, Err(MusicBrainzError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    #[ignore = "queries the live MusicBrainz service"]
    async fn live_get_release_solitude() {
        let client = MusicBrainzClient::new().unwrap();
        let release = client
            .get_release(Uuid::parse_str(SOLITUDE_MBID).unwrap())
            .await
            .unwrap();

        assert_eq!(release.title, "Solitude");
        assert_eq!(release.artist_credit[0].name, "Billie Holiday");
        assert!(!release.label_info.is_empty());
        assert_eq!(
            release.label_info[0].catalog_number.as_deref(),
            Some("314 519 810-2")
        );
        assert_eq!(
            release.label_info[0].label.as_ref().map(|l| l.name.as_str()),
            Some("Verve")
        );
    }
}
