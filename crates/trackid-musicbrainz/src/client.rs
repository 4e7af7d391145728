// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument, trace};
use url::Url;
use uuid::Uuid;

use crate::error::{MusicBrainzError, Result};
use crate::models::Release;

const MUSICBRAINZ_API_BASE: &str = "https://musicbrainz.org/ws/2";
const RELEASE_INCLUDES: &str = "labels+artist-credits";

/// MusicBrainz API client.
#[derive(Debug, Clone)]
pub struct MusicBrainzClient {
    client: Client,
    base_url: String,
}

impl MusicBrainzClient {
    /// Create a new MusicBrainz client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> MusicBrainzClientBuilder {
        MusicBrainzClientBuilder::default()
    }

    /// Look up a release by MusicBrainz ID, including labels and artist credits.
    ///
    /// # Arguments
    /// * `mbid` - MusicBrainz release ID.
    ///
    /// # Example
    /// ```no_run
    /// # use trackid_musicbrainz::MusicBrainzClient;
    /// # use uuid::Uuid;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::new()?;
    /// let mbid = Uuid::parse_str("9b7a83cd-15c2-4d2f-9eea-da740c033517")?; // Solitude
    /// let release = client.get_release(mbid).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub async fn get_release(&self, mbid: Uuid) -> Result<Release> {
        // `+` separates includes and must stay literal
        let url = format!(
            "{}/release/{}?inc={}&fmt=json",
            self.base_url, mbid, RELEASE_INCLUDES
        );
        trace!(target: "musicbrainz", "GET {}", url);

        let release: Release = trackid_http::fetch_json(self.client.get(&url)).await?;
        debug!(
            target: "musicbrainz",
            title = %release.title,
            labels = release.label_info.len(),
            "release decoded"
        );
        Ok(release)
    }
}

/// Builder for configuring a MusicBrainz client.
#[derive(Debug)]
pub struct MusicBrainzClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for MusicBrainzClientBuilder {
    fn default() -> Self {
        Self {
            base_url: MUSICBRAINZ_API_BASE.to_string(),
            timeout: None,
        }
    }
}

impl MusicBrainzClientBuilder {
    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout duration. Without one the transport default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the MusicBrainz client.
    pub fn build(self) -> Result<MusicBrainzClient> {
        Url::parse(&self.base_url).map_err(|e| MusicBrainzError::InvalidBaseUrl(e.to_string()))?;

        let client = trackid_http::build_client(self.timeout)?;

        Ok(MusicBrainzClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}
