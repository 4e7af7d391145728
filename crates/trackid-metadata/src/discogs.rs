// SPDX-License-Identifier: GPL-3.0-or-later

//! Discogs API client implementation

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, trace, warn};
use trackid_http::RequestError;
use url::Url;

use crate::credentials::{self, CredentialError, CREDENTIALS_FILE};
use crate::oauth::{self, Credentials};
use crate::prompt::InteractivePrompt;

pub const DISCOGS_API_BASE: &str = "https://api.discogs.com";
pub const DISCOGS_AUTHORIZE_URL: &str = "https://www.discogs.com/oauth/authorize";

pub type Result<T> = std::result::Result<T, DiscogsError>;

/// Struct representing the Discogs API client.
///
/// A client starts unauthorized. [`authorize_from_file`](Self::authorize_from_file)
/// or [`authorize`](Self::authorize) attach user credentials, after which
/// [`search`](Self::search) sends signed requests.
pub struct DiscogsClient {
    client: Client,
    /// Base URL stored without a trailing slash.
    base_url: String,
    authorize_url: String,
    consumer: Credentials,
    credentials_path: PathBuf,
    user: Option<Credentials>,
}

impl DiscogsClient {
    /// Creates a client for the given application key and secret with default settings.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Result<Self> {
        Self::builder(consumer_key, consumer_secret).build()
    }

    pub fn builder(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> DiscogsClientBuilder {
        DiscogsClientBuilder::new(consumer_key, consumer_secret)
    }

    pub fn is_authorized(&self) -> bool {
        self.user.is_some()
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Adopts user credentials stored by a previous authorization.
    ///
    /// No request is sent.
    pub fn authorize_from_file(&mut self) -> Result<()> {
        let stored = credentials::load(&self.credentials_path).map_err(DiscogsError::CredentialRead)?;
        self.user = Some(stored);
        info!(target: "discogs", path = %self.credentials_path.display(), "using stored credentials");
        Ok(())
    }

    /// Authorizes access to the user's Discogs account.
    ///
    /// Stored credentials are used when they can be read. Otherwise the
    /// three-legged OAuth flow runs: temporary credentials are requested, the
    /// approval page is opened through `prompt`, the verification code typed
    /// by the user is exchanged for user credentials, and those are written to
    /// the credential file. Nothing is written if any step fails.
    #[instrument(skip(self, prompt))]
    pub async fn authorize(&mut self, prompt: &dyn InteractivePrompt) -> Result<()> {
        match self.authorize_from_file() {
            Ok(()) => return Ok(()),
            Err(DiscogsError::CredentialRead(CredentialError::Read { source, .. }))
                if source.kind() == io::ErrorKind::NotFound =>
            {
                debug!(target: "discogs", "no stored credentials");
            }
            Err(error) => {
                warn!(target: "discogs", %error, "cannot use stored credentials");
            }
        }

        prompt.message("Could not get stored credentials, authorizing with Discogs.");

        let temporary = self.request_temporary_credentials().await?;
        let approval_url = oauth::authorization_url(&self.authorize_url, &temporary)
            .map_err(|e| DiscogsError::InvalidUrl(e.to_string()))?;

        prompt.message(&format!(
            "Approve access in your browser, then enter the code Discogs shows: {}",
            approval_url
        ));
        prompt
            .open_url(approval_url.as_str())
            .map_err(DiscogsError::Browser)?;

        let verifier = prompt
            .read_line("Enter verification code: ")
            .map_err(|e| DiscogsError::UserAbort(e.to_string()))?;
        let verifier = verifier.trim();
        if verifier.is_empty() {
            return Err(DiscogsError::UserAbort(
                "no verification code entered".to_string(),
            ));
        }

        let user = self.request_access_token(&temporary, verifier).await?;
        credentials::save(&self.credentials_path, &user).map_err(DiscogsError::CredentialWrite)?;
        self.user = Some(user);

        info!(target: "discogs", path = %self.credentials_path.display(), "authorization complete");
        Ok(())
    }

    async fn request_temporary_credentials(&self) -> Result<Credentials> {
        let url = format!("{}/oauth/request_token", self.base_url);
        trace!(target: "discogs", "GET {}", url);

        let header = oauth::authorization_header(&self.consumer, None, &[("oauth_callback", "oob")]);
        let request = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, header)
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded");

        let body = trackid_http::fetch_text(request)
            .await
            .map_err(|e| token_request_failed("temporary", e))?;
        oauth::parse_token_response(&body).ok_or_else(|| DiscogsError::TokenRequest {
            stage: "temporary",
            reason: "response carries no token".to_string(),
        })
    }

    async fn request_access_token(
        &self,
        temporary: &Credentials,
        verifier: &str,
    ) -> Result<Credentials> {
        let url = format!("{}/oauth/access_token", self.base_url);
        trace!(target: "discogs", "POST {}", url);

        let header = oauth::authorization_header(
            &self.consumer,
            Some(temporary),
            &[("oauth_verifier", verifier)],
        );
        let request = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, header)
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded");

        let body = trackid_http::fetch_text(request)
            .await
            .map_err(|e| token_request_failed("access", e))?;
        oauth::parse_token_response(&body).ok_or_else(|| DiscogsError::TokenRequest {
            stage: "access",
            reason: "response carries no token".to_string(),
        })
    }

    /// Searches the Discogs database for releases by artist and title.
    ///
    /// Results are search summaries only. The track listing of a chosen
    /// release (`/releases/{id}`) is not fetched by this client.
    #[instrument(skip(self), fields(artist = %query.artist, release_title = %query.release_title))]
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        let user = self.user.as_ref().ok_or(DiscogsError::NotAuthorized)?;

        let search_url = format!("{}/database/search", self.base_url);
        debug!(target: "discogs", url = %search_url, "Searching Discogs releases");

        let request = self
            .client
            .get(&search_url)
            .header(
                reqwest::header::AUTHORIZATION,
                oauth::authorization_header(&self.consumer, Some(user), &[]),
            )
            .query(&[
                ("type", "release"),
                ("artist", query.artist.as_str()),
                ("release_title", query.release_title.as_str()),
            ]);

        let value = trackid_http::fetch_value(request).await?;
        let value = check_api_message(value)?;
        let results: SearchResults = serde_json::from_value(value)?;

        debug!(
            target: "discogs",
            hits = results.results.len(),
            total = results.pagination.items,
            "search decoded"
        );
        Ok(results)
    }
}

/// Builder for configuring a Discogs client.
#[derive(Debug)]
pub struct DiscogsClientBuilder {
    consumer: Credentials,
    base_url: String,
    authorize_url: String,
    credentials_path: PathBuf,
    timeout: Option<Duration>,
}

impl DiscogsClientBuilder {
    fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer: Credentials::new(consumer_key, consumer_secret),
            base_url: DISCOGS_API_BASE.to_string(),
            authorize_url: DISCOGS_AUTHORIZE_URL.to_string(),
            credentials_path: PathBuf::from(CREDENTIALS_FILE),
            timeout: None,
        }
    }

    /// Set a custom API base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the page where users approve access.
    pub fn authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    /// Set where user credentials are stored.
    pub fn credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = path.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<DiscogsClient> {
        Url::parse(&self.base_url).map_err(|e| DiscogsError::InvalidUrl(e.to_string()))?;
        Url::parse(&self.authorize_url).map_err(|e| DiscogsError::InvalidUrl(e.to_string()))?;

        let client = trackid_http::build_client(self.timeout)?;
        debug!(target: "discogs", base_url = %self.base_url, "Initialized Discogs client");

        Ok(DiscogsClient {
            client,
            // Trim trailing slash once at construction so every URL format is clean.
            base_url: self.base_url.trim_end_matches('/').to_string(),
            authorize_url: self.authorize_url,
            consumer: self.consumer,
            credentials_path: self.credentials_path,
            user: None,
        })
    }
}

/// Release search terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub artist: String,
    pub release_title: String,
}

impl SearchQuery {
    pub fn new(artist: impl Into<String>, release_title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            release_title: release_title.into(),
        }
    }
}

/// One page of database search results.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResults {
    #[serde(default)]
    pub pagination: Pagination,
    pub results: Vec<SearchResult>,
}

impl SearchResults {
    /// Finds the release issued by `label` under `catalog_number`.
    ///
    /// Catalog numbers are compared with spaces and hyphens removed, so
    /// `"314 519 810-2"` matches `"314519810-2"`.
    pub fn find_release(&self, label: &str, catalog_number: &str) -> Option<&SearchResult> {
        let wanted = normalize_catalog_number(catalog_number);
        self.results.iter().find(|result| {
            result.label.iter().any(|l| l == label)
                && normalize_catalog_number(&result.catno) == wanted
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Pagination {
    #[serde(default)]
    pub items: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub per_page: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResult {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Discogs sends the year as a string.
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub format: Vec<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub style: Vec<String>,
    #[serde(default)]
    pub label: Vec<String>,
    #[serde(default)]
    pub barcode: Vec<String>,
    #[serde(default)]
    pub catno: String,
    #[serde(default)]
    pub community: Community,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub resource_url: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Community {
    #[serde(default)]
    pub have: u32,
    #[serde(default)]
    pub want: u32,
}

/// Error type returned by the Discogs API client.
#[derive(Debug, Error)]
pub enum DiscogsError {
    /// An error occurred while performing the HTTP request (network or protocol failure).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Discogs responded with a non-200 HTTP status code.
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
    /// Discogs returned a JSON payload with a `message` field indicating an API-level error.
    #[error("Discogs API error: {message}")]
    Api { message: String },
    /// Failed to deserialize the Discogs JSON response into the expected types.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("stored credentials unavailable: {0}")]
    CredentialRead(#[source] CredentialError),
    #[error("could not store credentials: {0}; run the authorization again")]
    CredentialWrite(#[source] CredentialError),
    /// A step of the token exchange failed.
    #[error("could not obtain {stage} credentials: {reason}; run the authorization again")]
    TokenRequest { stage: &'static str, reason: String },
    #[error("could not open the authorization page: {0}; run the authorization again")]
    Browser(#[source] io::Error),
    #[error("authorization aborted: {0}; run the authorization again")]
    UserAbort(String),
    #[error("not authorized with Discogs; authorize before searching")]
    NotAuthorized,
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<RequestError> for DiscogsError {
    fn from(error: RequestError) -> Self {
        match error {
            RequestError::Network(e) => Self::Http(e),
            RequestError::Status { status, body } => Self::HttpStatus { status, body },
            RequestError::Decode(e) => Self::Deserialization(e),
        }
    }
}

fn token_request_failed(stage: &'static str, error: RequestError) -> DiscogsError {
    DiscogsError::TokenRequest {
        stage,
        reason: error.to_string(),
    }
}

fn check_api_message(value: Value) -> Result<Value> {
    if let Some(message) = value.get("message").and_then(|message| message.as_str()) {
        return Err(DiscogsError::Api {
            message: message.to_string(),
        });
    }
    Ok(value)
}

fn normalize_catalog_number(catalog_number: &str) -> String {
    catalog_number
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect()
}
