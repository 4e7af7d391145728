// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, trace};
use url::Url;

use crate::error::{FingerprintError, Result};
use crate::fingerprint::Fingerprint;
use crate::models::{ApiError, LookupResponse};

const ACOUSTID_API_BASE: &str = "https://api.acoustid.org/v2";
const LOOKUP_META: &str = "recordings releases tracks";

/// AcoustID API client for fingerprint lookup.
#[derive(Debug, Clone)]
pub struct AcoustidClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AcoustidClient {
    /// Create a new AcoustID client.
    ///
    /// # Arguments
    /// * `api_key` - AcoustID application API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder(api_key: impl Into<String>) -> AcoustidClientBuilder {
        AcoustidClientBuilder::new(api_key)
    }

    /// Look up a fingerprint and return every candidate the service ranked.
    ///
    /// Sends a single multipart `POST /lookup`. AcoustID reports failures such
    /// as an invalid API key inside a `200 OK` body, so the top-level `status`
    /// is checked before the results are decoded.
    ///
    /// # Errors
    /// - `NotFingerprinted` if the fingerprint is empty
    /// - `RequestFailed` on transport failure
    /// - `HttpStatus` for any status other than `200 OK`
    /// - `AcoustidError` when `status` is not `"ok"`
    /// - `InvalidResponse` when the body is not the expected JSON
    ///
    /// # Example
    /// ```no_run
    /// # use trackid_fingerprint::{AcoustidClient, Fingerprint};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AcoustidClient::new("your-api-key")?;
    /// let fp = Fingerprint::new("AQADtNIyRUkkZUqS", 207);
    /// let response = client.lookup(&fp).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip_all, fields(duration = fingerprint.duration))]
    pub async fn lookup(&self, fingerprint: &Fingerprint) -> Result<LookupResponse> {
        fingerprint.validate()?;

        let url = format!("{}/lookup", self.base_url);
        trace!(target: "fingerprint", "AcoustID lookup: POST {}", url);

        let form = Form::new()
            .text("format", "json")
            .text("client", self.api_key.clone())
            .text("duration", fingerprint.duration.to_string())
            .text("fingerprint", fingerprint.hash.clone())
            .text("meta", LOOKUP_META);

        let body = trackid_http::fetch_value(self.client.post(&url).multipart(form)).await?;
        let response = decode_lookup(body)?;

        debug!(
            target: "fingerprint",
            results = response.results.len(),
            "AcoustID lookup complete"
        );
        Ok(response)
    }
}

/// Reject service-level failures, then decode the typed response.
fn decode_lookup(body: Value) -> Result<LookupResponse> {
    let status = body.get("status").and_then(Value::as_str);
    if status != Some("ok") {
        let message = body
            .get("error")
            .cloned()
            .and_then(|error| serde_json::from_value::<ApiError>(error).ok())
            .map(|error| match error.code {
                Some(code) => format!("{} (code {})", error.message, code),
                None => error.message,
            })
            .unwrap_or_else(|| format!("unexpected status {:?}", status.unwrap_or("<missing>")));
        return Err(FingerprintError::AcoustidError(message));
    }

    Ok(serde_json::from_value(body)?)
}

/// Builder for AcoustID client.
#[derive(Debug)]
pub struct AcoustidClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl AcoustidClientBuilder {
    /// Create a new builder.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: ACOUSTID_API_BASE.to_string(),
            timeout: None,
        }
    }

    /// Set a custom base URL (useful for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout. Without one the transport default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the AcoustID client.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The base URL is not a valid URL format
    /// - The HTTP client cannot be created
    pub fn build(self) -> Result<AcoustidClient> {
        Url::parse(&self.base_url).map_err(|e| {
            FingerprintError::AcoustidError(format!("Invalid base URL: {}", e))
        })?;

        let client = trackid_http::build_client(self.timeout)?;

        Ok(AcoustidClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_key: self.api_key,
        })
    }
}
