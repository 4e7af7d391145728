// SPDX-License-Identifier: GPL-3.0-or-later

//! OAuth 1.0a signing for the Discogs API.
//!
//! Requests carry an `Authorization: OAuth ...` header signed with the
//! `PLAINTEXT` method, which Discogs accepts over HTTPS. The three-legged flow
//! exchanges consumer credentials for temporary credentials, has the user
//! approve them in a browser, then trades them and the verification code for
//! long-lived user credentials.

use std::fmt;

use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Everything except the RFC 3986 unreserved characters is encoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Token and secret pair.
///
/// Used for the application (consumer key/secret), the temporary request
/// token and the user's access token. Serialized as
/// `{"Token": "...", "Secret": "..."}`, the credential file format.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "Token")]
    pub token: String,
    #[serde(rename = "Secret")]
    pub secret: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Build the `Authorization` header value for one request.
///
/// `extra` carries protocol parameters specific to a step of the flow, such as
/// `oauth_callback` or `oauth_verifier`.
pub(crate) fn authorization_header(
    consumer: &Credentials,
    token: Option<&Credentials>,
    extra: &[(&str, &str)],
) -> String {
    let mut params: Vec<(&str, String)> = vec![
        ("oauth_consumer_key", consumer.token.clone()),
        ("oauth_nonce", Uuid::new_v4().simple().to_string()),
        ("oauth_signature", plaintext_signature(consumer, token)),
        ("oauth_signature_method", "PLAINTEXT".to_string()),
        ("oauth_timestamp", Utc::now().timestamp().to_string()),
        ("oauth_version", "1.0".to_string()),
    ];
    if let Some(token) = token {
        params.push(("oauth_token", token.token.clone()));
    }
    params.extend(extra.iter().map(|(key, value)| (*key, value.to_string())));
    params.sort_by(|a, b| a.0.cmp(b.0));

    let fields = params
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", key, encode(value)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {}", fields)
}

/// `PLAINTEXT` signature: encoded consumer secret and token secret joined by `&`.
pub(crate) fn plaintext_signature(consumer: &Credentials, token: Option<&Credentials>) -> String {
    format!(
        "{}&{}",
        encode(&consumer.secret),
        token.map(|t| encode(&t.secret)).unwrap_or_default()
    )
}

pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Parse a form-encoded token response (`oauth_token=...&oauth_token_secret=...`).
pub(crate) fn parse_token_response(body: &str) -> Option<Credentials> {
    let mut token = None;
    let mut secret = None;
    for (key, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
        match key.as_ref() {
            "oauth_token" => token = Some(value.into_owned()),
            "oauth_token_secret" => secret = Some(value.into_owned()),
            _ => {}
        }
    }

    match (token, secret) {
        (Some(token), Some(secret)) if !token.is_empty() => Some(Credentials { token, secret }),
        _ => None,
    }
}

/// Page where the user approves the temporary credentials.
pub(crate) fn authorization_url(
    base: &str,
    temporary: &Credentials,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut()
        .append_pair("oauth_token", &temporary.token);
    Ok(url)
}
