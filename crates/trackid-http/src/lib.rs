// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared request plumbing for the metadata clients.
//!
//! Every client call is a single round trip: send the prepared request,
//! require `200 OK`, then decode the body. Authentication is applied by the
//! caller on the [`RequestBuilder`] before it is handed over here.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!(
    "trackid/",
    env!("CARGO_PKG_VERSION"),
    " ( https://github.com/trackid/trackid )"
);

pub type Result<T> = std::result::Result<T, RequestError>;

/// Failure of a single request/response round trip.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The server answered with anything other than `200 OK`.
    #[error("HTTP status {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The body was not the JSON we expected.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Build an HTTP client with the shared user agent.
///
/// No timeout is applied unless one is given.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Send a request and return the raw body of a `200 OK` response.
pub async fn fetch_text(request: RequestBuilder) -> Result<String> {
    let response = request.send().await?;

    let status = response.status();
    debug!(target: "http", url = %response.url(), %status, "response received");

    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(RequestError::Status { status, body });
    }

    let body = response.text().await?;
    trace!(target: "http", "response body: {}", body);
    Ok(body)
}

/// Send a request and parse the `200 OK` body as untyped JSON.
///
/// Used when a service reports failures inside a successful response and the
/// caller has to inspect the payload before committing to a typed decode.
pub async fn fetch_value(request: RequestBuilder) -> Result<Value> {
    let body = fetch_text(request).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Send a request and decode the `200 OK` body into `T`.
pub async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let body = fetch_text(request).await?;
    Ok(serde_json::from_str(&body)?)
}
