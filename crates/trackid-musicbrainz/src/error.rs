// SPDX-License-Identifier: GPL-3.0-or-later

use reqwest::StatusCode;
use thiserror::Error;
use trackid_http::RequestError;

pub type Result<T> = std::result::Result<T, MusicBrainzError>;

#[derive(Debug, Error)]
pub enum MusicBrainzError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("MusicBrainz returned {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("Invalid response from MusicBrainz API: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<RequestError> for MusicBrainzError {
    fn from(error: RequestError) -> Self {
        match error {
            RequestError::Network(e) => Self::RequestFailed(e),
            RequestError::Status { status, body } => Self::HttpStatus { status, body },
            RequestError::Decode(e) => Self::InvalidResponse(e),
        }
    }
}
