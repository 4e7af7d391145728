// SPDX-License-Identifier: GPL-3.0-or-later

use std::process::ExitStatus;

use reqwest::StatusCode;
use thiserror::Error;
use trackid_http::RequestError;

pub type Result<T> = std::result::Result<T, FingerprintError>;

#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("fpcalc not found ({0}); install Chromaprint to compute fingerprints")]
    ToolMissing(String),

    #[error("failed to run fpcalc: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("fpcalc exited with {status}: {stderr}")]
    ExecutionFailed { status: ExitStatus, stderr: String },

    #[error("could not find duration and fingerprint in fpcalc output: {0}")]
    ParseFailed(String),

    #[error("no fingerprint computed; fingerprint the file before looking it up")]
    NotFingerprinted,

    #[error("Invalid fingerprint: {0}")]
    InvalidFingerprint(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("AcoustID returned {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("AcoustID API error: {0}")]
    AcoustidError(String),

    #[error("Invalid response from AcoustID API: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl From<RequestError> for FingerprintError {
    fn from(error: RequestError) -> Self {
        match error {
            RequestError::Network(e) => Self::RequestFailed(e),
            RequestError::Status { status, body } => Self::HttpStatus { status, body },
            RequestError::Decode(e) => Self::InvalidResponse(e),
        }
    }
}
