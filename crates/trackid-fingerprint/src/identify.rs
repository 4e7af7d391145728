// SPDX-License-Identifier: GPL-3.0-or-later

//! Fingerprint-then-lookup pairing for a single audio file.

use std::path::Path;

use tracing::debug;

use crate::acoustid::AcoustidClient;
use crate::fpcalc::FingerprintCalculator;
use crate::models::LookupResponse;
use crate::{Fingerprint, FingerprintError, Result};

/// Identifies one track: compute its fingerprint, then look it up.
#[derive(Debug, Clone)]
pub struct TrackIdentifier {
    calculator: FingerprintCalculator,
    client: AcoustidClient,
    fingerprint: Option<Fingerprint>,
}

impl TrackIdentifier {
    pub fn new(calculator: FingerprintCalculator, client: AcoustidClient) -> Self {
        Self {
            calculator,
            client,
            fingerprint: None,
        }
    }

    /// Fingerprint computed by the last successful [`compute_fingerprint`](Self::compute_fingerprint).
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    /// Run `fpcalc` on `path` and keep the result for [`lookup`](Self::lookup).
    ///
    /// A failed computation leaves any previous fingerprint untouched.
    pub async fn compute_fingerprint(&mut self, path: impl AsRef<Path>) -> Result<&Fingerprint> {
        let fingerprint = self.calculator.compute(path).await?;
        Ok(self.fingerprint.insert(fingerprint))
    }

    /// Look up the stored fingerprint on AcoustID.
    ///
    /// Fails with `NotFingerprinted` until a fingerprint has been computed.
    pub async fn lookup(&self) -> Result<LookupResponse> {
        let fingerprint = self
            .fingerprint
            .as_ref()
            .ok_or(FingerprintError::NotFingerprinted)?;
        debug!(target: "fingerprint", duration = fingerprint.duration, "looking up stored fingerprint");
        self.client.lookup(fingerprint).await
    }
}
