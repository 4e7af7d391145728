// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

use crate::{FingerprintError, Result};

/// Audio fingerprint as printed by `fpcalc`.
///
/// The hash is Chromaprint's compressed fingerprint in URL-safe base64, so it
/// only ever contains ASCII letters, digits, `_` and `-`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fingerprint {
    /// Encoded Chromaprint fingerprint.
    pub hash: String,
    /// Duration of the audio file in whole seconds.
    pub duration: u32,
}

impl Fingerprint {
    /// Create a new fingerprint.
    pub fn new(hash: impl Into<String>, duration: u32) -> Self {
        Self {
            hash: hash.into(),
            duration,
        }
    }

    /// Check that the fingerprint can be submitted for lookup.
    ///
    /// An empty hash means nothing was computed yet and yields
    /// [`FingerprintError::NotFingerprinted`]. A zero duration is accepted:
    /// `fpcalc` reports it for clips shorter than a second.
    pub fn validate(&self) -> Result<()> {
        if self.hash.is_empty() {
            return Err(FingerprintError::NotFingerprinted);
        }

        if !self.hash.chars().all(is_token_char) {
            return Err(FingerprintError::InvalidFingerprint(
                "fingerprint contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

pub(crate) fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_creation() {
        let fp = Fingerprint::new("AQADtNIyRUkkZUqS", 120);
        assert_eq!(fp.hash, "AQADtNIyRUkkZUqS");
        assert_eq!(fp.duration, 120);
    }

    #[test]
    fn test_fingerprint_validation_valid() {
        let fp = Fingerprint::new("AQADtE-mSZKS_oqS", 120);
        assert!(fp.validate().is_ok());
    }

    #[test]
    fn test_fingerprint_validation_empty_hash() {
        let fp = Fingerprint::default();
        assert!(matches!(
            fp.validate(),
            Err(FingerprintError::NotFingerprinted)
        ));
    }

    #[test]
    fn test_fingerprint_validation_accepts_sub_second_clip() {
        let fp = Fingerprint::new("AQADtNIyRUkkZUqS", 0);
        assert!(fp.validate().is_ok());
    }

    #[test]
    fn test_fingerprint_validation_invalid_chars() {
        // standard base64 characters are not part of the URL-safe alphabet
        for hash in ["AQADv+WZ", "AQADv/WZ", "AQADvEWZ==", "AQAD vEWZ"] {
            let fp = Fingerprint::new(hash, 120);
            assert!(fp.validate().is_err(), "{hash} should be rejected");
        }
    }
}
