// SPDX-License-Identifier: GPL-3.0-or-later

//! Audio fingerprinting and AcoustID lookup.
//!
//! This crate provides functionality for:
//! - Computing Chromaprint fingerprints with the `fpcalc` tool
//! - Submitting fingerprints to AcoustID for identification
//! - Decoding candidate recordings with their releases and track layout

pub mod acoustid;
pub mod error;
pub mod fingerprint;
pub mod fpcalc;
pub mod identify;
pub mod models;

pub use acoustid::{AcoustidClient, AcoustidClientBuilder};
pub use error::{FingerprintError, Result};
pub use fingerprint::Fingerprint;
pub use fpcalc::FingerprintCalculator;
pub use identify::TrackIdentifier;
pub use models::{LookupResponse, LookupResult, Recording};
