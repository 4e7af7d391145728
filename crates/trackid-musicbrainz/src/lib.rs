// SPDX-License-Identifier: GPL-3.0-or-later

//! MusicBrainz API client for fetching release metadata.
//!
//! Looks up a single release with its labels, catalog numbers, artist
//! credits and release events.

pub mod client;
#[cfg(test)]
mod client_tests;
pub mod error;
pub mod models;

pub use client::{MusicBrainzClient, MusicBrainzClientBuilder};
pub use error::{MusicBrainzError, Result};
pub use models::{ArtistCredit, LabelInfo, Release, ReleaseEvent};
