// SPDX-License-Identifier: GPL-3.0-or-later

//! Discogs catalog search with OAuth 1.0a user authorization.

pub mod credentials;
pub mod discogs;
pub mod oauth;
pub mod prompt;

pub use credentials::{CredentialError, CREDENTIALS_FILE};
pub use discogs::{
    Community, DiscogsClient, DiscogsClientBuilder, DiscogsError, Pagination, SearchQuery,
    SearchResult, SearchResults,
};
pub use oauth::Credentials;
pub use prompt::InteractivePrompt;
