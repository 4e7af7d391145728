// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configuration file read from the working directory when no path is given.
pub const CONFIG_FILE: &str = "trackid.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AcoustidConfig {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscogsConfig {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub credentials_file: PathBuf,
}

impl Default for DiscogsConfig {
    fn default() -> Self {
        Self {
            consumer_key: None,
            consumer_secret: None,
            credentials_file: PathBuf::from("discogs_credentials.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds. Unset means no client-side timeout.
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub acoustid: AcoustidConfig,
    pub discogs: DiscogsConfig,
    pub http: HttpConfig,
    pub telemetry: TelemetryConfig,
}

/// Load configuration from defaults, a TOML file, and environment overrides (prefix: TRACKID_).
///
/// Without `config_path`, [`CONFIG_FILE`] in the working directory is used if present.
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let config_path = config_path.unwrap_or_else(|| Path::new(CONFIG_FILE));

    let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(Toml::file(config_path))
        .merge(Env::prefixed("TRACKID_").split("__"))
        .extract()?;
    info!(target: "config", path = %config_path.display(), "configuration loaded");
    Ok(config)
}
