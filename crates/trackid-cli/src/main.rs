// SPDX-License-Identifier: GPL-3.0-or-later
mod prompt;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trackid_config::{load as load_config, AppConfig};
use trackid_fingerprint::{AcoustidClient, FingerprintCalculator, TrackIdentifier};
use trackid_metadata::{DiscogsClient, SearchQuery};
use trackid_musicbrainz::MusicBrainzClient;
use uuid::Uuid;

use crate::prompt::ConsolePrompt;

/// Identify music files and look up their release metadata.
#[derive(Parser)]
#[command(name = "trackid", author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "TRACKID_CONFIG")]
    config: Option<PathBuf>,

    /// fpcalc executable to use instead of the one on PATH
    #[arg(long, global = true)]
    fpcalc: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the duration and acoustic fingerprint of an audio file
    Fingerprint {
        /// Path to the audio file
        path: PathBuf,
    },
    /// Fingerprint an audio file and look it up on AcoustID
    Identify {
        /// Path to the audio file
        path: PathBuf,
    },
    /// Authorize access to a Discogs account
    Authorize,
    /// Search Discogs for a release
    Search {
        #[arg(long)]
        artist: String,
        /// Release title
        #[arg(long)]
        title: String,
        /// Print only the release on this label
        #[arg(long, requires = "catno")]
        label: Option<String>,
        /// Catalog number of the release on --label
        #[arg(long, requires = "label")]
        catno: Option<String>,
    },
    /// Look up a MusicBrainz release
    Release {
        /// MusicBrainz release ID
        mbid: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_configuration(cli.config.as_deref(), std::io::stderr)?;
    init_tracing(&config.telemetry.log_level);
    debug!(target: "cli", log_level = %config.telemetry.log_level, "logging initialized");

    match cli.command {
        Commands::Fingerprint { path } => {
            let fingerprint = calculator(cli.fpcalc.as_deref())
                .compute(&path)
                .await
                .with_context(|| format!("fingerprinting {}", path.display()))?;
            println!("DURATION={}", fingerprint.duration);
            println!("FINGERPRINT={}", fingerprint.hash);
        }
        Commands::Identify { path } => {
            let client = acoustid_client(&config)?;
            let mut identifier = TrackIdentifier::new(calculator(cli.fpcalc.as_deref()), client);
            identifier
                .compute_fingerprint(&path)
                .await
                .with_context(|| format!("fingerprinting {}", path.display()))?;
            let response = identifier.lookup().await.context("AcoustID lookup")?;
            if let Some(best) = response.best_match() {
                info!(target: "cli", id = %best.id, score = best.score, "best match");
            }
            print_json(&response)?;
        }
        Commands::Authorize => {
            let mut client = discogs_client(&config)?;
            client
                .authorize(&ConsolePrompt)
                .await
                .context("Discogs authorization")?;
            info!(
                target: "cli",
                path = %client.credentials_path().display(),
                "Discogs authorization ready"
            );
        }
        Commands::Search {
            artist,
            title,
            label,
            catno,
        } => {
            let mut client = discogs_client(&config)?;
            client
                .authorize(&ConsolePrompt)
                .await
                .context("Discogs authorization")?;
            let results = client
                .search(&SearchQuery::new(artist, title))
                .await
                .context("Discogs search")?;

            match (label, catno) {
                (Some(label), Some(catno)) => {
                    let release = results.find_release(&label, &catno).with_context(|| {
                        format!("no {} release with catalog number {}", label, catno)
                    })?;
                    print_json(release)?;
                }
                _ => print_json(&results)?,
            }
        }
        Commands::Release { mbid } => {
            let mut builder = MusicBrainzClient::builder();
            if let Some(timeout) = config.http.timeout() {
                builder = builder.timeout(timeout);
            }
            let client = builder.build()?;
            let release = client
                .get_release(mbid)
                .await
                .with_context(|| format!("MusicBrainz release {}", mbid))?;
            print_json(&release)?;
        }
    }

    Ok(())
}

/// Load configuration under a temporary subscriber, since the configured
/// log level is not known until loading succeeds.
fn load_configuration<W>(path: Option<&Path>, writer: W) -> Result<AppConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let bootstrap = fmt()
        .with_writer(writer)
        .with_env_filter(env_filter)
        .with_target(true)
        .finish();

    tracing::subscriber::with_default(bootstrap, || load_config(path))
        .context("loading configuration")
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn calculator(program: Option<&Path>) -> FingerprintCalculator {
    match program {
        Some(program) => FingerprintCalculator::with_program(program),
        None => FingerprintCalculator::new(),
    }
}

fn acoustid_client(config: &AppConfig) -> Result<AcoustidClient> {
    let api_key = config
        .acoustid
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .context("acoustid.api_key is not set (TRACKID_ACOUSTID__API_KEY)")?;

    let mut builder = AcoustidClient::builder(api_key);
    if let Some(timeout) = config.http.timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

fn discogs_client(config: &AppConfig) -> Result<DiscogsClient> {
    let discogs = &config.discogs;
    let key = discogs
        .consumer_key
        .as_deref()
        .context("discogs.consumer_key is not set (TRACKID_DISCOGS__CONSUMER_KEY)")?;
    let secret = discogs
        .consumer_secret
        .as_deref()
        .context("discogs.consumer_secret is not set (TRACKID_DISCOGS__CONSUMER_SECRET)")?;

    let mut builder =
        DiscogsClient::builder(key, secret).credentials_path(&discogs.credentials_file);
    if let Some(timeout) = config.http.timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("rendering JSON")?;
    println!("{}", rendered);
    Ok(())
}
