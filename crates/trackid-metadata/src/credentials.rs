// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistence of Discogs user credentials.
//!
//! The file holds a single JSON object `{"Token": ..., "Secret": ...}`. It is
//! written to a sibling temporary file and renamed into place, readable and
//! writable by the owner only. Concurrent writers are not coordinated.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::oauth::Credentials;

/// Default credential file, relative to the working directory.
pub const CREDENTIALS_FILE: &str = "discogs_credentials.json";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{path} holds an empty token")]
    Incomplete { path: PathBuf },

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Read stored user credentials.
pub fn load(path: &Path) -> Result<Credentials, CredentialError> {
    let bytes = fs::read(path).map_err(|source| CredentialError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let credentials: Credentials =
        serde_json::from_slice(&bytes).map_err(|source| CredentialError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if credentials.token.trim().is_empty() {
        return Err(CredentialError::Incomplete {
            path: path.to_path_buf(),
        });
    }

    debug!(target: "discogs", path = %path.display(), "loaded stored credentials");
    Ok(credentials)
}

/// Store user credentials, replacing any existing file.
pub fn save(path: &Path, credentials: &Credentials) -> Result<(), CredentialError> {
    let write_error = |source| CredentialError::Write {
        path: path.to_path_buf(),
        source,
    };

    let contents = to_pretty_json(credentials).map_err(|e| write_error(e.into()))?;
    let temporary = temporary_path(path).ok_or_else(|| {
        write_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "credential path has no file name",
        ))
    })?;

    // a stale temporary file would keep its old permissions
    let _ = fs::remove_file(&temporary);

    let result = write_private(&temporary, &contents).and_then(|()| fs::rename(&temporary, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&temporary);
        return Err(write_error(source));
    }

    debug!(target: "discogs", path = %path.display(), "stored credentials");
    Ok(())
}

fn to_pretty_json(credentials: &Credentials) -> serde_json::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    credentials.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

fn temporary_path(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_string_lossy();
    Some(path.with_file_name(format!(".{}.tmp", name)))
}

fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
