// SPDX-License-Identifier: GPL-3.0-or-later

//! Fingerprint computation through Chromaprint's `fpcalc` tool.
//!
//! `fpcalc <file>` prints the duration and the fingerprint on consecutive
//! lines:
//!
//! ```text
//! DURATION=207
//! FINGERPRINT=AQADtNIyRUkkZUqS...
//! ```
//!
//! Install fpcalc:
//! - macOS: `brew install chromaprint`
//! - Linux: `apt install libchromaprint-tools` or equivalent
//! - Windows: download from https://acoustid.org/chromaprint

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::{Fingerprint, FingerprintError, Result};

/// Name of the Chromaprint command-line tool.
pub const FPCALC_PROGRAM: &str = "fpcalc";

lazy_static! {
    static ref FPCALC_OUTPUT_RE: Regex = Regex::new(
        r"DURATION=(?P<duration>[0-9]+)\r?\nFINGERPRINT=(?P<fingerprint>[A-Za-z0-9_-]+)"
    )
    .expect("valid fpcalc output regex");
}

/// Runs `fpcalc` against audio files.
#[derive(Debug, Clone)]
pub struct FingerprintCalculator {
    program: PathBuf,
}

impl Default for FingerprintCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintCalculator {
    /// Use `fpcalc` from `PATH`.
    pub fn new() -> Self {
        Self::with_program(FPCALC_PROGRAM)
    }

    /// Use a specific program name (looked up on `PATH`) or path to the tool.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve the executable, failing with `ToolMissing` when it is absent.
    pub fn locate(&self) -> Result<PathBuf> {
        let search_path = std::env::var_os("PATH");
        find_executable(&self.program, search_path.as_deref())
            .ok_or_else(|| FingerprintError::ToolMissing(self.program.display().to_string()))
    }

    /// Compute the duration and fingerprint of an audio file.
    ///
    /// # Errors
    ///
    /// - `ToolMissing` if `fpcalc` cannot be found
    /// - `Spawn` if the process cannot be started
    /// - `ExecutionFailed` if it exits with a non-zero status
    /// - `ParseFailed` if its output lacks the duration/fingerprint pair
    #[instrument(skip_all, fields(file = %path.as_ref().display()))]
    pub async fn compute(&self, path: impl AsRef<Path>) -> Result<Fingerprint> {
        let fpcalc = self.locate()?;
        debug!(target: "fingerprint", fpcalc = %fpcalc.display(), "running fpcalc");

        let output = Command::new(&fpcalc).arg(path.as_ref()).output().await?;

        if !output.status.success() {
            return Err(FingerprintError::ExecutionFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let fingerprint = parse_output(&String::from_utf8_lossy(&output.stdout))?;
        debug!(
            target: "fingerprint",
            duration = fingerprint.duration,
            "fingerprint computed"
        );
        Ok(fingerprint)
    }
}

/// Extract the duration/fingerprint pair from `fpcalc` standard output.
pub fn parse_output(stdout: &str) -> Result<Fingerprint> {
    let captures = FPCALC_OUTPUT_RE
        .captures(stdout)
        .ok_or_else(|| FingerprintError::ParseFailed(excerpt(stdout)))?;

    let duration = captures["duration"].parse::<u32>().map_err(|e| {
        FingerprintError::ParseFailed(format!("duration {}: {}", &captures["duration"], e))
    })?;

    Ok(Fingerprint::new(&captures["fingerprint"], duration))
}

fn excerpt(stdout: &str) -> String {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        "empty output".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

fn find_executable(program: &Path, search_path: Option<&OsStr>) -> Option<PathBuf> {
    // anything with more than one component is an explicit path, not a name
    if program.components().count() > 1 {
        return is_executable(program).then(|| program.to_path_buf());
    }

    std::env::split_paths(search_path?)
        .flat_map(|dir| candidates(&dir, program))
        .find(|candidate| is_executable(candidate))
}

fn candidates(dir: &Path, program: &Path) -> Vec<PathBuf> {
    let candidate = dir.join(program);
    if cfg!(windows) && candidate.extension().is_none() {
        vec![candidate.with_extension("exe"), candidate]
    } else {
        vec![candidate]
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
