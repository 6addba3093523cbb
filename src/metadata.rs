//! Animation metadata.
//!
//! Each animation directory may carry an `info.txt` record written when the
//! frames were extracted. Only the recorded clip duration is used; it is read
//! from any line containing `Duration`, e.g. `Duration: 3.2s`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ShelfaceError;

/// File name of the per-animation metadata record.
pub const INFO_FILE_NAME: &str = "info.txt";

/// Metadata for one animation directory.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct AnimationMetadata {
    /// Path of the record, when one exists.
    pub source: Option<PathBuf>,
    /// Recorded clip duration in seconds.
    pub duration_seconds: Option<f64>,
}

impl AnimationMetadata {
    /// Read the `info.txt` record in `directory`.
    ///
    /// A missing record is not an error; it yields empty metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::IoError`] if the record exists but cannot be
    /// read, or [`ShelfaceError::InvalidMetadata`] for a malformed duration.
    pub fn read(directory: &Path) -> Result<Self, ShelfaceError> {
        let path = directory.join(INFO_FILE_NAME);
        if !path.is_file() {
            log::info!("No info file found in {}", directory.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)?;
        let duration_seconds = parse_duration(&text).map_err(|line| {
            ShelfaceError::InvalidMetadata {
                path: path.clone(),
                line,
            }
        })?;

        log::debug!("{}: duration {:?}", path.display(), duration_seconds);

        Ok(Self {
            source: Some(path),
            duration_seconds,
        })
    }
}

/// Extract the recorded duration from the text of an `info.txt` record.
///
/// Every line containing `Duration` is parsed as `<label>: <seconds>`, with
/// an optional trailing `s` unit; the last such line wins. Non-positive
/// durations are treated as absent.
///
/// # Errors
///
/// Returns the offending line when a `Duration` line has no parsable value.
pub fn parse_duration(text: &str) -> Result<Option<f64>, String> {
    let mut duration = None;

    for line in text.lines().map(str::trim) {
        if !line.contains("Duration") {
            continue;
        }

        let value = line
            .split_once(':')
            .map(|(_, value)| value.trim().replace('s', ""))
            .ok_or_else(|| line.to_string())?;
        let seconds: f64 = value.trim().parse().map_err(|_| line.to_string())?;
        duration = Some(seconds);
    }

    Ok(duration.filter(|seconds| seconds.is_finite() && *seconds > 0.0))
}
