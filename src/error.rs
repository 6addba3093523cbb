//! Error types for the `shelface` crate.
//!
//! This module defines [`ShelfaceError`], the unified error type returned by
//! all fallible operations in the crate. Configuration errors carry the
//! rejected value together with the accepted alternatives so the binary can
//! print them verbatim.

use std::{io::Error as IoError, path::PathBuf};

use image::ImageError;
use thiserror::Error;

/// The unified error type for all `shelface` operations.
///
/// Every public method that can fail returns `Result<T, ShelfaceError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShelfaceError {
    /// A textual choice (policy, face type, animation name) was not one of the
    /// accepted values.
    #[error("Invalid {kind}: {value} (available: {})", .available.join(", "))]
    UnknownChoice {
        /// What was being chosen, e.g. `"resize method"`.
        kind: &'static str,
        /// The rejected value.
        value: String,
        /// Every value that would have been accepted.
        available: Vec<String>,
    },

    /// The footer reservation leaves no room for the face.
    #[error(
        "Canvas height {canvas_height} is too small to reserve {footer_height} pixels for text"
    )]
    FooterTooTall {
        /// Height of the canvas in pixels.
        canvas_height: u32,
        /// Requested footer height in pixels.
        footer_height: u32,
    },

    /// A dimension of zero was supplied where a positive size is required.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A screen size string could not be parsed.
    #[error("Invalid screen size: {0} (expected \"W,H\" or \"full\")")]
    InvalidScreenSize(String),

    /// A sequence that must hold at least one frame was empty.
    #[error("No frames to display in {0}")]
    EmptySequence(String),

    /// The animations directory does not exist or holds no animations.
    #[error("Animations directory not found: {0}")]
    LibraryNotFound(PathBuf),

    /// An input directory that must exist was missing.
    #[error("Input directory {0} does not exist")]
    InputDirectoryNotFound(PathBuf),

    /// An `info.txt` record could not be parsed.
    #[error("Invalid animation metadata in {path}: {line:?}")]
    InvalidMetadata {
        /// File the record was read from.
        path: PathBuf,
        /// The offending line.
        line: String,
    },

    /// An image could not be decoded or encoded.
    #[error("Failed to process image {path}: {source}")]
    ImageFile {
        /// Path of the image.
        path: PathBuf,
        /// Underlying decode or encode error.
        #[source]
        source: ImageError,
    },

    /// A font file could not be parsed.
    #[error("Invalid font file: {0}")]
    InvalidFont(PathBuf),

    /// The display sink failed.
    #[error("Display error: {0}")]
    DisplayError(String),

    /// GIF encoding failed.
    #[cfg(feature = "gif")]
    #[error("GIF encoding error: {0}")]
    GifEncodeError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate that is not tied to a file.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// The operation was cancelled via a [`CancellationToken`](crate::CancellationToken).
    #[error("Operation cancelled")]
    Cancelled,
}

impl ShelfaceError {
    /// Build an [`UnknownChoice`](ShelfaceError::UnknownChoice) error.
    pub(crate) fn unknown_choice<I, S>(kind: &'static str, value: &str, available: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ShelfaceError::UnknownChoice {
            kind,
            value: value.to_string(),
            available: available.into_iter().map(Into::into).collect(),
        }
    }
}
