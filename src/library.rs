//! Animation library.
//!
//! An animations root holds one subdirectory per face. Each subdirectory
//! contains sequentially numbered frames (`0001.jpg`, `0002.jpg`, …) and an
//! optional `info.txt` metadata record.
//!
//! # Example
//!
//! ```no_run
//! use shelface::AnimationLibrary;
//!
//! let library = AnimationLibrary::open("assets/animations")?;
//! for name in library.names()? {
//!     println!("{name}");
//! }
//! # Ok::<(), shelface::ShelfaceError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;
use rand::seq::IndexedRandom;

use crate::error::ShelfaceError;
use crate::metadata::AnimationMetadata;
use crate::progress::{
    CancellationToken, NoOpProgress, OperationType, ProgressCallback, ProgressTracker,
};

/// Name that selects a random animation.
pub const RANDOM_FACE: &str = "random";

/// File extensions recognised as animation frames (compared case-insensitively).
pub const FRAME_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A directory of animations.
#[derive(Debug, Clone)]
pub struct AnimationLibrary {
    root: PathBuf,
}

impl AnimationLibrary {
    /// Open the animations root at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::LibraryNotFound`] if `root` is not a directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, ShelfaceError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(ShelfaceError::LibraryNotFound(root));
        }
        log::debug!("Opened animation library at {}", root.display());
        Ok(Self { root })
    }

    /// The animations root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of every animation, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::IoError`] if the root cannot be listed.
    pub fn names(&self) -> Result<Vec<String>, ShelfaceError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Turn a requested face name into an existing animation name.
    ///
    /// [`RANDOM_FACE`] picks one of the available animations at random.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::UnknownChoice`] listing the available names
    /// when `requested` does not exist, or [`ShelfaceError::LibraryNotFound`]
    /// when the library is empty.
    pub fn resolve(&self, requested: &str) -> Result<String, ShelfaceError> {
        let names = self.names()?;
        if names.is_empty() {
            return Err(ShelfaceError::LibraryNotFound(self.root.clone()));
        }

        if requested == RANDOM_FACE {
            let chosen = names
                .choose(&mut rand::rng())
                .cloned()
                .ok_or_else(|| ShelfaceError::LibraryNotFound(self.root.clone()))?;
            log::debug!("Randomly chose face {chosen}");
            return Ok(chosen);
        }

        if names.iter().any(|name| name == requested) {
            Ok(requested.to_string())
        } else {
            Err(ShelfaceError::unknown_choice("face name", requested, names))
        }
    }

    /// Directory of the animation `name`.
    pub fn animation_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Frame files of `name`, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::EmptySequence`] if the animation has no
    /// frames, or [`ShelfaceError::IoError`] if it cannot be listed.
    pub fn frame_paths(&self, name: &str) -> Result<Vec<PathBuf>, ShelfaceError> {
        let directory = self.animation_dir(name);
        let mut paths: Vec<PathBuf> = fs::read_dir(&directory)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file() && is_frame_file(path))
            .collect();

        if paths.is_empty() {
            return Err(ShelfaceError::EmptySequence(name.to_string()));
        }

        paths.sort();
        Ok(paths)
    }

    /// Metadata record of `name`.
    ///
    /// # Errors
    ///
    /// Same as [`AnimationMetadata::read`].
    pub fn metadata(&self, name: &str) -> Result<AnimationMetadata, ShelfaceError> {
        AnimationMetadata::read(&self.animation_dir(name))
    }

    /// Decode every frame of `name` in order.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::ImageFile`] for a frame that cannot be
    /// decoded, or any error from [`frame_paths`](AnimationLibrary::frame_paths).
    pub fn load_frames(&self, name: &str) -> Result<Vec<DynamicImage>, ShelfaceError> {
        let paths = self.frame_paths(name)?;
        load_images(&paths, &FrameLoad::default())
    }

    /// Decode one frame of `name` chosen at random.
    ///
    /// # Errors
    ///
    /// Same as [`load_frames`](AnimationLibrary::load_frames).
    pub fn load_random_frame(&self, name: &str) -> Result<DynamicImage, ShelfaceError> {
        let paths = self.frame_paths(name)?;
        let path = paths
            .choose(&mut rand::rng())
            .ok_or_else(|| ShelfaceError::EmptySequence(name.to_string()))?;
        log::debug!("Randomly chose frame {}", path.display());
        open_image(path)
    }
}

/// Progress plumbing for [`load_images`].
pub(crate) struct FrameLoad<'a> {
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) cancellation: Option<&'a CancellationToken>,
    pub(crate) batch_size: u64,
}

impl Default for FrameLoad<'_> {
    fn default() -> Self {
        Self {
            progress: Arc::new(NoOpProgress),
            cancellation: None,
            batch_size: 1,
        }
    }
}

/// Decode `paths` in order, reporting progress and honouring cancellation.
pub(crate) fn load_images(
    paths: &[PathBuf],
    load: &FrameLoad<'_>,
) -> Result<Vec<DynamicImage>, ShelfaceError> {
    let mut tracker = ProgressTracker::new(
        load.progress.clone(),
        OperationType::FrameLoading,
        Some(paths.len() as u64),
        load.batch_size,
    );

    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        if load.cancellation.is_some_and(|token| token.is_cancelled()) {
            return Err(ShelfaceError::Cancelled);
        }
        images.push(open_image(path)?);
        tracker.advance(Some(path.clone()));
    }
    tracker.finish();

    Ok(images)
}

/// Decode a single image, attaching the path to any error.
pub(crate) fn open_image(path: &Path) -> Result<DynamicImage, ShelfaceError> {
    image::open(path).map_err(|source| ShelfaceError::ImageFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns `true` if `path` has one of the [`FRAME_EXTENSIONS`].
pub(crate) fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            FRAME_EXTENSIONS
                .iter()
                .any(|known| extension.eq_ignore_ascii_case(known))
        })
}
