//! Face playback.
//!
//! [`Slideshow`] drives a [`DisplaySink`]: it shows one frame, waits up to
//! one frame interval for a key, advances to the next frame (wrapping at the
//! end) and stops on `q`, Escape, or cancellation. The sink decides where the
//! pixels go: a full-screen window (feature `window`) or numbered PNG files
//! ([`DirectorySink`]).
//!
//! # Example
//!
//! ```no_run
//! use shelface::{AnimationLibrary, DirectorySink, Face, ShowOptions, Slideshow};
//!
//! let library = AnimationLibrary::open("assets/animations")?;
//! let face = Face::prepare(&library, "random", &ShowOptions::new())?;
//!
//! let mut sink = DirectorySink::new("frames", face.frames.len())?;
//! let summary = Slideshow::from_face(&face).run(&mut sink, None)?;
//! println!("showed {} frames", summary.frames_shown);
//! # Ok::<(), shelface::ShelfaceError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::RgbImage;

use crate::error::ShelfaceError;
use crate::face::Face;
use crate::progress::CancellationToken;
use crate::timing::frame_interval;

/// A key press reported by a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// `q` or Escape: stop playback.
    Quit,
    /// Any other key.
    Other(char),
}

impl KeyPress {
    /// Classify a typed character. `q`, `Q` and Escape quit.
    pub fn from_char(character: char) -> Self {
        match character {
            'q' | 'Q' | '\u{1b}' => KeyPress::Quit,
            other => KeyPress::Other(other),
        }
    }

    /// Returns `true` for [`KeyPress::Quit`].
    pub fn is_quit(self) -> bool {
        matches!(self, KeyPress::Quit)
    }
}

/// Somewhere frames can be shown.
pub trait DisplaySink {
    /// Show `frame`, replacing whatever was shown before.
    ///
    /// # Errors
    ///
    /// Implementations return [`ShelfaceError::DisplayError`] or I/O errors.
    fn present(&mut self, frame: &RgbImage) -> Result<(), ShelfaceError>;

    /// Block for at most `timeout` waiting for a key press.
    ///
    /// # Errors
    ///
    /// Implementations return [`ShelfaceError::DisplayError`] if the display
    /// is gone.
    fn wait_key(&mut self, timeout: Duration) -> Result<Option<KeyPress>, ShelfaceError>;
}

/// Why playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A quit key was pressed.
    QuitKey,
    /// The cancellation token was triggered.
    Cancelled,
}

/// What happened during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSummary {
    /// Total frames presented.
    pub frames_shown: u64,
    /// How many times the sequence was shown in full.
    pub completed_cycles: u64,
    /// Why playback ended.
    pub stopped_by: StopReason,
}

/// A looping frame sequence with a fixed frame rate.
#[derive(Debug, Clone, Copy)]
pub struct Slideshow<'a> {
    frames: &'a [RgbImage],
    frame_rate: f64,
}

impl<'a> Slideshow<'a> {
    /// Play `frames` at `frame_rate` frames per second.
    pub fn new(frames: &'a [RgbImage], frame_rate: f64) -> Self {
        Self { frames, frame_rate }
    }

    /// Play a prepared face.
    pub fn from_face(face: &'a Face) -> Self {
        Self::new(&face.frames, face.frame_rate)
    }

    /// Time each frame stays on screen while no key is pressed.
    pub fn interval(&self) -> Duration {
        frame_interval(self.frame_rate)
    }

    /// Loop over the frames until a quit key or cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::EmptySequence`] if there are no frames, or
    /// any error from the sink.
    pub fn run<S: DisplaySink + ?Sized>(
        &self,
        sink: &mut S,
        cancellation: Option<&CancellationToken>,
    ) -> Result<PlaybackSummary, ShelfaceError> {
        if self.frames.is_empty() {
            return Err(ShelfaceError::EmptySequence("slideshow".to_string()));
        }

        let interval = self.interval();
        log::debug!(
            "Playing {} frame(s) every {:?}",
            self.frames.len(),
            interval
        );

        let mut index = 0;
        let mut frames_shown = 0_u64;
        let mut completed_cycles = 0_u64;

        loop {
            if cancellation.is_some_and(|token| token.is_cancelled()) {
                return Ok(PlaybackSummary {
                    frames_shown,
                    completed_cycles,
                    stopped_by: StopReason::Cancelled,
                });
            }

            sink.present(&self.frames[index])?;
            frames_shown += 1;

            let key = sink.wait_key(interval)?;

            index = (index + 1) % self.frames.len();
            if index == 0 {
                completed_cycles += 1;
            }

            if key.is_some_and(KeyPress::is_quit) {
                log::debug!("Quit after {frames_shown} frame(s)");
                return Ok(PlaybackSummary {
                    frames_shown,
                    completed_cycles,
                    stopped_by: StopReason::QuitKey,
                });
            }
        }
    }
}

/// A sink that writes each presented frame to `frame_NNNNNN.png` in a
/// directory and quits once `frame_budget` frames have been written.
///
/// Waiting does not sleep; the files are produced as fast as they encode.
#[derive(Debug)]
pub struct DirectorySink {
    directory: PathBuf,
    frame_budget: usize,
    written: usize,
}

impl DirectorySink {
    /// Create the output directory and a sink that writes at most
    /// `frame_budget` frames (at least one).
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::IoError`] if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(directory: P, frame_budget: usize) -> Result<Self, ShelfaceError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            frame_budget: frame_budget.max(1),
            written: 0,
        })
    }

    /// Number of frames written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl DisplaySink for DirectorySink {
    fn present(&mut self, frame: &RgbImage) -> Result<(), ShelfaceError> {
        let path = self
            .directory
            .join(format!("frame_{:06}.png", self.written));
        frame
            .save(&path)
            .map_err(|source| ShelfaceError::ImageFile {
                path: path.clone(),
                source,
            })?;
        self.written += 1;
        Ok(())
    }

    fn wait_key(&mut self, _timeout: Duration) -> Result<Option<KeyPress>, ShelfaceError> {
        Ok((self.written >= self.frame_budget).then_some(KeyPress::Quit))
    }
}
