//! GIF export of prepared faces.
//!
//! This module provides [`GifOptions`] and [`export_gif`], which write the
//! canvas-sized frames of a [`Face`] as an animated GIF playing at the face's
//! frame rate.
//!
//! # Example
//!
//! ```no_run
//! use shelface::{AnimationLibrary, Face, GifOptions, ShowOptions, export_gif};
//!
//! let library = AnimationLibrary::open("assets/animations")?;
//! let face = Face::prepare(&library, "random", &ShowOptions::new().with_screen_size("640,480".parse()?))?;
//! export_gif("face.gif", &face, &GifOptions::new())?;
//! # Ok::<(), shelface::ShelfaceError>(())
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use gif::{Encoder, Frame, Repeat};

use crate::error::ShelfaceError;
use crate::face::Face;

/// Configuration for animated GIF export.
#[derive(Debug, Clone)]
pub struct GifOptions {
    /// Delay between frames in hundredths of a second. `None` derives it
    /// from the face's frame rate.
    pub frame_delay: Option<u16>,
    /// How many times the GIF should repeat. `None` means loop forever.
    pub repeat: Option<u16>,
    /// Quantizer speed from 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl GifOptions {
    /// Create a new [`GifOptions`] with default settings.
    pub fn new() -> Self {
        Self {
            frame_delay: None,
            repeat: None,
            speed: 10,
        }
    }

    /// Set the delay between frames in hundredths of a second.
    #[must_use]
    pub fn with_frame_delay(mut self, delay: u16) -> Self {
        self.frame_delay = Some(delay.max(1));
        self
    }

    /// Set the repeat count. `None` means loop forever.
    #[must_use]
    pub fn with_repeat(mut self, repeat: Option<u16>) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set the quantizer speed (clamped to 1–30).
    #[must_use]
    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed.clamp(1, 30);
        self
    }
}

/// GIF frame delay, in hundredths of a second, for `frame_rate`.
pub fn frame_delay_for(frame_rate: f64) -> u16 {
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return 1;
    }
    (100.0 / frame_rate).round().clamp(1.0, u16::MAX as f64) as u16
}

/// Write `face` to `path` as an animated GIF.
///
/// # Errors
///
/// Returns [`ShelfaceError::GifEncodeError`] if the canvas is too large for
/// GIF or encoding fails, and [`ShelfaceError::IoError`] if the file cannot
/// be created.
pub fn export_gif<P: AsRef<Path>>(
    path: P,
    face: &Face,
    options: &GifOptions,
) -> Result<(), ShelfaceError> {
    let file = File::create(path.as_ref())?;
    log::debug!(
        "Encoding {} frame(s) of {} to GIF file {:?}",
        face.frames.len(),
        face.name,
        path.as_ref(),
    );
    encode(file, face, options)
}

/// Encode `face` as an animated GIF into memory.
///
/// # Errors
///
/// Same as [`export_gif`], minus file creation.
pub fn encode_gif_to_memory(face: &Face, options: &GifOptions) -> Result<Vec<u8>, ShelfaceError> {
    let mut buffer = Vec::new();
    encode(&mut buffer, face, options)?;
    Ok(buffer)
}

fn encode<W: Write>(writer: W, face: &Face, options: &GifOptions) -> Result<(), ShelfaceError> {
    let width = u16::try_from(face.canvas.width).map_err(|_| too_large(face))?;
    let height = u16::try_from(face.canvas.height).map_err(|_| too_large(face))?;
    let delay = options
        .frame_delay
        .unwrap_or_else(|| frame_delay_for(face.frame_rate));
    let speed = options.speed.clamp(1, 30);

    let mut encoder = Encoder::new(writer, width, height, &[])
        .map_err(|e| ShelfaceError::GifEncodeError(format!("Failed to create GIF encoder: {e}")))?;

    let repeat = match options.repeat {
        None => Repeat::Infinite,
        Some(n) => Repeat::Finite(n),
    };
    encoder
        .set_repeat(repeat)
        .map_err(|e| ShelfaceError::GifEncodeError(format!("Failed to set GIF repeat: {e}")))?;

    for frame in &face.frames {
        let mut gif_frame = Frame::from_rgb_speed(width, height, frame.as_raw(), speed);
        gif_frame.delay = delay;

        encoder.write_frame(&gif_frame).map_err(|e| {
            ShelfaceError::GifEncodeError(format!("Failed to write GIF frame: {e}"))
        })?;
    }

    Ok(())
}

fn too_large(face: &Face) -> ShelfaceError {
    ShelfaceError::GifEncodeError(format!(
        "canvas {} exceeds the GIF limit of 65535 pixels per side",
        face.canvas
    ))
}
