//! Playback timing.
//!
//! Derives the frame rate of an animated face from its frame count and the
//! duration of the clip it was recorded from.

use std::time::Duration;

use crate::error::ShelfaceError;

/// Frame rate used when no recorded duration is known.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// Frame count and optional recorded duration of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    /// Number of frames in the sequence.
    pub frame_count: usize,
    /// Length of the recorded clip in seconds, if known.
    pub duration_seconds: Option<f64>,
}

impl AnimationTiming {
    /// Create a timing record.
    pub fn new(frame_count: usize, duration_seconds: Option<f64>) -> Self {
        Self {
            frame_count,
            duration_seconds,
        }
    }

    /// Playback frame rate for this sequence.
    ///
    /// # Errors
    ///
    /// Same as [`derive_frame_rate`].
    pub fn frame_rate(&self) -> Result<f64, ShelfaceError> {
        derive_frame_rate(self.frame_count, self.duration_seconds)
    }
}

/// Frames per second that replay `frame_count` frames over the recorded
/// duration, or [`DEFAULT_FRAME_RATE`] when no usable duration is given.
///
/// # Errors
///
/// Returns [`ShelfaceError::EmptySequence`] if `frame_count` is zero.
///
/// # Example
///
/// ```
/// use shelface::derive_frame_rate;
///
/// assert_eq!(derive_frame_rate(90, Some(3.0))?, 30.0);
/// assert_eq!(derive_frame_rate(50, None)?, 30.0);
/// # Ok::<(), shelface::ShelfaceError>(())
/// ```
pub fn derive_frame_rate(
    frame_count: usize,
    duration_seconds: Option<f64>,
) -> Result<f64, ShelfaceError> {
    if frame_count == 0 {
        return Err(ShelfaceError::EmptySequence("animation".to_string()));
    }

    match duration_seconds {
        Some(duration) if duration.is_finite() && duration > 0.0 => {
            Ok(frame_count as f64 / duration)
        }
        _ => Ok(DEFAULT_FRAME_RATE),
    }
}

/// How long the display loop waits for a key between frames.
///
/// Whole milliseconds, truncated, never less than one millisecond.
pub fn frame_interval(frame_rate: f64) -> Duration {
    let millis = if frame_rate.is_finite() && frame_rate > 0.0 {
        (1000.0 / frame_rate) as u64
    } else {
        (1000.0 / DEFAULT_FRAME_RATE) as u64
    };
    Duration::from_millis(millis.max(1))
}
