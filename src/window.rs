//! Full-screen window display sink.
//!
//! Available with the `window` feature. Frames are converted to the
//! `0RGB` `u32` layout expected by [`minifb`] and shown in a borderless,
//! topmost window sized to the canvas. [`primary_screen_size`] asks the
//! display server for the monitor size behind `--screen-size full`.

use std::thread;
use std::time::{Duration, Instant};

use display_info::DisplayInfo;
use image::RgbImage;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::display::{DisplaySink, KeyPress};
use crate::error::ShelfaceError;
use crate::geometry::{Canvas, Dimensions};

/// Title of the player window.
pub const WINDOW_TITLE: &str = "Face";

/// How often pending window events are polled while waiting for a key.
const POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Size of the primary monitor, or the first one listed.
///
/// Returns `None` when no display server is reachable.
pub fn primary_screen_size() -> Option<Dimensions> {
    let displays = match DisplayInfo::all() {
        Ok(displays) => displays,
        Err(error) => {
            log::debug!("Screen size detection failed: {error}");
            return None;
        }
    };
    let display = displays
        .iter()
        .find(|display| display.is_primary)
        .or_else(|| displays.first())?;
    Dimensions::new(display.width, display.height).ok()
}

/// A [`DisplaySink`] backed by a native window.
pub struct WindowSink {
    window: Window,
    canvas: Canvas,
    buffer: Vec<u32>,
}

impl WindowSink {
    /// Open a window the size of `canvas`.
    ///
    /// With `fullscreen` the window is borderless and kept on top of other
    /// windows.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::DisplayError`] if the window cannot be created.
    pub fn open(canvas: Canvas, fullscreen: bool) -> Result<Self, ShelfaceError> {
        let options = WindowOptions {
            borderless: fullscreen,
            topmost: fullscreen,
            ..WindowOptions::default()
        };

        let window = Window::new(
            WINDOW_TITLE,
            canvas.width as usize,
            canvas.height as usize,
            options,
        )
        .map_err(|error| ShelfaceError::DisplayError(error.to_string()))?;

        log::debug!("Opened {} window (fullscreen={})", canvas, fullscreen);

        Ok(Self {
            window,
            canvas,
            buffer: vec![0; canvas.width as usize * canvas.height as usize],
        })
    }
}

impl DisplaySink for WindowSink {
    fn present(&mut self, frame: &RgbImage) -> Result<(), ShelfaceError> {
        if frame.dimensions() != (self.canvas.width, self.canvas.height) {
            return Err(ShelfaceError::DisplayError(format!(
                "frame is {}x{} but the window is {}",
                frame.width(),
                frame.height(),
                self.canvas,
            )));
        }

        for (target, pixel) in self.buffer.iter_mut().zip(frame.pixels()) {
            let [red, green, blue] = pixel.0;
            *target = (u32::from(red) << 16) | (u32::from(green) << 8) | u32::from(blue);
        }

        self.window
            .update_with_buffer(
                &self.buffer,
                self.canvas.width as usize,
                self.canvas.height as usize,
            )
            .map_err(|error| ShelfaceError::DisplayError(error.to_string()))
    }

    fn wait_key(&mut self, timeout: Duration) -> Result<Option<KeyPress>, ShelfaceError> {
        let deadline = Instant::now() + timeout;
        loop {
            // A closed window counts as a quit request.
            if !self.window.is_open() {
                return Ok(Some(KeyPress::Quit));
            }

            let keys = self.window.get_keys_pressed(KeyRepeat::No);
            if let Some(key) = keys.first() {
                return Ok(Some(translate_key(*key)));
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL.min(deadline - now));
            self.window.update();
        }
    }
}

fn translate_key(key: Key) -> KeyPress {
    match key {
        Key::Escape | Key::Q => KeyPress::Quit,
        Key::Space => KeyPress::Other(' '),
        other => {
            let index = other as u32;
            let letter = (Key::A as u32..=Key::Z as u32)
                .contains(&index)
                .then(|| char::from(b'a' + (index - Key::A as u32) as u8));
            KeyPress::Other(letter.unwrap_or('\0'))
        }
    }
}
