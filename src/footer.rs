//! Footer captions.
//!
//! Draws a line of white text centered in the black strip reserved at the
//! bottom of a frame. Text is rasterized with [`imageproc`] from a TrueType
//! font: DejaVu Sans is compiled into the crate, and any other font file can
//! be loaded with [`FooterFont::from_file`].

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::error::ShelfaceError;
use crate::geometry::FooterReservation;

/// File name of the font compiled into the crate.
pub const EMBEDDED_FONT_NAME: &str = "DejaVuSans.ttf";

const EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Fraction of the footer height the text aims to fill.
pub const TEXT_HEIGHT_PROPORTION: f32 = 0.5;

/// Smallest font size, in pixels, the layout shrinks to.
const MIN_TEXT_SCALE: f32 = 1.0;

const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// A parsed TrueType or OpenType font for captions.
#[derive(Debug, Clone)]
pub struct FooterFont {
    font: FontArc,
}

impl FooterFont {
    /// The DejaVu Sans font shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::InvalidFont`] if the embedded data does not
    /// parse.
    pub fn embedded() -> Result<Self, ShelfaceError> {
        FontArc::try_from_slice(EMBEDDED_FONT)
            .map(|font| Self { font })
            .map_err(|_| ShelfaceError::InvalidFont(PathBuf::from(EMBEDDED_FONT_NAME)))
    }

    /// Load a font file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::IoError`] if the file cannot be read, or
    /// [`ShelfaceError::InvalidFont`] if it is not a font.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ShelfaceError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let font = FontArc::try_from_vec(bytes)
            .map_err(|_| ShelfaceError::InvalidFont(path.to_path_buf()))?;
        log::debug!("Loaded footer font {}", path.display());
        Ok(Self { font })
    }

    fn text_width(&self, scale: f32, text: &str) -> u32 {
        text_size(PxScale::from(scale), &self.font, text).0
    }
}

/// Where a caption lands inside a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    /// Font size in pixels: the height of one line of text.
    pub scale: f32,
    /// Rendered text width in pixels.
    pub width: u32,
    /// Line height in pixels.
    pub height: u32,
    /// Column where the text starts. Negative when the text is clipped.
    pub x: i32,
    /// Row of the top of the line, in frame coordinates.
    pub y: i32,
}

/// Lay out `text` centered in a footer strip of a frame.
///
/// The font size starts at [`TEXT_HEIGHT_PROPORTION`] of the strip height
/// and shrinks until the text fits the frame width. Returns `None` for an
/// empty footer or empty text.
pub fn layout_text(
    text: &str,
    font: &FooterFont,
    frame_width: u32,
    frame_height: u32,
    footer: FooterReservation,
) -> Option<TextLayout> {
    if footer.height == 0 || text.is_empty() || footer.height > frame_height {
        return None;
    }

    let mut scale = (footer.height as f32 * TEXT_HEIGHT_PROPORTION).max(MIN_TEXT_SCALE);
    let mut width = font.text_width(scale, text);
    if width > frame_width {
        // Widths grow linearly with the font size.
        scale = (scale * frame_width as f32 / width as f32)
            .floor()
            .max(MIN_TEXT_SCALE);
        width = font.text_width(scale, text);
        while scale > MIN_TEXT_SCALE && width > frame_width {
            scale = (scale - 1.0).max(MIN_TEXT_SCALE);
            width = font.text_width(scale, text);
        }
    }

    let height = scale.ceil() as u32;
    let top = frame_height - footer.height;

    Some(TextLayout {
        scale,
        width,
        height,
        x: (frame_width as i32 - width as i32).div_euclid(2),
        y: top as i32 + (footer.height as i32 - height as i32).div_euclid(2),
    })
}

/// Black out the footer strip of `frame` and draw `text` centered in it.
///
/// Does nothing when the footer reservation is empty or taller than the
/// frame.
pub fn draw_footer(
    frame: &mut RgbImage,
    text: &str,
    footer: FooterReservation,
    font: &FooterFont,
) {
    let (width, height) = frame.dimensions();
    if footer.height == 0 || footer.height > height {
        return;
    }

    let top = (height - footer.height) as i32;
    draw_filled_rect_mut(
        frame,
        Rect::at(0, top).of_size(width, footer.height),
        BACKGROUND,
    );

    let Some(layout) = layout_text(text, font, width, height, footer) else {
        return;
    };

    log::trace!("footer {:?} at {:?}", text, layout);

    draw_text_mut(
        frame,
        TEXT_COLOR,
        layout.x,
        layout.y,
        PxScale::from(layout.scale),
        &font.font,
        text,
    );
}
