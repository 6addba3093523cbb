//! Frame placement geometry.
//!
//! [`compute_placement`] maps a source image of arbitrary size onto a fixed
//! [`Canvas`] under a [`PlacementPolicy`], leaving a [`FooterReservation`]
//! free at the bottom for overlay text. The result is a [`Placement`]
//! describing the destination size and the offset at which the resized
//! source is composited onto a black canvas.
//!
//! # Example
//!
//! ```
//! use shelface::{Canvas, Dimensions, FooterReservation, PlacementPolicy, compute_placement};
//!
//! let canvas = Canvas::new(1920, 1080)?;
//! let source = Dimensions::new(640, 480)?;
//! let placement = compute_placement(
//!     source,
//!     canvas,
//!     PlacementPolicy::ResizePad,
//!     FooterReservation::new(150),
//! )?;
//!
//! assert_eq!(placement.size, Dimensions::new(1240, 930)?);
//! assert_eq!((placement.offset_x, placement.offset_y), (340, 0));
//! # Ok::<(), shelface::ShelfaceError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::ShelfaceError;

/// A width and height in pixels, both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create dimensions, rejecting a zero width or height.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::InvalidDimensions`] if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, ShelfaceError> {
        if width == 0 || height == 0 {
            return Err(ShelfaceError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Returns `true` if `self` fits inside `bounds` on both axes.
    pub fn fits_within(&self, bounds: Dimensions) -> bool {
        self.width <= bounds.width && self.height <= bounds.height
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The fixed-size surface faces are composited onto.
///
/// A canvas is chosen once per display session (the detected screen or an
/// explicit override) and passed to every placement computation.
pub type Canvas = Dimensions;

/// How a source image is fitted to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlacementPolicy {
    /// Center the source unscaled on a black background.
    Pad,
    /// Scale the source to fit while keeping its aspect ratio, then pad.
    /// This is the default.
    #[default]
    ResizePad,
    /// Stretch the source to fill the usable area exactly.
    Resize,
}

impl PlacementPolicy {
    /// Every policy, in the order they are listed to users.
    pub const ALL: [PlacementPolicy; 3] = [
        PlacementPolicy::Pad,
        PlacementPolicy::Resize,
        PlacementPolicy::ResizePad,
    ];

    /// The name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            PlacementPolicy::Pad => "pad",
            PlacementPolicy::ResizePad => "resize_pad",
            PlacementPolicy::Resize => "resize",
        }
    }
}

impl Display for PlacementPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for PlacementPolicy {
    type Err = ShelfaceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pad" => Ok(PlacementPolicy::Pad),
            "resize_pad" => Ok(PlacementPolicy::ResizePad),
            "resize" => Ok(PlacementPolicy::Resize),
            _ => Err(ShelfaceError::unknown_choice(
                "resize method",
                value,
                PlacementPolicy::ALL.iter().map(|policy| policy.name()),
            )),
        }
    }
}

/// Pixel rows kept free at the bottom of the canvas for overlay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FooterReservation {
    /// Height of the reserved strip in pixels.
    pub height: u32,
}

impl FooterReservation {
    /// Default footer height used by the command line.
    pub const DEFAULT_HEIGHT: u32 = 150;

    /// Reserve `height` rows.
    pub fn new(height: u32) -> Self {
        Self { height }
    }

    /// No reservation.
    pub fn none() -> Self {
        Self { height: 0 }
    }

    /// Height left for the face once the footer is reserved.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::FooterTooTall`] unless
    /// `canvas.height > 2 * footer.height`.
    pub fn usable_height(&self, canvas: Canvas) -> Result<u32, ShelfaceError> {
        if (canvas.height as u64) <= 2 * self.height as u64 {
            return Err(ShelfaceError::FooterTooTall {
                canvas_height: canvas.height,
                footer_height: self.height,
            });
        }
        Ok(canvas.height - self.height)
    }

    /// The area of the canvas available to the face.
    ///
    /// # Errors
    ///
    /// Same as [`usable_height`](FooterReservation::usable_height).
    pub fn usable_area(&self, canvas: Canvas) -> Result<Dimensions, ShelfaceError> {
        Ok(Dimensions {
            width: canvas.width,
            height: self.usable_height(canvas)?,
        })
    }
}

/// Where and how large a source image lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Size the source is resized to.
    pub size: Dimensions,
    /// Column of the top-left corner. Negative when an unscaled source is
    /// wider than the canvas.
    pub offset_x: i64,
    /// Row of the top-left corner, measured within the usable area.
    pub offset_y: i64,
    /// Horizontal scale factor (`size.width / source.width`).
    pub scale_x: f64,
    /// Vertical scale factor (`size.height / source.height`).
    pub scale_y: f64,
}

impl Placement {
    /// The scale factor for aspect-preserving policies.
    ///
    /// Equals `1.0` under [`PlacementPolicy::Pad`]. Under
    /// [`PlacementPolicy::Resize`] only the horizontal factor is returned; use
    /// `scale_x` and `scale_y` directly there.
    pub fn scale(&self) -> f64 {
        self.scale_x
    }

    /// Returns `true` if the placed image lies entirely within `area`.
    pub fn is_within(&self, area: Dimensions) -> bool {
        self.offset_x >= 0
            && self.offset_y >= 0
            && self.offset_x + self.size.width as i64 <= area.width as i64
            && self.offset_y + self.size.height as i64 <= area.height as i64
    }
}

/// Compute where `source` is placed on `canvas` under `policy`.
///
/// The footer strip is excluded from the placement area; offsets center the
/// result within `canvas.width × (canvas.height - footer.height)` using floor
/// division.
///
/// # Errors
///
/// Returns [`ShelfaceError::FooterTooTall`] when
/// `canvas.height <= 2 * footer.height`.
pub fn compute_placement(
    source: Dimensions,
    canvas: Canvas,
    policy: PlacementPolicy,
    footer: FooterReservation,
) -> Result<Placement, ShelfaceError> {
    let area = footer.usable_area(canvas)?;

    let size = match policy {
        PlacementPolicy::Pad => source,
        PlacementPolicy::Resize => area,
        PlacementPolicy::ResizePad => fit_preserving_aspect(source, area),
    };

    let (offset_x, offset_y) = match policy {
        PlacementPolicy::Resize => (0, 0),
        PlacementPolicy::Pad | PlacementPolicy::ResizePad => (
            centered_offset(area.width, size.width),
            centered_offset(area.height, size.height),
        ),
    };

    let placement = Placement {
        size,
        offset_x,
        offset_y,
        scale_x: size.width as f64 / source.width as f64,
        scale_y: size.height as f64 / source.height as f64,
    };

    log::trace!(
        "placed {} on {} ({}, footer {}): {} at ({}, {})",
        source,
        canvas,
        policy,
        footer.height,
        placement.size,
        placement.offset_x,
        placement.offset_y,
    );

    Ok(placement)
}

/// Largest size with the source's aspect ratio that fits inside `area`.
fn fit_preserving_aspect(source: Dimensions, area: Dimensions) -> Dimensions {
    let source_width = source.width as f64;
    let source_height = source.height as f64;

    if area.aspect_ratio() > source.aspect_ratio() {
        // Area is relatively wider: height is the binding side.
        let width = (area.height as f64 * source_width / source_height).round() as u32;
        Dimensions {
            width: width.clamp(1, area.width),
            height: area.height,
        }
    } else {
        let height = (area.width as f64 * source_height / source_width).round() as u32;
        Dimensions {
            width: area.width,
            height: height.clamp(1, area.height),
        }
    }
}

/// Floor-divided offset that centers `inner` within `outer`.
fn centered_offset(outer: u32, inner: u32) -> i64 {
    (outer as i64 - inner as i64).div_euclid(2)
}
