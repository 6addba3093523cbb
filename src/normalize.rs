//! Frame normalization.
//!
//! Turns a decoded face frame of any size into a canvas-sized RGB frame by
//! applying the [`Placement`](crate::Placement) computed by
//! [`compute_placement`].

use image::{DynamicImage, GenericImageView, RgbImage, imageops, imageops::FilterType};

use crate::error::ShelfaceError;
use crate::geometry::{Canvas, Dimensions, FooterReservation, PlacementPolicy, compute_placement};

/// Resize and pad `image` onto a black canvas.
///
/// Parts of the source that fall outside the canvas (only possible with
/// [`PlacementPolicy::Pad`] and an oversized source) are clipped.
///
/// # Errors
///
/// Returns [`ShelfaceError::FooterTooTall`] if the footer leaves no room for
/// the face, or [`ShelfaceError::InvalidDimensions`] for an empty image.
pub fn normalize_frame(
    image: &DynamicImage,
    canvas: Canvas,
    policy: PlacementPolicy,
    footer: FooterReservation,
) -> Result<RgbImage, ShelfaceError> {
    let (width, height) = image.dimensions();
    let source = Dimensions::new(width, height)?;
    let placement = compute_placement(source, canvas, policy, footer)?;

    let rgb = image.to_rgb8();
    let resized = if placement.size == source {
        rgb
    } else {
        imageops::resize(
            &rgb,
            placement.size.width,
            placement.size.height,
            FilterType::Triangle,
        )
    };

    let mut frame = RgbImage::new(canvas.width, canvas.height);
    imageops::replace(&mut frame, &resized, placement.offset_x, placement.offset_y);

    Ok(frame)
}
