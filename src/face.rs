//! Prepared faces.
//!
//! A [`Face`] is an animation that has been loaded from an
//! [`AnimationLibrary`], normalized to the session canvas, captioned, and
//! paired with its playback frame rate. It is everything the display loop
//! needs.
//!
//! # Example
//!
//! ```no_run
//! use shelface::{AnimationLibrary, Face, ShowOptions};
//!
//! let library = AnimationLibrary::open("assets/animations")?;
//! let face = Face::prepare(&library, "random", &ShowOptions::new().with_footer_text("Hello"))?;
//! println!("{}: {} frames @ {:.2} fps", face.name, face.frames.len(), face.frame_rate);
//! # Ok::<(), shelface::ShelfaceError>(())
//! ```

use image::{DynamicImage, RgbImage};

use crate::configuration::{FaceType, ShowOptions};
use crate::error::ShelfaceError;
use crate::footer::draw_footer;
use crate::geometry::Canvas;
use crate::library::{AnimationLibrary, FrameLoad, load_images};
use crate::normalize::normalize_frame;
use crate::timing::{DEFAULT_FRAME_RATE, derive_frame_rate};

/// A face ready for display.
#[derive(Debug, Clone)]
pub struct Face {
    /// Name of the animation the face was built from.
    pub name: String,
    /// Still or animated.
    pub face_type: FaceType,
    /// Canvas every frame was normalized to.
    pub canvas: Canvas,
    /// Canvas-sized frames in playback order. Never empty.
    pub frames: Vec<RgbImage>,
    /// Playback frame rate in frames per second.
    pub frame_rate: f64,
}

impl Face {
    /// Load, normalize and caption the face `requested` from `library`.
    ///
    /// `requested` may be [`RANDOM_FACE`](crate::RANDOM_FACE). A still face
    /// uses one random frame and the default frame rate; an animated face
    /// uses every frame and a rate derived from the recorded duration.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::UnknownChoice`] for an unknown face,
    /// [`ShelfaceError::FooterTooTall`] if the footer does not fit the canvas,
    /// [`ShelfaceError::EmptySequence`] if the animation has no frames, or
    /// decoding and I/O errors.
    pub fn prepare(
        library: &AnimationLibrary,
        requested: &str,
        options: &ShowOptions,
    ) -> Result<Self, ShelfaceError> {
        let canvas = options.canvas()?;
        // Fail on an impossible footer before decoding anything.
        options.footer().usable_height(canvas)?;

        let name = library.resolve(requested)?;
        log::info!("Using face: {name}");

        let (sources, frame_rate) = match options.face_type() {
            FaceType::Still => (vec![library.load_random_frame(&name)?], DEFAULT_FRAME_RATE),
            FaceType::Animated => {
                let paths = library.frame_paths(&name)?;
                let load = FrameLoad {
                    progress: options.progress.clone(),
                    cancellation: options.cancellation.as_ref(),
                    batch_size: options.batch_size,
                };
                let sources = load_images(&paths, &load)?;
                let metadata = library.metadata(&name)?;
                let frame_rate = derive_frame_rate(sources.len(), metadata.duration_seconds)?;
                (sources, frame_rate)
            }
        };

        let frames = compose_frames(&sources, canvas, options)?;

        log::debug!(
            "Prepared face {} ({}): {} frame(s) on {} @ {:.2} fps",
            name,
            options.face_type(),
            frames.len(),
            canvas,
            frame_rate,
        );

        Ok(Self {
            name,
            face_type: options.face_type(),
            canvas,
            frames,
            frame_rate,
        })
    }

    /// Build a face from frames that are already decoded.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::EmptySequence`] if `sources` is empty, plus
    /// the errors of [`prepare`](Face::prepare) for canvas and footer.
    pub fn from_images(
        name: impl Into<String>,
        sources: &[DynamicImage],
        duration_seconds: Option<f64>,
        options: &ShowOptions,
    ) -> Result<Self, ShelfaceError> {
        let name = name.into();
        let canvas = options.canvas()?;
        let frame_rate = derive_frame_rate(sources.len(), duration_seconds)
            .map_err(|_| ShelfaceError::EmptySequence(name.clone()))?;
        let frames = compose_frames(sources, canvas, options)?;

        Ok(Self {
            name,
            face_type: options.face_type(),
            canvas,
            frames,
            frame_rate,
        })
    }
}

/// Normalize every source to the canvas and draw the caption, if any.
fn compose_frames(
    sources: &[DynamicImage],
    canvas: Canvas,
    options: &ShowOptions,
) -> Result<Vec<RgbImage>, ShelfaceError> {
    let footer = options.footer();
    let caption = match options.footer_text() {
        Some(text) => Some((text, options.footer_font()?)),
        None => None,
    };
    sources
        .iter()
        .map(|source| {
            if options.is_cancelled() {
                return Err(ShelfaceError::Cancelled);
            }
            let mut frame = normalize_frame(source, canvas, options.policy(), footer)?;
            if let Some((text, font)) = &caption {
                draw_footer(&mut frame, text, footer, font);
            }
            Ok(frame)
        })
        .collect()
}
