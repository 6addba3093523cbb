//! Player and masking configuration.
//!
//! [`ShowOptions`] and [`MaskOptions`] are builders that thread the canvas,
//! placement policy, footer text, progress callbacks and cancellation
//! tokens through the library without polluting every function signature.
//!
//! # Example
//!
//! ```
//! use shelface::{FaceType, PlacementPolicy, ScreenSize, ShowOptions};
//!
//! let options = ShowOptions::new()
//!     .with_policy(PlacementPolicy::Pad)
//!     .with_screen_size("1280,720".parse()?)
//!     .with_face_type(FaceType::Still)
//!     .with_footer_text("hello");
//! assert_eq!(options.canvas()?.width, 1280);
//! # Ok::<(), shelface::ShelfaceError>(())
//! ```

use std::env;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ShelfaceError;
use crate::footer::FooterFont;
use crate::geometry::{Canvas, Dimensions, FooterReservation, PlacementPolicy};
use crate::progress::{CancellationToken, NoOpProgress, ProgressCallback};

/// Environment variable consulted when the screen size is `full`.
pub const SCREEN_SIZE_ENV: &str = "SHELFACE_SCREEN_SIZE";

/// Canvas used for `full` when the screen size cannot be detected.
pub const FALLBACK_SCREEN: Dimensions = Dimensions {
    width: 1920,
    height: 1080,
};

/// Largest accepted canvas side, in pixels.
pub const MAX_SCREEN_SIDE: u32 = 16_384;

/// Requested canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenSize {
    /// The whole screen. This is the default.
    #[default]
    Full,
    /// An explicit `W,H` canvas.
    Explicit(Dimensions),
}

impl ScreenSize {
    /// Resolve to a concrete canvas.
    ///
    /// `Full` uses [`SCREEN_SIZE_ENV`] when it is set, then the size of the
    /// primary monitor (with the `window` feature), then
    /// [`FALLBACK_SCREEN`].
    ///
    /// # Errors
    ///
    /// Returns [`ShelfaceError::InvalidScreenSize`] if the environment
    /// variable is set but malformed.
    pub fn resolve(self) -> Result<Canvas, ShelfaceError> {
        match self {
            ScreenSize::Explicit(dimensions) => Ok(dimensions),
            ScreenSize::Full => resolve_full(env::var(SCREEN_SIZE_ENV).ok(), detect_screen),
        }
    }
}

fn resolve_full(
    override_value: Option<String>,
    detect: impl FnOnce() -> Option<Dimensions>,
) -> Result<Canvas, ShelfaceError> {
    if let Some(value) = override_value {
        return parse_dimensions(&value);
    }
    match detect() {
        Some(dimensions) => {
            log::debug!("Detected screen size {dimensions}");
            Ok(dimensions)
        }
        None => {
            log::debug!("Screen size unknown, using {FALLBACK_SCREEN} for full screen");
            Ok(FALLBACK_SCREEN)
        }
    }
}

#[cfg(feature = "window")]
fn detect_screen() -> Option<Dimensions> {
    crate::window::primary_screen_size()
}

#[cfg(not(feature = "window"))]
fn detect_screen() -> Option<Dimensions> {
    None
}

impl FromStr for ScreenSize {
    type Err = ShelfaceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("full") {
            return Ok(ScreenSize::Full);
        }
        parse_dimensions(value).map(ScreenSize::Explicit)
    }
}

impl Display for ScreenSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ScreenSize::Full => f.write_str("full"),
            ScreenSize::Explicit(dimensions) => {
                write!(f, "{},{}", dimensions.width, dimensions.height)
            }
        }
    }
}

fn parse_dimensions(value: &str) -> Result<Dimensions, ShelfaceError> {
    let invalid = || ShelfaceError::InvalidScreenSize(value.to_string());

    let (width, height) = value.split_once(',').ok_or_else(invalid)?;
    let width: u32 = width.trim().parse().map_err(|_| invalid())?;
    let height: u32 = height.trim().parse().map_err(|_| invalid())?;
    if width > MAX_SCREEN_SIDE || height > MAX_SCREEN_SIDE {
        return Err(invalid());
    }
    Dimensions::new(width, height).map_err(|_| invalid())
}

/// Whether a face is a single still frame or an animated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaceType {
    /// One randomly chosen frame of the animation.
    Still,
    /// Every frame, looped at the derived frame rate. This is the default.
    #[default]
    Animated,
}

impl FaceType {
    /// Every face type, in the order they are listed to users.
    pub const ALL: [FaceType; 2] = [FaceType::Still, FaceType::Animated];

    /// The name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            FaceType::Still => "still",
            FaceType::Animated => "animated",
        }
    }
}

impl Display for FaceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for FaceType {
    type Err = ShelfaceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "still" => Ok(FaceType::Still),
            "animated" => Ok(FaceType::Animated),
            _ => Err(ShelfaceError::unknown_choice(
                "face type",
                value,
                FaceType::ALL.iter().map(|face_type| face_type.name()),
            )),
        }
    }
}

/// Settings for preparing and playing a face.
///
/// All fields have defaults matching the command line: animated face,
/// `resize_pad`, full screen, no footer text, 150-pixel footer height.
#[derive(Clone)]
pub struct ShowOptions {
    pub(crate) policy: PlacementPolicy,
    pub(crate) screen_size: ScreenSize,
    pub(crate) face_type: FaceType,
    pub(crate) footer_text: Option<String>,
    pub(crate) footer_height: u32,
    pub(crate) font_path: Option<PathBuf>,
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) cancellation: Option<CancellationToken>,
    pub(crate) batch_size: u64,
}

impl Debug for ShowOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ShowOptions")
            .field("policy", &self.policy)
            .field("screen_size", &self.screen_size)
            .field("face_type", &self.face_type)
            .field("footer_text", &self.footer_text)
            .field("footer_height", &self.footer_height)
            .field("font_path", &self.font_path)
            .field("has_cancellation", &self.cancellation.is_some())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self {
            policy: PlacementPolicy::default(),
            screen_size: ScreenSize::default(),
            face_type: FaceType::default(),
            footer_text: None,
            footer_height: FooterReservation::DEFAULT_HEIGHT,
            font_path: None,
            progress: Arc::new(NoOpProgress),
            cancellation: None,
            batch_size: 1,
        }
    }

    /// Set the placement policy.
    #[must_use]
    pub fn with_policy(mut self, policy: PlacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the canvas size.
    #[must_use]
    pub fn with_screen_size(mut self, screen_size: ScreenSize) -> Self {
        self.screen_size = screen_size;
        self
    }

    /// Choose between a still and an animated face.
    #[must_use]
    pub fn with_face_type(mut self, face_type: FaceType) -> Self {
        self.face_type = face_type;
        self
    }

    /// Draw `text` centered in the footer strip of every frame.
    #[must_use]
    pub fn with_footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer_text = Some(text.into());
        self
    }

    /// Set the height of the footer strip in pixels.
    #[must_use]
    pub fn with_footer_height(mut self, height: u32) -> Self {
        self.footer_height = height;
        self
    }

    /// Draw footer text with the font at `path` instead of the embedded one.
    #[must_use]
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// Attach a progress callback, fired while frames are loaded.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Set how often the progress callback fires. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// The configured placement policy.
    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    /// The configured face type.
    pub fn face_type(&self) -> FaceType {
        self.face_type
    }

    /// The configured footer text.
    pub fn footer_text(&self) -> Option<&str> {
        self.footer_text.as_deref()
    }

    /// The font footer text is drawn with.
    ///
    /// # Errors
    ///
    /// Same as [`FooterFont::from_file`] when a font path is set.
    pub fn footer_font(&self) -> Result<FooterFont, ShelfaceError> {
        match &self.font_path {
            Some(path) => FooterFont::from_file(path),
            None => FooterFont::embedded(),
        }
    }

    /// The canvas this session renders onto.
    ///
    /// # Errors
    ///
    /// Same as [`ScreenSize::resolve`].
    pub fn canvas(&self) -> Result<Canvas, ShelfaceError> {
        self.screen_size.resolve()
    }

    /// The footer reservation.
    ///
    /// The strip is reserved whether or not text is drawn, so adding a
    /// caption never moves the face.
    pub fn footer(&self) -> FooterReservation {
        FooterReservation::new(self.footer_height)
    }

    /// Returns `true` if cancellation has been requested.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}

/// Settings for batch masking.
#[derive(Clone)]
pub struct MaskOptions {
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) cancellation: Option<CancellationToken>,
    pub(crate) batch_size: u64,
}

impl Debug for MaskOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MaskOptions")
            .field("output_dir", &self.output_dir)
            .field("has_cancellation", &self.cancellation.is_some())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskOptions {
    /// Create options with default settings.
    ///
    /// Defaults: output next to the input directory, no progress callback,
    /// no cancellation, batch size 1.
    pub fn new() -> Self {
        Self {
            output_dir: None,
            progress: Arc::new(NoOpProgress),
            cancellation: None,
            batch_size: 1,
        }
    }

    /// Write masked images to `dir` instead of `<input>/../output`.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token, checked before each image.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Set how often the progress callback fires. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Returns `true` if cancellation has been requested.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}
