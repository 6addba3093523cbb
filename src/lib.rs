//! # shelface
//!
//! Show animated faces on a screen, and batch-mask folders of images.
//!
//! `shelface` turns a directory of extracted animation frames into a looping,
//! full-screen face: every frame is fitted to a fixed canvas with one of three
//! placement policies, a strip at the bottom is kept free for a caption, and
//! playback runs at the frame rate the clip was recorded at.
//!
//! ## Quick Start
//!
//! ### Compute a Placement
//!
//! ```
//! use shelface::{Canvas, Dimensions, FooterReservation, PlacementPolicy, compute_placement};
//!
//! let placement = compute_placement(
//!     Dimensions::new(640, 480).unwrap(),
//!     Canvas::new(1920, 1080).unwrap(),
//!     PlacementPolicy::ResizePad,
//!     FooterReservation::new(150),
//! )
//! .unwrap();
//! assert_eq!((placement.offset_x, placement.offset_y), (340, 0));
//! ```
//!
//! ### Prepare and Play a Face
//!
//! ```no_run
//! use shelface::{AnimationLibrary, DirectorySink, Face, ShowOptions, Slideshow};
//!
//! let library = AnimationLibrary::open("assets/animations").unwrap();
//! let options = ShowOptions::new().with_footer_text("Good morning");
//! let face = Face::prepare(&library, "random", &options).unwrap();
//!
//! let mut sink = DirectorySink::new("frames", face.frames.len()).unwrap();
//! Slideshow::from_face(&face).run(&mut sink, None).unwrap();
//! ```
//!
//! ### Mask a Folder
//!
//! ```no_run
//! use shelface::{MaskOptions, mask_directory};
//!
//! let report = mask_directory("data/input", "data/mask.png", &MaskOptions::new()).unwrap();
//! println!("{} image(s) written to {}", report.processed, report.output_dir.display());
//! ```
//!
//! ## Features
//!
//! - **Placement**: `pad`, `resize` and `resize_pad` policies with a
//!   reserved footer strip
//! - **Frame rate derivation**: from the frame count and the duration
//!   recorded in `info.txt`
//! - **Captions**: white text in the footer strip, drawn with the embedded
//!   DejaVu Sans font or any TrueType font file
//! - **Animation library**: named or random faces, still or animated
//! - **Playback**: a looping slideshow over any [`DisplaySink`], stopped
//!   with `q` or Escape
//! - **Masking**: zero the masked region of every image in a folder
//! - **Validation**: check an animation against a canvas before showing it
//! - **Progress & cancellation**: callbacks and [`CancellationToken`] for
//!   frame loading and masking
//!
//! ### Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `window` | `WindowSink`, a borderless full-screen window |
//! | `gif` | Export a prepared face as an animated GIF |
//! | `rayon` | Mask images in parallel |
//! | `full` | Enables all of the above |

pub mod configuration;
pub mod display;
pub mod error;
pub mod face;
pub mod footer;
pub mod geometry;
#[cfg(feature = "gif")]
pub mod gif;
pub mod library;
pub mod mask;
pub mod metadata;
pub mod normalize;
pub mod progress;
pub mod timing;
pub mod validation;
#[cfg(feature = "window")]
pub mod window;

pub use configuration::{FaceType, MaskOptions, ScreenSize, ShowOptions};
pub use display::{
    DirectorySink, DisplaySink, KeyPress, PlaybackSummary, Slideshow, StopReason,
};
pub use error::ShelfaceError;
pub use face::Face;
pub use footer::{FooterFont, draw_footer};
pub use geometry::{
    Canvas, Dimensions, FooterReservation, Placement, PlacementPolicy, compute_placement,
};
#[cfg(feature = "gif")]
pub use gif::{GifOptions, encode_gif_to_memory, export_gif};
pub use library::{AnimationLibrary, RANDOM_FACE};
pub use mask::{MaskReport, apply_mask, mask_directory};
pub use metadata::AnimationMetadata;
pub use normalize::normalize_frame;
pub use progress::{CancellationToken, OperationType, ProgressCallback, ProgressInfo};
pub use timing::{AnimationTiming, DEFAULT_FRAME_RATE, derive_frame_rate, frame_interval};
pub use validation::{ValidationReport, validate_animation};
#[cfg(feature = "window")]
pub use window::WindowSink;
