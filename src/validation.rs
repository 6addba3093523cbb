//! Animation validation.
//!
//! Provides [`validate_animation`], which inspects an animation directory
//! without decoding every frame and returns a [`ValidationReport`] describing
//! anything that would stop it from being shown or would make it look wrong
//! on the configured canvas.
//!
//! # Example
//!
//! ```no_run
//! use shelface::{AnimationLibrary, Canvas, FooterReservation, PlacementPolicy, validate_animation};
//!
//! let library = AnimationLibrary::open("assets/animations")?;
//! let report = validate_animation(
//!     &library,
//!     "wink",
//!     Canvas::new(1920, 1080)?,
//!     PlacementPolicy::Pad,
//!     FooterReservation::new(150),
//! );
//! if report.is_valid() {
//!     println!("wink can be shown");
//! } else {
//!     for error in &report.errors {
//!         println!("Error: {error}");
//!     }
//! }
//! # Ok::<(), shelface::ShelfaceError>(())
//! ```

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::geometry::{Canvas, Dimensions, FooterReservation, PlacementPolicy};
use crate::library::AnimationLibrary;
use crate::timing::derive_frame_rate;

/// Summary of animation validation.
///
/// Contains lists of informational notices, warnings, and errors found during
/// validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Informational notices (not problems).
    pub info: Vec<String>,
    /// Issues that still allow playback but affect how the face looks.
    pub warnings: Vec<String>,
    /// Issues that prevent the face from being shown.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` if no errors were found. Warnings are ignored.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of issues (info + warnings + errors).
    pub fn issue_count(&self) -> usize {
        self.info.len() + self.warnings.len() + self.errors.len()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for item in &self.info {
            writeln!(f, "[INFO] {item}")?;
        }
        for item in &self.warnings {
            writeln!(f, "[WARN] {item}")?;
        }
        for item in &self.errors {
            writeln!(f, "[ERROR] {item}")?;
        }
        if self.issue_count() == 0 {
            writeln!(f, "No issues found.")?;
        }
        Ok(())
    }
}

/// Check that animation `name` can be shown on `canvas` under `policy`.
///
/// Frame headers are read for their dimensions; pixel data is not decoded.
pub fn validate_animation(
    library: &AnimationLibrary,
    name: &str,
    canvas: Canvas,
    policy: PlacementPolicy,
    footer: FooterReservation,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    // ── Canvas ─────────────────────────────────────────────────────
    let area = match footer.usable_area(canvas) {
        Ok(area) => Some(area),
        Err(error) => {
            report.errors.push(error.to_string());
            None
        }
    };

    // ── Frames ─────────────────────────────────────────────────────
    if !library.animation_dir(name).is_dir() {
        report
            .errors
            .push(format!("No animation named {name} in {}", library.root().display()));
        return report;
    }

    let paths = match library.frame_paths(name) {
        Ok(paths) => paths,
        Err(error) => {
            report.errors.push(error.to_string());
            return report;
        }
    };

    let mut sizes = BTreeSet::new();
    for path in &paths {
        match image::image_dimensions(path) {
            Ok((width, height)) => {
                sizes.insert((width, height));
            }
            Err(error) => report
                .errors
                .push(format!("Unreadable frame {}: {error}", path.display())),
        }
    }

    if sizes.len() > 1 {
        let listed: Vec<String> = sizes.iter().map(|(w, h)| format!("{w}x{h}")).collect();
        report.warnings.push(format!(
            "Frames have {} different sizes ({}); the face will jump between frames",
            sizes.len(),
            listed.join(", "),
        ));
    }

    if let (PlacementPolicy::Pad, Some(area)) = (policy, area) {
        let oversized = sizes
            .iter()
            .filter(|(width, height)| {
                Dimensions::new(*width, *height).is_ok_and(|size| !size.fits_within(area))
            })
            .count();
        if oversized > 0 {
            report.warnings.push(format!(
                "{oversized} frame size(s) exceed the usable area {area} and will be clipped with pad",
            ));
        }
    }

    // ── Timing ─────────────────────────────────────────────────────
    let duration = match library.metadata(name) {
        Ok(metadata) => {
            if metadata.source.is_none() {
                report
                    .info
                    .push("No info.txt found; using the default frame rate".to_string());
            }
            metadata.duration_seconds
        }
        Err(error) => {
            report.errors.push(error.to_string());
            None
        }
    };

    if let Ok(frame_rate) = derive_frame_rate(paths.len(), duration) {
        report.info.push(format!(
            "{} frame(s), {} @ {:.2} fps",
            paths.len(),
            duration.map_or_else(|| "no recorded duration".to_string(), |d| format!("{d:.2}s")),
            frame_rate,
        ));
    }

    report
}
