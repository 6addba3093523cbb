//! Batch masking.
//!
//! [`mask_directory`] blacks out the masked region of every image in a
//! folder. The mask is a grayscale image; pixels where it is pure white
//! ([`MASK_MAX`]) are zeroed. A mask of a different size is resized to each
//! image first.
//!
//! # Example
//!
//! ```no_run
//! use shelface::{MaskOptions, mask_directory};
//!
//! let report = mask_directory("data/input", "data/mask.png", &MaskOptions::new())?;
//! println!("masked {} image(s) into {}", report.processed, report.output_dir.display());
//! # Ok::<(), shelface::ShelfaceError>(())
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{
    DynamicImage, GrayImage, ImageBuffer, Pixel, Primitive, imageops, imageops::FilterType,
};

use crate::configuration::MaskOptions;
use crate::error::ShelfaceError;
use crate::library::{is_frame_file, open_image};
use crate::progress::{OperationType, ProgressTracker};

/// Mask value that marks a pixel for zeroing.
pub const MASK_MAX: u8 = u8::MAX;

/// Name of the directory created next to the input folder.
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "output";

/// Outcome of a batch masking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskReport {
    /// Directory the masked images were written to.
    pub output_dir: PathBuf,
    /// Number of images masked and written.
    pub processed: usize,
    /// Directory entries that were not images.
    pub skipped: usize,
}

/// Zero every pixel of `image` where `mask` is [`MASK_MAX`].
///
/// The mask is resized (bilinear) to the image size when they differ. The
/// image keeps its color type, including 16-bit and floating point ones;
/// color types added to `image` later are converted to 8-bit RGB.
pub fn apply_mask(image: &mut DynamicImage, mask: &GrayImage) {
    let (width, height) = (image.width(), image.height());
    let resized;
    let mask = if mask.dimensions() == (width, height) {
        mask
    } else {
        log::debug!(
            "Resizing mask from {}x{} to {}x{}",
            mask.width(),
            mask.height(),
            width,
            height
        );
        resized = imageops::resize(mask, width, height, FilterType::Triangle);
        &resized
    };

    match image {
        DynamicImage::ImageLuma8(buffer) => zero_masked(buffer, mask),
        DynamicImage::ImageLumaA8(buffer) => zero_masked(buffer, mask),
        DynamicImage::ImageRgb8(buffer) => zero_masked(buffer, mask),
        DynamicImage::ImageRgba8(buffer) => zero_masked(buffer, mask),
        DynamicImage::ImageLuma16(buffer) => zero_masked(buffer, mask),
        DynamicImage::ImageLumaA16(buffer) => zero_masked(buffer, mask),
        DynamicImage::ImageRgb16(buffer) => zero_masked(buffer, mask),
        DynamicImage::ImageRgba16(buffer) => zero_masked(buffer, mask),
        DynamicImage::ImageRgb32F(buffer) => zero_masked(buffer, mask),
        DynamicImage::ImageRgba32F(buffer) => zero_masked(buffer, mask),
        other => {
            let mut buffer = other.to_rgb8();
            zero_masked(&mut buffer, mask);
            *other = DynamicImage::ImageRgb8(buffer);
        }
    }
}

fn zero_masked<P: Pixel>(buffer: &mut ImageBuffer<P, Vec<P::Subpixel>>, mask: &GrayImage) {
    for (pixel, mask_pixel) in buffer.pixels_mut().zip(mask.pixels()) {
        if mask_pixel.0[0] == MASK_MAX {
            pixel
                .channels_mut()
                .fill(<P::Subpixel as Primitive>::DEFAULT_MIN_VALUE);
        }
    }
}

/// Output directory used when none is configured: `<input>/../output`.
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    input_dir
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(DEFAULT_OUTPUT_DIR_NAME)
}

/// Mask every `.png`, `.jpg` and `.jpeg` image in `input_dir` with the mask
/// at `mask_path`, writing results under the same file names.
///
/// # Errors
///
/// Returns [`ShelfaceError::InputDirectoryNotFound`] if `input_dir` does not
/// exist, [`ShelfaceError::ImageFile`] if the mask or an image cannot be
/// decoded or written, and [`ShelfaceError::Cancelled`] on cancellation.
pub fn mask_directory<P, Q>(
    input_dir: P,
    mask_path: Q,
    options: &MaskOptions,
) -> Result<MaskReport, ShelfaceError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input_dir = input_dir.as_ref();
    if !input_dir.is_dir() {
        return Err(ShelfaceError::InputDirectoryNotFound(input_dir.to_path_buf()));
    }

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(input_dir));
    fs::create_dir_all(&output_dir)?;

    let mask = open_image(mask_path.as_ref())?.into_luma8();

    let mut images = Vec::new();
    let mut skipped = 0;
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && is_frame_file(&path) {
            images.push(path);
        } else {
            log::warn!("Skipping {}: not an image", path.display());
            skipped += 1;
        }
    }
    images.sort();

    log::debug!(
        "Masking {} image(s) from {} into {}",
        images.len(),
        input_dir.display(),
        output_dir.display()
    );

    let processed = mask_images(&images, &mask, &output_dir, options)?;

    Ok(MaskReport {
        output_dir,
        processed,
        skipped,
    })
}

/// Mask and write a single image.
fn mask_one(path: &Path, mask: &GrayImage, output_dir: &Path) -> Result<PathBuf, ShelfaceError> {
    let mut image = open_image(path)?;
    apply_mask(&mut image, mask);

    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", path.display()),
        )
    })?;
    let output_path = output_dir.join(file_name);
    image
        .save(&output_path)
        .map_err(|source| ShelfaceError::ImageFile {
            path: output_path.clone(),
            source,
        })?;
    Ok(output_path)
}

#[cfg(not(feature = "rayon"))]
fn mask_images(
    images: &[PathBuf],
    mask: &GrayImage,
    output_dir: &Path,
    options: &MaskOptions,
) -> Result<usize, ShelfaceError> {
    let mut tracker = ProgressTracker::new(
        options.progress.clone(),
        OperationType::Masking,
        Some(images.len() as u64),
        options.batch_size,
    );

    for path in images {
        if options.is_cancelled() {
            return Err(ShelfaceError::Cancelled);
        }
        mask_one(path, mask, output_dir)?;
        tracker.advance(Some(path.clone()));
    }
    tracker.finish();

    Ok(images.len())
}

#[cfg(feature = "rayon")]
fn mask_images(
    images: &[PathBuf],
    mask: &GrayImage,
    output_dir: &Path,
    options: &MaskOptions,
) -> Result<usize, ShelfaceError> {
    use std::sync::Mutex;

    use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

    let tracker = Mutex::new(ProgressTracker::new(
        options.progress.clone(),
        OperationType::Masking,
        Some(images.len() as u64),
        options.batch_size,
    ));

    images.par_iter().try_for_each(|path| {
        if options.is_cancelled() {
            return Err(ShelfaceError::Cancelled);
        }
        mask_one(path, mask, output_dir)?;
        if let Ok(mut tracker) = tracker.lock() {
            tracker.advance(Some(path.clone()));
        }
        Ok(())
    })?;

    if let Ok(mut tracker) = tracker.lock() {
        tracker.finish();
    }

    Ok(images.len())
}
