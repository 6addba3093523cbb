//! Mask a folder of images with progress reporting.
//!
//! Usage:
//!   cargo run --example mask_folder -- <input_dir> <mask.png> [output_dir]

use std::error::Error;
use std::sync::Arc;

use shelface::{MaskOptions, ProgressCallback, ProgressInfo, mask_directory};

/// Simple progress callback that prints to stdout.
struct PrintProgress;

impl ProgressCallback for PrintProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        let pct = info
            .percentage
            .map_or("??".to_string(), |p| format!("{p:.1}"));
        let file = info
            .current_path
            .as_ref()
            .map_or(String::new(), |path| path.display().to_string());
        println!(
            "[{:?}] {}/{} ({pct}%) {file}",
            info.operation,
            info.current,
            info.total.map_or("?".to_string(), |t| t.to_string()),
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let input_dir = args.next().unwrap_or_else(|| "data/input".to_string());
    let mask_path = args.next().unwrap_or_else(|| "data/mask.png".to_string());

    let mut options = MaskOptions::new()
        .with_progress(Arc::new(PrintProgress))
        .with_batch_size(5);
    if let Some(output_dir) = args.next() {
        options = options.with_output_dir(output_dir);
    }

    let report = mask_directory(&input_dir, &mask_path, &options)?;
    println!(
        "Masked {} image(s) into {} ({} other entries skipped)",
        report.processed,
        report.output_dir.display(),
        report.skipped,
    );

    Ok(())
}
