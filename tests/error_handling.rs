//! Error handling integration tests.
//!
//! These tests verify that meaningful errors are returned for various
//! failure conditions.

use std::error::Error;
use std::fs;

use shelface::{AnimationLibrary, FooterReservation, MaskOptions, ShelfaceError, mask_directory};

#[test]
fn footer_too_tall_message() {
    let canvas = shelface::Canvas::new(640, 200).unwrap();
    let error = FooterReservation::new(100).usable_height(canvas).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Canvas height 200 is too small to reserve 100 pixels for text"
    );
}

#[test]
fn missing_library_message() {
    let error = AnimationLibrary::open("no/such/animations").unwrap_err();
    let error_message = error.to_string();
    assert!(
        error_message.contains("Animations directory not found"),
        "Error message should mention the missing directory: {error_message}",
    );
}

#[test]
fn invalid_screen_size_message() {
    let error = "wide".parse::<shelface::ScreenSize>().unwrap_err();
    assert_eq!(
        error.to_string(),
        "Invalid screen size: wide (expected \"W,H\" or \"full\")"
    );
}

#[test]
fn undecodable_image_keeps_its_source() {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    let input = root.path().join("input");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("broken.png"), b"this is not an image").unwrap();
    let mask_path = root.path().join("mask.png");
    image::GrayImage::new(2, 2).save(&mask_path).unwrap();

    let error = mask_directory(&input, &mask_path, &MaskOptions::new()).unwrap_err();
    match &error {
        ShelfaceError::ImageFile { path, .. } => assert!(path.ends_with("broken.png")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(error.source().is_some());
    assert!(error.to_string().contains("broken.png"));
}

#[test]
fn io_errors_convert() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: ShelfaceError = io_error.into();
    assert!(matches!(error, ShelfaceError::IoError(_)));
    assert_eq!(error.to_string(), "I/O error: denied");
}

#[test]
fn cancelled_message() {
    assert_eq!(ShelfaceError::Cancelled.to_string(), "Operation cancelled");
}
