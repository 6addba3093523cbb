//! `info.txt` parsing tests.

use std::fs;

use shelface::metadata::{INFO_FILE_NAME, parse_duration};
use shelface::{AnimationMetadata, ShelfaceError};

// ── parse_duration ───────────────────────────────────────────────

#[test]
fn duration_with_seconds_suffix() {
    assert_eq!(parse_duration("Duration: 3.2s").unwrap(), Some(3.2));
    assert_eq!(parse_duration("Duration: 3.2 s").unwrap(), Some(3.2));
}

#[test]
fn duration_without_suffix() {
    assert_eq!(parse_duration("Duration: 4").unwrap(), Some(4.0));
}

#[test]
fn duration_found_among_other_lines() {
    let text = "Source: clip.mp4\nFrames: 96\nDuration: 3.84s\nResolution: 640x480\n";
    assert_eq!(parse_duration(text).unwrap(), Some(3.84));
}

#[test]
fn last_duration_line_wins() {
    let text = "Duration: 2s\nClip Duration: 4.5s\n";
    assert_eq!(parse_duration(text).unwrap(), Some(4.5));
}

#[test]
fn missing_duration_is_none() {
    assert_eq!(parse_duration("").unwrap(), None);
    assert_eq!(parse_duration("Source: clip.mp4").unwrap(), None);
}

#[test]
fn non_positive_duration_is_none() {
    assert_eq!(parse_duration("Duration: 0s").unwrap(), None);
    assert_eq!(parse_duration("Duration: -1.5s").unwrap(), None);
}

#[test]
fn malformed_duration_reports_line() {
    assert_eq!(
        parse_duration("Frames: 3\nDuration: soon").unwrap_err(),
        "Duration: soon"
    );
    assert_eq!(parse_duration("Duration").unwrap_err(), "Duration");
}

// ── AnimationMetadata::read ──────────────────────────────────────

#[test]
fn read_without_info_file() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let metadata = AnimationMetadata::read(directory.path()).unwrap();

    assert_eq!(metadata, AnimationMetadata::default());
    assert!(metadata.source.is_none());
    assert!(metadata.duration_seconds.is_none());
}

#[test]
fn read_with_info_file() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = directory.path().join(INFO_FILE_NAME);
    fs::write(&path, "Duration: 1.5s\n").unwrap();

    let metadata = AnimationMetadata::read(directory.path()).unwrap();
    assert_eq!(metadata.source.as_deref(), Some(path.as_path()));
    assert_eq!(metadata.duration_seconds, Some(1.5));
}

#[test]
fn read_malformed_info_file() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(directory.path().join(INFO_FILE_NAME), "Duration: ?\n").unwrap();

    let error = AnimationMetadata::read(directory.path()).unwrap_err();
    match error {
        ShelfaceError::InvalidMetadata { path, line } => {
            assert!(path.ends_with(INFO_FILE_NAME));
            assert_eq!(line, "Duration: ?");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
