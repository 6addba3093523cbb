//! Frame rate derivation and frame interval tests.

use std::time::Duration;

use shelface::{AnimationTiming, DEFAULT_FRAME_RATE, ShelfaceError, derive_frame_rate, frame_interval};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ── derive_frame_rate ────────────────────────────────────────────

#[test]
fn rate_spreads_frames_over_recorded_duration() {
    assert_close(derive_frame_rate(90, Some(3.0)).unwrap(), 30.0);
    assert_close(derive_frame_rate(1, Some(0.1)).unwrap(), 10.0);
    assert_close(derive_frame_rate(48, Some(4.0)).unwrap(), 12.0);
}

#[test]
fn rate_defaults_without_duration() {
    assert_eq!(derive_frame_rate(50, None).unwrap(), DEFAULT_FRAME_RATE);
    assert_eq!(DEFAULT_FRAME_RATE, 30.0);
}

#[test]
fn rate_ignores_unusable_durations() {
    for duration in [0.0, -2.5, f64::NAN, f64::INFINITY] {
        assert_eq!(
            derive_frame_rate(12, Some(duration)).unwrap(),
            DEFAULT_FRAME_RATE,
            "duration {duration}",
        );
    }
}

#[test]
fn rate_requires_frames() {
    assert!(matches!(
        derive_frame_rate(0, Some(3.0)),
        Err(ShelfaceError::EmptySequence(_))
    ));
    assert!(derive_frame_rate(0, None).is_err());
}

#[test]
fn timing_record_delegates() {
    let timing = AnimationTiming::new(90, Some(3.0));
    assert_close(timing.frame_rate().unwrap(), 30.0);
    assert!(AnimationTiming::new(0, None).frame_rate().is_err());
}

// ── frame_interval ───────────────────────────────────────────────

#[test]
fn interval_truncates_to_whole_milliseconds() {
    assert_eq!(frame_interval(30.0), Duration::from_millis(33));
    assert_eq!(frame_interval(25.0), Duration::from_millis(40));
    assert_eq!(frame_interval(0.5), Duration::from_millis(2000));
}

#[test]
fn interval_never_drops_below_one_millisecond() {
    assert_eq!(frame_interval(5000.0), Duration::from_millis(1));
}

#[test]
fn interval_falls_back_for_invalid_rates() {
    assert_eq!(frame_interval(0.0), Duration::from_millis(33));
    assert_eq!(frame_interval(f64::NAN), Duration::from_millis(33));
}
