//! Playback loop tests.
//!
//! A scripted sink replays a fixed sequence of key presses so the loop can be
//! driven without a display.

use std::collections::VecDeque;
use std::fs;
use std::time::Duration;

use image::{Rgb, RgbImage};
use shelface::{
    CancellationToken, DirectorySink, DisplaySink, KeyPress, ShelfaceError, Slideshow, StopReason,
};

/// Returns the scripted keys in order, then quits.
struct ScriptedSink {
    keys: VecDeque<Option<KeyPress>>,
    presented: Vec<u8>,
    timeouts: Vec<Duration>,
}

impl ScriptedSink {
    fn new(keys: impl IntoIterator<Item = Option<KeyPress>>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            presented: Vec::new(),
            timeouts: Vec::new(),
        }
    }
}

impl DisplaySink for ScriptedSink {
    fn present(&mut self, frame: &RgbImage) -> Result<(), ShelfaceError> {
        // Frames are tagged by their red channel.
        self.presented.push(frame.get_pixel(0, 0)[0]);
        Ok(())
    }

    fn wait_key(&mut self, timeout: Duration) -> Result<Option<KeyPress>, ShelfaceError> {
        self.timeouts.push(timeout);
        Ok(self.keys.pop_front().unwrap_or(Some(KeyPress::Quit)))
    }
}

struct FailingSink;

impl DisplaySink for FailingSink {
    fn present(&mut self, _frame: &RgbImage) -> Result<(), ShelfaceError> {
        Err(ShelfaceError::DisplayError("display unplugged".to_string()))
    }

    fn wait_key(&mut self, _timeout: Duration) -> Result<Option<KeyPress>, ShelfaceError> {
        Ok(None)
    }
}

fn tagged_frames(count: u8) -> Vec<RgbImage> {
    (0..count)
        .map(|tag| RgbImage::from_pixel(4, 4, Rgb([tag, 0, 0])))
        .collect()
}

// ── Slideshow ────────────────────────────────────────────────────

#[test]
fn frames_loop_in_order_until_quit() {
    let frames = tagged_frames(3);
    let mut sink = ScriptedSink::new([None, None, None, None, Some(KeyPress::Quit)]);

    let summary = Slideshow::new(&frames, 30.0).run(&mut sink, None).unwrap();

    assert_eq!(sink.presented, [0, 1, 2, 0, 1]);
    assert_eq!(summary.frames_shown, 5);
    assert_eq!(summary.completed_cycles, 1);
    assert_eq!(summary.stopped_by, StopReason::QuitKey);
}

#[test]
fn other_keys_do_not_stop_playback() {
    let frames = tagged_frames(2);
    let mut sink = ScriptedSink::new([
        Some(KeyPress::from_char('x')),
        Some(KeyPress::from_char(' ')),
        Some(KeyPress::from_char('Q')),
    ]);

    let summary = Slideshow::new(&frames, 30.0).run(&mut sink, None).unwrap();
    assert_eq!(sink.presented, [0, 1, 0]);
    assert_eq!(summary.completed_cycles, 1);
}

#[test]
fn single_frame_completes_a_cycle_per_frame() {
    let frames = tagged_frames(1);
    let mut sink = ScriptedSink::new([None, None, Some(KeyPress::Quit)]);

    let summary = Slideshow::new(&frames, 30.0).run(&mut sink, None).unwrap();
    assert_eq!(summary.frames_shown, 3);
    assert_eq!(summary.completed_cycles, 3);
}

#[test]
fn sink_waits_one_frame_interval() {
    let frames = tagged_frames(2);
    let slideshow = Slideshow::new(&frames, 25.0);
    assert_eq!(slideshow.interval(), Duration::from_millis(40));

    let mut sink = ScriptedSink::new([None, Some(KeyPress::Quit)]);
    slideshow.run(&mut sink, None).unwrap();
    assert_eq!(sink.timeouts, [Duration::from_millis(40); 2]);
}

#[test]
fn cancelled_before_start_shows_nothing() {
    let frames = tagged_frames(2);
    let token = CancellationToken::new();
    token.cancel();

    let mut sink = ScriptedSink::new([]);
    let summary = Slideshow::new(&frames, 30.0)
        .run(&mut sink, Some(&token))
        .unwrap();

    assert!(sink.presented.is_empty());
    assert_eq!(summary.frames_shown, 0);
    assert_eq!(summary.stopped_by, StopReason::Cancelled);
}

#[test]
fn empty_slideshow_is_rejected() {
    let mut sink = ScriptedSink::new([]);
    assert!(matches!(
        Slideshow::new(&[], 30.0).run(&mut sink, None),
        Err(ShelfaceError::EmptySequence(_))
    ));
}

#[test]
fn sink_errors_propagate() {
    let frames = tagged_frames(1);
    let result = Slideshow::new(&frames, 30.0).run(&mut FailingSink, None);
    assert!(matches!(result, Err(ShelfaceError::DisplayError(_))));
}

#[test]
fn runs_through_a_trait_object() {
    let frames = tagged_frames(2);
    let mut scripted = ScriptedSink::new([Some(KeyPress::Quit)]);
    let sink: &mut dyn DisplaySink = &mut scripted;

    let summary = Slideshow::new(&frames, 30.0).run(sink, None).unwrap();
    assert_eq!(summary.frames_shown, 1);
}

// ── KeyPress ─────────────────────────────────────────────────────

#[test]
fn quit_keys() {
    assert!(KeyPress::from_char('q').is_quit());
    assert!(KeyPress::from_char('Q').is_quit());
    assert!(KeyPress::from_char('\u{1b}').is_quit());
    assert_eq!(KeyPress::from_char('w'), KeyPress::Other('w'));
    assert!(!KeyPress::Other('w').is_quit());
}

// ── DirectorySink ────────────────────────────────────────────────

#[test]
fn directory_sink_writes_numbered_frames() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = directory.path().join("frames");
    let frames = tagged_frames(2);

    let mut sink = DirectorySink::new(&output, 5).unwrap();
    let summary = Slideshow::new(&frames, 30.0).run(&mut sink, None).unwrap();

    assert_eq!(sink.written(), 5);
    assert_eq!(summary.frames_shown, 5);
    assert_eq!(summary.completed_cycles, 2);
    assert_eq!(summary.stopped_by, StopReason::QuitKey);

    let mut names: Vec<String> = fs::read_dir(&output)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            "frame_000000.png",
            "frame_000001.png",
            "frame_000002.png",
            "frame_000003.png",
            "frame_000004.png",
        ]
    );

    let third = image::open(output.join("frame_000002.png")).unwrap().to_rgb8();
    assert_eq!(third.get_pixel(0, 0), &Rgb([0, 0, 0]));
    let fourth = image::open(output.join("frame_000003.png")).unwrap().to_rgb8();
    assert_eq!(fourth.get_pixel(0, 0), &Rgb([1, 0, 0]));
}

#[test]
fn directory_sink_writes_at_least_one_frame() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let frames = tagged_frames(3);

    let mut sink = DirectorySink::new(directory.path(), 0).unwrap();
    Slideshow::new(&frames, 30.0).run(&mut sink, None).unwrap();
    assert_eq!(sink.written(), 1);
}
