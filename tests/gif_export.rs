//! GIF export tests (feature `gif`).

#![cfg(feature = "gif")]

use image::{AnimationDecoder, DynamicImage, Rgb, RgbImage, codecs::gif::GifDecoder};
use shelface::gif::frame_delay_for;
use shelface::{Face, GifOptions, ShowOptions, encode_gif_to_memory, export_gif};

fn sample_face(frame_count: u8, duration_seconds: Option<f64>) -> Face {
    let sources: Vec<DynamicImage> = (0..frame_count)
        .map(|tag| DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([tag * 40, 0, 0]))))
        .collect();
    let options = ShowOptions::new()
        .with_screen_size("32,24".parse().unwrap())
        .with_footer_height(4);
    Face::from_images("sample", &sources, duration_seconds, &options).unwrap()
}

#[test]
fn delay_follows_frame_rate() {
    assert_eq!(frame_delay_for(30.0), 3);
    assert_eq!(frame_delay_for(25.0), 4);
    assert_eq!(frame_delay_for(1.0), 100);
    assert_eq!(frame_delay_for(500.0), 1);
    assert_eq!(frame_delay_for(0.0), 1);
}

#[test]
fn options_builders_clamp() {
    let options = GifOptions::new().with_speed(99).with_frame_delay(0);
    assert_eq!(options.speed, 30);
    assert_eq!(options.frame_delay, Some(1));
    assert_eq!(GifOptions::default().speed, 10);
}

#[test]
fn encodes_every_frame_to_memory() {
    let face = sample_face(3, Some(0.3));
    let bytes = encode_gif_to_memory(&face, &GifOptions::new()).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));

    let decoder = GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].buffer().dimensions(), (32, 24));
    // 10 fps -> 10 centiseconds.
    let (numerator, denominator) = frames[0].delay().numer_denom_ms();
    assert_eq!(numerator / denominator, 100);
}

#[test]
fn writes_gif_file() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = directory.path().join("face.gif");

    export_gif(&path, &sample_face(2, None), &GifOptions::new().with_repeat(Some(1))).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
}
