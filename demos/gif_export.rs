//! Export a prepared face as an animated GIF.
//!
//! Usage: `cargo run --features gif --example gif_export -- [face_name] [W,H]`

#[cfg(feature = "gif")]
use shelface::{
    AnimationLibrary, Face, GifOptions, ShelfaceError, ShowOptions, encode_gif_to_memory,
    export_gif,
};

#[cfg(not(feature = "gif"))]
fn main() {
    eprintln!(
        "This example requires the `gif` feature: cargo run --features gif --example gif_export"
    );
}

#[cfg(feature = "gif")]
fn main() -> Result<(), ShelfaceError> {
    let mut args = std::env::args().skip(1);
    let face_name = args.next().unwrap_or_else(|| "random".to_string());
    let screen_size = args.next().unwrap_or_else(|| "480,320".to_string());

    let library = AnimationLibrary::open("assets/animations")?;
    let options = ShowOptions::new()
        .with_screen_size(screen_size.parse()?)
        .with_footer_height(40)
        .with_footer_text("shelface");
    let face = Face::prepare(&library, &face_name, &options)?;

    println!(
        "{}: {} frames on {} @ {:.2} fps",
        face.name,
        face.frames.len(),
        face.canvas,
        face.frame_rate
    );

    let output = "face.gif";
    export_gif(output, &face, &GifOptions::new())?;
    println!("GIF saved to {output}");

    // Also encode to memory, faster and lower quality.
    let bytes = encode_gif_to_memory(&face, &GifOptions::new().with_speed(30))?;
    println!("GIF in memory: {} bytes", bytes.len());

    Ok(())
}
