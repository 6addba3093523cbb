use std::{path::PathBuf, sync::Arc};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use shelface::{
    AnimationLibrary, DirectorySink, Face, FaceType, FooterReservation, MaskOptions,
    PlacementPolicy, ProgressCallback, ProgressInfo, RANDOM_FACE, ScreenSize, ShowOptions,
    Slideshow, derive_frame_rate, mask_directory, validate_animation,
};

const CLI_AFTER_HELP: &str = "Examples:\n  shelface show --face-name wink --bottom-text \"Hello\"\n  shelface show --screen-size 800,480 --resize-method pad --export-dir frames\n  shelface mask --input-dir data/input --mask data/mask.png\n  shelface info wink --json\n  shelface completions zsh > _shelface";

const DEFAULT_ANIMATIONS_DIR: &str = "assets/animations";

#[derive(Debug, Parser)]
#[command(
    name = "shelface",
    version,
    about = "Show animated faces and mask image folders",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show debug logging output.
    #[arg(long, global = true)]
    verbose: bool,

    /// Show a progress bar while frames load or images are masked.
    #[arg(long, global = true)]
    progress: bool,

    /// Directory holding one subdirectory per animation.
    #[arg(long, global = true, default_value = DEFAULT_ANIMATIONS_DIR)]
    animations_dir: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prepare a face and play it.
    #[command(
        about = "Show a face",
        after_help = "Press q or Escape to quit.\n\nExamples:\n  shelface show\n  shelface show -t still -n wink -r pad -s 1280,720 -b \"Back soon\""
    )]
    Show {
        /// Face type: still | animated.
        #[arg(short = 't', long, default_value = "animated")]
        face_type: String,
        /// Animation name, or "random".
        #[arg(short = 'n', long, default_value = RANDOM_FACE)]
        face_name: String,
        /// Placement policy: pad | resize | resize_pad.
        #[arg(short = 'r', long, default_value = "resize_pad")]
        resize_method: String,
        /// Canvas size as "W,H", or "full".
        #[arg(short = 's', long, default_value = "full")]
        screen_size: String,
        /// Caption drawn in the footer strip.
        #[arg(short = 'b', long)]
        bottom_text: Option<String>,
        /// Height of the footer strip in pixels.
        #[arg(long, default_value_t = FooterReservation::DEFAULT_HEIGHT)]
        bottom_text_height: u32,
        /// TrueType font file for the caption (default: embedded DejaVu Sans).
        #[arg(long)]
        font: Option<PathBuf>,
        /// Write frames as numbered PNGs to this directory instead of a window.
        #[arg(long)]
        export_dir: Option<PathBuf>,
        /// How many full loops to write with --export-dir.
        #[arg(long, default_value_t = 1)]
        cycles: usize,
        #[cfg(feature = "gif")]
        /// Write the face as an animated GIF instead of a window.
        #[arg(long)]
        gif: Option<PathBuf>,
    },

    /// Black out the masked region of every image in a folder.
    #[command(
        about = "Mask a folder of images",
        after_help = "Examples:\n  shelface mask\n  shelface mask -i shots -m mask.png --out masked --progress"
    )]
    Mask {
        /// Folder of .png/.jpg/.jpeg images.
        #[arg(short = 'i', long, default_value = "data/input")]
        input_dir: PathBuf,
        /// Grayscale mask; pure white pixels are zeroed.
        #[arg(short = 'm', long, default_value = "data/mask.png")]
        mask: PathBuf,
        /// Output folder. Defaults to "output" next to the input folder.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the available animations.
    #[command(about = "List animations")]
    List,

    /// Print frame count, duration and frame rate of an animation.
    #[command(
        about = "Print animation details",
        after_help = "Examples:\n  shelface info wink\n  shelface info wink --json"
    )]
    Info {
        /// Animation name.
        name: String,

        /// Output details as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check an animation against a canvas and print a report.
    #[command(
        about = "Validate an animation",
        after_help = "Examples:\n  shelface validate wink\n  shelface validate wink -s 800,480 -r pad"
    )]
    Validate {
        /// Animation name.
        name: String,
        /// Placement policy: pad | resize | resize_pad.
        #[arg(short = 'r', long, default_value = "resize_pad")]
        resize_method: String,
        /// Canvas size as "W,H", or "full".
        #[arg(short = 's', long, default_value = "full")]
        screen_size: String,
        /// Height of the footer strip in pixels.
        #[arg(long, default_value_t = FooterReservation::DEFAULT_HEIGHT)]
        bottom_text_height: u32,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Number of frames an export writes for `cycles` loops.
fn export_budget(frame_count: usize, cycles: usize) -> usize {
    frame_count.saturating_mul(cycles.max(1))
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new(message: &'static str) -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(0);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        bar.set_message(message);
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total {
            self.bar.set_length(total);
        }
        self.bar.set_position(info.current);
        if info.total.is_some_and(|total| info.current >= total) {
            self.bar.finish_with_message("done");
        }
    }
}

fn show_options(
    global: &GlobalOptions,
    face_type: &str,
    resize_method: &str,
    screen_size: &str,
    bottom_text: Option<String>,
    bottom_text_height: u32,
) -> Result<ShowOptions, Box<dyn std::error::Error>> {
    let mut options = ShowOptions::new()
        .with_face_type(face_type.parse::<FaceType>()?)
        .with_policy(resize_method.parse::<PlacementPolicy>()?)
        .with_screen_size(screen_size.parse::<ScreenSize>()?)
        .with_footer_height(bottom_text_height);

    if let Some(text) = bottom_text {
        options = options.with_footer_text(text);
    }
    if global.progress {
        options = options.with_progress(Arc::new(TerminalProgress::new("loading frames")?));
    }
    Ok(options)
}

#[cfg(feature = "window")]
fn play_in_window(face: &Face, screen_size: &str) -> Result<(), Box<dyn std::error::Error>> {
    let fullscreen = screen_size.parse::<ScreenSize>()? == ScreenSize::Full;
    let mut sink = shelface::WindowSink::open(face.canvas, fullscreen)?;
    let summary = Slideshow::from_face(face).run(&mut sink, None)?;
    log::debug!("{summary:?}");
    Ok(())
}

#[cfg(not(feature = "window"))]
fn play_in_window(_face: &Face, _screen_size: &str) -> Result<(), Box<dyn std::error::Error>> {
    Err("no display available: rebuild with the `window` feature or pass --export-dir".into())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match cli.command {
        Commands::Show {
            face_type,
            face_name,
            resize_method,
            screen_size,
            bottom_text,
            bottom_text_height,
            font,
            export_dir,
            cycles,
            #[cfg(feature = "gif")]
            gif,
        } => {
            let mut options = show_options(
                &cli.global,
                &face_type,
                &resize_method,
                &screen_size,
                bottom_text,
                bottom_text_height,
            )?;
            if let Some(path) = font {
                options = options.with_font_path(path);
            }
            let library = AnimationLibrary::open(&cli.global.animations_dir)?;
            let face = Face::prepare(&library, &face_name, &options)?;

            eprintln!(
                "{} {} ({}, {} frame(s) @ {:.2} fps on {})",
                "face:".cyan().bold(),
                face.name,
                face.face_type,
                face.frames.len(),
                face.frame_rate,
                face.canvas,
            );

            #[cfg(feature = "gif")]
            if let Some(path) = gif {
                shelface::export_gif(&path, &face, &shelface::GifOptions::new())?;
                println!("{} {}", "saved".green().bold(), path.display());
                return Ok(());
            }

            if let Some(directory) = export_dir {
                let mut sink =
                    DirectorySink::new(&directory, export_budget(face.frames.len(), cycles))?;
                Slideshow::from_face(&face).run(&mut sink, None)?;
                println!(
                    "{} {}",
                    "success:".green().bold(),
                    format!("Wrote {} frame(s) to {}", sink.written(), directory.display())
                        .green()
                );
                return Ok(());
            }

            play_in_window(&face, &screen_size)?;
        }

        Commands::Mask {
            input_dir,
            mask,
            out,
        } => {
            let mut options = MaskOptions::new();
            if let Some(out) = out {
                options = options.with_output_dir(out);
            }
            if cli.global.progress {
                options = options.with_progress(Arc::new(TerminalProgress::new("masking")?));
            }

            let report = mask_directory(&input_dir, &mask, &options)?;
            if report.processed == 0 {
                eprintln!(
                    "{} {}",
                    "warning:".yellow().bold(),
                    format!("no images found in {}", input_dir.display()).yellow()
                );
            }
            println!(
                "{} {}",
                "success:".green().bold(),
                format!(
                    "Masked {} image(s) into {} ({} skipped)",
                    report.processed,
                    report.output_dir.display(),
                    report.skipped
                )
                .green()
            );
        }

        Commands::List => {
            let library = AnimationLibrary::open(&cli.global.animations_dir)?;
            let names = library.names()?;
            if names.is_empty() {
                eprintln!(
                    "{} {}",
                    "warning:".yellow().bold(),
                    format!("no animations in {}", library.root().display()).yellow()
                );
            }
            for name in names {
                println!("{name}");
            }
        }

        Commands::Info { name, json } => {
            let library = AnimationLibrary::open(&cli.global.animations_dir)?;
            let name = library.resolve(&name)?;
            let frame_count = library.frame_paths(&name)?.len();
            let metadata = library.metadata(&name)?;
            let frame_rate = derive_frame_rate(frame_count, metadata.duration_seconds)?;

            if json {
                let payload = json!({
                    "name": name,
                    "frame_count": frame_count,
                    "duration_seconds": metadata.duration_seconds,
                    "frame_rate": frame_rate,
                    "info_file": metadata.source.as_ref().map(|path| path.display().to_string()),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Name: {name}");
                println!("Frames: {frame_count}");
                match metadata.duration_seconds {
                    Some(duration) => println!("Duration: {duration:.2}s"),
                    None => println!("Duration: unknown"),
                }
                println!("Frame rate: {frame_rate:.2} fps");
            }
        }

        Commands::Validate {
            name,
            resize_method,
            screen_size,
            bottom_text_height,
        } => {
            let library = AnimationLibrary::open(&cli.global.animations_dir)?;
            let policy = resize_method.parse::<PlacementPolicy>()?;
            let canvas = screen_size.parse::<ScreenSize>()?.resolve()?;
            let report = validate_animation(
                &library,
                &name,
                canvas,
                policy,
                FooterReservation::new(bottom_text_height),
            );
            print!("{report}");
        }

        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "shelface", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
