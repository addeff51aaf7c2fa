//! retouch: apply a set of edits to an image from the command line.
//!
//! Loads an image, runs it through one [`EditSession`] update with the
//! requested parameters and writes the rendered result. Useful for batch
//! scripts and for checking what a UI preset does to a given photo.
//!
//! # Usage
//!
//! ```text
//! retouch [OPTIONS] <INPUT> <OUTPUT>
//! retouch photo.jpg out.png --brightness 10 --saturation 1.3
//! retouch photo.jpg out.jpg --preset warm.json --quality 85 --print-params
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use retouch_core::encode::{encode_jpeg, encode_png};
use retouch_core::{EditSession, Image, ParameterSet, SessionConfig};

/// Apply non-destructive photo adjustments and export the result.
#[derive(Parser)]
#[command(name = "retouch", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP).
    input: PathBuf,

    /// Output path. The extension picks the format (.jpg/.jpeg or .png).
    output: PathBuf,

    /// Brightness offset (-100 to 100).
    #[arg(long, default_value_t = ParameterSet::DEFAULT_BRIGHTNESS, allow_negative_numbers = true)]
    brightness: i32,

    /// Contrast gain (0.0 to 3.0).
    #[arg(long, default_value_t = ParameterSet::DEFAULT_CONTRAST)]
    contrast: f32,

    /// Saturation gain (0.0 to 3.0).
    #[arg(long, default_value_t = ParameterSet::DEFAULT_SATURATION)]
    saturation: f32,

    /// Tone curve strength (-1.0 to 1.0).
    #[arg(long, default_value_t = ParameterSet::DEFAULT_CURVE_STRENGTH, allow_negative_numbers = true)]
    curve: f32,

    /// Blur kernel size (odd, 1 disables blur).
    #[arg(long, default_value_t = ParameterSet::DEFAULT_BLUR_RADIUS)]
    blur: u32,

    /// Unsharp mask amount (0.0 to 5.0).
    #[arg(long, default_value_t = ParameterSet::DEFAULT_SHARPEN_AMOUNT)]
    sharpen: f32,

    /// Unsharp mask kernel size (odd).
    #[arg(long, default_value_t = ParameterSet::DEFAULT_SHARPEN_RADIUS)]
    sharpen_radius: u32,

    /// JSON preset file with a parameter set (camelCase keys).
    ///
    /// When provided, all individual parameter flags are ignored. Missing
    /// keys take their identity value.
    #[arg(long)]
    preset: Option<PathBuf>,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Ignore the EXIF orientation tag when decoding.
    #[arg(long)]
    no_orientation: bool,

    /// Print the applied parameter set as JSON on stdout.
    #[arg(long)]
    print_params: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Export format chosen from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Result<Self, String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("jpg" | "jpeg") => Ok(Self::Jpeg),
            Some("png") => Ok(Self::Png),
            Some(other) => Err(format!("Unsupported output format: .{other}")),
            None => Err(format!(
                "Cannot infer output format from {}",
                path.display()
            )),
        }
    }
}

fn params_from_flags(cli: &Cli) -> ParameterSet {
    ParameterSet {
        brightness: cli.brightness,
        contrast: cli.contrast,
        saturation: cli.saturation,
        curve_strength: cli.curve,
        blur_radius: cli.blur,
        sharpen_amount: cli.sharpen,
        sharpen_radius: cli.sharpen_radius,
    }
}

fn parse_preset(json: &str) -> Result<ParameterSet, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid preset: {e}"))
}

fn params_from_cli(cli: &Cli) -> Result<ParameterSet, String> {
    match cli.preset {
        Some(ref path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
            parse_preset(&json)
        }
        None => Ok(params_from_flags(cli)),
    }
}

fn encode(image: &Image, format: OutputFormat, quality: u8) -> Result<Vec<u8>, String> {
    let result = match format {
        OutputFormat::Jpeg => encode_jpeg(image, quality),
        OutputFormat::Png => encode_png(image),
    };
    result.map_err(|e| e.to_string())
}

fn setup_logging(verbose: bool) -> Result<(), String> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| format!("Failed to initialize logging: {e}"))
}

fn run(cli: &Cli) -> Result<(), String> {
    let format = OutputFormat::from_path(&cli.output)?;
    let params = params_from_cli(cli)?;
    debug!("Requested parameters: {params:?}");

    let bytes = std::fs::read(&cli.input)
        .map_err(|e| format!("Error reading {}: {e}", cli.input.display()))?;

    let mut session = EditSession::with_config(SessionConfig {
        apply_orientation: !cli.no_orientation,
        ..SessionConfig::default()
    });
    session
        .load(&bytes)
        .map_err(|e| format!("Error loading {}: {e}", cli.input.display()))?;

    let rendered = session.update(&params).map_err(|e| e.to_string())?;
    let encoded = encode(rendered, format, cli.quality)?;

    std::fs::write(&cli.output, &encoded)
        .map_err(|e| format!("Error writing {}: {e}", cli.output.display()))?;
    info!(
        "Wrote {} ({} bytes, {} operations)",
        cli.output.display(),
        encoded.len(),
        session.pipeline().len()
    );

    if cli.print_params {
        let json = serde_json::to_string_pretty(&session.current_parameters())
            .map_err(|e| format!("Error serializing parameters: {e}"))?;
        println!("{json}");
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(msg) = setup_logging(cli.verbose) {
        eprintln!("{msg}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}
