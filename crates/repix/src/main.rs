//! Recover clean pixel art from a photograph of rotated pixel art.
//!
//! Decodes the photograph, detects grid lines with a Canny + Hough
//! front-end, runs the grid-recovery pipeline, and writes the final
//! upscaled, outlined, transparent-background raster as a PNG.

use std::path::{Path, PathBuf};

use clap::Parser;
use image::{GrayImage, Luma};
use repix_pipeline::types::Mask;
use repix_pipeline::{LineDetectConfig, PipelineConfig, StagedResult, diagnostic};

/// Recover clean pixel art from a photograph of rotated pixel art.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input photograph path.
    input: PathBuf,

    /// Output image path (PNG recommended; the result has an alpha
    /// channel).
    #[arg(short, long)]
    output: PathBuf,

    /// Side length of the recovered art grid, in art pixels.
    #[arg(long, default_value_t = 200)]
    grid_size: u32,

    /// Lower bound (exclusive) of the plausible pixel pitch.
    #[arg(long, default_value_t = 5.0)]
    pitch_min: f64,

    /// Upper bound (exclusive) of the plausible pixel pitch.
    #[arg(long, default_value_t = 20.0)]
    pitch_max: f64,

    /// Fraction of the line count a pitch candidate's support must
    /// exceed.
    #[arg(long, default_value_t = 0.5)]
    pitch_support: f64,

    /// Per-channel background flood-fill tolerance.
    #[arg(long, default_value_t = 10)]
    tolerance: u8,

    /// Integer magnification factor for the export raster.
    #[arg(long, default_value_t = 16)]
    scale: u32,

    /// Outline color as "R,G,B" or "R,G,B,A".
    #[arg(long, value_name = "COLOR", default_value = "255,255,255,255")]
    outline_color: String,

    /// Gaussian blur sigma before edge detection.
    #[arg(long, default_value_t = 1.4)]
    blur_sigma: f32,

    /// Canny low threshold.
    #[arg(long, default_value_t = 20.0)]
    canny_low: f32,

    /// Canny high threshold.
    #[arg(long, default_value_t = 50.0)]
    canny_high: f32,

    /// Minimum Hough accumulator votes for a detected line.
    #[arg(long, default_value_t = 100)]
    votes: u32,

    /// Hough suppression radius (accumulator cells).
    #[arg(long, default_value_t = 8)]
    suppression: u32,

    /// Directory to write one PNG per intermediate pipeline stage.
    #[arg(long, value_name = "DIR")]
    stages: Option<PathBuf>,
}

/// Parse an outline color of the form "R,G,B" or "R,G,B,A".
fn parse_color(s: &str) -> Result<[u8; 4], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(format!("color must be 'R,G,B' or 'R,G,B,A', got: '{s}'"));
    }
    let mut color = [255u8; 4];
    for (slot, part) in color.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid color component '{part}': {e}"))?;
    }
    Ok(color)
}

/// Render the padded background mask as a grayscale image.
fn mask_image(mask: &Mask) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        if mask.get(x, y) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Write every intermediate stage raster into `dir`.
fn dump_stages(
    dir: &Path,
    photo: &image::RgbImage,
    lines: &[repix_pipeline::Line],
    staged: &StagedResult,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;

    let mut overlay = photo.clone();
    diagnostic::draw_lines(&mut overlay, lines);
    overlay.save(dir.join("1-lines.png"))?;

    let mut overlay = photo.clone();
    diagnostic::draw_sample_points(&mut overlay, &staged.sample_points);
    overlay.save(dir.join("2-sample-points.png"))?;

    staged.sampled.save(dir.join("3-sampled.png"))?;
    staged.cropped.save(dir.join("4-cropped.png"))?;
    mask_image(&staged.mask).save(dir.join("5-mask.png"))?;
    staged.cutout.save(dir.join("6-cutout.png"))?;
    staged.outlined.save(dir.join("7-outlined.png"))?;
    staged.upscaled.save(dir.join("8-upscaled.png"))?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let outline_color = parse_color(&args.outline_color).map_err(|e| format!("--outline-color: {e}"))?;

    eprintln!("Reading image from {}", args.input.display());
    let photo = image::open(&args.input)?;
    let rgb = photo.to_rgb8();
    let gray = photo.to_luma8();
    eprintln!("Photograph: {}x{}", rgb.width(), rgb.height());

    let detect_config = LineDetectConfig {
        blur_sigma: args.blur_sigma,
        canny_low: args.canny_low,
        canny_high: args.canny_high,
        vote_threshold: args.votes,
        suppression_radius: args.suppression,
    };
    eprintln!("Detecting grid lines...");
    let lines = repix_pipeline::detect_grid_lines(&gray, &detect_config);
    eprintln!("Detected {} lines", lines.len());

    let config = PipelineConfig {
        grid_width: args.grid_size,
        grid_height: args.grid_size,
        pitch_min: args.pitch_min,
        pitch_max: args.pitch_max,
        pitch_support: args.pitch_support,
        background_tolerance: args.tolerance,
        upscale_factor: args.scale,
        outline_color,
        ..PipelineConfig::default()
    };

    eprintln!("Recovering pixel grid...");
    let staged = repix_pipeline::process_staged(&rgb, &lines, &config)?;
    eprintln!(
        "Grid: angle {:.4} rad, pitch {:.3} px/art-pixel, art {}x{}",
        staged.params.angle,
        staged.params.pitch,
        staged.cropped.width(),
        staged.cropped.height(),
    );

    if let Some(dir) = &args.stages {
        eprintln!("Writing stage previews to {}", dir.display());
        dump_stages(dir, &rgb, &lines, &staged)?;
    }

    eprintln!("Saving to {}", args.output.display());
    staged.upscaled.save(&args.output)?;

    eprintln!("Done.");
    Ok(())
}
