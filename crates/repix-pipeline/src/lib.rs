//! repix-pipeline: Pure pixel-art grid recovery (sans-IO).
//!
//! Recovers the original low-resolution pixel art from a photograph of
//! pixel art that is rotated relative to its true pixel axes:
//! grid parameter estimation -> grid sampling -> crop -> background
//! segmentation -> alpha compositing -> border tracing -> upscaling.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! rasters and a list of detected lines, and returns structured data.
//! File and terminal interaction live in the `repix` binary. The
//! [`detect`] module bundles a Canny + Hough line-detection front-end
//! for convenience, but the pipeline itself consumes lines as an
//! opaque input and works with any Hesse-normal-form detector.
//!
//! Only similarity transforms (rotation + uniform scale + translation)
//! are modeled; perspective distortion is out of scope.

pub mod composite;
pub mod crop;
pub mod detect;
pub mod diagnostic;
pub mod estimate;
pub mod outline;
pub mod sample;
pub mod segment;
pub mod types;
pub mod upscale;

pub use detect::{LineDetectConfig, detect_grid_lines};
pub use types::{
    GridParams, Line, Mask, PipelineConfig, PipelineError, PixelCoord, StagedResult,
};

/// Run the full grid-recovery pipeline.
///
/// Takes the decoded photograph, the detected lines, and a
/// configuration, and produces the final upscaled, outlined,
/// transparent-background raster.
///
/// # Pipeline steps
///
/// 1. Estimate grid rotation, pitch, and origin offset from the lines
/// 2. Resample the photograph onto the recovered grid
/// 3. Crop to content plus a one-pixel white margin
/// 4. Grow the background region from the margin corner
/// 5. Composite the artwork over a transparent background
/// 6. Trace and paint the one-pixel outline
/// 7. Upscale by block replication
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] for degenerate
/// configuration values, [`PipelineError::InsufficientLines`] or
/// [`PipelineError::NoConsistentPitch`] from estimation, and
/// [`PipelineError::EmptyImage`] when the sampled grid contains no
/// foreground. Failures propagate before any output is produced —
/// there is no partial result.
pub fn process(
    source: &types::RgbImage,
    lines: &[Line],
    config: &PipelineConfig,
) -> Result<types::RgbaImage, PipelineError> {
    Ok(process_staged(source, lines, config)?.upscaled)
}

/// Run the pipeline, preserving every intermediate stage output.
///
/// Same contract as [`process`]; the returned [`StagedResult`] carries
/// the recovered parameters and the raster produced by each stage, for
/// previews and diagnostics.
///
/// # Errors
///
/// See [`process`].
pub fn process_staged(
    source: &types::RgbImage,
    lines: &[Line],
    config: &PipelineConfig,
) -> Result<StagedResult, PipelineError> {
    validate(config)?;

    // 1. Grid parameters from the detected lines.
    let params = estimate::estimate(lines, config)?;

    // 2. Resample onto the recovered grid.
    let (sampled, sample_points) = sample::sample(source, &params, config);

    // 3. Crop to content plus margin.
    let cropped = crop::crop_to_content(&sampled)?;

    // 4. Background segmentation from the margin corner.
    let mask = segment::background_mask(&cropped, config.background_tolerance);

    // 5. Transparent-background cutout.
    let cutout = composite::apply_mask(&cropped, &mask);

    // 6. Border tracing; the tracer paints over a copy of its input.
    let border = outline::border_pixels(&cutout);
    let mut outlined = cutout.clone();
    outline::paint_outline(&mut outlined, &border, config.outline_color);

    // 7. Nearest-neighbor magnification.
    let upscaled = upscale::upscale(&outlined, config.upscale_factor);

    Ok(StagedResult {
        params,
        sampled,
        sample_points,
        cropped,
        mask,
        cutout,
        border,
        outlined,
        upscaled,
    })
}

fn validate(config: &PipelineConfig) -> Result<(), PipelineError> {
    if config.grid_width == 0 || config.grid_height == 0 {
        return Err(PipelineError::InvalidConfig(
            "grid dimensions must be nonzero".to_string(),
        ));
    }
    if config.upscale_factor == 0 {
        return Err(PipelineError::InvalidConfig(
            "upscale factor must be at least 1".to_string(),
        ));
    }
    if config.pitch_min >= config.pitch_max {
        return Err(PipelineError::InvalidConfig(format!(
            "pitch range ({}, {}) is empty",
            config.pitch_min, config.pitch_max,
        )));
    }
    if config.pitch_resolution <= 0.0 {
        return Err(PipelineError::InvalidConfig(
            "pitch resolution must be positive".to_string(),
        ));
    }
    Ok(())
}
