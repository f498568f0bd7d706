//! Shared types for the repix grid-recovery pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `RgbImage` so downstream crates can reference pipeline
/// rasters without depending on `image` directly.
pub use image::RgbImage;

/// Re-export `RgbaImage` for the transparent-background output rasters.
pub use image::RgbaImage;

/// Re-export `GrayImage` for the line-detection front-end.
pub use image::GrayImage;

/// Pure background white, the default color of unsampled grid cells.
pub const BACKGROUND: image::Rgb<u8> = image::Rgb([255, 255, 255]);

/// A detected straight line in Hesse normal form.
///
/// `rho` is the signed perpendicular distance from the image origin to
/// the line in source pixels; `theta` is the line's angle in radians,
/// in `[0, pi)`. Lines are produced by an external detector (for
/// example [`crate::detect::detect_grid_lines`]) and consumed as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Signed perpendicular distance from the origin, in source pixels.
    pub rho: f64,
    /// Angle of the line normal in radians, `[0, pi)`.
    pub theta: f64,
}

impl Line {
    /// Create a new line.
    #[must_use]
    pub const fn new(rho: f64, theta: f64) -> Self {
        Self { rho, theta }
    }
}

/// Recovered similarity-transform parameters of the pixel grid.
///
/// Computed once per run by [`crate::estimate::estimate`] and immutable
/// thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    /// Rotation of the grid relative to the image axes, radians,
    /// `[0, pi/2)`.
    pub angle: f64,
    /// Source pixels per art pixel. Always positive.
    pub pitch: f64,
    /// Sub-pitch translation of the grid origin along x, in source
    /// pixels. The sampler divides by `pitch` to obtain grid units.
    pub offset_x: f64,
    /// Sub-pitch translation of the grid origin along y, in source
    /// pixels.
    pub offset_y: f64,
}

/// An integer pixel coordinate.
///
/// The sampler records the source-image coordinates it read from, for
/// diagnostic overlays; the border tracer uses coordinates in the
/// low-resolution raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoord {
    /// Horizontal position (pixels from left edge).
    pub x: u32,
    /// Vertical position (pixels from top edge).
    pub y: u32,
}

impl PixelCoord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A binary background mask, one pixel of padding on every side of its
/// source raster (so a mask for a `w x h` raster is `(w+2) x (h+2)`).
///
/// `true` means "belongs to the background region reachable from the
/// seed corner".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl Mask {
    /// Create an all-clear mask of the given (padded) dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![false; width as usize * height as usize],
        }
    }

    /// Padded mask width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Padded mask height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw mask value at padded coordinates.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Set the mask at padded coordinates.
    pub fn set(&mut self, x: u32, y: u32) {
        self.data[y as usize * self.width as usize + x as usize] = true;
    }

    /// Whether raster pixel `(x, y)` is marked as background.
    ///
    /// Applies the one-pixel padding offset, matching the flood-fill
    /// convention that the mask border frames the raster.
    #[must_use]
    pub fn marks(&self, x: u32, y: u32) -> bool {
        self.get(x + 1, y + 1)
    }
}

/// Configuration for the grid-recovery pipeline.
///
/// All parameters have documented defaults matching the reference
/// behavior. Invariants (`pitch_min < pitch_max`, nonzero grid
/// dimensions and upscale factor) are checked by [`crate::process`],
/// which returns [`PipelineError::InvalidConfig`] on violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Width of the recovered art grid in art pixels. Chosen generously
    /// large so artwork of unknown size fits with margin to spare.
    pub grid_width: u32,

    /// Height of the recovered art grid in art pixels.
    pub grid_height: u32,

    /// Lower bound (exclusive) of the plausible pixel pitch, in source
    /// pixels per art pixel.
    pub pitch_min: f64,

    /// Upper bound (exclusive) of the plausible pixel pitch.
    pub pitch_max: f64,

    /// Fraction of the input line count that a candidate pitch distance
    /// must exceed in occurrence count to be accepted. Empirically
    /// chosen, not derived from the domain.
    pub pitch_support: f64,

    /// Bucket width for the pairwise-distance histogram, in source
    /// pixels. Should match the rho quantization of the line detector.
    pub pitch_resolution: f64,

    /// Per-channel tolerance for the background flood fill. A neighbor
    /// joins the region when every channel differs by at most this much
    /// from the pixel it is grown from.
    pub background_tolerance: u8,

    /// Integer magnification factor for the export raster. Must be at
    /// least 1.
    pub upscale_factor: u32,

    /// RGBA color painted over traced border pixels.
    pub outline_color: [u8; 4],
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            grid_width: 200,
            grid_height: 200,
            pitch_min: 5.0,
            pitch_max: 20.0,
            pitch_support: 0.5,
            pitch_resolution: 0.5,
            background_tolerance: 10,
            upscale_factor: 16,
            outline_color: [255, 255, 255, 255],
        }
    }
}

/// Result of running the pipeline with all intermediate stage outputs
/// preserved.
///
/// Each field captures the output of one pipeline stage, enabling
/// stage-by-stage previews (the CLI's `--stages` dump). Rasters are
/// owned; the pipeline transfers them linearly rather than aliasing.
#[derive(Debug, Clone)]
pub struct StagedResult {
    /// Stage 1: recovered grid parameters.
    pub params: GridParams,
    /// Stage 2: the photograph resampled onto the recovered grid.
    pub sampled: RgbImage,
    /// Stage 2: source coordinates the sampler read, for overlays.
    pub sample_points: Vec<PixelCoord>,
    /// Stage 3: bounding-box crop with a one-pixel white margin.
    pub cropped: RgbImage,
    /// Stage 4: background mask (padded one pixel per side).
    pub mask: Mask,
    /// Stage 5: transparent-background cutout.
    pub cutout: RgbaImage,
    /// Stage 6: border pixel set discovered by the tracer.
    pub border: std::collections::HashSet<PixelCoord>,
    /// Stage 6: cutout with the border painted in the outline color.
    pub outlined: RgbaImage,
    /// Stage 7: final magnified export raster.
    pub upscaled: RgbaImage,
}

/// Errors that can occur during pipeline processing.
///
/// Every error is fatal for the run: the pipeline is deterministic and
/// pure, so a failure recurs identically on the same input. The
/// pipeline never emits a partially constructed raster.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// No lines were supplied to the grid estimator.
    #[error("no lines supplied to the grid estimator")]
    InsufficientLines,

    /// No pairwise line distance satisfied the pitch range and support
    /// thresholds.
    #[error("no consistent pixel pitch among {candidates} candidate distances")]
    NoConsistentPitch {
        /// Number of distinct candidate distances examined.
        candidates: usize,
    },

    /// The cropper found no pixel differing from background white.
    #[error("image contains no foreground pixels")]
    EmptyImage,

    /// Pipeline configuration is invalid.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}
