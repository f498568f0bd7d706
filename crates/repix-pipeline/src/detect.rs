//! Line detection front-end: grayscale, blur, Canny, Hough.
//!
//! Wraps [`imageproc::edges::canny`] and
//! [`imageproc::hough::detect_lines`] to turn a photograph into the
//! Hesse-normal-form lines the grid estimator consumes. The core
//! pipeline treats lines as an opaque input; this module is the bundled
//! collaborator the CLI uses, and callers are free to supply lines from
//! any other detector instead.

use image::GrayImage;
use imageproc::hough::{LineDetectionOptions, detect_lines};
use serde::{Deserialize, Serialize};

use crate::types::Line;

/// Minimum allowed Canny threshold.
///
/// A zero low threshold turns every gradient pixel into a potential
/// edge, flooding the Hough accumulator.
pub const MIN_THRESHOLD: f32 = 1.0;
const _: () = assert!(MIN_THRESHOLD > 0.0);

/// Configuration for the line-detection front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDetectConfig {
    /// Gaussian blur sigma applied before edge detection.
    pub blur_sigma: f32,

    /// Canny low threshold. Clamped to at least [`MIN_THRESHOLD`] and
    /// at most `canny_high`.
    pub canny_low: f32,

    /// Canny high threshold. Clamped to at least [`MIN_THRESHOLD`].
    pub canny_high: f32,

    /// Minimum Hough accumulator votes for a detected line.
    pub vote_threshold: u32,

    /// Suppression radius around each detected line, in accumulator
    /// cells; discards near-duplicate lines.
    pub suppression_radius: u32,
}

impl Default for LineDetectConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 1.4,
            canny_low: 20.0,
            canny_high: 50.0,
            vote_threshold: 100,
            suppression_radius: 8,
        }
    }
}

/// Detect straight grid lines in a grayscale photograph.
///
/// Runs Gaussian blur, Canny edge detection, and a Hough transform,
/// then converts the polar results to [`Line`] (degrees to radians).
/// The result can be empty; the grid estimator reports
/// `InsufficientLines` in that case.
#[must_use = "returns the detected lines"]
pub fn detect_grid_lines(gray: &GrayImage, config: &LineDetectConfig) -> Vec<Line> {
    let blurred = imageproc::filter::gaussian_blur_f32(gray, config.blur_sigma);

    let high = config.canny_high.max(MIN_THRESHOLD);
    let low = config.canny_low.max(MIN_THRESHOLD).min(high);
    let edges = imageproc::edges::canny(&blurred, low, high);

    let options = LineDetectionOptions {
        vote_threshold: config.vote_threshold,
        suppression_radius: config.suppression_radius,
    };
    detect_lines(&edges, options)
        .into_iter()
        .map(|polar| Line::new(f64::from(polar.r), f64::from(polar.angle_in_degrees).to_radians()))
        .collect()
}
