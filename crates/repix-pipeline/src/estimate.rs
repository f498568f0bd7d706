//! Grid parameter estimation from detected lines.
//!
//! Consumes a set of straight lines in Hesse normal form and recovers
//! the similarity transform of the underlying pixel grid: its rotation
//! relative to the image axes, the pixel pitch (source pixels per art
//! pixel), and the sub-pitch translation of the grid origin.
//!
//! This is step 1 in the pipeline; the recovered [`GridParams`] drive
//! the grid sampler.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::types::{GridParams, Line, PipelineConfig, PipelineError};

/// Estimate the grid parameters from a set of detected lines.
///
/// The grid's quarter-turn symmetry makes angles beyond `[0, pi/2)`
/// redundant, so every line angle is reduced modulo `pi/2` before
/// averaging. The pitch is recovered from the distances between line
/// pairs: the one-art-pixel spacing repeats across many grid lines,
/// so the true pitch is the distance that recurs consistently while
/// spurious pair distances do not.
///
/// # Errors
///
/// Returns [`PipelineError::InsufficientLines`] if `lines` is empty.
/// Returns [`PipelineError::NoConsistentPitch`] if no candidate
/// distance lies inside the plausible pitch range with enough support;
/// the caller must not proceed with a degenerate pitch.
pub fn estimate(lines: &[Line], config: &PipelineConfig) -> Result<GridParams, PipelineError> {
    if lines.is_empty() {
        return Err(PipelineError::InsufficientLines);
    }

    let angle = angle_offset(lines);
    let pitch = pitch(lines, config)?;
    let (offset_x, offset_y) = axis_offsets(lines, pitch);

    Ok(GridParams {
        angle,
        pitch,
        offset_x,
        offset_y,
    })
}

/// Mean line angle reduced modulo a quarter turn.
///
/// Uses the Euclidean (always non-negative) remainder so negative
/// angles cannot bias the average.
#[allow(clippy::cast_precision_loss)]
fn angle_offset(lines: &[Line]) -> f64 {
    let sum: f64 = lines.iter().map(|line| line.theta.rem_euclid(FRAC_PI_2)).sum();
    sum / lines.len() as f64
}

/// Recover the pixel pitch from pairwise line distances.
///
/// Builds a frequency histogram over `||rho_a| - |rho_b||` for every
/// ordered line pair, quantized to `pitch_resolution` buckets. Self
/// pairs contribute zero-distance entries that the range filter
/// rejects. A bucket is a valid candidate when its value lies strictly
/// inside `(pitch_min, pitch_max)` and its count strictly exceeds
/// `pitch_support` times the line count. The result is the
/// support-weighted mean of the surviving candidates.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn pitch(lines: &[Line], config: &PipelineConfig) -> Result<f64, PipelineError> {
    let mut histogram: BTreeMap<u64, usize> = BTreeMap::new();
    for a in lines {
        for b in lines {
            let distance = (a.rho.abs() - b.rho.abs()).abs();
            let bucket = (distance / config.pitch_resolution).round() as u64;
            *histogram.entry(bucket).or_insert(0) += 1;
        }
    }

    let threshold = lines.len() as f64 * config.pitch_support;
    let mut weighted_sum = 0.0;
    let mut support = 0usize;
    for (&bucket, &count) in &histogram {
        let value = bucket as f64 * config.pitch_resolution;
        if value > config.pitch_min && value < config.pitch_max && count as f64 > threshold {
            weighted_sum += value * count as f64;
            support += count;
        }
    }

    if support == 0 {
        return Err(PipelineError::NoConsistentPitch {
            candidates: histogram.len(),
        });
    }
    Ok(weighted_sum / support as f64)
}

/// Per-axis sub-pitch offsets of the grid origin, in source pixels.
///
/// Lines with `theta < pi` contribute their `rho mod pitch` to the y
/// accumulator, the rest to x; both sums divide by the total line
/// count. Hough detectors emit `theta` in `[0, pi)`, which leaves the
/// x class empty — the sampler's centered-grid arithmetic depends on
/// exactly this split, so it is not "fixed" into a quarter-turn
/// classification.
#[allow(clippy::cast_precision_loss)]
fn axis_offsets(lines: &[Line], pitch: f64) -> (f64, f64) {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for line in lines {
        if line.theta < PI {
            sum_y += line.rho.rem_euclid(pitch);
        } else {
            sum_x += line.rho.rem_euclid(pitch);
        }
    }
    let count = lines.len() as f64;
    (sum_x / count, sum_y / count)
}
