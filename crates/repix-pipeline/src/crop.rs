//! Bounding-box crop with a one-pixel background margin.
//!
//! Scans the resampled raster for pixels that differ from background
//! white, crops to the minimal enclosing box, and adds one pixel of
//! white margin on every side so the downstream flood fill always has a
//! known-background corner to seed from.
//!
//! This is step 3 in the pipeline, between sampling and segmentation.

use crate::types::{BACKGROUND, PipelineError, RgbImage};

/// Crop `raster` to its non-white content plus a one-pixel white margin.
///
/// Margin reads that would fall outside the input raster produce
/// background white, so content touching the raster edge still comes
/// out framed.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyImage`] if every pixel is background
/// white — the bounding box degenerates and there is nothing to crop to.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn crop_to_content(raster: &RgbImage) -> Result<RgbImage, PipelineError> {
    let (width, height) = raster.dimensions();
    let mut left = width;
    let mut right = 0;
    let mut top = height;
    let mut bottom = 0;
    let mut found = false;

    for (x, y, pixel) in raster.enumerate_pixels() {
        if *pixel != BACKGROUND {
            found = true;
            left = left.min(x);
            right = right.max(x);
            top = top.min(y);
            bottom = bottom.max(y);
        }
    }
    if !found {
        return Err(PipelineError::EmptyImage);
    }

    let crop_w = right - left + 3;
    let crop_h = bottom - top + 3;
    let cropped = RgbImage::from_fn(crop_w, crop_h, |x, y| {
        // Shift by (left - 1, top - 1); the borrow of one pixel forms
        // the margin.
        let src_x = i64::from(x) + i64::from(left) - 1;
        let src_y = i64::from(y) + i64::from(top) - 1;
        if src_x >= 0 && src_y >= 0 && src_x < i64::from(width) && src_y < i64::from(height) {
            *raster.get_pixel(src_x as u32, src_y as u32)
        } else {
            BACKGROUND
        }
    });
    Ok(cropped)
}
