//! Alpha compositing: cut the artwork out of its background.
//!
//! Combines the cropped raster with the background mask into an RGBA
//! raster — masked pixels become fully transparent, everything else
//! keeps its original color at full opacity.
//!
//! This is step 5 in the pipeline, between segmentation and border
//! tracing.

use crate::types::{Mask, RgbImage, RgbaImage};

/// Apply the background mask, producing a transparent-background copy.
///
/// Pure function: allocates the output raster and reads its inputs
/// without modification. The mask must come from the same raster (see
/// [`crate::segment::background_mask`]), i.e. be padded one pixel per
/// side.
#[must_use = "returns the transparent-background raster"]
pub fn apply_mask(raster: &RgbImage, mask: &Mask) -> RgbaImage {
    RgbaImage::from_fn(raster.width(), raster.height(), |x, y| {
        if mask.marks(x, y) {
            image::Rgba([0, 0, 0, 0])
        } else {
            let pixel = raster.get_pixel(x, y);
            image::Rgba([pixel[0], pixel[1], pixel[2], 255])
        }
    })
}
