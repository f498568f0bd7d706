//! Background segmentation by tolerance-bounded region growth.
//!
//! Flood-fills from the top-left corner of the cropped raster — known
//! background by construction, thanks to the cropper's white margin —
//! and marks every tolerance-connected pixel as background in a padded
//! [`Mask`].
//!
//! This is step 4 in the pipeline, between cropping and compositing.

use crate::types::{Mask, RgbImage};

/// Grow the background region from the `(0, 0)` seed corner.
///
/// A 4-connected neighbor joins the region when each of its color
/// channels differs by at most `tolerance` from the pixel it is grown
/// from (not from the seed), so gradual gradients are followed while
/// hard edges stop the fill. Channels are compared independently; all
/// three must be within bound.
///
/// The returned mask is one pixel larger than `raster` on every side,
/// following the usual flood-fill padding convention; use
/// [`Mask::marks`] to query raster coordinates.
///
/// The fill uses an explicit work stack: recursion depth would
/// otherwise grow with the raster area.
#[must_use = "returns the background mask"]
pub fn background_mask(raster: &RgbImage, tolerance: u8) -> Mask {
    let (width, height) = raster.dimensions();
    let mut mask = Mask::new(width + 2, height + 2);
    if width == 0 || height == 0 {
        return mask;
    }

    let mut stack = vec![(0u32, 0u32)];
    mask.set(1, 1);

    while let Some((x, y)) = stack.pop() {
        let from = raster.get_pixel(x, y);
        let mut visit = |nx: u32, ny: u32| {
            if mask.get(nx + 1, ny + 1) {
                return;
            }
            let neighbor = raster.get_pixel(nx, ny);
            let within = from
                .0
                .iter()
                .zip(neighbor.0.iter())
                .all(|(&a, &b)| a.abs_diff(b) <= tolerance);
            if within {
                mask.set(nx + 1, ny + 1);
                stack.push((nx, ny));
            }
        };
        if x > 0 {
            visit(x - 1, y);
        }
        if x + 1 < width {
            visit(x + 1, y);
        }
        if y > 0 {
            visit(x, y - 1);
        }
        if y + 1 < height {
            visit(x, y + 1);
        }
    }

    mask
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::Rgb;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([200, 0, 0]);

    #[test]
    fn uniform_raster_is_all_background() {
        let raster = RgbImage::from_pixel(5, 5, WHITE);
        let mask = background_mask(&raster, 10);
        for y in 0..5 {
            for x in 0..5 {
                assert!(mask.marks(x, y));
            }
        }
    }

    #[test]
    fn mask_is_padded_by_one_pixel_per_side() {
        let raster = RgbImage::from_pixel(5, 3, WHITE);
        let mask = background_mask(&raster, 10);
        assert_eq!(mask.width(), 7);
        assert_eq!(mask.height(), 5);
    }

    #[test]
    fn solid_block_is_excluded() {
        let raster = RgbImage::from_fn(7, 7, |x, y| {
            if (2..5).contains(&x) && (2..5).contains(&y) {
                RED
            } else {
                WHITE
            }
        });
        let mask = background_mask(&raster, 10);
        for y in 0..7 {
            for x in 0..7 {
                let inside = (2..5).contains(&x) && (2..5).contains(&y);
                assert_eq!(mask.marks(x, y), !inside, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn tolerance_follows_gradual_gradients() {
        // Each column darkens by 8 per step; within the default
        // tolerance of 10, the fill walks the whole gradient.
        #[allow(clippy::cast_possible_truncation)]
        let raster = RgbImage::from_fn(10, 1, |x, _| {
            let v = 255 - (x * 8) as u8;
            Rgb([v, v, v])
        });
        let mask = background_mask(&raster, 10);
        for x in 0..10 {
            assert!(mask.marks(x, 0), "column {x}");
        }
    }

    #[test]
    fn hard_step_stops_the_fill() {
        let raster = RgbImage::from_fn(10, 1, |x, _| if x < 5 { WHITE } else { RED });
        let mask = background_mask(&raster, 10);
        for x in 0..5 {
            assert!(mask.marks(x, 0));
        }
        for x in 5..10 {
            assert!(!mask.marks(x, 0));
        }
    }

    #[test]
    fn enclosed_holes_stay_unmarked() {
        // White hole fully enclosed by a red ring is unreachable from
        // the seed and stays foreground.
        let raster = RgbImage::from_fn(9, 9, |x, y| {
            if (3..6).contains(&x) && (3..6).contains(&y) {
                if x == 4 && y == 4 { WHITE } else { RED }
            } else {
                WHITE
            }
        });
        let mask = background_mask(&raster, 10);
        assert!(!mask.marks(4, 4));
        assert!(mask.marks(0, 0));
    }

    #[test]
    fn one_channel_out_of_bound_blocks_growth() {
        // Green and blue match exactly; red alone exceeds the
        // tolerance. All channels must be within bound.
        let raster = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([244, 255, 255])
            }
        });
        let mask = background_mask(&raster, 10);
        assert!(mask.marks(0, 0));
        assert!(!mask.marks(1, 0));

        let mask = background_mask(&raster, 11);
        assert!(mask.marks(1, 0));
    }
}
