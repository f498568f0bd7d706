//! Nearest-neighbor magnification for export.
//!
//! Replicates every pixel into a `factor x factor` block with no
//! blending, preserving pixel-art blockiness.
//!
//! This is step 7, the final stage of the pipeline.

use crate::types::RgbaImage;

/// Magnify `image` by an integer factor.
///
/// Every output pixel at `(x, y)` equals the input pixel at
/// `(x / factor, y / factor)`; a factor of 1 is the identity. A factor
/// of 0 is clamped to 1 (callers going through [`crate::process`] get
/// an `InvalidConfig` error instead).
#[must_use = "returns the magnified raster"]
pub fn upscale(image: &RgbaImage, factor: u32) -> RgbaImage {
    let factor = factor.max(1);
    RgbaImage::from_fn(image.width() * factor, image.height() * factor, |x, y| {
        *image.get_pixel(x / factor, y / factor)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[allow(clippy::cast_possible_truncation)]
    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([(x * 40) as u8, (y * 40) as u8, 5, 255]))
    }

    #[test]
    fn every_output_pixel_maps_to_its_source_block() {
        let image = gradient(3, 2);
        let scaled = upscale(&image, 4);
        assert_eq!(scaled.dimensions(), (12, 8));
        for (x, y, pixel) in scaled.enumerate_pixels() {
            assert_eq!(pixel, image.get_pixel(x / 4, y / 4), "pixel ({x}, {y})");
        }
    }

    #[test]
    fn factor_one_is_identity() {
        let image = gradient(5, 5);
        assert_eq!(upscale(&image, 1), image);
    }

    #[test]
    fn factor_zero_is_clamped_to_identity() {
        let image = gradient(4, 3);
        assert_eq!(upscale(&image, 0), image);
    }

    #[test]
    fn alpha_is_replicated_unchanged() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 0]));
        image.put_pixel(1, 0, Rgba([40, 50, 60, 255]));
        let scaled = upscale(&image, 2);
        assert_eq!(scaled.get_pixel(0, 0)[3], 0);
        assert_eq!(scaled.get_pixel(1, 1)[3], 0);
        assert_eq!(scaled.get_pixel(2, 0)[3], 255);
        assert_eq!(scaled.get_pixel(3, 1)[3], 255);
    }
}
